use std::path::Path;

use anyhow::{Context, Result};

use crate::dialogue::markup::{PAUSE_MARKER, TAG_CLOSE, TAG_OPEN};
use crate::dialogue::types::{DEFAULT_BASE_DELAY, DEFAULT_BLIP_COOLDOWN};
use crate::dialogue::{BlipThrottler, MarkupScanner, PacingMultipliers, PacingPolicy, Typewriter};
use crate::logging::LogLevel;
use crate::propfile::load_propfile;

/// Default host frame rate for the demo runner
pub const DEFAULT_FPS: u32 = 60;

/// Engine options that can be set via CLI or config file
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Base delay between revealed units, in seconds
    pub base_delay: f64,
    /// Minimum seconds between voice blips
    pub blip_cooldown: f64,
    /// Punctuation and pause multipliers
    pub multipliers: PacingMultipliers,
    pub pause_marker: char,
    pub tag_open: char,
    pub tag_close: char,
    /// Fixed seed for blip clip/pitch selection
    pub seed: Option<u64>,
    /// Host frame rate
    pub fps: u32,
    pub log_level: LogLevel,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            blip_cooldown: DEFAULT_BLIP_COOLDOWN,
            multipliers: PacingMultipliers::default(),
            pause_marker: PAUSE_MARKER,
            tag_open: TAG_OPEN,
            tag_close: TAG_CLOSE,
            seed: None,
            fps: DEFAULT_FPS,
            log_level: LogLevel::Info,
        }
    }
}

impl Options {
    /// Apply one `key = value` setting
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_lowercase().as_str() {
            "base_delay" => self.base_delay = parse_seconds(value)?,
            "blip_cooldown" => self.blip_cooldown = parse_seconds(value)?,
            "comma_beats" => self.multipliers.comma = parse_beats(value)?,
            "terminal_beats" => self.multipliers.terminal = parse_beats(value)?,
            "colon_beats" => self.multipliers.colon = parse_beats(value)?,
            "pause_beats" => self.multipliers.pause = parse_beats(value)?,
            "ellipsis_beats" => self.multipliers.ellipsis = parse_beats(value)?,
            "pause_marker" => self.pause_marker = parse_marker(value)?,
            "tag_open" => self.tag_open = parse_marker(value)?,
            "tag_close" => self.tag_close = parse_marker(value)?,
            "seed" => self.seed = Some(value.parse().context("Invalid seed")?),
            "fps" => self.fps = parse_fps(value)?,
            "log_level" => self.log_level = value.parse()?,
            _ => log::warn!("Unknown config key '{}'", key),
        }
        Ok(())
    }

    /// Build the pacing policy
    pub fn pacing(&self) -> Result<PacingPolicy> {
        PacingPolicy::with_multipliers(self.base_delay, self.multipliers)
            .context("Invalid pacing settings")
    }

    /// Build the markup scanner
    pub fn scanner(&self) -> Result<MarkupScanner> {
        MarkupScanner::with_delimiters(self.pause_marker, self.tag_open, self.tag_close)
            .context("Invalid markup markers")
    }

    /// Build a typewriter from the pacing and scanner settings
    pub fn typewriter(&self) -> Result<Typewriter> {
        Ok(Typewriter::new(self.scanner()?, self.pacing()?))
    }

    /// Check settings that only fail in combination
    pub fn validate(&self) -> Result<()> {
        self.scanner()?;
        self.pacing()?;
        Ok(())
    }

    /// Build the blip throttler; seeded if a seed is set
    pub fn throttler(&self) -> Result<BlipThrottler> {
        let throttler = match self.seed {
            Some(seed) => BlipThrottler::with_seed(self.blip_cooldown, seed),
            None => BlipThrottler::new(self.blip_cooldown),
        };
        throttler.context("Invalid blip settings")
    }

    /// Seconds per host frame
    pub fn frame_delta(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }
}

/// Load configuration, starting from defaults
///
/// Without a path, defaults are returned unchanged.
pub fn load_config(path: Option<&Path>) -> Result<Options> {
    let mut options = Options::default();
    if let Some(path) = path {
        load_propfile(path, &mut |key, value| options.apply(key, value))?;
        options
            .validate()
            .with_context(|| format!("In {}", path.display()))?;
    }
    Ok(options)
}

/// Parse a non-negative duration in seconds
pub fn parse_seconds(s: &str) -> Result<f64> {
    let value: f64 = s.trim().parse().context("Invalid duration value")?;
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("Duration must be a non-negative number of seconds");
    }
    Ok(value)
}

/// Parse a non-negative multiple of the base delay
pub fn parse_beats(s: &str) -> Result<f64> {
    let value: f64 = s.trim().parse().context("Invalid beat count")?;
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("Beat count must be non-negative");
    }
    Ok(value)
}

/// Parse a single-character marker
pub fn parse_marker(s: &str) -> Result<char> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("Marker must be a single character, got '{}'", s),
    }
}

/// Parse a frame rate (1-1000)
pub fn parse_fps(s: &str) -> Result<u32> {
    let fps: u32 = s.trim().parse().context("Invalid frame rate")?;
    if fps == 0 || fps > 1000 {
        anyhow::bail!("Frame rate out of range (1 to 1000)");
    }
    Ok(fps)
}
