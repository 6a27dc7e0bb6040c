use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{parse_fps, parse_seconds, Options};
use crate::dialogue::{DialogueLine, Expression};

/// Default seconds between synthetic advance presses
pub const DEFAULT_PRESS_INTERVAL: f64 = 0.5;

/// Headless dialogue runner
#[derive(Parser, Debug, Default)]
#[command(name = "dialogue-demo")]
#[command(version)]
#[command(about = "Plays dialogue lines through a headless typewriter with voice blips", long_about = None)]
pub struct Cli {
    /// Settings file (key = value)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base delay between characters
    #[arg(short = 'd', long, value_name = "SECONDS")]
    pub base_delay: Option<String>,

    /// Minimum interval between voice blips
    #[arg(short = 'b', long, value_name = "SECONDS")]
    pub blip_cooldown: Option<String>,

    /// Seed for voice clip and pitch selection
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Simulated frame rate
    #[arg(short, long, value_name = "FPS")]
    pub fps: Option<String>,

    /// Log level (nothing, user, error, warning, info, debug, all)
    #[arg(short = 'L', long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Dialogue line, may be given multiple times (SPEAKER[@EXPRESSION]=TEXT)
    #[arg(short, long = "line", value_name = "SPEAKER=TEXT")]
    pub lines: Vec<String>,

    /// Seconds between synthetic advance presses
    #[arg(short, long, value_name = "SECONDS")]
    pub press_every: Option<String>,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref delay) = self.base_delay {
            opts.base_delay = parse_seconds(delay).context("Invalid base delay")?;
        }

        if let Some(ref cooldown) = self.blip_cooldown {
            opts.blip_cooldown = parse_seconds(cooldown).context("Invalid blip cooldown")?;
        }

        if let Some(seed) = self.seed {
            opts.seed = Some(seed);
        }

        if let Some(ref fps) = self.fps {
            opts.fps = parse_fps(fps)?;
        }

        if let Some(ref level) = self.log_level {
            opts.log_level = level.parse()?;
        }

        Ok(opts)
    }

    /// Seconds between synthetic presses
    pub fn press_interval(&self) -> Result<f64> {
        match self.press_every {
            Some(ref s) => {
                let interval = parse_seconds(s).context("Invalid press interval")?;
                if interval == 0.0 {
                    anyhow::bail!("Press interval must be positive");
                }
                Ok(interval)
            }
            None => Ok(DEFAULT_PRESS_INTERVAL),
        }
    }

    /// Lines given on the command line
    pub fn script(&self) -> Result<Vec<DialogueLine>> {
        self.lines.iter().map(|s| Self::parse_line(s)).collect()
    }

    fn parse_line(s: &str) -> Result<DialogueLine> {
        let Some((head, text)) = s.split_once('=') else {
            anyhow::bail!("Invalid line: {}. Expected SPEAKER=TEXT", s);
        };
        let (speaker, expression) = match head.split_once('@') {
            Some((speaker, expression)) => (speaker, Expression::from_name(expression)),
            None => (head, Expression::Neutral),
        };
        let speaker = speaker.trim();
        if speaker.is_empty() {
            anyhow::bail!("Invalid line: {}. Speaker is empty", s);
        }
        Ok(DialogueLine::new(speaker, text).with_expression(expression))
    }
}
