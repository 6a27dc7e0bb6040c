use anyhow::{Context, Result};
use clap::Parser;

use dialogue_engine::cli::Cli;
use dialogue_engine::config;
use dialogue_engine::dialogue::{
    Character, CharacterRegistry, ClipHandle, DialogueEngine, DialogueLine, DialogueTrigger,
    Expression, HeadlessAudio, HeadlessSurface, Phase, PitchRange, PortraitHandle, Portraits,
};
use dialogue_engine::input::InputPort;
use dialogue_engine::logging;

/// Give up if a session is still running after this many simulated seconds
const MAX_SESSION_SECONDS: f64 = 600.0;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = config::load_config(cli.config.as_deref())?;
    let options = cli.merge_into_options(options)?;
    logging::init(options.log_level);

    log::info!(
        "base delay {:.3}s, blip cooldown {:.3}s, {} fps",
        options.base_delay,
        options.blip_cooldown,
        options.fps
    );

    let mut lines = cli.script()?;
    if lines.is_empty() {
        lines = demo_script();
    }

    let mut engine = DialogueEngine::new(
        demo_registry()?,
        options.typewriter()?,
        options.throttler()?,
        HeadlessSurface::new(),
        HeadlessAudio::new(),
    );
    let input = InputPort::new();
    let press_every = cli.press_interval()?;
    let delta = options.frame_delta();

    let mut trigger = DialogueTrigger::one_shot(lines);
    if !trigger.fire(&mut engine) {
        log::warn!("Nothing to play");
        return Ok(());
    }

    let mut since_press = 0.0;
    let mut printed: Option<usize> = None;
    while engine.is_active() {
        engine.tick(delta, &input);

        if engine.phase() == Phase::Done && printed != Some(engine.sequencer().index()) {
            printed = Some(engine.sequencer().index());
            if let Some(update) = engine.display().last_update() {
                println!("{}: {}", update.speaker_name, update.visible_text);
            }
        }

        since_press += delta;
        if since_press >= press_every {
            since_press = 0.0;
            input.press();
        }

        if engine.clock().now() > MAX_SESSION_SECONDS {
            engine.abort();
            anyhow::bail!("Session did not finish within {} seconds", MAX_SESSION_SECONDS);
        }
    }

    log::info!(
        "Session finished after {} frames ({:.2}s), {} blips",
        engine.clock().frames(),
        engine.clock().now(),
        engine.audio().plays().len()
    );
    Ok(())
}

fn demo_registry() -> Result<CharacterRegistry> {
    let mut registry = CharacterRegistry::new();
    registry
        .register(
            Character::new("ada", "Ada")
                .with_portraits(Portraits {
                    neutral: Some(PortraitHandle(1)),
                    happy: Some(PortraitHandle(2)),
                    angry: Some(PortraitHandle(3)),
                    sad: None,
                })
                .with_voice(
                    vec![ClipHandle(10), ClipHandle(11), ClipHandle(12)],
                    PitchRange::new(0.95, 1.1)?,
                ),
        )
        .context("Failed to register demo characters")?;
    registry
        .register(
            Character::new("bram", "Bram").with_voice(vec![ClipHandle(20)], PitchRange::new(0.7, 0.8)?),
        )
        .context("Failed to register demo characters")?;
    Ok(registry)
}

fn demo_script() -> Vec<DialogueLine> {
    vec![
        DialogueLine::new("ada", "Hi|there..."),
        DialogueLine::new("bram", "Wait, please.").without_portrait(),
        DialogueLine::new("ada", "<b>Fine</b>: one|more|thing!").with_expression(Expression::Happy),
    ]
}
