//! Property tests for reveal, throttling and session invariants

use proptest::prelude::*;

use dialogue_engine::dialogue::{
    BlipThrottler, Character, CharacterRegistry, ClipHandle, DialogueEngine, DialogueLine,
    HeadlessAudio, HeadlessSurface, MarkupScanner, PacingPolicy, Phase, PitchRange, Typewriter,
};
use dialogue_engine::input::InputPort;

const D: f64 = 0.03;

fn typewriter() -> Typewriter {
    Typewriter::new(MarkupScanner::new(), PacingPolicy::new(D).unwrap())
}

fn engine() -> DialogueEngine<HeadlessSurface, HeadlessAudio> {
    engine_with_cooldown(0.1)
}

fn engine_with_cooldown(cooldown: f64) -> DialogueEngine<HeadlessSurface, HeadlessAudio> {
    let mut registry = CharacterRegistry::new();
    registry
        .register(Character::new("ada", "Ada").with_voice(
            vec![ClipHandle(1), ClipHandle(2)],
            PitchRange::new(0.8, 1.2).unwrap(),
        ))
        .unwrap();
    DialogueEngine::new(
        registry,
        typewriter(),
        BlipThrottler::with_seed(cooldown, 7).unwrap(),
        HeadlessSurface::new(),
        HeadlessAudio::new(),
    )
}

/// Line text drawn from letters, punctuation and markup characters
fn line_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            4 => proptest::char::range('a', 'z'),
            1 => Just(' '),
            1 => Just('.'),
            1 => Just(','),
            1 => Just('!'),
            1 => Just('|'),
            1 => Just('<'),
            1 => Just('>'),
            1 => Just('é'),
        ],
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

#[derive(Debug, Clone)]
enum Op {
    Tick(f64),
    Press,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0.0f64..0.5).prop_map(Op::Tick),
        1 => Just(Op::Press),
    ]
}

proptest! {
    #[test]
    fn prop_skip_shows_raw_text_without_pauses(text in line_text(), elapsed in 0.0f64..2.0) {
        let mut tw = typewriter();
        tw.begin(&text, 0.0);
        tw.step(elapsed);

        // A natural finish may already have collapsed ellipses
        if tw.phase() == Phase::Typing {
            prop_assert!(tw.skip());
            prop_assert_eq!(tw.visible_text(), text.replace('|', ""));
        }
        prop_assert_eq!(tw.phase(), Phase::Done);
    }

    #[test]
    fn prop_skip_from_start_matches_stripped_text(text in line_text()) {
        let mut tw = typewriter();
        tw.begin(&text, 0.0);
        prop_assert!(tw.skip());
        prop_assert_eq!(tw.visible_text(), text.replace('|', ""));
    }

    #[test]
    fn prop_ellipsis_collapses_in_one_step(
        prefix in "[a-z ,]{0,10}",
        suffix in "[a-z ,]{0,10}",
    ) {
        let text = format!("{}...{}", prefix, suffix);
        let mut tw = typewriter();
        tw.begin(&text, 0.0);
        let report = tw.step(1000.0);

        prop_assert!(report.finished);
        prop_assert_eq!(tw.visible_text(), format!("{}..{}", prefix, suffix));
        let ellipsis: Vec<_> = report.revealed.iter().filter(|r| r.consumed == 3).collect();
        prop_assert_eq!(ellipsis.len(), 1);
        prop_assert_eq!(ellipsis[0].appended.as_str(), "..");
    }

    #[test]
    fn prop_natural_reveal_is_prefix_monotone(
        text in line_text(),
        deltas in proptest::collection::vec(0.0f64..0.2, 1..60),
    ) {
        let mut tw = typewriter();
        tw.begin(&text, 0.0);
        let mut now = 0.0;
        let mut previous = String::new();
        for delta in deltas {
            now += delta;
            tw.step(now);
            let visible = tw.visible_text().to_string();
            prop_assert!(visible.starts_with(&previous));
            previous = visible;
        }
    }

    #[test]
    fn prop_blips_never_closer_than_cooldown(
        text in line_text(),
        deltas in proptest::collection::vec(0.0f64..0.3, 1..80),
        cooldown in 0.0f64..0.5,
    ) {
        let mut engine = engine_with_cooldown(cooldown);
        let input = InputPort::new();
        engine.start(vec![DialogueLine::new("ada", &text)]);

        // Every play in a tick is requested at that tick's clock time
        let mut fired_at = vec![engine.clock().now(); engine.audio().plays().len()];
        for delta in deltas {
            engine.tick(delta, &input);
            let new_plays = engine.audio().plays().len() - fired_at.len();
            if cooldown > 0.0 {
                prop_assert!(new_plays <= 1);
            }
            fired_at.extend(std::iter::repeat(engine.clock().now()).take(new_plays));
        }

        for pair in fired_at.windows(2) {
            prop_assert!(pair[1] - pair[0] >= cooldown);
        }
    }

    #[test]
    fn prop_session_index_stays_in_bounds(
        texts in proptest::collection::vec("[a-z|.]{0,8}", 1..5),
        ops in proptest::collection::vec(op(), 0..80),
    ) {
        let lines: Vec<DialogueLine> = texts.iter().map(|t| DialogueLine::new("ada", t)).collect();
        let count = lines.len();
        let mut engine = engine();
        let input = InputPort::new();
        prop_assert!(engine.start(lines));

        for op in ops {
            let was_last_done = engine.is_active()
                && engine.phase() == Phase::Done
                && engine.sequencer().index() == count - 1;

            match op {
                Op::Tick(delta) => engine.tick(delta, &input),
                Op::Press => {
                    input.press();
                    engine.tick(0.0, &input);
                }
            }

            if engine.is_active() {
                prop_assert!(engine.sequencer().index() < count);
                prop_assert_ne!(engine.phase(), Phase::Idle);
            } else {
                prop_assert!(engine.sequencer().session().lines().is_empty());
                prop_assert!(!engine.display().is_open());
            }

            if was_last_done {
                let pressed = matches!(op, Op::Press);
                prop_assert_eq!(engine.is_active(), !pressed);
            }
        }
    }
}
