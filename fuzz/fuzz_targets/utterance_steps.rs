#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use visage_core::{Expression, ResolvedPose};
use visage_runtime::{PlayerConfig, StepOutcome, Utterance};

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    expression: u8,
    reassert_every: u8,
}

fuzz_target!(|input: Input| {
    let requested = Expression::ALL[input.expression as usize % Expression::ALL.len()];
    let config = PlayerConfig {
        reassert_every: input.reassert_every as usize,
        ..PlayerConfig::default()
    };

    let mut utterance = Utterance::new(1, &input.text, requested);
    let mut active = utterance.effective();
    let mut last = None;
    let mut steps = 0;
    let mut poses = 0;
    loop {
        let outcome = utterance.step(&mut active, &config, &mut |pose| {
            last = Some(pose);
            poses += 1;
        });
        steps += 1;
        if outcome == StepOutcome::Finished {
            break;
        }
    }

    assert_eq!(steps, utterance.tokens().len() + 1);
    assert_eq!(poses, steps);
    assert_eq!(last, Some(ResolvedPose::resting(utterance.effective())));
});
