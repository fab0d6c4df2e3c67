#![no_main]

use libfuzzer_sys::fuzz_target;
use visage_core::Token;
use visage_speech::{detect_emotion, sequence, TimingPolicy};

fuzz_target!(|text: &str| {
    let tokens = sequence(text);

    // Pure and total
    assert_eq!(tokens, sequence(text));
    let _ = detect_emotion(text);

    // Every word ends in at least one pause
    if text.split_whitespace().next().is_some() {
        assert!(tokens.last().map(Token::is_pause).unwrap_or(false));
    } else {
        assert!(tokens.is_empty());
    }

    // Textual forms parse back
    for token in &tokens {
        assert_eq!(Token::parse(&token.to_string()).ok().as_ref(), Some(token));
    }

    let policy = TimingPolicy::default();
    let summed = policy.timeline(&tokens).iter().map(|t| t.duration).sum();
    assert_eq!(policy.total(&tokens), summed);
});
