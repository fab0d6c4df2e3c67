//! Benchmarks for text sequencing and emotion detection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use visage_speech::{classify_reply, detect_emotion, sequence, TimingPolicy};

const SHORT: &str = "Hi there!";
const REPLY: &str = "Sure, I can help with that. Let me think about the best way to \
    approach it: first we look at the data, then we decide what to do next. Is that ok?";

fn long_text() -> String {
    REPLY.repeat(20)
}

fn bench_sequence(c: &mut Criterion) {
    let long = long_text();
    let mut group = c.benchmark_group("sequence");
    for (name, text) in [("short", SHORT), ("reply", REPLY), ("long", long.as_str())] {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| sequence(black_box(text)))
        });
    }
    group.finish();
}

fn bench_detect_emotion(c: &mut Criterion) {
    c.bench_function("detect_emotion_reply", |b| {
        b.iter(|| detect_emotion(black_box(REPLY)))
    });
    c.bench_function("classify_reply", |b| {
        b.iter(|| classify_reply(black_box(REPLY)))
    });
}

fn bench_timeline(c: &mut Criterion) {
    let policy = TimingPolicy::default();
    let tokens = sequence(&long_text());

    c.bench_function("timeline_long", |b| {
        b.iter(|| policy.timeline(black_box(&tokens)))
    });
    c.bench_function("total_long", |b| b.iter(|| policy.total(black_box(&tokens))));
}

criterion_group!(benches, bench_sequence, bench_detect_emotion, bench_timeline);
criterion_main!(benches);
