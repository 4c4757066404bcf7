//! Criterion benchmarks for the keyfwd JSON codec.
//!
//! Every forwarded keystroke is encoded once on the server and decoded once
//! on the client, so these numbers bound the per-key codec overhead.
//!
//! Run with:
//! ```bash
//! cargo bench --package keyfwd-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keyfwd_core::{decode_key_event, encode_key_event, Key, KeyEvent, NamedKey};

// ── Event fixtures ────────────────────────────────────────────────────────────

fn fixtures() -> Vec<(&'static str, KeyEvent)> {
    vec![
        ("PrintableAscii", KeyEvent::press(Key::Printable('x'))),
        ("PrintableCyrillic", KeyEvent::press(Key::Printable('ж'))),
        ("Special", KeyEvent::release(Key::named(NamedKey::Home))),
    ]
}

/// Benchmarks `encode_key_event` for each key shape.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_key_event");
    for (name, event) in fixtures() {
        group.bench_with_input(BenchmarkId::new("event", name), &event, |b, event| {
            b.iter(|| encode_key_event(black_box(event)).expect("encode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks `decode_key_event` from pre-encoded bytes.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_key_event");
    for (name, event) in fixtures() {
        let bytes = encode_key_event(&event).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("event", name), &bytes, |b, bytes| {
            b.iter(|| decode_key_event(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks rejection of a datagram that is not JSON at all.
fn bench_decode_garbage(c: &mut Criterion) {
    let garbage = [0xFFu8; 64];
    c.bench_function("decode_key_event_garbage", |b| {
        b.iter(|| decode_key_event(black_box(&garbage)).is_err())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_decode_garbage);
criterion_main!(benches);
