// Criterion benchmarks for editdist-fst.
//
// Run:
//   cargo bench -p editdist-fst

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use editdist_fst::{Alphabet, EditDistanceOptions, Overrides, generate};

const FINNISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz\u{00e5}\u{00e4}\u{00f6}-'";

/// Distance 2 with swaps over a 31-symbol alphabet.
fn bench_generate(c: &mut Criterion) {
    let alphabet = Alphabet::from_chars(FINNISH_ALPHABET);
    let options = EditDistanceOptions {
        distance: 2,
        swaps: true,
        ..EditDistanceOptions::default()
    };

    c.bench_function("generate_d2_swaps", |b| {
        b.iter(|| {
            let t = generate(black_box(&alphabet), &Overrides::default(), &options).unwrap();
            black_box(t.transition_count())
        })
    });
}

fn bench_write_att(c: &mut Criterion) {
    let alphabet = Alphabet::from_chars(FINNISH_ALPHABET);
    let t = generate(&alphabet, &Overrides::default(), &EditDistanceOptions::default()).unwrap();

    c.bench_function("write_att_d1", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(64 * 1024);
            t.write_att(&mut buf).unwrap();
            black_box(buf.len())
        })
    });
}

criterion_group!(benches, bench_generate, bench_write_att);
criterion_main!(benches);
