//! Parse and encode throughput over synthetic decks.
//!
//! Measures:
//! 1. `Deck::parse_str` on a deck of mixed keyword shapes
//! 2. `Deck::to_text` on the parsed model

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deckly::{Deck, ParseOptions};

/// Generate a deck with `entries` keywords cycling through the common
/// shapes: bare section headers, short integer records, repeat runs, and
/// multi-record entries with quoted strings.
fn generate_deck(entries: usize) -> String {
    let mut out = String::new();
    for i in 0..entries {
        match i % 4 {
            0 => out.push_str("RUNSPEC\n"),
            1 => out.push_str("DIMENS\n  20 20 5 /\n"),
            2 => out.push_str("DX\n  2000*0.25 /\n"),
            _ => {
                out.push_str("WELSPECS\n");
                out.push_str("  'PROD' 'G1' 10 10 8400.0 'OIL' /\n");
                out.push_str("  'INJ' 'G1' 1 1 8335.0 'WATER' /\n");
                out.push_str("/\n");
            }
        }
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_str");
    let options = ParseOptions::default();

    for entries in [100, 1_000, 10_000] {
        let text = generate_deck(entries);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(entries),
            &text,
            |b, text| b.iter(|| Deck::parse_str(black_box(text), &options).unwrap()),
        );
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_text");
    let options = ParseOptions::default();

    for entries in [100, 1_000, 10_000] {
        let deck = Deck::parse_str(&generate_deck(entries), &options).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(entries),
            &deck,
            |b, deck| b.iter(|| black_box(deck).to_text().unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_encode);
criterion_main!(benches);
