//! Benchmarks for deck splitting and slide layout.

use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lectern::slides::{SlideDeck, split_slides};

const DEMO: &str = include_str!("../demos/clinical_tlf.md");

fn bench_split_slides(c: &mut Criterion) {
    c.bench_function("split_slides", |b| {
        b.iter(|| split_slides(black_box(DEMO)))
    });
}

fn bench_layout_deck(c: &mut Criterion) {
    let path = Path::new("demos/clinical_tlf.md");
    c.bench_function("layout_deck", |b| {
        b.iter(|| SlideDeck::from_source(path, black_box(DEMO), 74).unwrap())
    });
}

fn bench_relayout(c: &mut Criterion) {
    let path = Path::new("demos/clinical_tlf.md");
    let mut deck = SlideDeck::from_source(path, DEMO, 74).unwrap();
    let mut wide = false;
    c.bench_function("relayout", |b| {
        b.iter(|| {
            wide = !wide;
            deck.relayout(if wide { 114 } else { 74 });
        })
    });
}

criterion_group!(benches, bench_split_slides, bench_layout_deck, bench_relayout);
criterion_main!(benches);
