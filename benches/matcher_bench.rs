use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use suggest::{Autocomplete, DefaultSearch, MatchConfig, SearchMode, by_score_desc, find_matches};

const WORDS: &[&str] = &[
    "apple", "apricot", "banana", "blackberry", "cherry", "grape", "papaya", "pineapple",
    "crème brûlée", "mango",
];

fn catalogue(size: usize) -> Vec<Value> {
    (0..size)
        .map(|i| {
            json!({
                "name": format!("{} {i}", WORDS[i % WORDS.len()]),
                "sku": format!("SKU-{:06}", i * 7919 % 1_000_000),
            })
        })
        .collect()
}

/// Benchmark a raw scan with each built-in search mode
fn bench_search_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_modes");
    let records = catalogue(1000);

    for mode in [SearchMode::Strict, SearchMode::Loose, SearchMode::Fuzzy] {
        let cfg = MatchConfig::default()
            .with_keys(["name", "sku"])
            .with_search(mode);

        group.bench_function(mode.as_str(), |b| {
            b.iter(|| {
                let _ = find_matches(&DefaultSearch, black_box("ap"), black_box(&records), &cfg)
                    .expect("scan should succeed");
            });
        });
    }

    group.finish();
}

/// Benchmark the full pipeline across collection sizes
fn bench_pipeline_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_scale");
    let pipeline = Autocomplete::new(MatchConfig::default().with_keys(["name"]))
        .with_sort(by_score_desc());

    for size in [100, 1_000, 10_000] {
        let records = catalogue(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("records_{size}"), |b| {
            b.iter(|| {
                let _ = pipeline
                    .run(black_box(&"app".into()), black_box(&records))
                    .expect("run should succeed");
            });
        });
    }

    group.finish();
}

/// Benchmark diacritic folding overhead
fn bench_diacritics(c: &mut Criterion) {
    let mut group = c.benchmark_group("diacritics");
    let records = catalogue(1000);

    for diacritics in [false, true] {
        let mut cfg = MatchConfig::default().with_keys(["name"]);
        cfg.search.diacritics = diacritics;

        group.bench_function(format!("folding_{diacritics}"), |b| {
            b.iter(|| {
                let _ = find_matches(&DefaultSearch, black_box("creme"), black_box(&records), &cfg)
                    .expect("scan should succeed");
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_search_modes,
    bench_pipeline_scale,
    bench_diacritics
);
criterion_main!(benches);
