//! Query-path benchmark: filtered and unfiltered search over growing
//! corpora with the stub provider. No network and no model, so this
//! measures the planner, store scan, and ranker.
//!
//! Run locally with `cargo bench --bench search_bench`.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use medmatch::{build_engine_default, MatchEngine, Profile, QuerySpec, StubEmbedder};

const SPECIALTIES: &[&str] = &[
    "Cardiology",
    "Neurology",
    "Oncology",
    "Pediatrics",
    "Dermatology",
];

const LOCATIONS: &[&str] = &[
    "New York, NY",
    "Boston, MA",
    "Chicago, IL",
    "Houston, TX",
    "Seattle, WA",
];

fn synthetic_corpus(size: usize) -> Vec<Profile> {
    (0..size)
        .map(|i| {
            let specialty = SPECIALTIES[i % SPECIALTIES.len()];
            Profile {
                id: format!("DOC-{i:05}"),
                name: format!("Dr. Candidate {i}"),
                specialty: specialty.into(),
                sub_specialty: format!("{specialty} subspecialty {}", i % 3),
                location: LOCATIONS[i % LOCATIONS.len()].into(),
                institution: format!("Hospital {}", i % 7),
                years_experience: 5 + (i % 30) as u32,
                languages: vec!["English".into()],
                summary: format!("{specialty} procedures, series {i}"),
                expertise: format!("{specialty} research interests {i}"),
            }
        })
        .collect()
}

fn build(runtime: &tokio::runtime::Runtime, size: usize) -> MatchEngine {
    runtime
        .block_on(build_engine_default(
            synthetic_corpus(size),
            Arc::new(StubEmbedder::with_dimension(384)),
        ))
        .expect("bench corpus builds")
}

fn bench_search(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("search");

    for &size in &[100usize, 1_000, 5_000] {
        let engine = build(&runtime, size);

        let unfiltered = QuerySpec::new("chest pain and shortness of breath").with_limit(10);
        group.bench_with_input(BenchmarkId::new("unfiltered", size), &size, |b, _| {
            b.iter(|| {
                runtime
                    .block_on(engine.search(&unfiltered))
                    .expect("search succeeds")
            })
        });

        let filtered = QuerySpec::new("chest pain and shortness of breath")
            .with_location("New York, NY")
            .with_specialty("Cardiology")
            .with_limit(10);
        group.bench_with_input(BenchmarkId::new("filtered", size), &size, |b, _| {
            b.iter(|| {
                runtime
                    .block_on(engine.search(&filtered))
                    .expect("search succeeds")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
