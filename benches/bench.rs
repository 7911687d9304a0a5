// Criterion benchmarks for Stable Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use stable_match::core::{filter_compatibility, build_preference_lists, partition_participants, Matcher};
use stable_match::models::{GenderIdentity, GenderPreference, MatchInput, PartitionStrategy, ScoreMatrix};

const IDENTITIES: [GenderIdentity; 3] =
    [GenderIdentity::Male, GenderIdentity::Female, GenderIdentity::NonBinary];
const PREFERENCES: [GenderPreference; 3] =
    [GenderPreference::Women, GenderPreference::Men, GenderPreference::Bisexual];

fn create_input(n: usize) -> MatchInput {
    let scores = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { 0.0 } else { ((i * 31 + j * 17) % 97) as f64 })
                .collect()
        })
        .collect();
    let identities: Vec<_> = (0..n).map(|i| IDENTITIES[i % 3]).collect();
    let preferences: Vec<_> = (0..n).map(|i| PREFERENCES[(i / 3) % 3]).collect();

    MatchInput::new(ScoreMatrix::new(scores).unwrap(), &identities, &preferences).unwrap()
}

fn bench_filter(c: &mut Criterion) {
    let input = create_input(500);
    let identities = input.identities();
    let preferences = input.preferences();

    c.bench_function("compatibility_filter_500", |b| {
        b.iter(|| filter_compatibility(black_box(&input.scores), &identities, &preferences));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let input = create_input(500);
    let filtered = filter_compatibility(&input.scores, &input.identities(), &input.preferences());
    let roles = partition_participants(500, &PartitionStrategy::Contiguous).unwrap();

    c.bench_function("preference_lists_500", |b| {
        b.iter(|| build_preference_lists(black_box(&filtered), &roles.proposers, &roles.receivers));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::new(PartitionStrategy::Random { seed: 7 });

    let mut group = c.benchmark_group("matching");

    for participants in [10, 50, 100, 500, 1000].iter() {
        let input = create_input(*participants);

        group.bench_with_input(
            BenchmarkId::new("stable_matching", participants),
            participants,
            |b, _| {
                b.iter(|| matcher.run(black_box(&input)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_filter,
    bench_ranking,
    bench_matching
);

criterion_main!(benches);
