// Criterion benchmarks for Jack Attack

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jack_attack::core::{aggregate, build_export_table, scoring::score_round, to_csv};
use jack_attack::models::{CrossoverShot, Round, ScoringConfig, Shot, TeamNames};

fn create_round(i: usize) -> Round {
    let shot = |n: usize| match n % 3 {
        0 => Shot::Unset,
        1 => Shot::SideA,
        _ => Shot::SideB,
    };

    Round {
        number: i as u32 + 1,
        touchers_a: (i % 4) as u32,
        touchers_b: (i % 3) as u32,
        crossover_shot: match i % 4 {
            0 => CrossoverShot::None,
            1 => CrossoverShot::SideA,
            2 => CrossoverShot::SideB,
            _ => CrossoverShot::Both,
        },
        first: shot(i),
        second: shot(i + 1),
        third: shot(i * 7),
        adjustment_a: if i % 5 == 0 { -1.5 } else { 0.0 },
        adjustment_b: 0.0,
        notes: format!("End {}, measured", i + 1),
    }
}

fn bench_score_round(c: &mut Criterion) {
    let config = ScoringConfig::default();
    let round = create_round(7);

    c.bench_function("score_round", |b| {
        b.iter(|| score_round(black_box(&round), black_box(&config)));
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let config = ScoringConfig::default();
    let mut group = c.benchmark_group("aggregate");

    for round_count in [10, 50, 100, 500].iter() {
        let rounds: Vec<Round> = (0..*round_count).map(create_round).collect();

        group.bench_with_input(
            BenchmarkId::new("aggregate", round_count),
            round_count,
            |b, _| {
                b.iter(|| aggregate(black_box(&rounds), black_box(&config)));
            },
        );
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let config = ScoringConfig::default();
    let teams = TeamNames::new("Hawks", "Owls");
    let rounds: Vec<Round> = (0..20).map(create_round).collect();

    c.bench_function("export_csv_20_ends", |b| {
        b.iter(|| {
            let table = build_export_table(black_box(&teams), black_box(&rounds), &config);
            black_box(to_csv(&table))
        });
    });
}

criterion_group!(benches, bench_score_round, bench_aggregate, bench_export);

criterion_main!(benches);
