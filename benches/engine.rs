//! Benchmarks for the cellular GA execution strategies.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cellular_ga::{
    compute::EvolutionEngine,
    schema::{Execution, GridConfig, MergePolicy, Pattern, Seed, Topology},
};

fn engine_for(size: usize, topology: Topology, merge: MergePolicy) -> EvolutionEngine {
    let config = GridConfig {
        rows: size,
        cols: size,
        topology,
        merge,
    };
    let seed = Seed {
        pattern: Pattern::Discriminated { seed: 1 },
    };

    let mut engine = EvolutionEngine::with_seed(config, 42).expect("valid config");
    engine.initialize_with(&seed).expect("population fits grid");
    engine
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_step");

    for size in [64, 128, 256] {
        for execution in [
            Execution::Sequential,
            Execution::RowSharded { threads: 4 },
            Execution::DataParallel { threads: 4 },
        ] {
            let mut engine = engine_for(size, Topology::L5, MergePolicy::ReplaceAll);

            group.bench_with_input(
                BenchmarkId::new(execution.to_string(), format!("{}x{}", size, size)),
                &size,
                |b, _| {
                    b.iter(|| {
                        black_box(engine.step(black_box(execution)).expect("step"));
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_topologies(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");

    for topology in Topology::ALL {
        for merge in MergePolicy::ALL {
            let mut engine = engine_for(128, topology, merge);

            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_{}", topology, merge)),
                &topology,
                |b, _| {
                    b.iter(|| {
                        black_box(
                            engine
                                .step(Execution::RowSharded { threads: 4 })
                                .expect("step"),
                        );
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_topologies);
criterion_main!(benches);
