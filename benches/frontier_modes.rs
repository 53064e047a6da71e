use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dijkstra_stepper::graph::generators::{generate_random_connected, node_label};
use dijkstra_stepper::{FrontierMode, StepEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_frontier_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_to_completion");
    let mut rng = StdRng::seed_from_u64(42);

    for &size in &[100usize, 1_000, 5_000] {
        let graph = generate_random_connected(size, size * 2, &mut rng).unwrap();
        let start = node_label(0);
        let end = node_label(size - 1);

        for mode in FrontierMode::ALL {
            group.bench_with_input(BenchmarkId::new(mode.label(), size), &graph, |b, graph| {
                b.iter(|| {
                    let mut engine = StepEngine::new(graph, &start, &end).unwrap();
                    engine.begin(mode).unwrap();
                    while !engine.advance().is_finished() {}
                    black_box(engine.path_cost())
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_frontier_modes);
criterion_main!(benches);
