use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graph_sampler_lib::generator::{generator_for, GraphStrategy};
use graph_sampler_lib::sampling::farthest::select_farthest;
use graph_sampler_lib::{DistanceSketch, Multigraph};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_graph(num_nodes: usize, num_edges: usize) -> Multigraph {
    let mut rng = StdRng::seed_from_u64(0);
    let generator = generator_for(GraphStrategy::BarabasiAlbert, num_nodes, num_edges).unwrap();
    generator.generate(&mut rng).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let graph = benchmark_graph(2000, 8000);

    let mut group = c.benchmark_group("Distance sketch");
    group
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(10))
        .bench_function("sketch 2000 nodes 20 landmarks", |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(1);
                DistanceSketch::build(black_box(&graph), black_box(20), &mut rng)
            })
        });
    group.finish();

    let mut rng = StdRng::seed_from_u64(1);
    let sketch = DistanceSketch::build(&graph, 20, &mut rng);

    let mut group = c.benchmark_group("Farthest selection");
    group.bench_function("select 200 of 2000", |b| {
        b.iter(|| select_farthest(black_box(&sketch), black_box(200)))
    });
    group.finish();

    let source_ids: Vec<_> = graph.node_ids().take(8).collect();
    let mut group = c.benchmark_group("Subgraph extraction");
    group.bench_function("extract 500 edges", |b| {
        b.iter(|| {
            for &id in &source_ids {
                graph
                    .extract_subgraph_by_edge_count(black_box(id), black_box(500))
                    .unwrap();
            }
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
