use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lineage_graph::{CopyFlags, LineageGraph, Vertex};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Layer widths for the synthetic histories.
const TIERS: [(&str, usize, usize); 3] = [("small", 8, 4), ("medium", 32, 8), ("large", 64, 16)];

/// A layered DAG: every vertex gets one to three parents from the layer
/// above, plus an occasional shortcut edge two layers up that a reduction
/// will remove.
fn layered_history(layers: usize, width: usize, seed: u64) -> (LineageGraph<usize>, Vertex) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = LineageGraph::default();
    let mut rows: Vec<Vec<Vertex>> = Vec::with_capacity(layers);

    for layer in 0..layers {
        let row: Vec<Vertex> = (0..width).map(|i| g.add_vertex(layer * width + i)).collect();
        if let Some(above) = rows.last() {
            for &child in &row {
                for _ in 0..rng.gen_range(1..=3) {
                    let parent = above[rng.gen_range(0..width)];
                    g.add_edge(parent, child).expect("live vertices");
                }
            }
        }
        if layer >= 2 {
            let grand = &rows[layer - 2];
            for &child in &row {
                if rng.gen_bool(0.2) {
                    g.add_edge(grand[rng.gen_range(0..width)], child)
                        .expect("live vertices");
                }
            }
        }
        rows.push(row);
    }

    let middle = rows[layers / 2][width / 2];
    (g, middle)
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms.layered");

    for (name, layers, width) in TIERS {
        let seed = 0x11_4E_A6_u64 + u64::try_from(layers).unwrap_or_default();
        let (graph, middle) = layered_history(layers, width, seed);
        group.throughput(Throughput::Elements(
            u64::try_from(graph.edge_count()).unwrap_or(u64::MAX),
        ));

        group.bench_with_input(BenchmarkId::new("topological_sort", name), &graph, |b, g| {
            b.iter(|| black_box(g.topological_sort()));
        });

        group.bench_with_input(BenchmarkId::new("closure", name), &graph, |b, g| {
            b.iter(|| black_box(g.transitive_closure(CopyFlags::NONE)));
        });

        group.bench_with_input(BenchmarkId::new("reduction", name), &graph, |b, g| {
            b.iter(|| black_box(g.transitive_reduction(CopyFlags::NONE)));
        });

        group.bench_with_input(
            BenchmarkId::new("longest_path_touching", name),
            &graph,
            |b, g| b.iter(|| black_box(g.longest_path_touching(middle))),
        );

        group.bench_with_input(BenchmarkId::new("shortest_path", name), &graph, |b, g| {
            let root = g.roots().first().copied().unwrap_or_default();
            let leaf = g.leaves().last().copied().unwrap_or_default();
            b.iter(|| black_box(g.shortest_path(root, leaf)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_algorithms);
criterion_main!(benches);
