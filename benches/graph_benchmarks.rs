use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphframe::graph::{build_graph, GraphFrame};

/// Ring of `size` people with a chord every third vertex
fn ring_graph(size: i64) -> GraphFrame {
    let vertices = (0..size).map(|i| (i, format!("Person{}", i), i % 100));
    let edges = (0..size)
        .map(|i| (i, (i + 1) % size, i % 10))
        .chain((0..size).step_by(3).map(|i| (i, (i + size / 2) % size, 1)));
    build_graph(vertices, edges.collect::<Vec<_>>()).unwrap()
}

/// Benchmark vertex filtering
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_vertices");

    for size in [1000, 10_000].iter() {
        let graph = ring_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| graph.filter_vertices(|age| age > 40).unwrap());
        });
    }
    group.finish();
}

/// Benchmark both triplet strategies on the same graph
fn bench_triplets(c: &mut Criterion) {
    let mut group = c.benchmark_group("triplets");

    for size in [1000, 10_000].iter() {
        let graph = ring_graph(*size);
        group.bench_with_input(BenchmarkId::new("join", size), &graph, |b, graph| {
            b.iter(|| graph.triplets_by_join().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("pattern", size), &graph, |b, graph| {
            b.iter(|| graph.triplets_by_pattern().unwrap());
        });
    }
    group.finish();
}

/// Benchmark two-hop motif search
fn bench_two_hop(c: &mut Criterion) {
    let graph = ring_graph(2000);
    c.bench_function("find_two_hop", |b| {
        b.iter(|| graph.find("(a)-[]->(b); (b)-[]->(c)").unwrap());
    });
}

/// Benchmark PageRank
fn bench_pagerank(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank");

    for size in [1000, 10_000, 100_000].iter() {
        let graph = ring_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| graph.page_rank(20, 0.15).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_triplets, bench_two_hop, bench_pagerank);
criterion_main!(benches);
