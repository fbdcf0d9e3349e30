use criterion::{Criterion, criterion_group, criterion_main};
use skillmap_bench::{generate_flow, generate_skill_graph};
use skillmap_core::LayoutConfig;
use skillmap_graph::{
    CurvatureAssigner, GraphModel, HierarchicalLayouter, Layouter, LinearLayouter,
    reorder_by_flow, sequence,
};
use std::hint::black_box;

fn bench_sequence_300_nodes(c: &mut Criterion) {
    let (nodes, edges) = generate_skill_graph(15, 20);

    c.bench_function("sequence_300_nodes", |b| {
        b.iter(|| {
            let order = sequence(black_box(&nodes), black_box(&edges));
            black_box(order);
        })
    });
}

fn bench_hierarchical_layout_300_nodes(c: &mut Criterion) {
    let (nodes, edges) = generate_skill_graph(15, 20);
    let model = GraphModel::from_parts(&nodes, &edges);
    let config = LayoutConfig::default();
    let layouter = HierarchicalLayouter::new(config.clone());

    c.bench_function("hierarchical_layout_300_nodes", |b| {
        b.iter(|| {
            let result = layouter.execute(black_box(&model));
            let renders = CurvatureAssigner::for_layout(&config, result.kind)
                .assign_for_graph(&model, &result);
            black_box((result, renders));
        })
    });
}

fn bench_linear_layout_300_nodes(c: &mut Criterion) {
    let (nodes, edges) = generate_skill_graph(15, 20);
    let model = GraphModel::from_parts(&nodes, &edges);
    let layouter = LinearLayouter::default();

    c.bench_function("linear_layout_300_nodes", |b| {
        b.iter(|| {
            let result = layouter.execute(black_box(&model));
            black_box(result);
        })
    });
}

fn bench_reorder_flow_300_nodes(c: &mut Criterion) {
    let (nodes, edges) = generate_flow(300);

    c.bench_function("reorder_flow_300_nodes", |b| {
        b.iter(|| {
            let ordered = reorder_by_flow(black_box(&nodes), black_box(&edges));
            black_box(ordered);
        })
    });
}

criterion_group!(
    benches,
    bench_sequence_300_nodes,
    bench_hierarchical_layout_300_nodes,
    bench_linear_layout_300_nodes,
    bench_reorder_flow_300_nodes
);
criterion_main!(benches);
