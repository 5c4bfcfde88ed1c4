use criterion::{criterion_group, criterion_main, Criterion};

use arbor_graph::binarize;
use arbor_tree::{upper_bound, BudgetedTreeDp, EdgeAttributeCost, LagrangianTreeSolver};
use test_fixtures::{binary_tree, star};

fn bench_lst_binary_tree(c: &mut Criterion) {
    // 1023 nodes, edge costs 1..=3.
    let dag = binary_tree(9);
    let solver = LagrangianTreeSolver::new(2);

    c.bench_function("lst_binary_tree_1k_nodes", |b| {
        b.iter(|| {
            solver.solve(&dag, "t0000", 200.0).unwrap();
        });
    });
}

fn bench_lst_wide_star(c: &mut Criterion) {
    let dag = binarize(&star(200));
    let solver = LagrangianTreeSolver::new(2);

    c.bench_function("lst_binarized_star_200", |b| {
        b.iter(|| {
            solver.solve(&dag, "r", 500.0).unwrap();
        });
    });
}

fn bench_dp_general(c: &mut Criterion) {
    let dag = binary_tree(6);
    let dp = BudgetedTreeDp::new(1);

    c.bench_function("dp_general_binary_tree_127_nodes", |b| {
        b.iter(|| {
            dp.solve(&dag, "t0000", 20.0, &EdgeAttributeCost).unwrap();
        });
    });
}

fn bench_upper_bound(c: &mut Criterion) {
    let dag = binary_tree(9);

    c.bench_function("upper_bound_1k_nodes", |b| {
        b.iter(|| {
            upper_bound(&dag, "t0000", 200.0).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_lst_binary_tree,
    bench_lst_wide_star,
    bench_dp_general,
    bench_upper_bound
);
criterion_main!(benches);
