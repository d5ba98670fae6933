//! Criterion benchmarks contrasting lookups before and after an explicit
//! rebalance, on the random workload the tree is designed around.

use std::hint::black_box;

use bst_rust::BstTree;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn build_tree(entries: usize, rng: &mut StdRng) -> BstTree<i64, i64> {
    let mut tree = BstTree::new();
    for _ in 0..entries {
        tree.insert(rng.gen_range(-10_000..=10_000), 1234);
    }
    tree
}

fn bench_find(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let unbalanced = build_tree(100_000, &mut rng);
    let mut balanced = build_tree(100_000, &mut rng);
    balanced.balance();

    let mut group = c.benchmark_group("find");
    group.bench_function("unbalanced", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let key = rng.gen_range(-10_000..=10_000);
            black_box(unbalanced.get(black_box(&key)))
        })
    });
    group.bench_function("balanced", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let key = rng.gen_range(-10_000..=10_000);
            black_box(balanced.get(black_box(&key)))
        })
    });
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_random_10k", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            build_tree(10_000, &mut rng)
        })
    });
}

fn bench_balance(c: &mut Criterion) {
    c.bench_function("balance_10k", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(42);
                build_tree(10_000, &mut rng)
            },
            |mut tree| {
                tree.balance();
                tree
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_find, bench_insert, bench_balance);
criterion_main!(benches);
