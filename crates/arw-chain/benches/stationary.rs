use arw_chain::{stationary_distribution, Graph};
use arw_linalg::SilentProgress;
use arw_symbolic::ParamSet;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_stationary(c: &mut Criterion) {
    let cycle3 = Graph::new(vec![vec![1, 2], vec![0, 2], vec![0, 1]]).unwrap();
    let params3 = ParamSet::sleep_probs(2);
    c.bench_function("stationary_3_cycle", |b| {
        b.iter(|| stationary_distribution(&cycle3, &params3, &mut SilentProgress).unwrap())
    });

    let cycle4 = Graph::new(vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![0, 2]]).unwrap();
    let params4 = ParamSet::sleep_probs(3);
    c.bench_function("stationary_4_cycle", |b| {
        b.iter(|| stationary_distribution(&cycle4, &params4, &mut SilentProgress).unwrap())
    });
}

criterion_group!(benches, bench_stationary);
criterion_main!(benches);
