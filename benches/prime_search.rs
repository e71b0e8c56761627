use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use modring::matrix::{alphabet, RingMatrix};
use modring::prime_search::{find_prime_with_digits_using, SearchPolicy};

fn bench_prime_search(c: &mut Criterion) {
    for policy in [SearchPolicy::ScanForward, SearchPolicy::Redraw] {
        let name = format!("find_prime_6_digits_{:?}", policy);
        c.bench_function(&name, |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let mut rng = StdRng::seed_from_u64(seed);
                find_prime_with_digits_using(6, 16, policy, &mut rng)
                    .expect("search should not exhaust a 6-digit range")
            });
        });
    }
}

fn bench_matrix_inverse(c: &mut Criterion) {
    let key = RingMatrix::from_rows(
        &[vec![1, 2, 3], vec![0, 1, 4], vec![5, 6, 0]],
        alphabet::RING_SIZE,
    );
    c.bench_function("inverse_3x3_mod_27", |b| {
        b.iter(|| key.inverse().expect("key is invertible"));
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_prime_search(c);
    bench_matrix_inverse(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
