use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tofrs::coincidence::{match_pairs, match_pairs_segmented};
use tofrs::{Runtime, RuntimeConfig, Window};

/// Two channels with coincident bursts every 10 µs and ±2 ns jitter.
fn channels(len: usize) -> (Vec<i64>, Vec<i64>) {
    let mut rng = StdRng::seed_from_u64(0x70f);
    let mut start = Vec::with_capacity(len);
    let mut stop = Vec::with_capacity(len);
    for i in 0..len as i64 {
        let base = i * 10_000_000;
        start.push(base);
        stop.push(base + rng.random_range(-2_000..2_000));
    }
    (start, stop)
}

fn bench_matchers(c: &mut Criterion) {
    let window = Window::new(5_000).unwrap();
    let mut group = c.benchmark_group("tof");

    for len in [10_000usize, 1_000_000] {
        let (start, stop) = channels(len);

        group.bench_with_input(BenchmarkId::new("sequential", len), &len, |b, _| {
            b.iter(|| match_pairs(black_box(&start), black_box(&stop), window))
        });

        group.bench_with_input(BenchmarkId::new("segmented", len), &len, |b, _| {
            b.iter(|| match_pairs_segmented(black_box(&start), black_box(&stop), window, 32))
        });
    }

    let runtime = Runtime::new(RuntimeConfig::default()).unwrap();
    let (start, stop) = channels(1_000_000);
    group.bench_function("runtime/1000000", |b| {
        b.iter(|| runtime.tof(start.clone(), stop.clone(), 5_000).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_matchers);
criterion_main!(benches);
