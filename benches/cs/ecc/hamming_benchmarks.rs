use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hamming74::bits;
use hamming74::{HammingDecoder, HammingEncoder, NoiseInjector, NoiseParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_hamming(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_7_4");
    let encoder = HammingEncoder::new();
    let decoder = HammingDecoder::new();

    for size in [1 << 10, 1 << 14, 1 << 18] {
        let data = random_bytes(size);
        let encoded = encoder.encode(bits::unpack(&data));
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &data, |b, data| {
            b.iter(|| bits::pack(&encoder.encode(bits::unpack(black_box(data))), true))
        });

        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| bits::pack(&decoder.decode(black_box(encoded)), false))
        });

        group.bench_with_input(BenchmarkId::new("inject", size), &encoded, |b, encoded| {
            let mut injector = NoiseInjector::with_seed(NoiseParameters::default(), 7).unwrap();
            b.iter(|| injector.inject(black_box(encoded.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hamming);
criterion_main!(benches);
