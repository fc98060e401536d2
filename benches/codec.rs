use base_lane::{STANDARD, URL_SAFE, decode, decode_to_vec, encode, encode_to_string, encoded_len};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [64, 256, 1024, 4096, 16384].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        let data: Vec<u8> = (0..*size).map(|i| (i % 256) as u8).collect();
        let mut out = vec![0u8; encoded_len(data.len()).unwrap()];

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| encode(black_box(data), black_box(out.as_mut_slice()), &STANDARD, true));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [64, 256, 1024, 4096, 16384].iter() {
        let data: Vec<u8> = (0..*size).map(|i| (i % 256) as u8).collect();
        let encoded = encode_to_string(&data, &STANDARD);
        let mut out = vec![0u8; data.len()];

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            encoded.as_bytes(),
            |b, encoded| {
                b.iter(|| decode(black_box(encoded), black_box(out.as_mut_slice()), &STANDARD, true));
            },
        );
    }
    group.finish();
}

fn bench_allocating(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocating");

    let data: Vec<u8> = (0..4096).map(|i| (i % 256) as u8).collect();
    let encoded = encode_to_string(&data, &STANDARD);

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("encode_to_string", |b| {
        b.iter(|| encode_to_string(black_box(&data), &STANDARD));
    });
    group.bench_function("decode_to_vec", |b| {
        b.iter(|| decode_to_vec(black_box(&encoded), &STANDARD).unwrap());
    });
    group.finish();
}

fn bench_url_safe(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_url_safe");

    for size in [1024, 16384].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        let data: Vec<u8> = (0..*size).map(|i| (i % 256) as u8).collect();
        let mut out = vec![0u8; encoded_len(data.len()).unwrap()];

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| encode(black_box(data), black_box(out.as_mut_slice()), &URL_SAFE, true));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_allocating,
    bench_url_safe
);
criterion_main!(benches);
