use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use treesum_hash::hex::{hex_decode, hex_to_string};
use treesum_hash::Hasher;

fn hash_throughput(c: &mut Criterion) {
    let data = vec![0xABu8; 1024 * 1024]; // 1 MiB

    let mut group = c.benchmark_group("hash_throughput");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("sha1_1mib", |b| {
        b.iter(|| Hasher::digest(black_box(&data)))
    });

    group.bench_function("blob_framed_1mib", |b| {
        b.iter(|| Hasher::hash_object(black_box("blob"), black_box(&data)))
    });

    group.finish();
}

fn hex_encode_decode(c: &mut Criterion) {
    let bytes = [
        0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x00, 0x11,
        0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
    ];
    let hex = hex_to_string(&bytes);

    let mut group = c.benchmark_group("hex");

    group.bench_function("encode_20bytes", |b| b.iter(|| hex_to_string(black_box(&bytes))));

    group.bench_function("decode_40chars", |b| {
        b.iter(|| {
            let mut buf = [0u8; 20];
            hex_decode(black_box(&hex), &mut buf).unwrap();
            buf
        })
    });

    group.finish();
}

criterion_group!(benches, hash_throughput, hex_encode_decode);
criterion_main!(benches);
