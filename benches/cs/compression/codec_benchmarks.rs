use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use infocodec::cs::compression::{entropy, Codec, Huffman, Lz77, Lzw, ShannonFano};

/// Text-like data: phrases from a small vocabulary with random bytes mixed in.
fn generate_test_data(size: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let phrases: &[&[u8]] = &[
        b"to be or not to be ",
        b"that is the question ",
        b"whether tis nobler in the mind ",
    ];
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        if rng.gen_bool(0.8) {
            data.extend_from_slice(phrases[rng.gen_range(0..phrases.len())]);
        } else {
            data.push(rng.gen::<u8>());
        }
    }
    data.truncate(size);
    data
}

fn bench_codec<C: Codec>(c: &mut Criterion, codec: &C, sizes: &[usize]) {
    let mut group = c.benchmark_group(codec.name());
    for &size in sizes {
        let data = generate_test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &data, |b, data| {
            b.iter(|| codec.encode(black_box(data)).unwrap())
        });

        let encoded = codec.encode(&data).unwrap();
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| codec.decode(black_box(encoded)).unwrap())
        });
    }
    group.finish();
}

fn bench_codecs(c: &mut Criterion) {
    let sizes = [1_024, 16_384];
    bench_codec(c, &ShannonFano, &sizes);
    bench_codec(c, &Huffman, &sizes);
    bench_codec(c, &Lz77::default(), &sizes);
    bench_codec(c, &Lzw, &sizes);
}

fn bench_entropy(c: &mut Criterion) {
    let data = generate_test_data(65_536);
    c.bench_function("entropy 64k", |b| b.iter(|| entropy(black_box(&data))));
}

criterion_group!(benches, bench_codecs, bench_entropy);
criterion_main!(benches);
