use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lznt1_codec::{compress, decompress};
use std::hint::black_box;

/// 64 KiB, a typical block size for chunked file processing.
const CORPUS_SIZE: usize = 64 * 1024;

/// Deterministic high-entropy bytes from a fixed-seed LCG; the worst case
/// for the match finder and close to incompressible.
fn random_corpus(size: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(size);
    let mut state: u64 = 0x5DEE_CE66;
    for _ in 0..size {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223) & 0xFFFF_FFFF;
        out.push((state >> 24) as u8);
    }
    out
}

/// Repeated prose, the typical-text middle ground.
fn text_corpus(size: usize) -> Vec<u8> {
    let line = b"The slings and arrows of outrageous fortune. ";
    let mut out = Vec::with_capacity(size + line.len());
    while out.len() < size {
        out.extend_from_slice(line);
    }
    out.truncate(size);
    out
}

fn corpora() -> [(&'static str, Vec<u8>); 3] {
    [
        ("zeros", vec![0u8; CORPUS_SIZE]),
        ("random", random_corpus(CORPUS_SIZE)),
        ("text", text_corpus(CORPUS_SIZE)),
    ]
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(CORPUS_SIZE as u64));

    for (name, input) in &corpora() {
        group.bench_function(*name, |b| {
            let mut output = Vec::with_capacity(CORPUS_SIZE + CORPUS_SIZE / 16);
            b.iter(|| {
                output.clear();
                compress(black_box(input), black_box(&mut output));
            });
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    // Rate of data restored, so throughput counts uncompressed bytes.
    group.throughput(Throughput::Bytes(CORPUS_SIZE as u64));

    for (name, input) in &corpora() {
        let mut stream = Vec::new();
        compress(input, &mut stream);

        group.bench_function(*name, |b| {
            let mut output = Vec::with_capacity(CORPUS_SIZE);
            b.iter(|| {
                output.clear();
                decompress(black_box(&stream), black_box(&mut output)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
