//! # Codec Benchmarks
//!
//! Throughput of the text codecs and the positional accessor.
//!
//! Run with: `cargo bench -p octet-core`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use octet_core::accessor::{self, Slot};
use octet_core::codec::{base64, hex};
use octet_core::primitives::MAX_BUFFER_SIZE;
use octet_core::{ByteBuffer, Endianness, Number, Sign, bytes_to_string};
use std::hint::black_box;

const SIZES: [usize; 3] = [64, 4096, 65536];

/// Deterministic non-trivial contents.
fn sample_buffer(size: usize) -> ByteBuffer {
    ByteBuffer::from((0..size).map(|i| (i * 31 % 251) as u8).collect::<Vec<_>>())
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_base64(c: &mut Criterion) {
    let mut group = c.benchmark_group("base64");

    for size in SIZES {
        let buffer = sample_buffer(size);
        let text = base64::encode(&buffer);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &buffer, |b, buffer| {
            b.iter(|| black_box(base64::encode(buffer)));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &text, |b, text| {
            b.iter(|| black_box(base64::decode(text, MAX_BUFFER_SIZE)));
        });
    }

    group.finish();
}

fn bench_hex(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex");

    for size in SIZES {
        let buffer = sample_buffer(size);
        let text = hex::encode(&buffer);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &buffer, |b, buffer| {
            b.iter(|| black_box(hex::encode(buffer)));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &text, |b, text| {
            b.iter(|| black_box(hex::decode(text, MAX_BUFFER_SIZE)));
        });
    }

    group.finish();
}

fn bench_text_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_decode");

    for size in SIZES {
        // Valid UTF-8 takes the fast path; raw bytes exercise replacement.
        let valid = ByteBuffer::from("é".repeat(size / 2).into_bytes());
        let malformed = sample_buffer(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("valid", size), &valid, |b, buffer| {
            b.iter(|| black_box(bytes_to_string(buffer)));
        });
        group.bench_with_input(BenchmarkId::new("malformed", size), &malformed, |b, buffer| {
            b.iter(|| black_box(bytes_to_string(buffer)));
        });
    }

    group.finish();
}

fn bench_accessor(c: &mut Criterion) {
    let mut group = c.benchmark_group("accessor");
    let value = Number::from(0x0102_0304_0506_0708i64);

    for slot in [Slot::Int8, Slot::Int32, Slot::Int64] {
        let mut buffer = ByteBuffer::zeroed(4096);
        let label = format!("{slot:?}");
        group.bench_function(BenchmarkId::new("set", &label), |b| {
            b.iter(|| {
                let _ = accessor::set(
                    &mut buffer,
                    black_box(17),
                    &value,
                    slot,
                    Sign::Signed,
                    Endianness::BigEndian,
                );
            });
        });
        group.bench_function(BenchmarkId::new("get", &label), |b| {
            b.iter(|| {
                black_box(accessor::get::<Number>(
                    &buffer,
                    black_box(17),
                    slot,
                    Sign::Signed,
                    Endianness::BigEndian,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_base64,
    bench_hex,
    bench_text_decode,
    bench_accessor,
);

criterion_main!(benches);
