//! Benchmarks for descriptor normalization
//!
//! Run with: cargo bench -p descriptor

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use descriptor::{HexCase, IdFormat, RawDeviceRecord, normalize_all, parse_id};

fn make_records(count: usize) -> Vec<RawDeviceRecord> {
    (0..count)
        .map(|i| {
            RawDeviceRecord::new(
                format!("Product {}", i),
                format!("1-{}:1.0", i),
                (i % 0x10000) as u16,
                ((i * 7) % 0x10000) as u16,
                "Benchmark Vendor",
            )
        })
        .collect()
}

fn bench_normalize_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_all");

    for count in [1usize, 16, 256] {
        let records = make_records(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("lower", count), &records, |b, records| {
            b.iter(|| normalize_all(black_box(records.clone()), &IdFormat::default()))
        });

        let upper = IdFormat::new(HexCase::Upper, true);
        group.bench_with_input(BenchmarkId::new("upper_prefixed", count), &records, |b, records| {
            b.iter(|| normalize_all(black_box(records.clone()), &upper))
        });
    }

    group.finish();
}

fn bench_parse_id(c: &mut Criterion) {
    c.bench_function("parse_id", |b| {
        b.iter(|| parse_id(black_box("0x04d2")))
    });
}

criterion_group!(benches, bench_normalize_all, bench_parse_id);
criterion_main!(benches);
