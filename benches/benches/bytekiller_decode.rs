//! Benchmark suite for Bytekiller decompression
//!
//! Measures decoder throughput over synthetic literal-packed payloads of
//! increasing size.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flashback_benches::{pack_literals, synthetic_payload};
use flashback_types::file::bytekiller;
use std::hint::black_box;

fn bench_unpack(c: &mut Criterion) {
	let mut group = c.benchmark_group("bytekiller_unpack");

	for size in [1usize << 10, 1 << 14, 1 << 17] {
		let payload = synthetic_payload(size);
		let packed = pack_literals(&payload);

		group.throughput(Throughput::Bytes(size as u64));
		group.bench_with_input(BenchmarkId::new("unpack", size), &packed, |b, packed| {
			b.iter(|| {
				let result = bytekiller::unpack(black_box(packed));
				black_box(result)
			});
		});
	}

	group.finish();
}

fn bench_probe(c: &mut Criterion) {
	let mut group = c.benchmark_group("bytekiller_probe");

	let packed = pack_literals(&synthetic_payload(1 << 14));
	group.bench_function("looks_compressed", |b| {
		b.iter(|| black_box(bytekiller::looks_compressed(black_box(&packed))));
	});

	group.finish();
}

criterion_group!(benches, bench_unpack, bench_probe);
criterion_main!(benches);
