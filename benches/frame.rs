//! Benchmarks for frame encoding.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use logentries::FrameMode;

const TOKEN: &str = "2bfbea1e-10c3-4419-bdad-7e6435882e1f";

fn payloads() -> Vec<(&'static str, Vec<u8>)> {
    let single_line = b"GET /api/v1/items 200 12ms".repeat(8);
    let stack_trace = b"at worker::run (src/worker.rs:42)\n".repeat(32);
    let all_breaks = vec![b'\n'; 512];
    vec![
        ("single_line", single_line),
        ("stack_trace", stack_trace),
        ("all_breaks", all_breaks),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_into");
    for (name, payload) in payloads() {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        for mode in [FrameMode::LineSeparated, FrameMode::Raw] {
            let id = BenchmarkId::new(format!("{mode:?}"), name);
            let mut scratch = Vec::new();
            group.bench_with_input(id, &payload, |b, payload| {
                b.iter(|| {
                    mode.encode_into(&mut scratch, TOKEN, "web-1", black_box(payload));
                    black_box(scratch.len())
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
