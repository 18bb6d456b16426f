// Benchmarks for log parsing and chart aggregations
//
// Benchmark groups:
//   - parse: parse_lines over synthetic logs (10k, 100k lines)
//   - aggregate: each aggregation over the 100k-line log
//
// Run examples:
//   cargo bench --bench analysis            # All benchmarks
//   cargo bench --bench analysis parse      # Parsing only

use std::fmt::Write;

use corfu_profiler::analysis::{self, MethodFilter};
use corfu_profiler::trace::{Trace, parse_lines};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const THREADS: u64 = 8;
const TABLES: [&str; 4] = ["7c4f2940", "9a1bd0e2", "0f3e77c1", "c2a5b918"];

/// A generator-like log: each thread runs transactions of a few reads and
/// writes, with sequencer calls and non-transactional reads in between.
fn synthetic_log(lines: usize) -> String {
    let mut out = String::with_capacity(lines * 80);
    let mut ts: u64 = 1_524_272_351_029_000_000;
    for i in 0..lines {
        let tid = i as u64 % THREADS;
        let table = TABLES[i % TABLES.len()];
        ts += 13_000;
        let dur = 5_000 + (i as u64 * 7_919) % 90_000;
        let _ = match (i / THREADS as usize) % 8 {
            0 => writeln!(out, "{ts} {tid} | TXBegin [dur] {dur}"),
            1 | 2 => writeln!(
                out,
                "{ts} {tid} | access(tx) [method] containsKey [id] {table} [dur] {dur}"
            ),
            3 => writeln!(
                out,
                "{ts} {tid} | mutate(tx) [method] put [ids] {table} {} [dur] {dur}",
                TABLES[0]
            ),
            4 => writeln!(out, "{ts} {tid} | TXEnd [dur] {dur}"),
            5 => writeln!(out, "{ts} {tid} | Seq [dur] {dur}"),
            _ => writeln!(
                out,
                "{ts} {tid} | access(nonTx) [method] get [id] {table} [dur] {dur}"
            ),
        };
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for lines in [10_000, 100_000] {
        let log = synthetic_log(lines);
        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &log, |b, log| {
            b.iter(|| parse_lines(log));
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let trace = Trace::from_text(&synthetic_log(100_000), "bench.log");
    let records = &trace.records;
    let access = vec!["containsKey".to_string()];
    let mutate = vec!["put".to_string()];

    group.bench_function("active_threads", |b| {
        b.iter(|| analysis::active_threads(records))
    });
    group.bench_function("ops_per_tx", |b| b.iter(|| analysis::ops_per_tx(records)));
    group.bench_function("table_ops_per_tx", |b| {
        b.iter(|| analysis::table_ops_per_tx(records, &access, &mutate, Some(TABLES[0])))
    });
    group.bench_function("method_share", |b| {
        b.iter(|| analysis::method_share(records, MethodFilter::Transactional))
    });
    group.bench_function("op_latency", |b| b.iter(|| analysis::op_latency(records)));
    group.bench_function("table_ops", |b| b.iter(|| analysis::table_ops(records)));

    group.finish();
}

criterion_group!(benches, bench_parse, bench_aggregate);
criterion_main!(benches);
