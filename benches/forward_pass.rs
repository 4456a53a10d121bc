//! Benchmarks for the forward/backward timing pipeline.
//!
//! Sweeps netlist size (a synthetic series-AND chain) and rayon worker-pool
//! size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sta_engine::config::AnalysisConfig;
use sta_engine::graph::build_graph;
use sta_engine::levels::partition_levels;
use sta_engine::netlist::{parse_netlist, Netlist};
use sta_engine::timing::{run_backward_pass, run_forward_pass};

/// Chain lengths to sweep.
const CHAIN_LENGTHS: &[usize] = &[10, 100, 1_000];

/// Worker-pool sizes to sweep.
const WORKER_COUNTS: &[usize] = &[1, 4, 16];

/// Build a synthetic JSON netlist of `n` series `$_AND_` gates, net `i+1`
/// driven by nets `i` and a fresh constant-ish second input, matching the
/// shape `tests/integration.rs`'s `long_and_chain_violates` builds by
/// hand for a fixed length of 10.
fn synthetic_and_chain(n: usize) -> String {
    let mut cells = serde_json::Map::new();
    let mut port_directions = serde_json::Map::new();
    port_directions.insert("A".into(), "input".into());
    port_directions.insert("B".into(), "input".into());
    port_directions.insert("Y".into(), "output".into());

    for i in 0..n {
        let a = if i == 0 { 100 } else { i as u32 };
        let b = if i == 0 { 101 } else { 1000 + i as u32 };
        let y = i as u32 + 1;
        let mut connections = serde_json::Map::new();
        connections.insert("A".into(), serde_json::json!([a]));
        connections.insert("B".into(), serde_json::json!([b]));
        connections.insert("Y".into(), serde_json::json!([y]));
        cells.insert(
            format!("u{i}"),
            serde_json::json!({
                "type": "$_AND_",
                "port_directions": port_directions.clone(),
                "connections": connections,
            }),
        );
    }
    let module = serde_json::json!({ "cells": cells, "ports": {}, "netnames": {} });
    let root = serde_json::json!({ "modules": { "top": module } });
    root.to_string()
}

fn load_netlist(n: usize) -> Netlist {
    parse_netlist(&synthetic_and_chain(n)).expect("synthetic netlist parses")
}

fn bench_forward_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_pass");

    for &n in CHAIN_LENGTHS {
        let netlist = load_netlist(n);
        let graph = build_graph(&netlist);
        let levels = partition_levels(&graph).expect("synthetic chain is acyclic");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("gates", n), &n, |b, _| {
            b.iter(|| {
                black_box(run_forward_pass(
                    black_box(&graph),
                    black_box(&netlist),
                    black_box(&levels),
                    black_box(&pool),
                ))
            })
        });
    }

    group.finish();
}

fn bench_backward_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("backward_pass");
    let config = AnalysisConfig::default();

    for &n in CHAIN_LENGTHS {
        let netlist = load_netlist(n);
        let graph = build_graph(&netlist);
        let levels = partition_levels(&graph).expect("synthetic chain is acyclic");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap();
        let forward = run_forward_pass(&graph, &netlist, &levels, &pool);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("gates", n), &n, |b, _| {
            b.iter(|| {
                black_box(run_backward_pass(
                    black_box(&graph),
                    black_box(&netlist),
                    black_box(&levels),
                    black_box(&forward),
                    black_box(&config),
                    black_box(&pool),
                ))
            })
        });
    }

    group.finish();
}

/// How the pipeline scales with `--workers` on a fixed, reasonably large
/// chain.
fn bench_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_scaling");
    let n = 1_000;
    let netlist = load_netlist(n);
    let graph = build_graph(&netlist);
    let levels = partition_levels(&graph).expect("synthetic chain is acyclic");

    for &workers in WORKER_COUNTS {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| {
                black_box(run_forward_pass(
                    black_box(&graph),
                    black_box(&netlist),
                    black_box(&levels),
                    black_box(&pool),
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_forward_pass,
    bench_backward_pass,
    bench_worker_scaling
);

criterion_main!(benches);
