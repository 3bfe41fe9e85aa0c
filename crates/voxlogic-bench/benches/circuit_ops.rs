//! Criterion micro-benchmarks for tracing, compiling and evaluating.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voxlogic_bench::{gate_lattice, wire_chain};
use voxlogic_circuit::{compile_all, trace, CompileOptions, EvalState, NullSink};
use voxlogic_grid::discover_clusters;

/// Benchmark: trace a 1000-wire chain, with and without edge recording.
fn bench_trace_wire_chain_1k(c: &mut Criterion) {
    let grid = wire_chain(1000).unwrap();
    let members = discover_clusters(&grid).remove(0);

    c.bench_function("trace_wire_chain_1k", |b| {
        b.iter(|| black_box(trace(&grid, &members, true).unwrap()));
    });
    c.bench_function("trace_wire_chain_1k_no_edges", |b| {
        b.iter(|| black_box(trace(&grid, &members, false).unwrap()));
    });
}

/// Benchmark: discover and compile 16 rows of 32 gates.
fn bench_compile_gate_lattice(c: &mut Criterion) {
    let grid = gate_lattice(16, 32).unwrap();
    let options = CompileOptions::default();

    c.bench_function("compile_gate_lattice_16x32", |b| {
        b.iter(|| black_box(compile_all(&grid, &options, &NullSink).unwrap()));
    });
}

/// Benchmark: one evaluation pass over a compiled lattice, without edits.
fn bench_evaluate_gate_lattice(c: &mut Criterion) {
    let grid = gate_lattice(16, 32).unwrap();
    let circuits = compile_all(&grid, &CompileOptions::default(), &NullSink).unwrap();

    c.bench_function("evaluate_gate_lattice_16x32", |b| {
        b.iter(|| {
            for circuit in &circuits {
                let mut state = EvalState::new(&grid);
                circuit.evaluate(&mut state);
                black_box(state.snapshot());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_trace_wire_chain_1k,
    bench_compile_gate_lattice,
    bench_evaluate_gate_lattice
);
criterion_main!(benches);
