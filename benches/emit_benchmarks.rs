//! Performance benchmarks for call-site emission.
//!
//! Measures the cost of emitting direct and defaults-forwarding calls into
//! a bytecode chunk, including constant pool interning.
//!
//! ```bash
//! cargo bench --bench emit_benchmarks
//! ```

use callsite::prelude::*;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const CALLS: u64 = 1_000;

fn callables() -> Vec<CallableMethod> {
    (0..16)
        .map(|i| {
            let sig = MethodSignature::parse(
                format!("method{i}"),
                "(Ljava/lang/String;IJ)Ljava/lang/Object;",
            )
            .expect("valid descriptor");
            CallableMethod::builder(AsmType::object("bench/Owner"), sig, DispatchKind::Virtual)
                .defaults(AsmType::object("bench/Owner$DefaultImpls"), AsmType::Int)
                .receiver_type(AsmType::object("bench/Owner"))
                .build()
        })
        .collect()
}

fn direct_calls(c: &mut Criterion) {
    let callables = callables();
    let mut group = c.benchmark_group("emit/direct");
    group.throughput(Throughput::Elements(CALLS));
    group.bench_function("virtual", |b| {
        b.iter(|| {
            let mut constants = ConstantPool::new();
            let mut emitter = BytecodeEmitter::new(&mut constants);
            for callable in callables.iter().cycle().take(CALLS as usize) {
                callable.emit_direct_call(&mut emitter);
            }
            black_box(emitter.finish())
        })
    });
    group.finish();
}

fn defaults_forwarding_calls(c: &mut Criterion) {
    let callables = callables();
    let mut group = c.benchmark_group("emit/defaults");
    group.throughput(Throughput::Elements(CALLS));
    group.bench_function("virtual", |b| {
        b.iter(|| {
            let mut constants = ConstantPool::new();
            let mut emitter = BytecodeEmitter::new(&mut constants);
            for callable in callables.iter().cycle().take(CALLS as usize) {
                callable
                    .emit_defaults_forwarding_call(&mut emitter)
                    .expect("defaults present");
            }
            black_box(emitter.finish())
        })
    });
    group.finish();
}

criterion_group!(benches, direct_calls, defaults_forwarding_calls);
criterion_main!(benches);
