//! Embedding resolution over synthetic catalogs.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ifcat_facts::{BaseRef, InterfaceRecord, MethodRecord};
use ifcat_graph::resolve_catalog;

fn record(name: String, methods: usize, bases: Vec<BaseRef>) -> InterfaceRecord {
    InterfaceRecord {
        methods: (0..methods)
            .map(|m| MethodRecord {
                signature_text: format!("M{m}() error"),
                name: format!("M{m}"),
                parameters: Vec::new(),
                return_type: "error".to_string(),
            })
            .collect(),
        namespace: "bench".to_string(),
        origin: "bench/bench.go".to_string(),
        line: 1,
        name,
        bases,
        dot_imports: Vec::new(),
    }
}

/// `I0 <- I1 <- ... <- I{n-1}`, each embedding its predecessor.
fn chain(n: usize) -> Vec<InterfaceRecord> {
    (0..n)
        .map(|i| {
            let bases = if i == 0 {
                Vec::new()
            } else {
                vec![BaseRef::local(format!("I{}", i - 1))]
            };
            record(format!("I{i}"), 2, bases)
        })
        .collect()
}

/// `width` leaves, each embedded by every one of `width` aggregates.
fn fan(width: usize) -> Vec<InterfaceRecord> {
    let mut records: Vec<_> = (0..width)
        .map(|i| record(format!("Leaf{i}"), 3, Vec::new()))
        .collect();
    for i in 0..width {
        let bases = (0..width).map(|l| BaseRef::local(format!("Leaf{l}"))).collect();
        records.push(record(format!("Agg{i}"), 1, bases));
    }
    records
}

fn bench_resolve(c: &mut Criterion) {
    let chain_records = chain(500);
    c.bench_function("resolve_chain_500", |b| {
        b.iter_batched(
            || chain_records.clone(),
            |mut records| resolve_catalog(&mut records),
            BatchSize::SmallInput,
        )
    });

    let fan_records = fan(50);
    c.bench_function("resolve_fan_50x50", |b| {
        b.iter_batched(
            || fan_records.clone(),
            |mut records| resolve_catalog(&mut records),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
