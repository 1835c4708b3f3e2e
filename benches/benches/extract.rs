//! Per-unit extraction and parallel scan throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ifcat_facts::{Extractor, SourceUnit, scan_units};
use ifcat_languages::Go;

/// A unit with `count` interfaces, each with a handful of qualified methods.
fn generate_unit(count: usize) -> String {
    let mut src = String::from("package bench\n\ntype Token int\n\n");
    for i in 0..count {
        src.push_str(&format!(
            "type Iface{i} interface {{\n\
             \tRead(p []byte) (n int, err error)\n\
             \tNext(t Token, opts ...Option) (*Token, error)\n\
             \tMap(m map[string]Token) func(Token) bool\n\
             \tprivate()\n\
             }}\n\n"
        ));
    }
    src
}

fn bench_extract_unit(c: &mut Criterion) {
    let extractor = Extractor::new(&Go).unwrap();
    let src = generate_unit(200);

    c.bench_function("extract_unit_200_interfaces", |b| {
        b.iter(|| {
            extractor
                .extract_from_unit("bench/bench.go", black_box(src.as_bytes()))
                .unwrap()
        })
    });
}

fn bench_scan_units(c: &mut Criterion) {
    let extractor = Extractor::new(&Go).unwrap();
    let units: Vec<SourceUnit> = (0..100)
        .map(|i| SourceUnit {
            path: format!("pkg{i}/unit.go"),
            content: generate_unit(20).into_bytes(),
        })
        .collect();

    c.bench_function("scan_100_units", |b| {
        b.iter(|| scan_units(&extractor, black_box(&units)))
    });
}

criterion_group!(benches, bench_extract_unit, bench_scan_units);
criterion_main!(benches);
