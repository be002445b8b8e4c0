use criterion::{criterion_group, criterion_main, Criterion};
use std::fs;
use verbatim_json::Value;

macro_rules! build_parse_benchmark {
    ($func : tt, $filename : expr) => {
        fn $func() {
            let raw = fs::read(format!("fixtures/conformance/{}.json", $filename)).unwrap();
            let mut value = Value::Null;
            let _ = value.read_bytes(&raw);
        }
    };
}

build_parse_benchmark!(mixed_document, "pass1");
build_parse_benchmark!(compact_document, "round1");
build_parse_benchmark!(pretty_document, "pretty1");

fn benchmark_mixed_document(c: &mut Criterion) {
    c.bench_function("parse of mixed document", |b| b.iter(mixed_document));
}

fn benchmark_compact_document(c: &mut Criterion) {
    c.bench_function("parse of compact document", |b| b.iter(compact_document));
}

fn benchmark_pretty_document(c: &mut Criterion) {
    c.bench_function("parse of pretty document", |b| b.iter(pretty_document));
}

fn benchmark_stringify(c: &mut Criterion) {
    let raw = fs::read("fixtures/conformance/pass1.json").unwrap();
    let mut value = Value::Null;
    value.read_bytes(&raw).unwrap();
    c.bench_function("compact write of mixed document", |b| {
        b.iter(|| value.stringify(0))
    });
    c.bench_function("pretty write of mixed document", |b| {
        b.iter(|| value.stringify(4))
    });
}

criterion_group!(
    benches,
    benchmark_mixed_document,
    benchmark_compact_document,
    benchmark_pretty_document,
    benchmark_stringify
);
criterion_main!(benches);
