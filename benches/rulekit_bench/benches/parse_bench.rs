//! Rule grammar benchmarks
//!
//! Parsing cost of rule expressions of growing length.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rulekit_validate::{canonical_name, Registry};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let registry = Registry::new();

    let expressions = [
        ("single", "required"),
        ("typical", "required|numeric|min:18"),
        (
            "long",
            "required|min:2|max:255|in:draft,published,archived,deleted|alpha_num",
        ),
        ("raw_parameter", "required|regex:^[A-Z]{2}-[0-9]{4,8}$"),
    ];

    for (name, expression) in expressions {
        group.bench_with_input(BenchmarkId::from_parameter(name), expression, |b, expr| {
            b.iter(|| registry.parse(black_box(expr)))
        });
    }

    group.finish();
}

fn bench_canonical_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_name");

    group.bench_function("snake", |b| b.iter(|| canonical_name(black_box("digits_between"))));
    group.bench_function("camel", |b| b.iter(|| canonical_name(black_box("digitsBetween"))));
    group.bench_function("alias", |b| b.iter(|| canonical_name(black_box("Int"))));

    group.finish();
}

criterion_group!(benches, bench_parse, bench_canonical_name);

criterion_main!(benches);
