//! Validation benchmarks
//!
//! Full sessions over flat and wildcard records. Checks are all synchronous,
//! so a current-thread runtime is enough.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rulekit_validate::{CustomMessages, MemoryLookup, Validator};
use serde_json::{json, Value};

fn person() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "age": 36,
        "email": "ada@example.com",
        "gender": "female",
        "website": "https://example.com/ada"
    })
}

const PERSON_RULES: &[(&str, &str)] = &[
    ("firstName", "required|min:2"),
    ("lastName", "required|min:2"),
    ("age", "required|integer|min:18"),
    ("email", "required|email"),
    ("gender", "in:male,female"),
    ("website", "nullable|url"),
];

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn bench_flat_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_record");
    let rt = runtime();
    let validator = Validator::new();

    let valid = person();
    group.bench_function("passing", |b| {
        b.iter(|| rt.block_on(validator.validate(black_box(&valid), PERSON_RULES.iter().copied())))
    });

    let invalid = json!({ "firstName": "", "age": 12, "email": "nope", "gender": "other" });
    group.bench_function("failing", |b| {
        b.iter(|| {
            rt.block_on(validator.validate(black_box(&invalid), PERSON_RULES.iter().copied()))
        })
    });

    let messages = CustomMessages::new()
        .with("required", "Please fill in :attribute.")
        .with_rule("age", "min", "Adults only (:min+).");
    group.bench_function("failing_custom_messages", |b| {
        b.iter(|| {
            rt.block_on(validator.validate_with(
                black_box(&invalid),
                PERSON_RULES.iter().copied(),
                &messages,
            ))
        })
    });

    group.finish();
}

fn bench_wildcard(c: &mut Criterion) {
    let mut group = c.benchmark_group("wildcard");
    let rt = runtime();
    let validator = Validator::new();

    for size in [10usize, 100, 1000] {
        let scores: Vec<Value> = (0..size)
            .map(|i| if i % 7 == 0 { Value::Null } else { json!(i % 100) })
            .collect();
        let data = json!({ "scores": scores });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                rt.block_on(validator.validate(
                    black_box(data),
                    [("scores", "array"), ("scores.*", "required|integer|min:10")],
                ))
            })
        });
    }

    group.finish();
}

fn bench_exists(c: &mut Criterion) {
    let mut group = c.benchmark_group("exists");
    let rt = runtime();

    let lookup = MemoryLookup::new().with_records("users", "id", (0..1000).map(|i| json!(i)));
    let validator = Validator::builder().lookup(lookup).build();
    let data = json!({ "owner": 512, "reviewer": 4096 });

    group.bench_function("memory_lookup", |b| {
        b.iter(|| {
            rt.block_on(validator.validate(
                black_box(&data),
                [("owner", "exists:users,id"), ("reviewer", "exists:users,id")],
            ))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_flat_record, bench_wildcard, bench_exists);

criterion_main!(benches);
