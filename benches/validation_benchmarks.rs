use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use formcheck::{Rule, Schema, SchemaRegistry, ValidationEngine, rules};
use serde_json::{Map, Value, json};
use std::hint::black_box;

/// Generate a schema with `fields` fields of a few rules each
fn generate_schema(fields: usize) -> Schema {
    (0..fields)
        .map(|i| {
            let rules = vec![
                rules::required(format!("Field {} is required.", i)),
                rules::min_length(2, format!("Field {} is too short.", i)),
                rules::max_length(64, format!("Field {} is too long.", i)),
                rules::not_equal(json!("bob"), format!("Field {} cannot be bob.", i)),
            ];
            (format!("field_{}", i), rules)
        })
        .collect()
}

/// Generate a form state for `generate_schema` with a given error scenario
fn generate_form_state(fields: usize, scenario: &str) -> Value {
    let mut state = Map::new();
    for i in 0..fields {
        let value = match scenario {
            "all_valid" => json!(format!("value {}", i)),
            "all_invalid" => json!(""),
            // 30% of fields fail on their last rule, the most expensive case
            "mixed_errors" if i % 10 < 3 => json!("bob"),
            _ => json!(format!("value {}", i)),
        };
        state.insert(format!("field_{}", i), value);
    }
    Value::Object(state)
}

/// Benchmark validate_all with different error densities
fn bench_validate_all_error_density(c: &mut Criterion) {
    let schema = generate_schema(50);
    let scenarios = vec!["all_valid", "mixed_errors", "all_invalid"];

    let mut group = c.benchmark_group("validate_all_error_density");

    for scenario in scenarios {
        let form_state = generate_form_state(50, scenario);
        let mut engine = ValidationEngine::new(schema.clone());

        group.throughput(Throughput::Elements(schema.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", scenario),
            &form_state,
            |b, form_state| {
                b.iter(|| {
                    let valid = engine.validate_all(black_box(form_state));
                    black_box(valid)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark validate_all scalability with different schema sizes
fn bench_validate_all_scalability(c: &mut Criterion) {
    let sizes = vec![10, 100, 1_000, 5_000];

    let mut group = c.benchmark_group("validate_all_scalability");

    for &size in &sizes {
        let mut engine = ValidationEngine::new(generate_schema(size));
        let form_state = generate_form_state(size, "mixed_errors");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("fields", size), &form_state, |b, form_state| {
            b.iter(|| {
                let valid = engine.validate_all(black_box(form_state));
                black_box(valid)
            })
        });
    }

    group.finish();
}

/// Benchmark single-field operations, as driven by per-keystroke UI events
fn bench_single_field(c: &mut Criterion) {
    let mut registry = SchemaRegistry::new();
    registry.add_embedded_schemas();
    let person = registry.get("person").expect("embedded person schema");
    let form_state = json!({ "dingo": false });

    let mut group = c.benchmark_group("single_field");

    let mut engine = ValidationEngine::with_shared(person.clone());
    group.bench_function("validate", |b| {
        b.iter(|| {
            let result = engine.validate(black_box("name"), black_box(&json!("jack")), &form_state);
            black_box(result)
        })
    });

    let mut engine = ValidationEngine::with_shared(person.clone());
    group.bench_function("validate_if_true_failing", |b| {
        b.iter(|| {
            let result =
                engine.validate_if_true(black_box("name"), black_box(&json!("bob")), &form_state);
            black_box(result)
        })
    });

    let mut engine = ValidationEngine::with_shared(person);
    engine.validate_all(&json!({ "name": "bob", "age": 3 }));
    group.bench_function("validation_errors", |b| {
        b.iter(|| black_box(engine.validation_errors().len()))
    });

    group.finish();
}

/// Benchmark the cost of a rule built from a regex versus a closure
fn bench_rule_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_kinds");
    let state = json!({});
    let value = json!("bob.ross@example.com");

    let regex_rule = rules::pattern(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "Invalid email.")
        .expect("valid regex");
    let closure_rule = Rule::new("Invalid email.", |v, _| {
        v.as_str().is_some_and(|s| s.contains('@'))
    });

    group.bench_function("pattern", |b| {
        b.iter(|| black_box(regex_rule.check(black_box(&value), &state)))
    });
    group.bench_function("closure", |b| {
        b.iter(|| black_box(closure_rule.check(black_box(&value), &state)))
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_validate_all_error_density,
    bench_validate_all_scalability,
    bench_single_field,
    bench_rule_kinds
);

criterion_main!(validation_benches);
