//! Criterion benchmarks for document building.
//!
//! Compares sequential and parallel evaluation of computed fields and
//! measures stored field ingestion.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use docweaver::prelude::*;

/// Generate an indexable with `count` text fields.
fn generate_indexable(count: usize) -> MemoryIndexable {
    let words = [
        "search", "engine", "document", "field", "boost", "culture", "content", "index",
    ];

    (0..count).fold(MemoryIndexable::new("bench-item", Culture::new("da-DK")), |item, i| {
        let text: Vec<&str> = (0..20).map(|j| words[(i + j) % words.len()]).collect();
        item.with_text(format!("Field{i}"), text.join(" "))
    })
}

/// Context with `count` computed fields that each do some string work.
fn computed_context(settings: BuilderSettings, count: usize) -> IndexContext {
    (0..count).fold(IndexContext::new(settings).unwrap(), |context, i| {
        context.with_computed_field(FnComputedField::new(format!("Computed{i}"), move |item| {
            let joined: String = item
                .fields()
                .iter()
                .filter_map(|f| f.value().map(|v| v.to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            Ok(Some(FieldValue::Text(format!("{i}:{}", joined.len()))))
        }))
    })
}

fn bench_stored_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("stored_fields");
    let context = IndexContext::new(BuilderSettings::default()).unwrap();

    for count in [10, 100] {
        let item = generate_indexable(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("fields_{count}"), |b| {
            b.iter(|| DocumentBuilder::build_document(black_box(&item), &context).unwrap())
        });
    }
    group.finish();
}

fn bench_computed_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("computed_fields");
    let item = generate_indexable(50);

    let sequential = computed_context(BuilderSettings::default(), 64);
    let parallel_settings = BuilderSettings::default().with_parallel_computed_fields(true);
    let parallel = computed_context(parallel_settings, 64);

    group.throughput(Throughput::Elements(64));
    group.bench_function("sequential", |b| {
        b.iter(|| DocumentBuilder::build_document(black_box(&item), &sequential).unwrap())
    });
    group.bench_function("parallel", |b| {
        b.iter(|| DocumentBuilder::build_document(black_box(&item), &parallel).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_stored_fields, bench_computed_fields);
criterion_main!(benches);
