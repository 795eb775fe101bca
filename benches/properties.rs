use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ontolookup_rs::properties::ingest_entries;
use ontolookup_rs::{PropertyEntry, format_label, render_properties};
use serde_json::{Value, json};

/// A backend-shaped property list: `width` scalars per level, one
/// relationship per level, `depth` levels deep.
fn property_payload(width: usize, depth: usize) -> Value {
    let mut level = Vec::new();
    for d in (0..depth).rev() {
        let mut entries: Vec<Value> = (0..width)
            .map(|i| json!({ format!("campo_{d}_{i}"): ["valor", i, null] }))
            .collect();
        if !level.is_empty() {
            entries.push(json!({
                "relationship": {
                    "iri": format!("http://onto.test/onto#rel_{d}"),
                    "name_object": format!("Nivel {d}"),
                    "properties": level,
                }
            }));
        }
        level = entries;
    }
    Value::Array(level)
}

fn bench_ingest(c: &mut Criterion) {
    const CASES: &[(usize, usize)] = &[(4, 3), (16, 8), (32, 24)];
    for &(width, depth) in CASES {
        let payload = property_payload(width, depth);
        c.bench_with_input(
            BenchmarkId::new("ingest_entries", format!("{width}x{depth}")),
            &payload,
            |b, payload| {
                b.iter(|| black_box(ingest_entries(payload).len()));
            },
        );
    }
}

fn bench_render(c: &mut Criterion) {
    const CASES: &[(usize, usize)] = &[(4, 3), (16, 8), (32, 24)];
    for &(width, depth) in CASES {
        let entries: Vec<PropertyEntry> = ingest_entries(&property_payload(width, depth));
        c.bench_with_input(
            BenchmarkId::new("render_properties", format!("{width}x{depth}")),
            &entries,
            |b, entries| {
                b.iter(|| {
                    let nodes = render_properties(entries, 0).expect("well-formed tree");
                    black_box(nodes.len());
                });
            },
        );
    }
}

fn bench_format_label(c: &mut Criterion) {
    c.bench_function("format_label::snake_case", |b| {
        b.iter(|| black_box(format_label(black_box("tiene_sintoma_principal_asociado"))));
    });
}

criterion_group!(benches, bench_ingest, bench_render, bench_format_label);
criterion_main!(benches);
