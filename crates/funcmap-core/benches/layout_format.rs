//! Benchmarks for reference-layout formatting and helper dispatch

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use funcmap_core::{FuncMap, Value, layout};

fn bench_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_format");
    let time = Utc
        .with_ymd_and_hms(2024, 2, 29, 13, 45, 10)
        .single()
        .map(|t| t.fixed_offset())
        .unwrap_or_default();

    for (name, fmt) in [
        ("date_only", layout::DATE_ONLY),
        ("rfc3339_nano", layout::RFC3339_NANO),
        ("rfc1123", layout::RFC1123),
        ("prose", "Monday, January 2 2006 at 3:04pm"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), fmt, |b, fmt| {
            b.iter(|| layout::format(black_box(&time), black_box(fmt)));
        });
    }
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let funcs = FuncMap::default();
    let args: Vec<Value> = ["b", "2", "a", "1", "query", "rust templates"]
        .into_iter()
        .map(Value::from)
        .collect();

    c.bench_function("querify_dispatch", |b| {
        b.iter(|| funcs.call(black_box("querify"), black_box(&args)));
    });
    c.bench_function("date_format_parse_and_render", |b| {
        let args = [Value::from(layout::RFC1123), Value::from("2024-02-29 13:45:10")];
        b.iter(|| funcs.call(black_box("dateFormat"), black_box(&args)));
    });
}

criterion_group!(benches, bench_layouts, bench_dispatch);
criterion_main!(benches);
