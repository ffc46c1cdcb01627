use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use figura::geom::Interpolate;
use figura::math::{Angle, Rotation};
use figura::path::{FormatOptions, Path, Spline};
use figura::svg::{parse_chunks, parse_path, PathParser};
use figura_tests::*;

use std::hint::black_box;

static SIZES: [usize; 3] = [1, 10, 100];

/// A copy of the path without its cached bounds and strings.
fn uncached(path: &Path) -> Path {
    path.iter()
        .map(|spline| Spline::new(spline.curves().to_vec(), spline.is_closed()))
        .collect()
}

fn parse(c: &mut Criterion) {
    let mut g = c.benchmark_group("parse");
    for size in &SIZES {
        let src = generate_path_string(*size);
        g.bench_with_input(BenchmarkId::new("whole", size), &src, |b, src| {
            b.iter(|| parse_path(black_box(src)))
        });
        g.bench_with_input(BenchmarkId::new("chunks of 16", size), &src, |b, src| {
            b.iter(|| {
                let chunks = src
                    .as_bytes()
                    .chunks(16)
                    .filter_map(|bytes| std::str::from_utf8(bytes).ok());
                parse_chunks(PathParser::new(), chunks)
            })
        });
    }
}

fn serialize(c: &mut Criterion) {
    let mut g = c.benchmark_group("serialize");
    for size in &SIZES {
        let path = generate_path(*size);
        g.bench_with_input(BenchmarkId::new("default", size), &path, |b, path| {
            b.iter(|| uncached(path).to_string())
        });
        g.bench_with_input(BenchmarkId::new("relative", size), &path, |b, path| {
            b.iter(|| path.to_path_string(&FormatOptions::relative()).into_owned())
        });
    }
}

fn geometry(c: &mut Criterion) {
    let path = generate_path(100);
    let other = path.transformed(&Rotation::new(Angle::degrees(30.0)));

    c.bench_function("bounds", |b| {
        b.iter(|| uncached(&path).bounding_box())
    });
    c.bench_function("split", |b| b.iter(|| path.split(black_box(0.37))));
    c.bench_function("subdivide", |b| b.iter(|| path.subdivide(black_box(0.37))));
    c.bench_function("lerp", |b| b.iter(|| path.lerp(&other, black_box(0.5))));
}

criterion_group!(paths, parse, serialize, geometry);
criterion_main!(paths);
