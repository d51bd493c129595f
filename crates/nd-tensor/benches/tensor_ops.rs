// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for tensor construction and indexing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nd_tensor::{flatten, Nested, SliceSpec, Tensor};

/// Builds a `rows x cols` nested literal.
fn matrix(rows: usize, cols: usize) -> Nested<f64> {
    Nested::List(
        (0..rows)
            .map(|r| Nested::from_flat((0..cols).map(|c| (r * cols + c) as f64)))
            .collect(),
    )
}

fn bench_from_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_nested");
    for &n in &[16usize, 128, 512] {
        let input = matrix(n, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| Tensor::<f64>::from_nested(black_box(input)))
        });
    }
    group.finish();
}

fn bench_flatten_deep(c: &mut Criterion) {
    let mut deep = Nested::from_flat([1.0f64, 2.0]);
    for _ in 0..256 {
        deep = Nested::List(vec![deep]);
    }
    c.bench_function("flatten_deep_256", |b| b.iter(|| flatten(black_box(&deep))));
}

fn bench_indexing(c: &mut Criterion) {
    let t = Tensor::<f64>::from_nested(&matrix(256, 256)).expect("rectangular input");
    c.bench_function("get_at_256x256", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in (0..256).step_by(7) {
                for j in (0..256).step_by(5) {
                    acc += t.get_at(black_box(&[i, j])).unwrap_or_default();
                }
            }
            acc
        })
    });
    c.bench_function("slice_step_3", |b| {
        b.iter(|| t.slice(black_box(SliceSpec::full().with_step(3))))
    });
}

criterion_group!(benches, bench_from_nested, bench_flatten_deep, bench_indexing);
criterion_main!(benches);
