//! Benchmarks for layout passes, one group per strategy.
//!
//! Run with: cargo bench -p trellis-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use trellis_core::{Padding, Rect, SizeSpec};
use trellis_layout::{Direction, GridLayout, Layout, Leaf, TileLayout};

const COUNTS: [usize; 3] = [10, 100, 1000];

fn mixed_children(n: usize) -> Vec<Leaf> {
    (0..n)
        .map(|i| match i % 4 {
            0 => Leaf::fixed(20 + (i % 7) as i32, 12),
            1 => Leaf::new(0, 10).width(SizeSpec::Stretch(50)),
            2 => Leaf::new(0, 14)
                .width(SizeSpec::FILL)
                .max_size(Some(40), None),
            _ => Leaf::fixed(16, 16).margin(2),
        })
        .collect()
}

fn fixed_children(n: usize) -> Vec<Leaf> {
    (0..n)
        .map(|i| Leaf::fixed(10 + (i % 13) as i32, 8 + (i % 5) as i32))
        .collect()
}

fn run(c: &mut Criterion, group_name: &str, layout: &Layout, make: fn(usize) -> Vec<Leaf>) {
    let mut group = c.benchmark_group(group_name);
    let rect = Rect::new(0, 0, 1920, 1080);

    for n in COUNTS {
        let mut children = make(n);
        group.bench_with_input(BenchmarkId::new("arrange", n), &n, |b, _| {
            b.iter(|| {
                let size = layout
                    .arrange_children(&mut children, rect, Padding::all(4))
                    .ok();
                black_box(size);
            })
        });
        group.bench_with_input(BenchmarkId::new("estimate", n), &n, |b, _| {
            b.iter(|| {
                let size = layout
                    .estimate_layout_size(&children, rect.size(), Padding::all(4))
                    .ok();
                black_box(size);
            })
        });
    }

    group.finish();
}

fn bench_float(c: &mut Criterion) {
    run(c, "layout/float", &Layout::float(), fixed_children);
}

fn bench_linear(c: &mut Criterion) {
    run(c, "layout/linear", &Layout::horizontal().child_margin(2, 0), mixed_children);
}

fn bench_flow(c: &mut Criterion) {
    run(
        c,
        "layout/flow",
        &Layout::flow(Direction::Horizontal).child_margin(4, 4),
        fixed_children,
    );
}

fn bench_tile(c: &mut Criterion) {
    run(
        c,
        "layout/tile",
        &Layout::tile(TileLayout::horizontal().columns(12)),
        fixed_children,
    );
}

fn bench_grid(c: &mut Criterion) {
    run(
        c,
        "layout/grid",
        &Layout::grid(GridLayout::new().scale_down(true)).child_margin(1, 1),
        fixed_children,
    );
}

criterion_group!(
    benches,
    bench_float,
    bench_linear,
    bench_flow,
    bench_tile,
    bench_grid
);
criterion_main!(benches);
