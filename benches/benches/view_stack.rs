// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_gesture::adapters::view_tree::LogicalElement;
use understory_gesture::view_stack::resolve_view_stack;
use understory_view_tree::{LocalNode, NodeId, Tree};

#[derive(Clone, Copy)]
struct View(u32);

impl LogicalElement for View {
    type View = u32;
    fn as_view(&self) -> Option<u32> {
        Some(self.0)
    }
}

/// A root holding an `n` x `n` grid of cells, each with `depth` nested children.
fn gen_nested_grid(n: usize, cell: f64, depth: usize) -> (Tree<View>, NodeId) {
    let mut tree = Tree::new();
    let side = n as f64 * cell;
    let root = tree.insert(None, LocalNode::unmapped(Rect::new(0.0, 0.0, side, side)));
    let mut next = 0_u32;
    for y in 0..n {
        for x in 0..n {
            let mut bounds = Rect::new(
                x as f64 * cell,
                y as f64 * cell,
                (x + 1) as f64 * cell,
                (y + 1) as f64 * cell,
            );
            let mut parent = root;
            for _ in 0..=depth {
                next += 1;
                parent = tree.insert(Some(parent), LocalNode::element(bounds, View(next)));
                bounds = bounds.inset(-1.0);
            }
        }
    }
    (tree, root)
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, side: f64, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * side, rng.next_f64() * side))
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_view_stack");
    for &(n, depth) in &[(8_usize, 2_usize), (32, 2), (32, 8), (64, 4)] {
        let cell = 40.0;
        let (tree, root) = gen_nested_grid(n, cell, depth);
        let points = gen_points(256, n as f64 * cell, 0x5eed);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("grid{n}x{n}_depth{depth}"), |b| {
            b.iter(|| {
                let mut total = 0;
                for &pt in &points {
                    total += resolve_view_stack(&tree, root, black_box(pt)).len();
                }
                black_box(total)
            });
        });
    }
    group.finish();
}

fn bench_build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_tree_build");
    for &n in &[16_usize, 64] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid{n}x{n}"), |b| {
            b.iter_batched(
                || (),
                |()| black_box(gen_nested_grid(n, 20.0, 1)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_build_tree);
criterion_main!(benches);
