// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_gesture::adapters::motion::MotionAdapter;
use understory_gesture::command::{GestureCommand, RelayGesture};
use understory_gesture::container::GestureContainer;
use understory_gesture::detector::{TouchAction, TouchEvent};
use understory_gesture::registry::InterestRegistry;
use understory_gesture::types::{GestureInterest, GestureResult, GestureType};
use understory_gesture::view_stack::NoVisuals;

const TYPES: [GestureType; 4] = [
    GestureType::SingleTap,
    GestureType::DoubleTap,
    GestureType::Swipe,
    GestureType::Move,
];

/// `owners` owners, each interested in every type in `TYPES`, half of them scoped to themselves.
fn gen_registry(owners: u32, hits: &Rc<Cell<u64>>) -> InterestRegistry<u32> {
    let mut reg = InterestRegistry::new();
    for owner in 0..owners {
        let interests = TYPES
            .iter()
            .map(|&ty| {
                let h = hits.clone();
                let cmd: Rc<dyn GestureCommand<u32, ()>> =
                    Rc::new(RelayGesture::<u32, ()>::new(move |_, _| h.set(h.get() + 1)));
                let interest = GestureInterest::new(ty).with_command(cmd);
                if owner % 2 == 0 {
                    interest.for_view(owner)
                } else {
                    interest
                }
            })
            .collect();
        reg.register_interests(owner, interests);
    }
    reg
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_process");
    for &owners in &[4_u32, 64, 512] {
        let hits = Rc::new(Cell::new(0));
        let reg = gen_registry(owners, &hits);
        let results: Vec<GestureResult<u32>> = TYPES
            .iter()
            .map(|&ty| {
                GestureResult::new(ty, Point::new(10.0, 10.0)).with_view_stack(Some(vec![0, 2, 4]))
            })
            .collect();
        group.throughput(Throughput::Elements(results.len() as u64));
        group.bench_function(format!("owners{owners}"), |b| {
            b.iter(|| {
                for r in &results {
                    black_box(reg.process(black_box(r)));
                }
            });
        });
    }
    group.finish();
}

fn bench_touch_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_stream");
    // Down, 30 moves along a diagonal, up: a fling.
    let mut events = vec![TouchEvent::single(TouchAction::Down, 0, Point::ZERO)];
    for i in 1..=30_u32 {
        let d = f64::from(i) * 8.0;
        events.push(TouchEvent::single(TouchAction::Move, u64::from(i) * 8, Point::new(d, d)));
    }
    events.push(TouchEvent::single(TouchAction::Up, 248, Point::new(240.0, 240.0)));
    group.throughput(Throughput::Elements(events.len() as u64));
    group.bench_function("fling_32_events", |b| {
        let tree = NoVisuals::new();
        b.iter(|| {
            let mut container: GestureContainer<u32> = GestureContainer::new();
            container.register_interests(1, vec![GestureInterest::new(GestureType::Swipe)]);
            let mut adapter = MotionAdapter::new(2.0);
            for e in &events {
                let mut classifier = adapter.classifier(&mut container, &tree, ());
                black_box(adapter.on_touch(e, &mut classifier));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_registry, bench_touch_stream);
criterion_main!(benches);
