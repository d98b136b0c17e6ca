// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture basics.
//!
//! This example feeds a scripted pixel touch stream through the motion adapter
//! and prints every recognized gesture: a tap, a double tap, a long press, a
//! swipe and a two-finger pinch.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example gesture_basics`

use std::rc::Rc;

use kurbo::Point;
use understory_gesture::adapters::motion::MotionAdapter;
use understory_gesture::command::{GestureCommand, RelayGesture};
use understory_gesture::container::GestureContainer;
use understory_gesture::detector::{TouchAction, TouchEvent};
use understory_gesture::types::{GestureInterest, GestureResult, GestureType};
use understory_gesture::view_stack::NoVisuals;

/// Display density of the pretend device (pixels per device-independent unit).
const DENSITY: f64 = 2.0;

fn describe(r: &GestureResult<&'static str>) -> String {
    let o = r.origin();
    match r.gesture_type() {
        GestureType::Swipe => format!(
            "Swipe {:?} from ({:.0}, {:.0}) length {:.1} (h {:.1}, v {:.1})",
            r.direction(),
            o.x,
            o.y,
            r.length(),
            r.horizontal_distance(),
            r.vertical_distance()
        ),
        GestureType::Pinch => {
            let o2 = r.origin2().unwrap_or_default();
            format!(
                "Pinch ({:.0}, {:.0}) + ({:.0}, {:.0})",
                o.x, o.y, o2.x, o2.y
            )
        }
        t => format!("{t:?} at ({:.0}, {:.0})", o.x, o.y),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut container: GestureContainer<&'static str> = GestureContainer::new();
    container.add_listener(|r| println!("  recognized: {}", describe(r)));

    // Only swipes and double taps are consumed; everything else is left to the platform.
    let swipe: Rc<dyn GestureCommand<&'static str, ()>> =
        Rc::new(RelayGesture::<&'static str, ()>::new(|r, _| {
            println!("  -> page turned {:?}", r.direction());
        }));
    let zoom: Rc<dyn GestureCommand<&'static str, ()>> =
        Rc::new(RelayGesture::<&'static str, ()>::new(|r, _| {
            let o = r.origin();
            println!("  -> zoom toggled at ({:.0}, {:.0})", o.x, o.y);
        }));
    container.register_interests(
        "page",
        vec![
            GestureInterest::new(GestureType::Swipe).with_command(swipe),
            GestureInterest::new(GestureType::DoubleTap).with_command(zoom),
        ],
    );

    let tree = NoVisuals::new();
    let mut adapter = MotionAdapter::new(DENSITY);
    let one = |action, time, x, y| TouchEvent::single(action, time, Point::new(x, y));
    let two = |action, time, a: (f64, f64), b: (f64, f64)| {
        TouchEvent::new(action, time, [Point::new(a.0, a.1), Point::new(b.0, b.1)])
    };

    let script: Vec<(&str, Vec<TouchEvent>)> = vec![
        (
            "tap",
            vec![
                one(TouchAction::Down, 0, 100.0, 100.0),
                one(TouchAction::Up, 50, 100.0, 100.0),
            ],
        ),
        (
            "double tap",
            vec![
                one(TouchAction::Down, 1_000, 200.0, 200.0),
                one(TouchAction::Up, 1_040, 200.0, 200.0),
                one(TouchAction::Down, 1_120, 204.0, 202.0),
                one(TouchAction::Up, 1_160, 204.0, 202.0),
            ],
        ),
        (
            "long press",
            vec![
                one(TouchAction::Down, 2_000, 300.0, 300.0),
                one(TouchAction::Up, 2_600, 300.0, 300.0),
            ],
        ),
        (
            "swipe left",
            vec![
                one(TouchAction::Down, 3_000, 600.0, 400.0),
                one(TouchAction::Move, 3_020, 520.0, 402.0),
                one(TouchAction::Move, 3_040, 400.0, 404.0),
                one(TouchAction::Up, 3_060, 300.0, 404.0),
            ],
        ),
        (
            "pinch",
            vec![
                one(TouchAction::Down, 4_000, 100.0, 100.0),
                two(
                    TouchAction::PointerDown(1),
                    4_010,
                    (100.0, 100.0),
                    (200.0, 200.0),
                ),
                two(TouchAction::Move, 4_030, (90.0, 90.0), (220.0, 220.0)),
                two(
                    TouchAction::PointerUp(1),
                    4_050,
                    (90.0, 90.0),
                    (220.0, 220.0),
                ),
                one(TouchAction::Up, 4_060, 90.0, 90.0),
            ],
        ),
    ];

    for (name, events) in script {
        println!("== {name} ==");
        let mut end = 0;
        for event in &events {
            let mut classifier = adapter.classifier(&mut container, &tree, ());
            let handled = adapter.on_touch(event, &mut classifier);
            println!("  {:?} @ {}ms handled={handled}", event.action, event.time);
            end = event.time;
        }
        // Let pending tap confirmations fire before the next sequence.
        let mut classifier = adapter.classifier(&mut container, &tree, ());
        adapter.advance(end + 500, &mut classifier);
    }
}
