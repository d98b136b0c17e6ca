// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for toolkits that recognize gestures themselves.
//!
//! ## Overview
//!
//! Some toolkits hand over discrete recognizers (tap with a tap count, long
//! press, swipe) that move through a small state machine, plus raw
//! began/moved/ended/cancelled touch callbacks. Locations are already in
//! device-independent points, so the classifier should run at density `1.0`.
//!
//! [`RecognizerAdapter`] maps them onto [`GestureListener`]:
//!
//! - a tap recognizer ending with one tap → `on_single_tap_confirmed`; with two → `on_double_tap`;
//! - a long press recognizer ending → `on_long_press`;
//! - a swipe recognizer records its start when it begins (or falls back to where
//!   the touch began) and is classified as a fling when it ends, so swipes obey
//!   the same dead zone and minimum length as on every other platform;
//! - touches began → `on_down`, moved → `on_scroll`, ended or cancelled → `on_up`.

use kurbo::{Point, Vec2};

use crate::classifier::GestureListener;
use crate::detector::TouchAction;

/// State of a platform recognizer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecognizerState {
    /// Not yet recognized.
    #[default]
    Possible,
    /// A continuous gesture started.
    Began,
    /// A continuous gesture changed.
    Changed,
    /// The gesture finished.
    Ended,
    /// The gesture was interrupted.
    Cancelled,
    /// The recognizer gave up.
    Failed,
}

/// Which recognizer fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecognizerKind {
    /// Tap recognizer requiring `taps` taps.
    Tap {
        /// Number of taps required.
        taps: u32,
    },
    /// Long press recognizer.
    LongPress,
    /// Swipe recognizer.
    Swipe,
}

/// A recognizer callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RecognizerEvent {
    /// Which recognizer.
    pub kind: RecognizerKind,
    /// Its state.
    pub state: RecognizerState,
    /// Location in the container, in points.
    pub location: Point,
}

impl RecognizerEvent {
    /// Create a recognizer event.
    pub fn new(kind: RecognizerKind, state: RecognizerState, location: Point) -> Self {
        Self {
            kind,
            state,
            location,
        }
    }
}

/// Recognizer-based adapter for one container.
#[derive(Clone, Debug, Default)]
pub struct RecognizerAdapter {
    swipe_start: Option<Point>,
    touch_start: Option<Point>,
}

impl RecognizerAdapter {
    /// Create an adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a recognizer callback; returns whether the toolkit should consider it handled.
    pub fn on_recognizer(
        &mut self,
        event: &RecognizerEvent,
        listener: &mut impl GestureListener,
    ) -> bool {
        match (event.kind, event.state) {
            (RecognizerKind::Tap { taps: 1 }, RecognizerState::Ended) => {
                listener.on_single_tap_confirmed(event.location)
            }
            (RecognizerKind::Tap { taps: 2 }, RecognizerState::Ended) => {
                listener.on_double_tap(event.location)
            }
            (RecognizerKind::LongPress, RecognizerState::Ended) => {
                listener.on_long_press(event.location);
                true
            }
            (RecognizerKind::Swipe, RecognizerState::Began) => {
                self.swipe_start = Some(event.location);
                true
            }
            (RecognizerKind::Swipe, RecognizerState::Ended) => {
                let start = self
                    .swipe_start
                    .take()
                    .or(self.touch_start)
                    .unwrap_or(event.location);
                listener.on_fling(start, event.location, Vec2::ZERO)
            }
            (RecognizerKind::Swipe, RecognizerState::Cancelled | RecognizerState::Failed) => {
                self.swipe_start = None;
                false
            }
            _ => false,
        }
    }

    /// Touches began; `touches` lists every contact, primary first.
    pub fn touches_began(
        &mut self,
        touches: &[Point],
        listener: &mut impl GestureListener,
    ) -> bool {
        if self.touch_start.is_none() {
            self.touch_start = touches.first().copied();
        }
        listener.on_down(touches)
    }

    /// Touches moved.
    pub fn touches_moved(
        &mut self,
        touches: &[Point],
        listener: &mut impl GestureListener,
    ) -> bool {
        listener.on_scroll(TouchAction::Move, touches)
    }

    /// Touches ended.
    pub fn touches_ended(&mut self, touches: &[Point], listener: &mut impl GestureListener) {
        self.release(touches, listener);
    }

    /// Touches were cancelled by the toolkit.
    pub fn touches_cancelled(&mut self, touches: &[Point], listener: &mut impl GestureListener) {
        self.swipe_start = None;
        self.release(touches, listener);
    }

    /// Forget any in-flight swipe or touch.
    pub fn detach(&mut self) {
        self.swipe_start = None;
        self.touch_start = None;
    }

    fn release(&mut self, touches: &[Point], listener: &mut impl GestureListener) {
        let at = touches
            .first()
            .copied()
            .or(self.touch_start)
            .unwrap_or(Point::ZERO);
        self.touch_start = None;
        listener.on_up(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::container::GestureContainer;
    use crate::types::{Directionality, GestureInterest, GestureResult, GestureType};
    use crate::view_stack::NoVisuals;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type Seen = Rc<RefCell<Vec<GestureResult<u32>>>>;

    fn container() -> (GestureContainer<u32>, Seen) {
        let seen: Seen = Rc::default();
        let s = seen.clone();
        let mut c = GestureContainer::new();
        c.add_listener(move |r: &GestureResult<u32>| s.borrow_mut().push(r.clone()));
        (c, seen)
    }

    fn rec(kind: RecognizerKind, state: RecognizerState, x: f64, y: f64) -> RecognizerEvent {
        RecognizerEvent::new(kind, state, Point::new(x, y))
    }

    #[test]
    fn taps_by_count() {
        let (mut c, seen) = container();
        let tree = NoVisuals::new();
        let mut a = RecognizerAdapter::new();
        let mut cls = Classifier::new(&mut c, &tree, ());
        let one = RecognizerKind::Tap { taps: 1 };
        let two = RecognizerKind::Tap { taps: 2 };
        a.on_recognizer(&rec(one, RecognizerState::Possible, 1.0, 1.0), &mut cls);
        a.on_recognizer(&rec(one, RecognizerState::Ended, 1.0, 1.0), &mut cls);
        a.on_recognizer(&rec(two, RecognizerState::Ended, 2.0, 2.0), &mut cls);
        let three = RecognizerKind::Tap { taps: 3 };
        a.on_recognizer(&rec(three, RecognizerState::Ended, 3.0, 3.0), &mut cls);
        a.on_recognizer(
            &rec(RecognizerKind::LongPress, RecognizerState::Began, 4.0, 4.0),
            &mut cls,
        );
        a.on_recognizer(
            &rec(RecognizerKind::LongPress, RecognizerState::Ended, 4.0, 4.0),
            &mut cls,
        );
        let types: Vec<_> = seen
            .borrow()
            .iter()
            .map(GestureResult::gesture_type)
            .collect();
        assert_eq!(
            types,
            [GestureType::SingleTap, GestureType::DoubleTap, GestureType::LongPress]
        );
    }

    #[test]
    fn swipe_measured_from_began() {
        let (mut c, seen) = container();
        c.register_interests(1, vec![GestureInterest::new(GestureType::Swipe)]);
        let tree = NoVisuals::new();
        let mut a = RecognizerAdapter::new();
        let mut cls = Classifier::new(&mut c, &tree, ());
        a.on_recognizer(
            &rec(RecognizerKind::Swipe, RecognizerState::Began, 100.0, 100.0),
            &mut cls,
        );
        assert!(!a.on_recognizer(
            &rec(RecognizerKind::Swipe, RecognizerState::Ended, 70.0, 140.0),
            &mut cls
        ));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].origin(), Point::new(100.0, 100.0));
        assert_eq!(
            seen[0].direction(),
            Directionality::DOWN | Directionality::LEFT
        );
        assert_eq!(seen[0].length(), 50.0);
    }

    #[test]
    fn swipe_falls_back_to_touch_start_and_minimum_applies() {
        let (mut c, seen) = container();
        let tree = NoVisuals::new();
        let mut a = RecognizerAdapter::new();
        let mut cls = Classifier::new(&mut c, &tree, ());
        a.touches_began(&[Point::new(0.0, 0.0)], &mut cls);
        // Ended without a Began: measured from where the touch began.
        a.on_recognizer(
            &rec(RecognizerKind::Swipe, RecognizerState::Ended, 0.0, 10.0),
            &mut cls,
        );
        let seen = seen.borrow();
        // Down only; the 10 point swipe is under the default minimum.
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].gesture_type(), GestureType::Down);
    }

    #[test]
    fn cancelled_swipe_forgets_start() {
        let (mut c, seen) = container();
        let tree = NoVisuals::new();
        let mut a = RecognizerAdapter::new();
        let mut cls = Classifier::new(&mut c, &tree, ());
        a.on_recognizer(
            &rec(RecognizerKind::Swipe, RecognizerState::Began, 0.0, 0.0),
            &mut cls,
        );
        a.on_recognizer(
            &rec(RecognizerKind::Swipe, RecognizerState::Cancelled, 0.0, 0.0),
            &mut cls,
        );
        // No start known any more: zero-length, swallowed.
        assert!(a.on_recognizer(
            &rec(RecognizerKind::Swipe, RecognizerState::Ended, 0.0, 90.0),
            &mut cls
        ));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn raw_touches_map_to_down_move_up() {
        let (mut c, seen) = container();
        let tree = NoVisuals::new();
        let mut a = RecognizerAdapter::new();
        let mut cls = Classifier::new(&mut c, &tree, ());
        assert!(a.touches_began(&[Point::new(1.0, 1.0)], &mut cls));
        a.touches_moved(&[Point::new(2.0, 2.0)], &mut cls);
        a.touches_moved(&[Point::new(2.0, 2.0), Point::new(8.0, 8.0)], &mut cls);
        a.touches_ended(&[Point::new(3.0, 3.0)], &mut cls);
        a.touches_began(&[Point::new(4.0, 4.0)], &mut cls);
        a.touches_cancelled(&[], &mut cls);
        let types: Vec<_> = seen
            .borrow()
            .iter()
            .map(GestureResult::gesture_type)
            .collect();
        assert_eq!(
            types,
            [
                GestureType::Down,
                GestureType::Move,
                GestureType::Pinch,
                GestureType::Up,
                GestureType::Down,
                GestureType::Up
            ]
        );
        assert_eq!(seen.borrow()[5].origin(), Point::new(4.0, 4.0));
    }
}
