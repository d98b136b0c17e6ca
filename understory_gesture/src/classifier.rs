// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classifier: one decision rule per primitive.
//!
//! ## Overview
//!
//! Platform adapters translate native events into calls on [`GestureListener`],
//! one method per primitive (down, up, tap, double tap, long press, fling,
//! scroll). [`Classifier`] implements the listener: it converts positions to
//! device-independent units, resolves the view stack when its host asks for it,
//! builds a [`GestureResult`] and hands it to the [`GestureHost`].
//!
//! ## Handled signal
//!
//! Each primitive returns the value the native toolkit expects:
//!
//! | Primitive | Dispatches | Returns |
//! | --- | --- | --- |
//! | down | `Down` | `true` |
//! | up | `Up` | nothing |
//! | single tap confirmed | `SingleTap` | `!process` |
//! | double tap | `DoubleTap` | `!process` |
//! | long press | `LongPress` | nothing |
//! | fling, shorter than the minimum swipe | nothing | `true` |
//! | fling | `Swipe` | `false` |
//! | scroll, one pointer | `Move` | `!process` |
//! | scroll, two pointers | `Pinch` | `!process` |
//! | scroll, other pointer counts or actions | nothing | `true` |
//!
//! ## Coordinates
//!
//! Listener positions are in the native (pixel) space of the container.
//! Origins reported to consumers are divided by the density; the view stack is
//! resolved against the native position, the space the visual tree's hit bounds
//! live in.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::classifier::{Classifier, GestureListener};
//! use understory_gesture::container::GestureContainer;
//! use understory_gesture::types::{GestureInterest, GestureType};
//! use understory_gesture::view_stack::NoVisuals;
//!
//! let mut container: GestureContainer<u32> = GestureContainer::new();
//! container.register_interests(1, vec![GestureInterest::new(GestureType::SingleTap)]);
//!
//! let tree = NoVisuals::new();
//! let mut classifier = Classifier::new(&mut container, &tree, ()).with_density(2.0);
//! // A consumer ran, so the tap is not left to the native toolkit.
//! assert!(!classifier.on_single_tap_confirmed(Point::new(40.0, 40.0)));
//! ```

use kurbo::{Point, Vec2};

use crate::container::GestureHost;
use crate::detector::TouchAction;
use crate::geometry::{DIRECTION_DEAD_ZONE, sanitize_density, to_device_independent};
use crate::types::{GestureResult, GestureType};
use crate::view_stack::{VisualTree, resolve_view_stack};

/// Receiver of classified touch primitives.
///
/// Positions are in the native space of the container. Methods with a boolean
/// return report whether the event should be considered handled.
pub trait GestureListener {
    /// First contact; `pointers` lists every contact, primary first.
    fn on_down(&mut self, pointers: &[Point]) -> bool;

    /// A pointer was released, or the sequence was cancelled.
    fn on_up(&mut self, pointer: Point);

    /// The pointer has been down briefly without moving.
    fn on_show_press(&mut self, _pointer: Point) {}

    /// A pointer was released inside the tap region.
    fn on_single_tap_up(&mut self, _pointer: Point) -> bool {
        true
    }

    /// A tap that will not become a double tap.
    fn on_single_tap_confirmed(&mut self, pointer: Point) -> bool;

    /// A second tap landed within the double-tap window; `pointer` is the first tap.
    fn on_double_tap(&mut self, pointer: Point) -> bool;

    /// Any event within a double tap, after [`on_double_tap`](Self::on_double_tap).
    fn on_double_tap_event(&mut self, _pointer: Point) -> bool {
        true
    }

    /// The pointer stayed put past the long-press timeout.
    fn on_long_press(&mut self, pointer: Point);

    /// A release with enough velocity, from `start` (where the sequence went down) to `end`.
    ///
    /// `velocity` is in native units per second.
    fn on_fling(&mut self, start: Point, end: Point, velocity: Vec2) -> bool;

    /// Movement; `pointers` lists every current contact, primary first.
    fn on_scroll(&mut self, action: TouchAction, pointers: &[Point]) -> bool;
}

/// Classifies primitives for one host.
///
/// Borrow-scoped: adapters build one per native event.
pub struct Classifier<'a, H, T: VisualTree> {
    host: &'a mut H,
    tree: &'a T,
    root: T::Node,
    density: f64,
}

impl<H, T: VisualTree> core::fmt::Debug for Classifier<'_, H, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Classifier")
            .field("density", &self.density)
            .finish_non_exhaustive()
    }
}

impl<'a, H, T> Classifier<'a, H, T>
where
    H: GestureHost,
    T: VisualTree<View = H::View>,
{
    /// Classify for `host`, resolving view stacks under `root` in `tree`.
    pub fn new(host: &'a mut H, tree: &'a T, root: T::Node) -> Self {
        Self {
            host,
            tree,
            root,
            density: 1.0,
        }
    }

    /// Set the number of native units per device-independent unit.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = sanitize_density(density);
        self
    }

    /// Native units per device-independent unit.
    pub fn density(&self) -> f64 {
        self.density
    }

    fn to_dp(&self, pt: Point) -> Point {
        to_device_independent(pt, self.density)
    }

    fn dispatch(&mut self, result: GestureResult<H::View>, native: Point) -> bool {
        let stack = self
            .host
            .exclude_children()
            .then(|| resolve_view_stack(self.tree, self.root, native));
        let result = result.with_view_stack(stack);
        log::trace!(
            "classified {:?} at ({}, {})",
            result.gesture_type(),
            result.origin().x,
            result.origin().y
        );
        self.host.process_gesture(&result)
    }

    fn dispatch_at(&mut self, gesture_type: GestureType, native: Point) -> bool {
        let result = GestureResult::new(gesture_type, self.to_dp(native));
        self.dispatch(result, native)
    }
}

impl<H, T> GestureListener for Classifier<'_, H, T>
where
    H: GestureHost,
    T: VisualTree<View = H::View>,
{
    fn on_down(&mut self, pointers: &[Point]) -> bool {
        if let Some(&first) = pointers.first() {
            self.dispatch_at(GestureType::Down, first);
        }
        true
    }

    fn on_up(&mut self, pointer: Point) {
        self.dispatch_at(GestureType::Up, pointer);
    }

    fn on_single_tap_confirmed(&mut self, pointer: Point) -> bool {
        !self.dispatch_at(GestureType::SingleTap, pointer)
    }

    fn on_double_tap(&mut self, pointer: Point) -> bool {
        !self.dispatch_at(GestureType::DoubleTap, pointer)
    }

    fn on_long_press(&mut self, pointer: Point) {
        self.dispatch_at(GestureType::LongPress, pointer);
    }

    fn on_fling(&mut self, start: Point, end: Point, _velocity: Vec2) -> bool {
        let (from, to) = (self.to_dp(start), self.to_dp(end));
        let minimum = self.host.minimum_swipe_length();
        if from.distance(to) < minimum {
            log::debug!(
                "fling of {} below minimum swipe length {minimum}",
                from.distance(to)
            );
            return true;
        }
        self.dispatch(GestureResult::swipe(from, to, DIRECTION_DEAD_ZONE), start);
        false
    }

    fn on_scroll(&mut self, action: TouchAction, pointers: &[Point]) -> bool {
        if action != TouchAction::Move {
            return true;
        }
        match *pointers {
            [only] => !self.dispatch_at(GestureType::Move, only),
            [first, second] => {
                let result = GestureResult::pinch(self.to_dp(first), self.to_dp(second));
                !self.dispatch(result, first)
            }
            _ => {
                log::debug!("ignoring move with {} pointers", pointers.len());
                true
            }
        }
    }
}
