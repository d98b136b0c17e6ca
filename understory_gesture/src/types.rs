// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for gestures: kinds, directions, results, and interests.
//!
//! ## Overview
//!
//! These types describe what the [`classifier`](crate::classifier) produces and
//! what the [`registry`](crate::registry) consumes.
//! A [`GestureResult`] is built once per classified event, dispatched, and dropped.
//! A [`GestureInterest`] lives as long as the registration that owns it.

use alloc::rc::Rc;
use alloc::vec::Vec;

use kurbo::Point;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::command::GestureCommand;
use crate::geometry::{distance, horizontal_direction, vertical_direction};

/// Kind of a classified gesture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GestureType {
    /// Not classified.
    #[default]
    Unknown,
    /// First pointer touched down.
    Down,
    /// A pointer was released or the touch sequence was cancelled.
    Up,
    /// A single tap, confirmed not to be the first half of a double tap.
    SingleTap,
    /// Two taps within the double-tap window.
    DoubleTap,
    /// The pointer stayed put past the long-press timeout.
    LongPress,
    /// A fling of at least the minimum swipe length.
    Swipe,
    /// A move with exactly two contacts.
    Pinch,
    /// A move with exactly one contact.
    Move,
}

bitflags::bitflags! {
    /// Direction of a gesture.
    ///
    /// Horizontal and vertical components combine, so a diagonal swipe
    /// carries for example `DOWN | LEFT`. The empty set means no direction.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Directionality: u8 {
        /// Towards the top of the screen.
        const UP    = 0b0000_0001;
        /// Towards the bottom of the screen.
        const DOWN  = 0b0000_0010;
        /// Towards the left edge.
        const LEFT  = 0b0000_0100;
        /// Towards the right edge.
        const RIGHT = 0b0000_1000;
    }
}

impl Default for Directionality {
    fn default() -> Self {
        Self::NONE
    }
}

impl Directionality {
    /// No direction.
    pub const NONE: Self = Self::empty();

    /// Combined direction of travel from `start` to `end`.
    ///
    /// Each axis contributes only when its travel is at least `dead_zone`.
    pub fn between(start: Point, end: Point, dead_zone: f64) -> Self {
        horizontal_direction(start, end, dead_zone) | vertical_direction(start, end, dead_zone)
    }
}

/// A classified gesture, in device-independent units.
///
/// Results are immutable: build them with the constructors and read them with
/// the accessors. Swipe metrics are zero for every kind except
/// [`GestureType::Swipe`], and [`origin2`](Self::origin2) is only present for
/// [`GestureType::Pinch`].
#[derive(Clone, Debug, PartialEq)]
pub struct GestureResult<V> {
    gesture_type: GestureType,
    direction: Directionality,
    origin: Point,
    origin2: Option<Point>,
    length: f64,
    vertical_distance: f64,
    horizontal_distance: f64,
    view_stack: Option<Vec<V>>,
}

impl<V> GestureResult<V> {
    /// A directionless result of `gesture_type` at `origin`.
    ///
    /// Use [`swipe`](Self::swipe) and [`pinch`](Self::pinch) for the kinds that
    /// carry extra data.
    pub fn new(gesture_type: GestureType, origin: Point) -> Self {
        Self {
            gesture_type,
            direction: Directionality::NONE,
            origin,
            origin2: None,
            length: 0.0,
            vertical_distance: 0.0,
            horizontal_distance: 0.0,
            view_stack: None,
        }
    }

    /// A swipe from `start` to `end`.
    ///
    /// The direction is the union of the per-axis directions, each subject to `dead_zone`.
    pub fn swipe(start: Point, end: Point, dead_zone: f64) -> Self {
        Self {
            gesture_type: GestureType::Swipe,
            direction: Directionality::between(start, end, dead_zone),
            origin: start,
            origin2: None,
            length: distance(start, end),
            vertical_distance: (end.y - start.y).abs(),
            horizontal_distance: (end.x - start.x).abs(),
            view_stack: None,
        }
    }

    /// A pinch with its first contact at `origin` and the second at `origin2`.
    pub fn pinch(origin: Point, origin2: Point) -> Self {
        Self {
            origin2: Some(origin2),
            ..Self::new(GestureType::Pinch, origin)
        }
    }

    /// Attach the views containing the origin, smallest first.
    ///
    /// `None` means the stack was not resolved.
    pub fn with_view_stack(mut self, view_stack: Option<Vec<V>>) -> Self {
        self.view_stack = view_stack;
        self
    }

    /// Kind of the gesture.
    pub fn gesture_type(&self) -> GestureType {
        self.gesture_type
    }

    /// Direction of the gesture (empty unless it is a swipe).
    pub fn direction(&self) -> Directionality {
        self.direction
    }

    /// Where the gesture started, relative to the container.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Position of the second contact; only present for pinches.
    pub fn origin2(&self) -> Option<Point> {
        self.origin2
    }

    /// Straight-line length of a swipe.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Absolute vertical travel of a swipe.
    pub fn vertical_distance(&self) -> f64 {
        self.vertical_distance
    }

    /// Absolute horizontal travel of a swipe.
    pub fn horizontal_distance(&self) -> f64 {
        self.horizontal_distance
    }

    /// Views containing the origin, smallest first, when resolved.
    pub fn view_stack(&self) -> Option<&[V]> {
        self.view_stack.as_deref()
    }
}

impl<V: PartialEq> GestureResult<V> {
    /// Returns true if `view` is part of the resolved view stack.
    ///
    /// Always false when the stack was not resolved.
    pub fn stack_contains(&self, view: &V) -> bool {
        self.view_stack().is_some_and(|s| s.contains(view))
    }
}

/// A declared interest in one kind of gesture.
///
/// `target_view` scopes the interest to one child view: it then only matches
/// results whose view stack contains that view. `None` matches any child.
/// A missing `command` is always executable and does nothing when executed.
pub struct GestureInterest<V, P = ()> {
    /// Kind of gesture to be notified about.
    pub gesture_type: GestureType,
    /// Child view the interest is scoped to.
    pub target_view: Option<V>,
    /// Command to run when the gesture occurs.
    pub command: Option<Rc<dyn GestureCommand<V, P>>>,
    /// Parameter handed to the command.
    pub parameter: P,
}

impl<V> GestureInterest<V, ()> {
    /// An unscoped interest without a parameter.
    pub fn new(gesture_type: GestureType) -> Self {
        Self::with_parameter(gesture_type, ())
    }
}

impl<V, P> GestureInterest<V, P> {
    /// An unscoped interest carrying `parameter` to its command.
    pub fn with_parameter(gesture_type: GestureType, parameter: P) -> Self {
        Self {
            gesture_type,
            target_view: None,
            command: None,
            parameter,
        }
    }

    /// Scope the interest to `view`.
    pub fn for_view(mut self, view: V) -> Self {
        self.target_view = Some(view);
        self
    }

    /// Attach the command to run.
    pub fn with_command(mut self, command: Rc<dyn GestureCommand<V, P>>) -> Self {
        self.command = Some(command);
        self
    }
}

impl<V: PartialEq, P> GestureInterest<V, P> {
    /// Returns true if this interest wants `result`.
    pub fn matches(&self, result: &GestureResult<V>) -> bool {
        if self.gesture_type != result.gesture_type() {
            return false;
        }
        match &self.target_view {
            None => true,
            Some(view) => result.stack_contains(view),
        }
    }
}

impl<V: Clone, P: Clone> Clone for GestureInterest<V, P> {
    fn clone(&self) -> Self {
        Self {
            gesture_type: self.gesture_type,
            target_view: self.target_view.clone(),
            command: self.command.clone(),
            parameter: self.parameter.clone(),
        }
    }
}

impl<V: core::fmt::Debug, P: core::fmt::Debug> core::fmt::Debug for GestureInterest<V, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureInterest")
            .field("gesture_type", &self.gesture_type)
            .field("target_view", &self.target_view)
            .field("has_command", &self.command.is_some())
            .field("parameter", &self.parameter)
            .finish()
    }
}
