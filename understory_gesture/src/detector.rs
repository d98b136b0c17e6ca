// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch detector: timestamped touch events → gesture primitives.
//!
//! ## Overview
//!
//! [`TouchDetector`] is a platform-neutral tap/double-tap/long-press/fling/scroll
//! detector. It consumes [`TouchEvent`]s in the container's native (pixel) space
//! and drives a [`GestureListener`].
//!
//! ## Time
//!
//! The detector never reads a clock. Event timestamps are milliseconds on any
//! monotonic timeline. Pending timers (show press, long press, single-tap
//! confirmation) fire either when a later event arrives, before that event is
//! handled, or when the host calls [`TouchDetector::advance`].
//!
//! ## Rules
//!
//! - Down: `on_down`; arms show press (`tap_timeout`), long press
//!   (`long_press_timeout`) and, unless it completes a double tap, the single
//!   tap confirmation (`double_tap_timeout`).
//! - A second down within `double_tap_min_time..=double_tap_timeout` of the
//!   previous up and inside `double_tap_slop` of the previous down is a double
//!   tap: `on_double_tap` with the first tap's position, then
//!   `on_double_tap_event` for the rest of that sequence.
//! - Leaving `touch_slop` starts scrolling and cancels every timer.
//! - While more than one pointer is down every move scrolls; a second pointer
//!   cancels taps and long press.
//! - Up inside the tap region: `on_single_tap_up`, and `on_single_tap_confirmed`
//!   right away if the confirmation came due while the pointer was still down.
//!   Up outside it: `on_fling` when either velocity component reaches
//!   `minimum_fling_velocity`.
//! - Cancel forgets everything.
//!
//! Distances and velocities in [`DetectorConfig`] are device-independent; the
//! detector scales them by its density.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::classifier::GestureListener;
//! use understory_gesture::detector::{TouchAction, TouchDetector, TouchEvent};
//! # use kurbo::Vec2;
//!
//! #[derive(Default)]
//! struct Taps(u32);
//! impl GestureListener for Taps {
//!     fn on_down(&mut self, _: &[Point]) -> bool { true }
//!     fn on_up(&mut self, _: Point) {}
//!     fn on_single_tap_confirmed(&mut self, _: Point) -> bool { self.0 += 1; true }
//!     fn on_double_tap(&mut self, _: Point) -> bool { true }
//!     fn on_long_press(&mut self, _: Point) {}
//!     fn on_fling(&mut self, _: Point, _: Point, _: Vec2) -> bool { true }
//!     fn on_scroll(&mut self, _: TouchAction, _: &[Point]) -> bool { true }
//! }
//!
//! let mut detector = TouchDetector::default();
//! let mut taps = Taps::default();
//! let at = Point::new(10.0, 10.0);
//! detector.on_touch_event(&TouchEvent::single(TouchAction::Down, 0, at), &mut taps);
//! detector.on_touch_event(&TouchEvent::single(TouchAction::Up, 50, at), &mut taps);
//! assert_eq!(taps.0, 0);
//! // Nothing followed within the double-tap window.
//! detector.advance(300, &mut taps);
//! assert_eq!(taps.0, 1);
//! ```

use kurbo::{Point, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use smallvec::SmallVec;

use crate::classifier::GestureListener;
use crate::geometry::{sanitize_density, to_pixels};

/// Kind of a touch event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// First pointer went down.
    Down,
    /// One or more pointers moved.
    Move,
    /// Last pointer went up.
    Up,
    /// The sequence was aborted by the platform.
    Cancel,
    /// An additional pointer went down at this index.
    PointerDown(usize),
    /// A non-last pointer went up at this index.
    PointerUp(usize),
}

impl TouchAction {
    /// Returns true for actions that release a pointer or end the sequence.
    pub fn is_release(self) -> bool {
        matches!(self, Self::Up | Self::Cancel | Self::PointerUp(_))
    }
}

/// One touch event: what happened, when, and where every pointer is.
///
/// `pointers` lists every active pointer, primary first, including one that is
/// going up on [`TouchAction::PointerUp`] and [`TouchAction::Up`].
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub action: TouchAction,
    /// Timestamp in milliseconds.
    pub time: u64,
    /// Pointer positions in native units.
    pub pointers: SmallVec<[Point; 2]>,
}

impl TouchEvent {
    /// An event with several pointers.
    pub fn new(action: TouchAction, time: u64, pointers: impl IntoIterator<Item = Point>) -> Self {
        Self {
            action,
            time,
            pointers: pointers.into_iter().collect(),
        }
    }

    /// A single-pointer event.
    pub fn single(action: TouchAction, time: u64, pointer: Point) -> Self {
        Self::new(action, time, [pointer])
    }

    /// Position of the primary pointer.
    pub fn position(&self) -> Option<Point> {
        self.pointers.first().copied()
    }

    /// Number of pointers.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }
}

/// Timing and distance thresholds of a [`TouchDetector`].
///
/// Times are milliseconds; distances are device-independent units; velocity is
/// device-independent units per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Delay before a stationary press is shown.
    pub tap_timeout: u64,
    /// Longest gap between the first up and the second down of a double tap.
    pub double_tap_timeout: u64,
    /// Shortest such gap; anything faster is treated as a bounce.
    pub double_tap_min_time: u64,
    /// Hold time before a press becomes a long press.
    pub long_press_timeout: u64,
    /// Travel that turns a press into a scroll.
    pub touch_slop: f64,
    /// Largest distance between the two downs of a double tap.
    pub double_tap_slop: f64,
    /// Velocity a release needs to be a fling.
    pub minimum_fling_velocity: f64,
    /// Whether long presses are detected at all.
    pub long_press_enabled: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            tap_timeout: 100,
            double_tap_timeout: 300,
            double_tap_min_time: 40,
            long_press_timeout: 400,
            touch_slop: 8.0,
            double_tap_slop: 100.0,
            minimum_fling_velocity: 50.0,
            long_press_enabled: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Timer {
    ShowPress,
    TapConfirm,
    LongPress,
}

#[derive(Copy, Clone, Debug)]
struct Contact {
    pos: Point,
    time: u64,
}

/// Samples older than this, relative to the newest, do not count towards velocity.
const VELOCITY_HORIZON: u64 = 100;

#[derive(Clone, Debug, Default)]
struct VelocityTracker {
    samples: SmallVec<[(u64, Point); 8]>,
}

impl VelocityTracker {
    fn clear(&mut self) {
        self.samples.clear();
    }

    fn add(&mut self, time: u64, pos: Point) {
        if self.samples.len() == self.samples.inline_size() {
            self.samples.remove(0);
        }
        self.samples.push((time, pos));
    }

    /// Velocity in native units per second over the recent samples.
    fn velocity(&self) -> Vec2 {
        let Some(&(newest_t, newest_p)) = self.samples.last() else {
            return Vec2::ZERO;
        };
        let Some(&(oldest_t, oldest_p)) = self
            .samples
            .iter()
            .find(|(t, _)| newest_t.saturating_sub(*t) <= VELOCITY_HORIZON)
        else {
            return Vec2::ZERO;
        };
        let dt = newest_t.saturating_sub(oldest_t);
        if dt == 0 {
            return Vec2::ZERO;
        }
        let seconds = dt as f64 / 1000.0;
        (newest_p - oldest_p) / seconds
    }
}

/// Detects taps, double taps, long presses, flings and scrolls.
#[derive(Clone, Debug)]
pub struct TouchDetector {
    config: DetectorConfig,
    density: f64,
    current_down: Option<Contact>,
    previous_up: Option<Contact>,
    last_focus: Point,
    still_down: bool,
    in_long_press: bool,
    is_double_tapping: bool,
    always_in_tap_region: bool,
    always_in_bigger_tap_region: bool,
    defer_confirm_single_tap: bool,
    show_press_at: Option<u64>,
    tap_confirm_at: Option<u64>,
    long_press_at: Option<u64>,
    velocity: VelocityTracker,
}

impl Default for TouchDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl TouchDetector {
    /// Create a detector with `config` at density `1.0`.
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            density: 1.0,
            current_down: None,
            previous_up: None,
            last_focus: Point::ZERO,
            still_down: false,
            in_long_press: false,
            is_double_tapping: false,
            always_in_tap_region: false,
            always_in_bigger_tap_region: false,
            defer_confirm_single_tap: false,
            show_press_at: None,
            tap_confirm_at: None,
            long_press_at: None,
            velocity: VelocityTracker::default(),
        }
    }

    /// Current thresholds.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Replace the thresholds; takes effect for the next event.
    pub fn set_config(&mut self, config: DetectorConfig) {
        self.config = config;
    }

    /// Enable or disable long-press detection.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.config.long_press_enabled = enabled;
        if !enabled {
            self.long_press_at = None;
        }
    }

    /// Native units per device-independent unit, used to scale slops and velocity.
    pub fn set_density(&mut self, density: f64) {
        self.density = sanitize_density(density);
    }

    /// Native units per device-independent unit.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Returns true while a long press is in progress.
    pub fn is_in_long_press(&self) -> bool {
        self.in_long_press
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        [self.show_press_at, self.tap_confirm_at, self.long_press_at]
            .into_iter()
            .flatten()
            .min()
    }

    /// Drop all pending timers and sequence state.
    pub fn reset(&mut self) {
        self.cancel();
        self.current_down = None;
        self.previous_up = None;
    }

    /// Fire every timer due at or before `now`, earliest first.
    pub fn advance(&mut self, now: u64, listener: &mut impl GestureListener) {
        while let Some(timer) = self.next_due(now) {
            match timer {
                Timer::ShowPress => {
                    self.show_press_at = None;
                    if let Some(down) = self.current_down {
                        listener.on_show_press(down.pos);
                    }
                }
                Timer::LongPress => self.dispatch_long_press(listener),
                Timer::TapConfirm => {
                    self.tap_confirm_at = None;
                    if self.still_down {
                        self.defer_confirm_single_tap = true;
                    } else if let Some(down) = self.current_down {
                        log::trace!("single tap confirmed");
                        listener.on_single_tap_confirmed(down.pos);
                    }
                }
            }
        }
    }

    /// Feed one event; returns true if the listener handled it.
    pub fn on_touch_event(
        &mut self,
        event: &TouchEvent,
        listener: &mut impl GestureListener,
    ) -> bool {
        self.advance(event.time, listener);
        if event.action == TouchAction::Cancel {
            self.cancel();
            return false;
        }
        let Some(pos) = event.position() else {
            return false;
        };
        if matches!(
            event.action,
            TouchAction::Down | TouchAction::Move | TouchAction::Up
        ) {
            self.velocity.add(event.time, pos);
        }
        match event.action {
            TouchAction::Down => self.on_down(event, pos, listener),
            TouchAction::Move => self.on_move(event, pos, listener),
            TouchAction::Up => self.on_up(event, pos, listener),
            TouchAction::PointerDown(_) => {
                self.last_focus = pos;
                self.cancel_taps();
                false
            }
            TouchAction::PointerUp(index) => {
                // Track whichever pointer stays down.
                if let Some(&rest) = event
                    .pointers
                    .iter()
                    .enumerate()
                    .find(|(i, _)| *i != index)
                    .map(|(_, p)| p)
                {
                    self.last_focus = rest;
                    // Samples so far belong to the lifted finger.
                    self.velocity.clear();
                    self.velocity.add(event.time, rest);
                }
                false
            }
            TouchAction::Cancel => false,
        }
    }

    fn on_down(
        &mut self,
        event: &TouchEvent,
        pos: Point,
        listener: &mut impl GestureListener,
    ) -> bool {
        let mut handled = false;
        let had_tap_confirm = self.tap_confirm_at.take().is_some();
        let down = Contact {
            pos,
            time: event.time,
        };
        if had_tap_confirm && self.is_considered_double_tap(down) {
            self.is_double_tapping = true;
            let first = self.current_down.map_or(pos, |c| c.pos);
            log::trace!("double tap");
            handled |= listener.on_double_tap(first);
            handled |= listener.on_double_tap_event(pos);
        } else {
            self.tap_confirm_at = Some(event.time.saturating_add(self.config.double_tap_timeout));
        }

        self.velocity.clear();
        self.velocity.add(event.time, pos);
        self.current_down = Some(down);
        self.last_focus = pos;
        self.still_down = true;
        self.in_long_press = false;
        self.defer_confirm_single_tap = false;
        self.always_in_tap_region = true;
        self.always_in_bigger_tap_region = true;
        self.show_press_at = Some(event.time.saturating_add(self.config.tap_timeout));
        self.long_press_at = self
            .config
            .long_press_enabled
            .then(|| event.time.saturating_add(self.config.long_press_timeout));

        handled |= listener.on_down(&event.pointers);
        handled
    }

    fn on_move(
        &mut self,
        event: &TouchEvent,
        pos: Point,
        listener: &mut impl GestureListener,
    ) -> bool {
        if self.in_long_press {
            return false;
        }
        if event.pointer_count() > 1 {
            self.last_focus = pos;
            return listener.on_scroll(event.action, &event.pointers);
        }
        if self.is_double_tapping {
            return listener.on_double_tap_event(pos);
        }
        if self.always_in_tap_region {
            let Some(down) = self.current_down else {
                return false;
            };
            let travel = down.pos.distance(pos);
            let mut handled = false;
            if travel > to_pixels(self.config.touch_slop, self.density) {
                handled = listener.on_scroll(event.action, &event.pointers);
                self.last_focus = pos;
                self.always_in_tap_region = false;
                self.show_press_at = None;
                self.tap_confirm_at = None;
                self.long_press_at = None;
            }
            if travel > to_pixels(self.config.double_tap_slop, self.density) {
                self.always_in_bigger_tap_region = false;
            }
            return handled;
        }
        let delta = self.last_focus - pos;
        if delta.x.abs() >= 1.0 || delta.y.abs() >= 1.0 {
            self.last_focus = pos;
            return listener.on_scroll(event.action, &event.pointers);
        }
        false
    }

    fn on_up(
        &mut self,
        event: &TouchEvent,
        pos: Point,
        listener: &mut impl GestureListener,
    ) -> bool {
        self.still_down = false;
        let mut handled = false;
        if self.is_double_tapping {
            handled |= listener.on_double_tap_event(pos);
        } else if self.in_long_press {
            self.tap_confirm_at = None;
            self.in_long_press = false;
        } else if self.always_in_tap_region {
            handled = listener.on_single_tap_up(pos);
            if self.defer_confirm_single_tap {
                log::trace!("single tap confirmed on release");
                listener.on_single_tap_confirmed(pos);
            }
        } else if let Some(down) = self.current_down {
            let velocity = self.velocity.velocity();
            let minimum = to_pixels(self.config.minimum_fling_velocity, self.density);
            if velocity.x.abs() >= minimum || velocity.y.abs() >= minimum {
                log::trace!("fling at ({}, {}) px/s", velocity.x, velocity.y);
                handled = listener.on_fling(down.pos, pos, velocity);
            }
        }
        self.previous_up = Some(Contact {
            pos,
            time: event.time,
        });
        self.is_double_tapping = false;
        self.defer_confirm_single_tap = false;
        self.show_press_at = None;
        self.long_press_at = None;
        self.velocity.clear();
        handled
    }

    fn is_considered_double_tap(&self, second_down: Contact) -> bool {
        let (Some(first_down), Some(first_up)) = (self.current_down, self.previous_up) else {
            return false;
        };
        if !self.always_in_bigger_tap_region {
            return false;
        }
        let gap = second_down.time.saturating_sub(first_up.time);
        if gap > self.config.double_tap_timeout || gap < self.config.double_tap_min_time {
            return false;
        }
        let slop = to_pixels(self.config.double_tap_slop, self.density);
        (second_down.pos - first_down.pos).hypot2() < slop * slop
    }

    fn dispatch_long_press(&mut self, listener: &mut impl GestureListener) {
        self.long_press_at = None;
        self.tap_confirm_at = None;
        self.defer_confirm_single_tap = false;
        self.in_long_press = true;
        if let Some(down) = self.current_down {
            log::trace!("long press");
            listener.on_long_press(down.pos);
        }
    }

    fn next_due(&self, now: u64) -> Option<Timer> {
        [
            (self.show_press_at, Timer::ShowPress),
            (self.tap_confirm_at, Timer::TapConfirm),
            (self.long_press_at, Timer::LongPress),
        ]
        .into_iter()
        .filter_map(|(at, timer)| at.filter(|t| *t <= now).map(|t| (t, timer)))
        .min_by_key(|(t, _)| *t)
        .map(|(_, timer)| timer)
    }

    fn cancel_taps(&mut self) {
        self.show_press_at = None;
        self.tap_confirm_at = None;
        self.long_press_at = None;
        self.is_double_tapping = false;
        self.always_in_tap_region = false;
        self.always_in_bigger_tap_region = false;
        self.defer_confirm_single_tap = false;
        self.in_long_press = false;
    }

    fn cancel(&mut self) {
        self.cancel_taps();
        self.velocity.clear();
        self.still_down = false;
    }
}
