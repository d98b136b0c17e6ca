// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for platforms that deliver raw pixel touch streams.
//!
//! ## Overview
//!
//! [`MotionAdapter`] owns a [`TouchDetector`] and feeds it every touch event.
//! On top of what the detector reports, every release (`Up`, `Cancel` and
//! `PointerUp`) is reported through [`GestureListener::on_up`], so consumers can
//! tell when a pinch or move has ended even when no other gesture fired.
//! The value returned to the platform is the detector's.
//!
//! Generic motion events (hover, stylus, mouse) go to the detector only.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::adapters::motion::MotionAdapter;
//! use understory_gesture::container::GestureContainer;
//! use understory_gesture::detector::{TouchAction, TouchEvent};
//! use understory_gesture::types::{GestureInterest, GestureType};
//! use understory_gesture::view_stack::NoVisuals;
//!
//! let mut container: GestureContainer<u32> = GestureContainer::new();
//! container.register_interests(1, vec![GestureInterest::new(GestureType::Up)]);
//! let tree = NoVisuals::new();
//!
//! let mut adapter = MotionAdapter::new(2.0);
//! let at = Point::new(100.0, 100.0);
//! for event in [
//!     TouchEvent::single(TouchAction::Down, 0, at),
//!     TouchEvent::single(TouchAction::Up, 30, at),
//! ] {
//!     let mut classifier = adapter.classifier(&mut container, &tree, ());
//!     adapter.on_touch(&event, &mut classifier);
//! }
//! ```

use kurbo::Point;

use crate::classifier::{Classifier, GestureListener};
use crate::container::GestureHost;
use crate::detector::{DetectorConfig, TouchAction, TouchDetector, TouchEvent};
use crate::geometry::sanitize_density;
use crate::view_stack::VisualTree;

/// Touch stream adapter for one container.
#[derive(Clone, Debug)]
pub struct MotionAdapter {
    detector: TouchDetector,
    density: f64,
    last_position: Point,
}

impl Default for MotionAdapter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MotionAdapter {
    /// Create an adapter for a display with `density` pixels per device-independent unit.
    pub fn new(density: f64) -> Self {
        Self::with_config(DetectorConfig::default(), density)
    }

    /// Create an adapter with custom detector thresholds.
    pub fn with_config(config: DetectorConfig, density: f64) -> Self {
        let mut detector = TouchDetector::new(config);
        detector.set_density(density);
        Self {
            detector,
            density: sanitize_density(density),
            last_position: Point::ZERO,
        }
    }

    /// Pixels per device-independent unit.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Update the display density, for example after moving to another screen.
    pub fn set_density(&mut self, density: f64) {
        self.density = sanitize_density(density);
        self.detector.set_density(density);
    }

    /// The underlying detector.
    pub fn detector(&self) -> &TouchDetector {
        &self.detector
    }

    /// Mutable access to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut TouchDetector {
        &mut self.detector
    }

    /// A classifier for `host` that uses this adapter's density.
    pub fn classifier<'a, H, T>(
        &self,
        host: &'a mut H,
        tree: &'a T,
        root: T::Node,
    ) -> Classifier<'a, H, T>
    where
        H: GestureHost,
        T: VisualTree<View = H::View>,
    {
        Classifier::new(host, tree, root).with_density(self.density)
    }

    /// Handle a touch event; returns whether the platform should consider it handled.
    pub fn on_touch(&mut self, event: &TouchEvent, listener: &mut impl GestureListener) -> bool {
        let handled = self.detector.on_touch_event(event, listener);
        if let TouchAction::PointerUp(index) = event.action {
            let lifted = event.pointers.get(index).copied();
            // Later pointerless releases report where the remaining finger is.
            let rest = (0..event.pointer_count()).find(|&i| i != index);
            if let Some(&pos) = rest.and_then(|i| event.pointers.get(i)) {
                self.last_position = pos;
            }
            listener.on_up(lifted.unwrap_or(self.last_position));
            return handled;
        }
        let position = event.position();
        if let Some(pos) = position {
            self.last_position = pos;
        }
        if event.action.is_release() {
            listener.on_up(position.unwrap_or(self.last_position));
        }
        handled
    }

    /// Handle a generic motion event.
    pub fn on_generic_motion(
        &mut self,
        event: &TouchEvent,
        listener: &mut impl GestureListener,
    ) -> bool {
        self.detector.on_touch_event(event, listener)
    }

    /// Fire detector timers due at or before `now`.
    pub fn advance(&mut self, now: u64, listener: &mut impl GestureListener) {
        self.detector.advance(now, listener);
    }

    /// Forget the in-flight sequence and every pending timer.
    pub fn detach(&mut self) {
        self.detector.reset();
        self.last_position = Point::ZERO;
    }
}
