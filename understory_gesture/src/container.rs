// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture container: the view-level owner of configuration, interests and listeners.
//!
//! ## Overview
//!
//! The [`classifier`](crate::classifier) talks to its container through the
//! [`GestureHost`] trait: it reads the two configuration values that shape
//! classification and hands every built result to
//! [`process_gesture`](GestureHost::process_gesture).
//! [`GestureContainer`] is the stock host. It raises its gesture-recognized
//! listeners for every result, then dispatches through its
//! [`InterestRegistry`].
//!
//! ## Lifecycle
//!
//! A container starts attached. [`GestureContainer::detach`] drops every
//! registration before returning; while detached nothing is dispatched and
//! `process` reports false. Re-register after [`GestureContainer::attach`].
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::container::GestureContainer;
//! use understory_gesture::types::{GestureInterest, GestureResult, GestureType};
//!
//! let mut container: GestureContainer<u32> = GestureContainer::new();
//! container.register_interests(1, vec![GestureInterest::new(GestureType::DoubleTap)]);
//!
//! let double = GestureResult::new(GestureType::DoubleTap, Point::new(10.0, 10.0));
//! assert!(container.process(&double));
//!
//! container.detach();
//! assert!(!container.process(&double));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::registry::InterestRegistry;
use crate::types::{GestureInterest, GestureResult};

/// Classification settings of a container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Resolve the view stack for every gesture, enabling view-scoped interests.
    pub exclude_children: bool,
    /// Shortest fling, in device-independent units, reported as a swipe.
    pub minimum_swipe_length: f64,
}

impl GestureConfig {
    /// Default minimum swipe length.
    pub const DEFAULT_MINIMUM_SWIPE_LENGTH: f64 = 25.0;
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            exclude_children: false,
            minimum_swipe_length: Self::DEFAULT_MINIMUM_SWIPE_LENGTH,
        }
    }
}

/// What the classifier needs from the view it classifies for.
pub trait GestureHost {
    /// Logical view reference carried in view stacks.
    type View;

    /// Whether the classifier should resolve view stacks.
    fn exclude_children(&self) -> bool;

    /// Shortest swipe, in device-independent units.
    fn minimum_swipe_length(&self) -> f64;

    /// Dispatch a classified gesture; returns true if a consumer executed.
    fn process_gesture(&mut self, result: &GestureResult<Self::View>) -> bool;
}

type Listener<V> = Box<dyn FnMut(&GestureResult<V>)>;

/// A view that recognizes gestures and dispatches them to registered interests.
pub struct GestureContainer<V, P = ()> {
    config: GestureConfig,
    registry: InterestRegistry<V, P>,
    listeners: Vec<Listener<V>>,
    attached: bool,
}

impl<V: PartialEq, P> Default for GestureContainer<V, P> {
    fn default() -> Self {
        Self::with_config(GestureConfig::default())
    }
}

impl<V: core::fmt::Debug, P> core::fmt::Debug for GestureContainer<V, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureContainer")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("listeners", &self.listeners.len())
            .field("attached", &self.attached)
            .finish()
    }
}

impl<V: PartialEq, P> GestureContainer<V, P> {
    /// Create an attached container with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an attached container with `config`.
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            registry: InterestRegistry::new(),
            listeners: Vec::new(),
            attached: true,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Turn view stack resolution on or off.
    pub fn set_exclude_children(&mut self, exclude: bool) {
        self.config.exclude_children = exclude;
    }

    /// Set the shortest swipe, in device-independent units.
    pub fn set_minimum_swipe_length(&mut self, length: f64) {
        self.config.minimum_swipe_length = length;
    }

    /// Registered interests.
    pub fn registry(&self) -> &InterestRegistry<V, P> {
        &self.registry
    }

    /// Register `interests` for `owner`, replacing any previous registration.
    pub fn register_interests(&mut self, owner: V, interests: Vec<GestureInterest<V, P>>) {
        self.registry.register_interests(owner, interests);
    }

    /// Remove the registration of `owner`.
    pub fn clear_interests(&mut self, owner: &V) -> bool {
        self.registry.clear_interests(owner)
    }

    /// Add a gesture-recognized listener.
    ///
    /// Listeners see every processed result before interests are dispatched and
    /// cannot affect the handled signal.
    pub fn add_listener(&mut self, listener: impl FnMut(&GestureResult<V>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns true while the container accepts gestures.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Start accepting gestures again.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop accepting gestures and drop every registration.
    pub fn detach(&mut self) {
        if !self.registry.is_empty() {
            log::debug!(
                "detaching gesture container: clearing {} registrations",
                self.registry.len()
            );
        }
        self.registry.clear();
        self.attached = false;
    }

    /// Notify listeners and dispatch `result`; returns true if a consumer executed.
    pub fn process(&mut self, result: &GestureResult<V>) -> bool {
        if !self.attached {
            log::trace!("container detached; dropping {:?}", result.gesture_type());
            return false;
        }
        for listener in &mut self.listeners {
            listener(result);
        }
        self.registry.process(result)
    }
}

impl<V: PartialEq, P> GestureHost for GestureContainer<V, P> {
    type View = V;

    fn exclude_children(&self) -> bool {
        self.config.exclude_children
    }

    fn minimum_swipe_length(&self) -> f64 {
        self.config.minimum_swipe_length
    }

    fn process_gesture(&mut self, result: &GestureResult<V>) -> bool {
        self.process(result)
    }
}
