// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: deterministic, `no_std` gesture classification and dispatch for UI.
//!
//! ## Overview
//!
//! This crate turns raw touch input into a small set of semantic gestures: down, up,
//! single tap, double tap, long press, swipe, pinch and move.
//! It then routes each result to the commands that registered interest in it.
//! It does not own a window, a view tree or an event loop.
//! Platform code feeds it events, and it answers with a boolean "handled" signal per event.
//!
//! ## Pipeline
//!
//! 1) Adapt: a platform adapter ([`adapters::motion`] for pixel touch streams,
//!    [`adapters::recognizer`] for toolkits with their own recognizers) turns native
//!    events into [`GestureListener`](crate::classifier::GestureListener) primitives.
//!    Pixel streams go through the [`TouchDetector`](crate::detector::TouchDetector),
//!    whose timers are driven by event timestamps and explicit `advance` calls.
//! 2) Classify: [`Classifier`](crate::classifier::Classifier) applies one decision
//!    rule per primitive. It converts positions to device-independent units, enforces
//!    the swipe dead zone and minimum length, and optionally resolves the
//!    [view stack](crate::view_stack) under the gesture.
//! 3) Dispatch: the [`GestureContainer`](crate::container::GestureContainer) notifies its
//!    listeners and runs every matching, executable
//!    [`GestureCommand`](crate::command::GestureCommand) from its
//!    [`InterestRegistry`](crate::registry::InterestRegistry).
//!
//! ## Handled signal
//!
//! Dispatch reports whether any consumer executed. Each primitive maps that onto what
//! the native toolkit expects: taps, double taps, moves and pinches return the
//! negation, down always returns true, and swipes return false once dispatched.
//! See [`classifier`] for the full table.
//!
//! ## Units
//!
//! Origins, lengths and distances in a [`GestureResult`](crate::types::GestureResult)
//! are in device-independent units. View stacks are resolved in the native space the
//! visual tree's hit bounds are expressed in.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_gesture::adapters::motion::MotionAdapter;
//! use understory_gesture::command::{GestureCommand, RelayGesture};
//! use understory_gesture::container::GestureContainer;
//! use understory_gesture::detector::{TouchAction, TouchEvent};
//! use understory_gesture::types::{GestureInterest, GestureType};
//! use understory_gesture::view_stack::NoVisuals;
//!
//! let double_taps = Rc::new(Cell::new(0));
//! let counter = double_taps.clone();
//! let command: Rc<dyn GestureCommand<&'static str, ()>> =
//!     Rc::new(RelayGesture::<&'static str, ()>::new(move |_, _| counter.set(counter.get() + 1)));
//!
//! let mut container: GestureContainer<&'static str> = GestureContainer::new();
//! container.register_interests(
//!     "page",
//!     vec![GestureInterest::new(GestureType::DoubleTap).with_command(command)],
//! );
//!
//! let tree = NoVisuals::new();
//! let mut adapter = MotionAdapter::new(2.0);
//! let at = Point::new(200.0, 300.0);
//! for (action, time) in [
//!     (TouchAction::Down, 0),
//!     (TouchAction::Up, 40),
//!     (TouchAction::Down, 120),
//!     (TouchAction::Up, 160),
//! ] {
//!     let mut classifier = adapter.classifier(&mut container, &tree, ());
//!     adapter.on_touch(&TouchEvent::single(action, time, at), &mut classifier);
//! }
//! assert_eq!(double_taps.get(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support for dependencies.
//! - `libm`: `no_std` float math for Kurbo.
//! - `view_tree_adapter`: [`VisualTree`](crate::view_stack::VisualTree) for Understory View Tree.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod adapters;
pub mod classifier;
pub mod command;
pub mod container;
pub mod detector;
pub mod geometry;
pub mod registry;
pub mod types;
pub mod view_stack;
