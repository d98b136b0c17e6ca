// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters from platform event sources and view trees to the classifier.
//!
//! - [`motion`]: pixel touch streams fed through the [`TouchDetector`](crate::detector::TouchDetector).
//! - [`recognizer`]: toolkits that deliver already-recognized taps, presses and swipes.
//! - `view_tree`: [`VisualTree`](crate::view_stack::VisualTree) for Understory View Tree,
//!   enabled with the `view_tree_adapter` feature.

pub mod motion;
pub mod recognizer;
#[cfg(feature = "view_tree_adapter")]
pub mod view_tree;
