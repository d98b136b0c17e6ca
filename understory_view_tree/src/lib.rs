// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_tree --heading-base-level=0

//! Understory View Tree: a Kurbo-native tree of native views for gesture hit testing.
//!
//! Understory View Tree mirrors the native view hierarchy a gesture container sits on top of.
//!
//! - Represents a hierarchy of native nodes with hit-test bounds, in native child order.
//! - Maps each native node to an optional logical element (the declarative view it renders).
//! - Carries visibility/picking flags so hidden or non-interactive nodes can be skipped.
//!
//! It is the concrete spatial tree that `understory_gesture` walks to build view stacks.
//!
//! ## Not a layout engine
//!
//! This crate does not perform layout or rendering.
//! Upstream code mirrors the native hierarchy into this tree and keeps hit bounds current.
//! Hit bounds are expressed in the coordinate space of the root, which is the space
//! raw touch positions arrive in.
//!
//! ## API overview
//!
//! - [`Tree`]: generational container of nodes.
//! - [`LocalNode`]: per-node data (hit bounds, optional element, flags).
//! - [`NodeFlags`]: visibility and picking controls.
//! - [`NodeId`]: generational handle of a node.
//!
//! ### Minimal usage
//!
//! ```
//! use understory_view_tree::{LocalNode, Tree};
//! use kurbo::Rect;
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::unmapped(Rect::new(0.0, 0.0, 320.0, 480.0)));
//! let label = tree.insert(
//!     Some(root),
//!     LocalNode::element(Rect::new(10.0, 10.0, 200.0, 40.0), "label"),
//! );
//!
//! assert_eq!(tree.children(root), &[label]);
//! assert_eq!(tree.element(label), Some(&"label"));
//!
//! tree.remove(label);
//! assert!(!tree.is_alive(label));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Tree;
pub use types::{LocalNode, NodeFlags, NodeId};
