// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: node identifiers, flags, and local data.

use kurbo::Rect;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Every accessor on [`Tree`](crate::Tree) treats a stale id as absent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Generation of this identifier.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Node flags controlling participation in hit testing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible on screen.
        const VISIBLE  = 0b0000_0001;
        /// Node accepts touches (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

impl NodeFlags {
    /// Returns true if a node with these flags can be hit by a touch.
    pub fn is_hittable(self) -> bool {
        self.contains(Self::VISIBLE | Self::PICKABLE)
    }
}

/// Local data for a node.
///
/// `E` is the logical element the native node renders, if any. Native
/// decoration nodes (wrappers, clip layers, platform chrome) have no element.
#[derive(Clone, Debug)]
pub struct LocalNode<E> {
    /// Hit-test bounds in the coordinate space of the tree's root.
    pub hit_bounds: Rect,
    /// Logical element mapped to this native node.
    pub element: Option<E>,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
}

impl<E> Default for LocalNode<E> {
    fn default() -> Self {
        Self {
            hit_bounds: Rect::ZERO,
            element: None,
            flags: NodeFlags::default(),
        }
    }
}

impl<E> LocalNode<E> {
    /// A node with the given bounds mapped to `element`.
    pub fn element(hit_bounds: Rect, element: E) -> Self {
        Self {
            hit_bounds,
            element: Some(element),
            flags: NodeFlags::default(),
        }
    }

    /// A node with the given bounds and no logical element.
    pub fn unmapped(hit_bounds: Rect) -> Self {
        Self {
            hit_bounds,
            element: None,
            flags: NodeFlags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_hittable() {
        assert!(NodeFlags::default().is_hittable());
        assert!(!NodeFlags::VISIBLE.is_hittable());
        assert!(!NodeFlags::PICKABLE.is_hittable());
        assert!(!NodeFlags::empty().is_hittable());
    }

    #[test]
    fn constructors_set_element() {
        let a = LocalNode::element(Rect::new(0.0, 0.0, 1.0, 1.0), 7_u32);
        assert_eq!(a.element, Some(7));
        let b: LocalNode<u32> = LocalNode::unmapped(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(b.element.is_none());
        assert_eq!(b.flags, NodeFlags::default());
    }
}
