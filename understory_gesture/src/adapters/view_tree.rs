// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory View Tree.
//!
//! ## Feature
//!
//! Enable with `view_tree_adapter`.
//!
//! ## Notes
//!
//! [`Tree`] implements [`VisualTree`] with [`NodeId`] handles when its elements
//! implement [`LogicalElement`]. Nodes that are hidden or not pickable are
//! treated like unmapped nodes: they and their subtrees never appear in a view
//! stack. Stale ids have no children and no view.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_gesture::adapters::view_tree::LogicalElement;
//! use understory_gesture::view_stack::resolve_view_stack;
//! use understory_view_tree::{LocalNode, Tree};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Element {
//!     View(&'static str),
//!     Decoration,
//! }
//!
//! impl LogicalElement for Element {
//!     type View = &'static str;
//!     fn as_view(&self) -> Option<&'static str> {
//!         match self {
//!             Element::View(name) => Some(*name),
//!             Element::Decoration => None,
//!         }
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::unmapped(Rect::new(0.0, 0.0, 320.0, 480.0)));
//! let card = tree.insert(Some(root), LocalNode::element(Rect::new(0.0, 0.0, 320.0, 200.0), Element::View("card")));
//! tree.insert(Some(card), LocalNode::element(Rect::new(10.0, 10.0, 60.0, 60.0), Element::View("avatar")));
//! tree.insert(Some(card), LocalNode::element(Rect::new(0.0, 0.0, 320.0, 4.0), Element::Decoration));
//!
//! assert_eq!(resolve_view_stack(&tree, root, Point::new(20.0, 2.0)), vec!["card"]);
//! assert_eq!(resolve_view_stack(&tree, root, Point::new(20.0, 20.0)), vec!["avatar", "card"]);
//! ```

use kurbo::Rect;
use understory_view_tree::{NodeId, Tree};

use crate::view_stack::VisualTree;

/// An element stored in a [`Tree`] that may stand for a logical view.
pub trait LogicalElement {
    /// Logical view reference reported in view stacks.
    type View: Clone;

    /// The view this element stands for, or `None` if it is not a view.
    fn as_view(&self) -> Option<Self::View>;
}

impl<E: LogicalElement> VisualTree for Tree<E> {
    type Node = NodeId;
    type View = E::View;

    fn child_count(&self, node: NodeId) -> usize {
        Self::child_count(self, node)
    }

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        Self::child_at(self, node, index)
    }

    fn hit_bounds(&self, node: NodeId) -> Rect {
        Self::hit_bounds(self, node).unwrap_or(Rect::ZERO)
    }

    fn view_of(&self, node: NodeId) -> Option<E::View> {
        if !self.flags(node)?.is_hittable() {
            return None;
        }
        self.element(node)?.as_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_stack::resolve_view_stack;
    use alloc::vec;
    use kurbo::Point;
    use understory_view_tree::{LocalNode, NodeFlags};

    impl LogicalElement for u32 {
        type View = u32;
        fn as_view(&self) -> Option<u32> {
            (*self != 0).then_some(*self)
        }
    }

    fn sample() -> (Tree<u32>, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::unmapped(Rect::new(0.0, 0.0, 200.0, 200.0)));
        let a = tree.insert(
            Some(root),
            LocalNode::element(Rect::new(0.0, 0.0, 100.0, 100.0), 1),
        );
        let b = tree.insert(
            Some(a),
            LocalNode::element(Rect::new(10.0, 10.0, 20.0, 20.0), 2),
        );
        (tree, root, a, b)
    }

    #[test]
    fn nested_stack_smallest_first() {
        let (tree, root, _, _) = sample();
        assert_eq!(
            resolve_view_stack(&tree, root, Point::new(15.0, 15.0)),
            vec![2, 1]
        );
    }

    #[test]
    fn hidden_node_hides_its_subtree() {
        let (mut tree, root, a, _) = sample();
        tree.set_flags(a, NodeFlags::PICKABLE);
        assert!(resolve_view_stack(&tree, root, Point::new(15.0, 15.0)).is_empty());
        tree.set_flags(a, NodeFlags::VISIBLE);
        assert!(resolve_view_stack(&tree, root, Point::new(15.0, 15.0)).is_empty());
    }

    #[test]
    fn non_view_element_is_skipped() {
        let (mut tree, root, _, b) = sample();
        tree.set_element(b, Some(0));
        assert_eq!(
            resolve_view_stack(&tree, root, Point::new(15.0, 15.0)),
            vec![1]
        );
    }

    #[test]
    fn stale_root_resolves_nothing() {
        let (mut tree, root, _, _) = sample();
        tree.remove(root);
        assert!(resolve_view_stack(&tree, root, Point::new(15.0, 15.0)).is_empty());
    }
}
