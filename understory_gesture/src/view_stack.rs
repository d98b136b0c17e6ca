// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View stack resolution: which views contain a point.
//!
//! ## Overview
//!
//! The native view hierarchy under a gesture container is seen through the
//! [`VisualTree`] trait: child counts, per-child hit bounds, and an optional
//! mapping from a native node to its logical view.
//! [`resolve_view_stack`] walks that tree and returns every logical view whose
//! bounds contain the point.
//!
//! ## Rules
//!
//! - Containment is tested on integer-truncated coordinates with half-open
//!   bounds (`x0 <= x < x1`), the way native integer rectangles behave.
//! - A child without a logical view is skipped together with its subtree.
//! - A child whose bounds miss the point is skipped together with its subtree.
//! - The result is ordered by ascending bounds area: the most specific view
//!   comes first and the outermost last. Equal areas keep walk order.
//!
//! The walk is linear in the size of the visited tree, so callers only run it
//! when a consumer needs the stack.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_gesture::view_stack::{VisualTree, resolve_view_stack};
//!
//! // root ─ a (0,0)-(100,100) ─ b (10,10)-(20,20)
//! struct Nested;
//! impl VisualTree for Nested {
//!     type Node = u8;
//!     type View = char;
//!     fn child_count(&self, node: u8) -> usize { if node < 2 { 1 } else { 0 } }
//!     fn child_at(&self, node: u8, _i: usize) -> Option<u8> { Some(node + 1) }
//!     fn hit_bounds(&self, node: u8) -> Rect {
//!         match node {
//!             1 => Rect::new(0.0, 0.0, 100.0, 100.0),
//!             _ => Rect::new(10.0, 10.0, 20.0, 20.0),
//!         }
//!     }
//!     fn view_of(&self, node: u8) -> Option<char> { Some(if node == 1 { 'a' } else { 'b' }) }
//! }
//!
//! assert_eq!(resolve_view_stack(&Nested, 0, Point::new(15.0, 15.0)), vec!['b', 'a']);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// A native view hierarchy as seen by gesture hit testing.
pub trait VisualTree {
    /// Native node handle.
    type Node: Copy;
    /// Logical view reference reported to consumers.
    type View: Clone;

    /// Number of children of `node`.
    fn child_count(&self, node: Self::Node) -> usize;

    /// The `index`-th child of `node`, if any.
    fn child_at(&self, node: Self::Node, index: usize) -> Option<Self::Node>;

    /// Hit-test bounds of `node`, in the same space as the points passed to
    /// [`resolve_view_stack`].
    fn hit_bounds(&self, node: Self::Node) -> Rect;

    /// Logical view mapped to `node`.
    ///
    /// Returns `None` when the node has no logical element or when its element
    /// is not a view.
    fn view_of(&self, node: Self::Node) -> Option<Self::View>;
}

/// A visual tree without children.
///
/// Useful for containers whose consumers never ask for view stacks.
pub struct NoVisuals<V>(core::marker::PhantomData<fn() -> V>);

impl<V> NoVisuals<V> {
    /// Create an empty visual tree.
    pub const fn new() -> Self {
        Self(core::marker::PhantomData)
    }
}

impl<V> Default for NoVisuals<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for NoVisuals<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NoVisuals<V> {}

impl<V> core::fmt::Debug for NoVisuals<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("NoVisuals")
    }
}

impl<V: Clone> VisualTree for NoVisuals<V> {
    type Node = ();
    type View = V;

    #[inline]
    fn child_count(&self, _node: ()) -> usize {
        0
    }

    #[inline]
    fn child_at(&self, _node: (), _index: usize) -> Option<()> {
        None
    }

    #[inline]
    fn hit_bounds(&self, _node: ()) -> Rect {
        Rect::ZERO
    }

    #[inline]
    fn view_of(&self, _node: ()) -> Option<V> {
        None
    }
}

/// Returns true if `bounds` contains `pt` after truncating both to integers.
///
/// Bounds are half-open, so zero-area and inverted bounds contain nothing.
pub fn contains_truncated(bounds: Rect, pt: Point) -> bool {
    let (b, p) = (bounds.trunc(), pt.trunc());
    p.x >= b.x0 && p.x < b.x1 && p.y >= b.y0 && p.y < b.y1
}

/// Collect the views under `root` whose bounds contain `pt`, smallest first.
///
/// `root` itself is not tested or reported; only its descendants are.
pub fn resolve_view_stack<T: VisualTree>(tree: &T, root: T::Node, pt: Point) -> Vec<T::View> {
    let mut found = Vec::new();
    collect(tree, root, pt, &mut found);
    // Stable, so equal areas keep walk order.
    found.sort_by(|a: &(T::View, f64), b| a.1.total_cmp(&b.1));
    found.into_iter().map(|(view, _)| view).collect()
}

fn collect<T: VisualTree>(tree: &T, node: T::Node, pt: Point, out: &mut Vec<(T::View, f64)>) {
    for i in 0..tree.child_count(node) {
        let Some(child) = tree.child_at(node, i) else {
            continue;
        };
        let Some(view) = tree.view_of(child) else {
            continue;
        };
        let bounds = tree.hit_bounds(child);
        if !contains_truncated(bounds, pt) {
            continue;
        }
        out.push((view, bounds.area()));
        collect(tree, child, pt, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Arena-backed tree used by the tests: node 0 is the root.
    struct Arena {
        nodes: Vec<(Rect, Option<char>, Vec<usize>)>,
    }

    impl Arena {
        fn new() -> Self {
            Self {
                nodes: vec![(Rect::ZERO, None, Vec::new())],
            }
        }

        fn add(&mut self, parent: usize, bounds: Rect, view: Option<char>) -> usize {
            self.nodes.push((bounds, view, Vec::new()));
            let id = self.nodes.len() - 1;
            self.nodes[parent].2.push(id);
            id
        }
    }

    impl VisualTree for Arena {
        type Node = usize;
        type View = char;

        fn child_count(&self, node: usize) -> usize {
            self.nodes[node].2.len()
        }

        fn child_at(&self, node: usize, index: usize) -> Option<usize> {
            self.nodes[node].2.get(index).copied()
        }

        fn hit_bounds(&self, node: usize) -> Rect {
            self.nodes[node].0
        }

        fn view_of(&self, node: usize) -> Option<char> {
            self.nodes[node].1
        }
    }

    #[test]
    fn nested_views_smallest_first() {
        let mut t = Arena::new();
        let a = t.add(0, Rect::new(0.0, 0.0, 100.0, 100.0), Some('A'));
        let _b = t.add(a, Rect::new(10.0, 10.0, 20.0, 20.0), Some('B'));
        assert_eq!(
            resolve_view_stack(&t, 0, Point::new(15.0, 15.0)),
            vec!['B', 'A']
        );
    }

    #[test]
    fn siblings_and_outer_views_are_ordered_by_area() {
        let mut t = Arena::new();
        let big = t.add(0, Rect::new(0.0, 0.0, 200.0, 200.0), Some('P'));
        let _small = t.add(big, Rect::new(0.0, 0.0, 20.0, 20.0), Some('s'));
        let _medium = t.add(big, Rect::new(0.0, 0.0, 50.0, 50.0), Some('m'));
        let _elsewhere = t.add(big, Rect::new(100.0, 100.0, 120.0, 120.0), Some('x'));
        assert_eq!(
            resolve_view_stack(&t, 0, Point::new(5.0, 5.0)),
            vec!['s', 'm', 'P']
        );
    }

    #[test]
    fn unmapped_child_is_skipped_with_its_subtree() {
        let mut t = Arena::new();
        let wrapper = t.add(0, Rect::new(0.0, 0.0, 100.0, 100.0), None);
        let _inner = t.add(wrapper, Rect::new(0.0, 0.0, 10.0, 10.0), Some('i'));
        let _other = t.add(0, Rect::new(0.0, 0.0, 50.0, 50.0), Some('o'));
        assert_eq!(resolve_view_stack(&t, 0, Point::new(5.0, 5.0)), vec!['o']);
    }

    #[test]
    fn missed_parent_hides_children_outside_it() {
        let mut t = Arena::new();
        let a = t.add(0, Rect::new(0.0, 0.0, 10.0, 10.0), Some('a'));
        // Child sticking out of its parent is not reached from outside the parent.
        let _b = t.add(a, Rect::new(0.0, 0.0, 50.0, 50.0), Some('b'));
        assert!(resolve_view_stack(&t, 0, Point::new(30.0, 30.0)).is_empty());
    }

    #[test]
    fn truncated_half_open_containment() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(contains_truncated(r, Point::new(10.0, 10.0)));
        assert!(contains_truncated(r, Point::new(19.9, 19.9)));
        assert!(!contains_truncated(r, Point::new(20.0, 15.0)));
        assert!(!contains_truncated(r, Point::new(9.5, 15.0)));
        // Truncation towards zero pulls 9.9 down to 9.
        assert!(!contains_truncated(r, Point::new(9.9, 15.0)));
    }

    #[test]
    fn degenerate_bounds_are_permissive() {
        assert!(!contains_truncated(Rect::ZERO, Point::ZERO));
        assert!(!contains_truncated(Rect::new(10.0, 10.0, 0.0, 0.0), Point::new(5.0, 5.0)));
        assert!(contains_truncated(Rect::new(-20.0, -20.0, 0.0, 0.0), Point::new(-10.0, -10.0)));
    }

    #[test]
    fn no_visuals_resolves_nothing() {
        let t: NoVisuals<u32> = NoVisuals::new();
        assert!(resolve_view_stack(&t, (), Point::new(1.0, 1.0)).is_empty());
    }
}
