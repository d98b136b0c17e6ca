// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interest registry: who wants which gestures, and routing results to them.
//!
//! ## Overview
//!
//! Interests are registered per owner view. Registering again for the same
//! owner replaces that owner's list, so re-registration never duplicates
//! dispatch. Owners are kept in the order they first registered and each
//! owner's interests keep the order they were given in; [`InterestRegistry::process`]
//! walks matches in that order.
//!
//! ## Matching
//!
//! An interest matches a result when the gesture types are equal and, if the
//! interest names a target view, the result's view stack contains that view.
//! Results without a resolved stack never match scoped interests.
//!
//! ## Veto
//!
//! [`InterestRegistry::process`] returns true iff at least one matching
//! interest was executed. An interest whose command refuses to execute does not
//! count; an interest without a command counts as executed.

use alloc::vec::Vec;

use crate::types::{GestureInterest, GestureResult};

/// Per-owner gesture interests, in registration order.
pub struct InterestRegistry<V, P = ()> {
    entries: Vec<(V, Vec<GestureInterest<V, P>>)>,
}

impl<V, P> Default for InterestRegistry<V, P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V: core::fmt::Debug, P> core::fmt::Debug for InterestRegistry<V, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for (owner, interests) in &self.entries {
            list.entry(&(owner, interests.len()));
        }
        list.finish()
    }
}

impl<V: PartialEq, P> InterestRegistry<V, P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `interests` for `owner`, replacing any previous registration.
    ///
    /// A replaced owner keeps its position in dispatch order.
    pub fn register_interests(&mut self, owner: V, interests: Vec<GestureInterest<V, P>>) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(o, _)| *o == owner) {
            log::debug!(
                "replacing {} gesture interests with {}",
                existing.len(),
                interests.len()
            );
            *existing = interests;
        } else {
            self.entries.push((owner, interests));
        }
    }

    /// Remove the registration of `owner`; returns true if there was one.
    pub fn clear_interests(&mut self, owner: &V) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(o, _)| o != owner);
        self.entries.len() != before
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Interests registered for `owner`.
    pub fn interests(&self, owner: &V) -> Option<&[GestureInterest<V, P>]> {
        self.entries
            .iter()
            .find(|(o, _)| o == owner)
            .map(|(_, i)| i.as_slice())
    }

    /// Number of registered owners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interests matching `result`, in dispatch order.
    pub fn matches<'a>(
        &'a self,
        result: &'a GestureResult<V>,
    ) -> impl Iterator<Item = &'a GestureInterest<V, P>> + 'a {
        self.entries
            .iter()
            .flat_map(|(_, interests)| interests.iter())
            .filter(move |i| i.matches(result))
    }

    /// Run every matching, executable command; returns true if any ran.
    pub fn process(&self, result: &GestureResult<V>) -> bool {
        let mut executed = false;
        for interest in self.matches(result) {
            match &interest.command {
                Some(command) => {
                    if command.can_execute(result, &interest.parameter) {
                        command.execute(result, &interest.parameter);
                        executed = true;
                    }
                }
                None => executed = true,
            }
        }
        log::trace!(
            "dispatched {:?} at ({}, {}): executed={executed}",
            result.gesture_type(),
            result.origin().x,
            result.origin().y
        );
        executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{GestureCommand, RelayGesture};
    use crate::types::GestureType;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Point;

    fn counter() -> (Rc<Cell<u32>>, Rc<dyn GestureCommand<u32, ()>>) {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let cmd: Rc<dyn GestureCommand<u32, ()>> =
            Rc::new(RelayGesture::<u32, ()>::new(move |_, _| h.set(h.get() + 1)));
        (hits, cmd)
    }

    fn tap() -> GestureResult<u32> {
        GestureResult::new(GestureType::SingleTap, Point::new(3.0, 4.0))
    }

    #[test]
    fn refused_command_vetoes_nothing() {
        let executed = Rc::new(Cell::new(false));
        let e = executed.clone();
        let cmd: Rc<dyn GestureCommand<u32, ()>> = Rc::new(
            RelayGesture::<u32, ()>::new(move |_, _| e.set(true)).with_predicate(|_, _| false),
        );
        let mut reg = InterestRegistry::new();
        reg.register_interests(
            1,
            vec![GestureInterest::new(GestureType::SingleTap).with_command(cmd)],
        );
        assert!(!reg.process(&tap()));
        assert!(!executed.get());
    }

    #[test]
    fn reregistration_does_not_duplicate() {
        let (hits, cmd) = counter();
        let interests = vec![GestureInterest::new(GestureType::SingleTap).with_command(cmd)];
        let mut reg = InterestRegistry::new();
        reg.register_interests(1, interests.clone());
        reg.register_interests(1, interests);
        assert_eq!(reg.len(), 1);
        assert!(reg.process(&tap()));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn no_match_returns_false() {
        let (hits, cmd) = counter();
        let mut reg = InterestRegistry::new();
        reg.register_interests(
            1,
            vec![GestureInterest::new(GestureType::DoubleTap).with_command(cmd)],
        );
        assert!(!reg.process(&tap()));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn missing_command_counts_as_executed() {
        let mut reg: InterestRegistry<u32> = InterestRegistry::new();
        reg.register_interests(1, vec![GestureInterest::new(GestureType::SingleTap)]);
        assert!(reg.process(&tap()));
    }

    #[test]
    fn dispatch_follows_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let make = |tag: u32| -> Rc<dyn GestureCommand<u32, ()>> {
            let o = order.clone();
            Rc::new(RelayGesture::<u32, ()>::new(move |_, _| o.borrow_mut().push(tag)))
        };
        let mut reg = InterestRegistry::new();
        reg.register_interests(
            10,
            vec![
                GestureInterest::new(GestureType::SingleTap).with_command(make(1)),
                GestureInterest::new(GestureType::SingleTap).with_command(make(2)),
            ],
        );
        reg.register_interests(
            20,
            vec![GestureInterest::new(GestureType::SingleTap).with_command(make(3))],
        );
        // Replacing the first owner keeps its slot.
        reg.register_interests(
            10,
            vec![GestureInterest::new(GestureType::SingleTap).with_command(make(4))],
        );
        reg.process(&tap());
        assert_eq!(*order.borrow(), vec![4, 3]);
    }

    #[test]
    fn scoped_interest_requires_view_in_stack() {
        let (hits, cmd) = counter();
        let mut reg = InterestRegistry::new();
        reg.register_interests(
            1,
            vec![
                GestureInterest::new(GestureType::SingleTap)
                    .for_view(7)
                    .with_command(cmd),
            ],
        );
        assert!(!reg.process(&tap()));
        assert!(!reg.process(&tap().with_view_stack(Some(vec![5, 1]))));
        assert!(reg.process(&tap().with_view_stack(Some(vec![7, 1]))));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn parameter_reaches_command() {
        let seen = Rc::new(Cell::new(0_i32));
        let s = seen.clone();
        let cmd: Rc<dyn GestureCommand<u32, i32>> =
            Rc::new(RelayGesture::<u32, i32>::new(move |_, p: &i32| s.set(*p)));
        let mut reg = InterestRegistry::new();
        reg.register_interests(
            1,
            vec![GestureInterest::with_parameter(GestureType::SingleTap, 42).with_command(cmd)],
        );
        assert!(reg.process(&tap()));
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn clearing_owners() {
        let mut reg: InterestRegistry<u32> = InterestRegistry::new();
        reg.register_interests(1, vec![GestureInterest::new(GestureType::SingleTap)]);
        reg.register_interests(2, vec![GestureInterest::new(GestureType::Swipe)]);
        assert!(reg.clear_interests(&1));
        assert!(!reg.clear_interests(&1));
        assert!(reg.interests(&1).is_none());
        assert_eq!(reg.interests(&2).map(<[_]>::len), Some(1));
        reg.clear();
        assert!(reg.is_empty());
        assert!(!reg.process(&tap()));
    }
}
