// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commands: what runs when an interest matches.
//!
//! ## Overview
//!
//! A [`GestureCommand`] is the consumer side of a [`GestureInterest`](crate::types::GestureInterest):
//! the registry asks [`can_execute`](GestureCommand::can_execute) and, if allowed,
//! calls [`execute`](GestureCommand::execute). The parameter type `P` is fixed when
//! the interest is registered, so commands receive exactly the type they expect.
//!
//! Two relays cover the common cases:
//! - [`RelayGesture`] runs a closure to completion before dispatch continues.
//! - [`RelayGestureAsync`] builds a future and hands it to a
//!   [`LocalSpawn`](futures_task::LocalSpawn) executor as a detached task.
//!
//! ## Detached tasks
//!
//! Async commands are fire-and-forget. The registry does not await, track, or
//! cancel them, so consecutive gestures may have several tasks in flight, in no
//! guaranteed order, and a task may outlive the view that triggered it. Tasks
//! must check that whatever they touch still exists. A task that cannot be
//! spawned is dropped with a warning.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_gesture::command::{GestureCommand, RelayGesture};
//! use understory_gesture::types::{GestureResult, GestureType};
//!
//! let taps = Rc::new(Cell::new(0));
//! let seen = taps.clone();
//! let cmd: RelayGesture<u32, u32> = RelayGesture::new(move |_r: &GestureResult<u32>, step: &u32| {
//!     seen.set(seen.get() + step);
//! })
//! .with_predicate(|r: &GestureResult<u32>, _step: &u32| r.origin().x >= 0.0);
//!
//! let tap = GestureResult::new(GestureType::SingleTap, Point::new(4.0, 2.0));
//! assert!(cmd.can_execute(&tap, &5));
//! cmd.execute(&tap, &5);
//! assert_eq!(taps.get(), 5);
//! ```

use alloc::boxed::Box;
use core::future::Future;

use futures_task::{LocalFutureObj, LocalSpawn};

use crate::types::GestureResult;

/// Consumer of a recognized gesture.
pub trait GestureCommand<V, P> {
    /// Returns true if the command should run for `result`.
    fn can_execute(&self, result: &GestureResult<V>, param: &P) -> bool;

    /// Run the command.
    fn execute(&self, result: &GestureResult<V>, param: &P);
}

type ExecuteFn<V, P> = Box<dyn Fn(&GestureResult<V>, &P)>;
type PredicateFn<V, P> = Box<dyn Fn(&GestureResult<V>, &P) -> bool>;
type AsyncExecuteFn<V, P> = Box<dyn Fn(GestureResult<V>, P) -> LocalFutureObj<'static, ()>>;

/// Synchronous command built from closures.
///
/// Without a predicate the command is always executable; without an action
/// executing it does nothing.
pub struct RelayGesture<V, P = ()> {
    execute: Option<ExecuteFn<V, P>>,
    can_execute: Option<PredicateFn<V, P>>,
}

impl<V, P> RelayGesture<V, P> {
    /// A command running `execute`.
    pub fn new(execute: impl Fn(&GestureResult<V>, &P) + 'static) -> Self {
        Self {
            execute: Some(Box::new(execute)),
            can_execute: None,
        }
    }

    /// A command with neither an action nor a predicate.
    pub fn inert() -> Self {
        Self {
            execute: None,
            can_execute: None,
        }
    }

    /// Gate the command behind `predicate`.
    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&GestureResult<V>, &P) -> bool + 'static,
    ) -> Self {
        self.can_execute = Some(Box::new(predicate));
        self
    }
}

impl<V, P> GestureCommand<V, P> for RelayGesture<V, P> {
    fn can_execute(&self, result: &GestureResult<V>, param: &P) -> bool {
        self.can_execute.as_ref().is_none_or(|f| f(result, param))
    }

    fn execute(&self, result: &GestureResult<V>, param: &P) {
        if let Some(f) = &self.execute {
            f(result, param);
        }
    }
}

impl<V, P> core::fmt::Debug for RelayGesture<V, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RelayGesture")
            .field("has_execute", &self.execute.is_some())
            .field("has_predicate", &self.can_execute.is_some())
            .finish()
    }
}

/// Asynchronous command: the predicate runs inline, the action runs as a detached task.
///
/// The future receives owned copies of the result and parameter, so it may
/// outlive the dispatch that started it.
pub struct RelayGestureAsync<V, P, S> {
    spawner: S,
    execute: Option<AsyncExecuteFn<V, P>>,
    can_execute: Option<PredicateFn<V, P>>,
}

impl<V: 'static, P: 'static, S: LocalSpawn> RelayGestureAsync<V, P, S> {
    /// A command spawning the future returned by `execute` on `spawner`.
    pub fn new<F, Fut>(spawner: S, execute: F) -> Self
    where
        F: Fn(GestureResult<V>, P) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let execute: AsyncExecuteFn<V, P> =
            Box::new(move |result: GestureResult<V>, param: P| {
                LocalFutureObj::new(Box::pin(execute(result, param)))
            });
        Self {
            spawner,
            execute: Some(execute),
            can_execute: None,
        }
    }

    /// Gate the command behind `predicate`.
    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&GestureResult<V>, &P) -> bool + 'static,
    ) -> Self {
        self.can_execute = Some(Box::new(predicate));
        self
    }

    /// The executor tasks are spawned on.
    pub fn spawner(&self) -> &S {
        &self.spawner
    }
}

impl<V: Clone, P: Clone, S: LocalSpawn> GestureCommand<V, P> for RelayGestureAsync<V, P, S> {
    fn can_execute(&self, result: &GestureResult<V>, param: &P) -> bool {
        self.can_execute.as_ref().is_none_or(|f| f(result, param))
    }

    fn execute(&self, result: &GestureResult<V>, param: &P) {
        let Some(f) = &self.execute else {
            return;
        };
        let task = f(result.clone(), param.clone());
        if let Err(err) = self.spawner.spawn_local_obj(task) {
            log::warn!("dropping {:?} gesture task: {err}", result.gesture_type());
        }
    }
}

impl<V, P, S> core::fmt::Debug for RelayGestureAsync<V, P, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RelayGestureAsync")
            .field("has_execute", &self.execute.is_some())
            .field("has_predicate", &self.can_execute.is_some())
            .finish_non_exhaustive()
    }
}
