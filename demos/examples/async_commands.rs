// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fire-and-forget async commands.
//!
//! This example registers an async long-press command on a tiny single-threaded
//! executor. Dispatch returns as soon as the task is spawned; the task finishes
//! later, when the executor runs.
//!
//! Run:
//! - `cargo run -p understory_demos --example async_commands`

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures_task::{LocalFutureObj, LocalSpawn, SpawnError, noop_waker_ref};
use kurbo::Point;
use understory_gesture::command::{GestureCommand, RelayGestureAsync};
use understory_gesture::container::GestureContainer;
use understory_gesture::types::{GestureInterest, GestureResult, GestureType};

/// Runs spawned tasks when asked to; never blocks.
#[derive(Default)]
struct Executor {
    tasks: RefCell<Vec<LocalFutureObj<'static, ()>>>,
}

impl Executor {
    /// Poll every task until none is left; tasks may spawn more tasks.
    fn run(&self) {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut round = 0;
        loop {
            let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
            if tasks.is_empty() {
                return;
            }
            round += 1;
            println!("executor round {round}: {} task(s)", tasks.len());
            for mut task in tasks {
                if Pin::new(&mut task).poll(&mut cx).is_pending() {
                    self.tasks.borrow_mut().push(task);
                }
            }
        }
    }
}

impl LocalSpawn for Executor {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        self.tasks.borrow_mut().push(future);
        Ok(())
    }
}

/// Pretend I/O: pending a few times before completing.
struct Delay(u32);

impl Future for Delay {
    type Output = ();
    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            Poll::Ready(())
        } else {
            self.0 -= 1;
            Poll::Pending
        }
    }
}

fn main() {
    env_logger::init();

    let executor = Rc::new(Executor::default());
    let task = |r: GestureResult<&'static str>, note: String| async move {
        let o = r.origin();
        println!("  task: saving '{note}' at ({:.0}, {:.0})", o.x, o.y);
        Delay(2).await;
        println!("  task: saved '{note}'");
    };
    // Presses near the bottom edge belong to the keyboard.
    let relay = RelayGestureAsync::new(executor.clone(), task)
        .with_predicate(|r, _| r.origin().y < 500.0);
    let save: Rc<dyn GestureCommand<&'static str, String>> = Rc::new(relay);

    let mut container: GestureContainer<&'static str, String> = GestureContainer::new();
    let interest = GestureInterest::with_parameter(GestureType::LongPress, "draft".to_owned());
    container.register_interests("note", vec![interest.with_command(save)]);

    for pt in [Point::new(40.0, 80.0), Point::new(40.0, 700.0)] {
        let press = GestureResult::new(GestureType::LongPress, pt);
        let executed = container.process(&press);
        println!("long press at ({}, {}): executed={executed}", pt.x, pt.y);
    }
    println!("running executor");
    executor.run();
}
