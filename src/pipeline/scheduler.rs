//! Deferred task queue.
//!
//! `defer` queues a closure to run once the current tick has finished; the
//! event loop drains the queue with `run_deferred` after routing input.
//! Tasks queued while the queue is being drained run on the following tick,
//! so a deferred task can never starve the loop.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use log::trace;

type Task = Box<dyn FnOnce()>;

thread_local! {
    static QUEUE: RefCell<VecDeque<(u64, Task)>> = RefCell::new(VecDeque::new());
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Handle to a deferred task.
///
/// Dropping the handle does not cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTask {
    id: u64,
}

impl DeferredTask {
    /// Remove the task from the queue if it has not run yet.
    ///
    /// Returns true if a pending task was cancelled.
    pub fn cancel(self) -> bool {
        let removed = QUEUE.with(|queue| {
            let mut queue = queue.borrow_mut();
            let before = queue.len();
            queue.retain(|(id, _)| *id != self.id);
            before != queue.len()
        });
        if removed {
            trace!("cancel deferred #{}", self.id);
        } else {
            trace!("cancel deferred #{} did not cancel anything", self.id);
        }
        removed
    }

    /// True while the task is still queued.
    pub fn is_pending(&self) -> bool {
        QUEUE.with(|queue| queue.borrow().iter().any(|(id, _)| *id == self.id))
    }
}

/// Queue `f` to run after the current tick.
pub fn defer(f: impl FnOnce() + 'static) -> DeferredTask {
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    trace!("defer #{}", id);
    QUEUE.with(|queue| queue.borrow_mut().push_back((id, Box::new(f))));
    DeferredTask { id }
}

/// Run every task that was queued before this call.
///
/// Returns the number of tasks that ran.
pub fn run_deferred() -> usize {
    let batch: Vec<(u64, Task)> = QUEUE.with(|queue| queue.borrow_mut().drain(..).collect());
    let count = batch.len();
    for (id, task) in batch {
        trace!("run deferred #{}", id);
        task();
    }
    count
}

/// Number of queued tasks.
pub fn pending_count() -> usize {
    QUEUE.with(|queue| queue.borrow().len())
}

/// Drop all queued tasks (for testing).
pub fn reset_scheduler() {
    QUEUE.with(|queue| queue.borrow_mut().clear());
}
