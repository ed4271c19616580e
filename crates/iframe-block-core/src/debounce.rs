//! Single-slot cancellable timer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::platform::{Scheduler, TimerHandle};

/// Coalesces rapid triggers into one delayed run of the latest task.
///
/// At most one task is pending at a time. Triggering again cancels the
/// pending task and restarts the delay. A superseded task that fires anyway
/// (because the platform could not cancel it in time) does nothing.
pub struct Debouncer<T: Scheduler> {
    scheduler: T,
    delay: Duration,
    pending: RefCell<Option<T::Handle>>,
    /// Generation of the task allowed to run, if any.
    armed: Rc<Cell<Option<u64>>>,
    generation: Cell<u64>,
}

impl<T: Scheduler> Debouncer<T> {
    pub fn new(scheduler: T, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: RefCell::new(None),
            armed: Rc::new(Cell::new(None)),
            generation: Cell::new(0),
        }
    }

    /// Schedule `task`, replacing whatever was pending.
    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        self.cancel();

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        self.armed.set(Some(generation));

        let armed = Rc::clone(&self.armed);
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                if armed.get() != Some(generation) {
                    tracing::trace!(generation, "skipping superseded debounced task");
                    return;
                }
                armed.set(None);
                task();
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    /// Drop the pending task, if any.
    pub fn cancel(&self) {
        self.armed.set(None);
        if let Some(handle) = self.pending.borrow_mut().take() {
            handle.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.armed.get().is_some()
    }
}
