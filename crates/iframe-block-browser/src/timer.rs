//! `setTimeout`-backed scheduler.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use iframe_block_core::{Scheduler, TimerHandle};

/// Schedules tasks on the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// A pending browser timeout. Dropping it also clears the timeout.
pub struct BrowserTimer(Timeout);

impl TimerHandle for BrowserTimer {
    fn cancel(self) {
        // The returned closure is the never-run task; drop it.
        let _ = self.0.cancel();
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> BrowserTimer {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        BrowserTimer(Timeout::new(millis, task))
    }
}
