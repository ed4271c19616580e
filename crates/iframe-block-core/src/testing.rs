//! In-memory platform doubles for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::platform::{
    InputSurface, PlatformError, Scheduler, SurfaceFactory, SurfaceSpec, TimerHandle,
};

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    tasks: Vec<(u64, Duration, Task)>,
}

/// Scheduler driven by [`ManualScheduler::advance`] instead of wall time.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
    /// When set, cancelling a handle does nothing.
    leaky: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose handles cannot cancel, like a timer that already
    /// left the queue.
    pub fn leaky() -> Self {
        Self {
            leaky: true,
            ..Self::default()
        }
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().tasks.len()
    }

    /// Move the clock forward, running due tasks in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= target)
                    .min_by_key(|(_, (id, at, _))| (*at, *id))
                    .map(|(idx, _)| idx);
                match due {
                    Some(idx) => {
                        let (_, at, task) = clock.tasks.remove(idx);
                        clock.now = at;
                        Some(task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

pub struct ManualHandle {
    id: u64,
    clock: Rc<RefCell<Clock>>,
    leaky: bool,
}

impl TimerHandle for ManualHandle {
    fn cancel(self) {
        if self.leaky {
            return;
        }
        self.clock.borrow_mut().tasks.retain(|(id, _, _)| *id != self.id);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let at = clock.now + delay;
        clock.tasks.push((id, at, task));
        ManualHandle {
            id,
            clock: Rc::clone(&self.clock),
            leaky: self.leaky,
        }
    }
}

/// Pixels per line of content in [`MockSurface::scroll_height`].
pub const LINE_HEIGHT: u32 = 20;

#[derive(Default)]
struct SurfaceState {
    spec: Option<SurfaceSpec>,
    value: RefCell<String>,
    message: RefCell<String>,
    reports: Cell<usize>,
    resets: Cell<usize>,
    measurements: Cell<usize>,
    height: Cell<Option<u32>>,
    handlers: RefCell<Vec<Box<dyn FnMut()>>>,
}

/// Text surface that records every call made on it.
#[derive(Clone, Default)]
pub struct MockSurface {
    state: Rc<SurfaceState>,
}

impl MockSurface {
    fn from_spec(spec: &SurfaceSpec) -> Self {
        let state = SurfaceState {
            value: RefCell::new(spec.value.clone()),
            spec: Some(spec.clone()),
            ..SurfaceState::default()
        };
        Self {
            state: Rc::new(state),
        }
    }

    pub fn spec(&self) -> Option<&SurfaceSpec> {
        self.state.spec.as_ref()
    }

    /// Replace the content and fire input handlers, like a keystroke.
    pub fn type_text(&self, text: &str) {
        *self.state.value.borrow_mut() = text.to_string();
        for handler in self.state.handlers.borrow_mut().iter_mut() {
            handler();
        }
    }

    /// Replace the content without firing any handler.
    pub fn set_value_silently(&self, text: &str) {
        *self.state.value.borrow_mut() = text.to_string();
    }

    pub fn message(&self) -> String {
        self.state.message.borrow().clone()
    }

    pub fn reports(&self) -> usize {
        self.state.reports.get()
    }

    pub fn measurements(&self) -> usize {
        self.state.measurements.get()
    }

    pub fn resets(&self) -> usize {
        self.state.resets.get()
    }

    pub fn height(&self) -> Option<u32> {
        self.state.height.get()
    }

    pub fn listeners(&self) -> usize {
        self.state.handlers.borrow().len()
    }
}

impl InputSurface for MockSurface {
    fn value(&self) -> String {
        self.state.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.state.value.borrow_mut() = value.to_string();
    }

    fn set_validation_message(&self, message: &str) {
        *self.state.message.borrow_mut() = message.to_string();
    }

    fn report_validity(&self) {
        self.state.reports.set(self.state.reports.get() + 1);
    }

    fn reset_height(&self) {
        self.state.resets.set(self.state.resets.get() + 1);
        self.state.height.set(None);
    }

    fn scroll_height(&self) -> u32 {
        self.state
            .measurements
            .set(self.state.measurements.get() + 1);
        let lines = self.state.value.borrow().lines().count().max(1) as u32;
        lines * LINE_HEIGHT
    }

    fn set_height(&self, px: u32) {
        self.state.height.set(Some(px));
    }

    fn on_input(&self, handler: Box<dyn FnMut()>) -> Result<(), PlatformError> {
        self.state.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

/// Factory that hands out [`MockSurface`]s and remembers the last one.
#[derive(Default)]
pub struct MockFactory {
    last: RefCell<Option<MockSurface>>,
    fail: bool,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last(&self) -> Option<MockSurface> {
        self.last.borrow().clone()
    }
}

impl SurfaceFactory for MockFactory {
    type Surface = MockSurface;

    fn create(&self, spec: &SurfaceSpec) -> Result<MockSurface, PlatformError> {
        if self.fail {
            return Err("no document".into());
        }
        let surface = MockSurface::from_spec(spec);
        *self.last.borrow_mut() = Some(surface.clone());
        Ok(surface)
    }
}
