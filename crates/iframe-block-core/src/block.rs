//! The iframe block: load, render, edit, save.
//!
//! An [`IframeBlock`] owns its [`BlockState`] and, once rendered, the text
//! surface built for it. Input on the surface drives validation feedback and a
//! debounced resize; `save` always reads the live surface.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::{BlockConfig, BlockSettings, StyleClasses};
use crate::data::{BlockData, BlockState};
use crate::debounce::Debouncer;
use crate::error::BlockError;
use crate::platform::{
    InputSurface, Scheduler, SurfaceFactory, SurfaceSpec, TimerHandle, Translator,
};
use crate::resize::{MOUNT_RESIZE_DELAY, RESIZE_DEBOUNCE, resize};
use crate::validator::{ValidationState, validate};

/// Lifecycle phase of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not rendered yet.
    Uninitialized,
    /// Rendered; the mount resize may still be pending.
    Mounted,
    /// The user has changed the content since mount.
    Editing,
    /// `save` has been called.
    Saved,
}

/// What the host passes when constructing a block.
#[derive(Debug, Clone, Default)]
pub struct BlockInit {
    pub data: Option<BlockData>,
    pub config: BlockConfig,
    pub read_only: bool,
}

/// Host services a block consumes.
pub struct HostServices<'a> {
    pub translator: &'a dyn Translator,
    pub classes: StyleClasses,
}

struct BlockInner<S, T: Scheduler> {
    state: RefCell<BlockState>,
    settings: BlockSettings,
    classes: StyleClasses,
    scheduler: T,
    surface: RefCell<Option<Rc<S>>>,
    resize: Debouncer<T>,
    mount_resize: RefCell<Option<T::Handle>>,
    phase: Cell<Phase>,
    validation: Cell<Option<ValidationState>>,
}

/// One iframe embed block.
pub struct IframeBlock<S, T: Scheduler> {
    inner: Rc<BlockInner<S, T>>,
}

impl<S, T> IframeBlock<S, T>
where
    S: InputSurface + 'static,
    T: Scheduler + Clone + 'static,
{
    pub fn new(init: BlockInit, host: &HostServices<'_>, scheduler: T) -> Self {
        let settings = init.config.resolve(host.translator, init.read_only);
        let state = BlockState::load(init.data);
        tracing::debug!(
            read_only = settings.read_only,
            len = state.html().len(),
            "iframe block created"
        );

        Self {
            inner: Rc::new(BlockInner {
                state: RefCell::new(state),
                settings,
                classes: host.classes.clone(),
                resize: Debouncer::new(scheduler.clone(), RESIZE_DEBOUNCE),
                scheduler,
                surface: RefCell::new(None),
                mount_resize: RefCell::new(None),
                phase: Cell::new(Phase::Uninitialized),
                validation: Cell::new(None),
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    pub fn is_read_only(&self) -> bool {
        self.inner.settings.read_only
    }

    /// Current HTML held in state (mirrors the surface while editing).
    pub fn html(&self) -> String {
        self.inner.state.borrow().html().to_string()
    }

    /// Result of the most recent input validation, if input has happened.
    pub fn last_validation(&self) -> Option<ValidationState> {
        self.inner.validation.get()
    }

    /// The live surface, once rendered.
    pub fn surface(&self) -> Option<Rc<S>> {
        self.inner.current_surface()
    }

    /// Build the view and wire it up.
    ///
    /// Rendering again replaces the previous surface and cancels its timers.
    pub fn render<F>(&self, factory: &F) -> Result<Rc<S>, BlockError>
    where
        F: SurfaceFactory<Surface = S>,
    {
        let inner = &self.inner;
        inner.cancel_timers();

        let spec = SurfaceSpec {
            value: inner.state.borrow().html().to_string(),
            placeholder: inner.settings.placeholder.clone(),
            disabled: inner.settings.read_only,
            classes: inner.classes.clone(),
        };
        let surface = Rc::new(factory.create(&spec)?);

        if !inner.settings.read_only {
            let weak = Rc::downgrade(inner);
            surface.on_input(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_input();
                }
            }))?;
        }

        *inner.surface.borrow_mut() = Some(Rc::clone(&surface));

        let weak_surface = Rc::downgrade(&surface);
        let handle = inner.scheduler.schedule(
            MOUNT_RESIZE_DELAY,
            Box::new(move || {
                if let Some(surface) = weak_surface.upgrade() {
                    resize(&*surface);
                }
            }),
        );
        *inner.mount_resize.borrow_mut() = Some(handle);

        inner.set_phase(Phase::Mounted);
        Ok(surface)
    }

    /// Run the input path: debounced resize plus validation feedback.
    ///
    /// Platforms call this from their input listener. Returns `None` for
    /// read-only or unrendered blocks.
    pub fn handle_input(&self) -> Option<ValidationState> {
        self.inner.handle_input()
    }

    /// Replace the content with pasted iframe markup.
    ///
    /// Ignored for read-only blocks.
    pub fn paste(&self, html: &str) -> Option<ValidationState> {
        let inner = &self.inner;
        if inner.settings.read_only {
            tracing::debug!("ignoring paste into read-only block");
            return None;
        }

        match inner.current_surface() {
            Some(surface) => {
                surface.set_value(html);
                inner.handle_input()
            }
            None => {
                inner.state.borrow_mut().set_html(html);
                Some(validate(html))
            }
        }
    }

    /// Validate whatever the block currently holds without side effects.
    pub fn validate(&self) -> ValidationState {
        validate(&self.inner.current_content())
    }

    /// Produce the record to persist.
    ///
    /// Reads the live surface, so edits count even if no input event was
    /// delivered. Invalid content is saved as-is.
    pub fn save(&self) -> BlockData {
        let inner = &self.inner;
        let content = inner.current_content();
        let data = inner.state.borrow_mut().save_from(&content);
        inner.set_phase(Phase::Saved);
        data
    }
}

impl<S, T> BlockInner<S, T>
where
    S: InputSurface + 'static,
    T: Scheduler,
{
    fn current_surface(&self) -> Option<Rc<S>> {
        self.surface.borrow().clone()
    }

    fn current_content(&self) -> String {
        match self.current_surface() {
            Some(surface) => surface.value(),
            None => self.state.borrow().html().to_string(),
        }
    }

    fn set_phase(&self, phase: Phase) {
        let from = self.phase.replace(phase);
        if from != phase {
            tracing::debug!(?from, to = ?phase, "iframe block phase");
        }
    }

    fn cancel_timers(&self) {
        self.resize.cancel();
        if let Some(handle) = self.mount_resize.borrow_mut().take() {
            handle.cancel();
        }
    }

    fn handle_input(&self) -> Option<ValidationState> {
        if self.settings.read_only {
            return None;
        }
        let surface = self.current_surface()?;
        let content = surface.value();
        self.state.borrow_mut().set_html(content.as_str());
        self.set_phase(Phase::Editing);

        let weak: Weak<S> = Rc::downgrade(&surface);
        self.resize.trigger(move || {
            if let Some(surface) = weak.upgrade() {
                resize(&*surface);
            }
        });

        let validation = validate(content.trim());
        match validation {
            ValidationState::Valid => surface.set_validation_message(""),
            ValidationState::Invalid => {
                surface.set_validation_message(&self.settings.validation_message);
                surface.report_validity();
            }
        }
        tracing::trace!(?validation, "validated iframe block input");
        self.validation.set(Some(validation));
        Some(validation)
    }
}
