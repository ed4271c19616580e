//! Platform abstraction traits for the block view.
//!
//! These traits define the interface between the block logic and a concrete
//! UI (browser DOM, a test double, ...). The block never touches the platform
//! directly, which keeps the lifecycle logic testable without a browser.

use std::time::Duration;

use crate::config::StyleClasses;

/// Error type for platform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Everything the platform needs to build the block's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    /// Initial content of the text surface.
    pub value: String,
    pub placeholder: String,
    /// Disabled surfaces accept no input.
    pub disabled: bool,
    pub classes: StyleClasses,
}

/// A multi-line text input owned by one block.
///
/// The browser implementation wraps a `<textarea>`; tests use an in-memory
/// double.
pub trait InputSurface {
    /// Current content, untrimmed.
    fn value(&self) -> String;

    /// Replace the content, as if the user had typed it.
    fn set_value(&self, value: &str);

    /// Set the validity message. An empty message marks the surface valid.
    fn set_validation_message(&self, message: &str);

    /// Ask the UI to show the current validity message to the user.
    fn report_validity(&self);

    /// Let the surface take its intrinsic height so it can be measured.
    fn reset_height(&self);

    /// Full height of the content, including any part scrolled out of view.
    fn scroll_height(&self) -> u32;

    /// Fix the visible height in pixels.
    fn set_height(&self, px: u32);

    /// Register a callback fired on every content change.
    fn on_input(&self, handler: Box<dyn FnMut()>) -> Result<(), PlatformError>;
}

/// Builds surfaces from a [`SurfaceSpec`].
pub trait SurfaceFactory {
    type Surface: InputSurface;

    fn create(&self, spec: &SurfaceSpec) -> Result<Self::Surface, PlatformError>;
}

/// A pending timer that can be cancelled.
pub trait TimerHandle {
    fn cancel(self);
}

/// Schedules one-shot callbacks on the UI event loop.
pub trait Scheduler {
    type Handle: TimerHandle;

    /// Run `task` once after `delay`, unless the returned handle is cancelled.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// The host's translation service.
pub trait Translator {
    /// Translate a UI string. Untranslated strings are returned unchanged.
    fn translate(&self, text: &str) -> String;
}

/// Translator that returns its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}
