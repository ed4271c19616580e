//! iframe-block-core: pure Rust logic for the iframe embed block.
//!
//! This crate provides:
//! - `is_iframe` / `scan_fragment` - single-iframe detection without a DOM
//! - `BlockData` / `BlockState` - the persisted record and live state
//! - `IframeBlock<S, T>` - the block lifecycle, generic over the platform
//! - `InputSurface`, `Scheduler`, `Translator` - the platform seams
//! - `Debouncer` and `resize` - grow-to-fit sizing of the text surface
//! - `capabilities()` - the static tool declaration read by the host

pub mod block;
pub mod config;
pub mod data;
pub mod debounce;
pub mod error;
pub mod platform;
pub mod resize;
pub mod tool;
pub mod validator;

#[cfg(test)]
mod testing;

pub use block::{BlockInit, HostServices, IframeBlock, Phase};
pub use config::{BlockConfig, BlockSettings, StyleClasses};
pub use data::{BlockData, BlockState};
pub use debounce::Debouncer;
pub use error::BlockError;
pub use platform::{
    InputSurface, PlatformError, Scheduler, SurfaceFactory, SurfaceSpec, TimerHandle, Translator,
    Untranslated,
};
pub use resize::{MOUNT_RESIZE_DELAY, RESIZE_DEBOUNCE, resize};
pub use tool::{PasteConfig, ToolCapabilities, Toolbox, capabilities};
pub use validator::{
    FragmentError, TopLevelNode, ValidationState, is_iframe, scan_fragment, validate,
};
