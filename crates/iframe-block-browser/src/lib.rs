//! Browser DOM layer for the iframe embed block.
//!
//! Implements the platform traits of `iframe-block-core` on top of
//! `web-sys`. It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `surface`: `<textarea>` surface and the factory that builds it
//! - `timer`: `setTimeout`-backed scheduler
//! - `paste`: extracting iframe markup from host paste events
//!
//! # Re-exports
//!
//! This crate re-exports `iframe-block-core` for convenience, so consumers
//! only need to depend on `iframe-block-browser`.

// Re-export core crate
pub use iframe_block_core;
pub use iframe_block_core::*;

pub mod paste;
pub mod surface;
pub mod timer;

pub use paste::html_from_paste_event;
pub use surface::{BrowserSurfaceFactory, BrowserTextArea};
pub use timer::{BrowserScheduler, BrowserTimer};

/// An iframe block wired to the browser DOM.
pub type BrowserIframeBlock = IframeBlock<BrowserTextArea, BrowserScheduler>;

/// Convert a thrown JS value into a platform error.
pub(crate) fn js_error(context: &str, err: wasm_bindgen::JsValue) -> PlatformError {
    PlatformError(format!("{context}: {err:?}"))
}
