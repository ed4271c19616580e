//! WASM bindings for the iframe embed block.
//!
//! Exposes `IframeBlock`, a tool class a block editor can register directly,
//! and `isIframe` for hosts that want the shape check on its own.

mod block;
mod host;
mod types;

pub use block::*;
pub use host::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Check whether `content` is exactly one top-level `<iframe>` element.
#[wasm_bindgen(js_name = isIframe)]
pub fn is_iframe(content: &str) -> bool {
    iframe_block_browser::is_iframe(content)
}
