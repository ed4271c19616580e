//! Paste handling.
//!
//! The host hands a tool the pasted element that matched its paste config,
//! wrapped in a `CustomEvent` whose `detail.data` is the element.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Element};

/// Outer HTML of the element carried by a host paste event.
///
/// Returns `None` if the event does not carry an element.
pub fn html_from_paste_event(event: &JsValue) -> Option<String> {
    let event = event.dyn_ref::<CustomEvent>()?;
    let data = Reflect::get(&event.detail(), &JsValue::from_str("data")).ok()?;
    let element = data.dyn_into::<Element>().ok()?;
    Some(element.outer_html())
}
