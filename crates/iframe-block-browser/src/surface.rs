//! `<textarea>` input surface.

use std::cell::RefCell;

use gloo_events::EventListener;
use iframe_block_core::{InputSurface, PlatformError, SurfaceFactory, SurfaceSpec};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlTextAreaElement};

use crate::js_error;

/// The block's view: a wrapper `<div>` holding one `<textarea>`.
///
/// Input listeners live as long as the surface; dropping it detaches them.
pub struct BrowserTextArea {
    wrapper: HtmlElement,
    textarea: HtmlTextAreaElement,
    listeners: RefCell<Vec<EventListener>>,
}

impl BrowserTextArea {
    /// The wrapper element to hand back to the host editor.
    pub fn element(&self) -> &HtmlElement {
        &self.wrapper
    }

    pub fn textarea(&self) -> &HtmlTextAreaElement {
        &self.textarea
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.textarea.style().set_property(property, value) {
            tracing::warn!(property, "failed to set textarea style: {:?}", e);
        }
    }
}

impl InputSurface for BrowserTextArea {
    fn value(&self) -> String {
        self.textarea.value()
    }

    fn set_value(&self, value: &str) {
        self.textarea.set_value(value);
    }

    fn set_validation_message(&self, message: &str) {
        self.textarea.set_custom_validity(message);
    }

    fn report_validity(&self) {
        self.textarea.report_validity();
    }

    fn reset_height(&self) {
        self.set_style("height", "auto");
    }

    fn scroll_height(&self) -> u32 {
        u32::try_from(self.textarea.scroll_height()).unwrap_or(0)
    }

    fn set_height(&self, px: u32) {
        self.set_style("height", &format!("{px}px"));
    }

    fn on_input(&self, handler: Box<dyn FnMut()>) -> Result<(), PlatformError> {
        let mut handler = handler;
        let listener = EventListener::new(&self.textarea, "input", move |_event| handler());
        self.listeners.borrow_mut().push(listener);
        Ok(())
    }
}

/// Builds [`BrowserTextArea`]s in the current document.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSurfaceFactory;

impl SurfaceFactory for BrowserSurfaceFactory {
    type Surface = BrowserTextArea;

    fn create(&self, spec: &SurfaceSpec) -> Result<BrowserTextArea, PlatformError> {
        let document = gloo_utils::document();

        let wrapper: HtmlElement = document
            .create_element("div")
            .map_err(|e| js_error("create wrapper", e))?
            .dyn_into()
            .map_err(|_| PlatformError::from("wrapper is not an HtmlElement"))?;
        for class in &spec.classes.wrapper {
            wrapper
                .class_list()
                .add_1(class)
                .map_err(|e| js_error("add wrapper class", e))?;
        }

        let textarea: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(|e| js_error("create textarea", e))?
            .dyn_into()
            .map_err(|_| PlatformError::from("textarea is not an HtmlTextAreaElement"))?;
        for class in &spec.classes.input {
            textarea
                .class_list()
                .add_1(class)
                .map_err(|e| js_error("add textarea class", e))?;
        }
        textarea.set_value(&spec.value);
        textarea.set_placeholder(&spec.placeholder);
        textarea.set_disabled(spec.disabled);

        wrapper
            .append_child(&textarea)
            .map_err(|e| js_error("append textarea", e))?;

        tracing::debug!(disabled = spec.disabled, "created iframe block textarea");
        Ok(BrowserTextArea {
            wrapper,
            textarea,
            listeners: RefCell::new(Vec::new()),
        })
    }
}
