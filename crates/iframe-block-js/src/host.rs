//! Adapters over the host editor's `api` object.

use iframe_block_browser::{StyleClasses, Translator};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Read `target[key]`, treating a missing target as undefined.
pub(crate) fn field(target: &JsValue, key: &str) -> JsValue {
    if target.is_undefined() || target.is_null() {
        return JsValue::UNDEFINED;
    }
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// Translator backed by `api.i18n.t`.
pub struct HostTranslator {
    i18n: JsValue,
    t: Option<Function>,
}

impl HostTranslator {
    pub fn from_api(api: &JsValue) -> Self {
        let i18n = field(api, "i18n");
        let t = field(&i18n, "t").dyn_into::<Function>().ok();
        Self { i18n, t }
    }
}

impl Translator for HostTranslator {
    fn translate(&self, text: &str) -> String {
        let Some(t) = &self.t else {
            return text.to_string();
        };
        match t.call1(&self.i18n, &JsValue::from_str(text)) {
            Ok(value) => value.as_string().unwrap_or_else(|| text.to_string()),
            Err(e) => {
                tracing::warn!(text, "i18n.t failed: {:?}", e);
                text.to_string()
            }
        }
    }
}

/// Base classes from `api.styles`.
pub fn style_classes(api: &JsValue) -> StyleClasses {
    let styles = field(api, "styles");
    let block = field(&styles, "block").as_string().unwrap_or_default();
    let input = field(&styles, "input").as_string().unwrap_or_default();
    StyleClasses::with_host(&block, &input)
}
