//! JsIframeBlock - the block tool class exposed to JavaScript.

use iframe_block_browser::{
    BlockConfig, BlockData, BlockInit, BrowserIframeBlock, BrowserScheduler,
    BrowserSurfaceFactory, HostServices, capabilities, html_from_paste_event,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::host::{HostTranslator, field, style_classes};
use crate::types::JsSavedData;

/// Serialize to plain JS objects (not `Map`s).
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::UNDEFINED)
}

/// Stringify a host object for the core's serde decoders.
///
/// `None` for `undefined` or `null`.
fn host_json(value: &JsValue) -> Option<Result<String, String>> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(
        js_sys::JSON::stringify(value)
            .map(String::from)
            .map_err(|e| format!("{:?}", e)),
    )
}

/// Decode block data. Unreadable records load as an empty block.
fn data_from_json(json: &str) -> BlockData {
    match BlockData::from_json(json) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable iframe block data");
            BlockData::default()
        }
    }
}

fn read_data(value: &JsValue) -> BlockData {
    match host_json(value) {
        None => BlockData::default(),
        Some(Ok(json)) => data_from_json(&json),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "iframe block data is not JSON");
            BlockData::default()
        }
    }
}

fn read_config(value: &JsValue) -> Result<BlockConfig, JsError> {
    match host_json(value) {
        None => Ok(BlockConfig::default()),
        Some(Ok(json)) => BlockConfig::from_json(&json)
            .map_err(|e| JsError::new(&format!("Invalid iframe tool config: {}", e))),
        Some(Err(e)) => Err(JsError::new(&format!("Invalid iframe tool config: {}", e))),
    }
}

/// The iframe embed tool, one instance per block.
///
/// Constructed by the host with `{ data, config, api, readOnly }`.
#[wasm_bindgen(js_name = IframeBlock)]
pub struct JsIframeBlock {
    block: BrowserIframeBlock,
}

#[wasm_bindgen(js_class = IframeBlock)]
impl JsIframeBlock {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsIframeBlock, JsError> {
        let data = read_data(&field(&options, "data"));
        let config = read_config(&field(&options, "config"))?;
        let read_only = field(&options, "readOnly").as_bool().unwrap_or(false);

        let api = field(&options, "api");
        let translator = HostTranslator::from_api(&api);
        let host = HostServices {
            translator: &translator,
            classes: style_classes(&api),
        };

        let init = BlockInit {
            data: Some(data),
            config,
            read_only,
        };
        Ok(Self {
            block: BrowserIframeBlock::new(init, &host, BrowserScheduler),
        })
    }

    /// Build the block's element.
    pub fn render(&self) -> Result<HtmlElement, JsError> {
        let surface = self
            .block
            .render(&BrowserSurfaceFactory)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(surface.element().clone())
    }

    /// Read the current content as `{ html }`.
    pub fn save(&self) -> JsSavedData {
        self.block.save().into()
    }

    /// Whether the current content is a single iframe.
    #[wasm_bindgen(js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.block.validate().is_valid()
    }

    /// Handle a pasted iframe routed here by the host's paste config.
    #[wasm_bindgen(js_name = onPaste)]
    pub fn on_paste(&self, event: JsValue) {
        match html_from_paste_event(&event) {
            Some(html) => {
                self.block.paste(&html);
            }
            None => tracing::debug!("paste event carried no element"),
        }
    }

    #[wasm_bindgen(getter, js_name = toolbox)]
    pub fn toolbox() -> JsValue {
        to_js(&capabilities().toolbox)
    }

    #[wasm_bindgen(getter, js_name = isReadOnlySupported)]
    pub fn is_read_only_supported() -> bool {
        capabilities().is_read_only_supported
    }

    #[wasm_bindgen(getter, js_name = enableLineBreaks)]
    pub fn enable_line_breaks() -> bool {
        capabilities().enable_line_breaks
    }

    #[wasm_bindgen(getter, js_name = sanitize)]
    pub fn sanitize() -> JsValue {
        to_js(&capabilities().sanitize)
    }

    #[wasm_bindgen(getter, js_name = pasteConfig)]
    pub fn paste_config() -> JsValue {
        to_js(&capabilities().paste_config)
    }
}
