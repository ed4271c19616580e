//! Types exposed to JavaScript via wasm-bindgen.

use iframe_block_browser::BlockData;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Block data as handed over by the host. `html` may be missing or null.
///
/// Describes the TypeScript shape only; decoding goes through [`BlockData`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsBlockData {
    #[serde(default)]
    #[tsify(optional)]
    pub html: Option<String>,
}

/// Block data returned from `save()`. `html` is always a string.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsSavedData {
    pub html: String,
}

impl From<BlockData> for JsSavedData {
    fn from(data: BlockData) -> Self {
        Self { html: data.html }
    }
}

/// Tool config from the host editor setup.
///
/// Describes the TypeScript shape only; decoding goes through `BlockConfig`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct JsBlockConfig {
    #[tsify(optional)]
    pub placeholder: Option<String>,
    #[tsify(optional)]
    pub validation_message: Option<String>,
}
