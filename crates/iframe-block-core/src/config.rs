//! Tool configuration supplied by the host.

use serde::{Deserialize, Serialize};

use crate::error::BlockError;
use crate::platform::Translator;

/// Placeholder shown in an empty block when none is configured.
pub const DEFAULT_PLACEHOLDER: &str = "Paste an iframe embed code";

/// Message shown while the content is not a single iframe.
pub const DEFAULT_VALIDATION_MESSAGE: &str = "Please enter a single <iframe> element";

/// Class added to the block wrapper.
pub const WRAPPER_CLASS: &str = "cdx-iframe-block";

/// Class added to the textarea.
pub const TEXTAREA_CLASS: &str = "cdx-iframe-block__textarea";

/// Tool config as written in the host editor setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockConfig {
    pub placeholder: Option<String>,
    pub validation_message: Option<String>,
}

impl BlockConfig {
    pub fn from_json(json: &str) -> Result<Self, BlockError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve user-facing strings. Configured values are used as written;
    /// only the built-in defaults go through the translator.
    pub fn resolve(&self, translator: &dyn Translator, read_only: bool) -> BlockSettings {
        let placeholder = match &self.placeholder {
            Some(p) => p.clone(),
            None => translator.translate(DEFAULT_PLACEHOLDER),
        };
        let validation_message = match &self.validation_message {
            Some(m) => m.clone(),
            None => translator.translate(DEFAULT_VALIDATION_MESSAGE),
        };
        BlockSettings {
            placeholder,
            validation_message,
            read_only,
        }
    }
}

/// Config after defaults and translation have been applied.
///
/// Fixed for the lifetime of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSettings {
    pub placeholder: String,
    pub validation_message: String,
    pub read_only: bool,
}

/// CSS classes for the wrapper and the input surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleClasses {
    pub wrapper: Vec<String>,
    pub input: Vec<String>,
}

impl StyleClasses {
    /// Combine the host's base classes with the block's own.
    ///
    /// Empty host classes are skipped.
    pub fn with_host(block: &str, input: &str) -> Self {
        let mut wrapper = Vec::new();
        if !block.is_empty() {
            wrapper.push(block.to_string());
        }
        wrapper.push(WRAPPER_CLASS.to_string());

        let mut textarea = Vec::new();
        if !input.is_empty() {
            textarea.push(input.to_string());
        }
        textarea.push(TEXTAREA_CLASS.to_string());

        Self {
            wrapper,
            input: textarea,
        }
    }
}
