//! Static capabilities the host reads once when the tool is registered.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

/// Toolbox entry: how the tool appears in the host's block palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolbox {
    pub title: &'static str,
    /// Inline SVG markup.
    pub icon: &'static str,
}

/// Pasted content the tool claims from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteConfig {
    pub tags: Vec<&'static str>,
}

/// Capability declaration for the iframe tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapabilities {
    pub is_read_only_supported: bool,
    /// Enter inserts a newline instead of creating a new block.
    pub enable_line_breaks: bool,
    pub toolbox: Toolbox,
    /// Sanitizer rules per data field; `true` keeps the markup untouched.
    pub sanitize: BTreeMap<&'static str, bool>,
    pub paste_config: PasteConfig,
}

const ICON: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><rect x="4" y="5" width="16" height="14" rx="2" stroke="currentColor" stroke-width="2"/><path d="M10 10l-2 2 2 2M14 10l2 2-2 2" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;

static CAPABILITIES: LazyLock<ToolCapabilities> = LazyLock::new(|| ToolCapabilities {
    is_read_only_supported: true,
    enable_line_breaks: true,
    toolbox: Toolbox {
        title: "Iframe",
        icon: ICON,
    },
    // Passed through unsanitized. The validator only checks shape.
    sanitize: BTreeMap::from([("html", true)]),
    paste_config: PasteConfig {
        tags: vec!["IFRAME"],
    },
});

/// The tool's capability declaration.
pub fn capabilities() -> &'static ToolCapabilities {
    &CAPABILITIES
}
