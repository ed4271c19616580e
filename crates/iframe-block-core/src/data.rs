//! Persisted block data and the live block state.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BlockError;

/// The block's persisted record: `{ "html": "..." }`.
///
/// `html` is always a string. Missing or `null` values load as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl BlockData {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Decode host JSON such as `{"html": "<iframe ...></iframe>"}`.
    pub fn from_json(json: &str) -> Result<Self, BlockError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The block's in-memory HTML, seeded from [`BlockData`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockState {
    html: String,
}

impl BlockState {
    /// Seed state from host data; absent data means an empty block.
    pub fn load(data: Option<BlockData>) -> Self {
        Self {
            html: data.map(|d| d.html).unwrap_or_default(),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    /// Build the record to persist from `content`, trimmed.
    pub fn save_from(&mut self, content: &str) -> BlockData {
        self.html = content.trim().to_string();
        BlockData::new(self.html.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_html_field() {
        let data = BlockData::from_json(r#"{"html":"<iframe src='https://a'></iframe>"}"#).unwrap();
        assert_eq!(data.html, "<iframe src='https://a'></iframe>");
    }

    #[test]
    fn missing_or_null_html_is_empty() {
        assert_eq!(BlockData::from_json("{}").unwrap().html, "");
        assert_eq!(BlockData::from_json(r#"{"html":null}"#).unwrap().html, "");
        assert_eq!(BlockData::from_json(r#"{"html":""}"#).unwrap().html, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let data = BlockData::from_json(r#"{"html":"x","caption":"y"}"#).unwrap();
        assert_eq!(data.html, "x");
    }

    #[test]
    fn non_string_html_is_an_error() {
        let err = BlockData::from_json(r#"{"html":42}"#).unwrap_err();
        assert!(matches!(err, BlockError::Data(_)));
    }

    #[test]
    fn serializes_single_field() {
        let data = BlockData::new("<iframe></iframe>");
        insta::assert_json_snapshot!(data, @r#"
        {
          "html": "<iframe></iframe>"
        }
        "#);
    }

    #[test]
    fn state_load_defaults_to_empty() {
        assert_eq!(BlockState::load(None).html(), "");
        assert_eq!(BlockState::load(Some(BlockData::new("abc"))).html(), "abc");
    }

    #[test]
    fn save_trims_and_replaces() {
        let mut state = BlockState::load(Some(BlockData::new("old")));
        let saved = state.save_from("  <iframe></iframe>\n");
        assert_eq!(saved.html, "<iframe></iframe>");
        assert_eq!(state.html(), "<iframe></iframe>");
    }
}
