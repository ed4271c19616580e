//! Iframe shape detection.
//!
//! The block only needs to know one thing about its content: is it exactly one
//! top-level `<iframe>` element? Answering that does not require a DOM, only a
//! tokenizer that can find where top-level nodes start and end. [`scan_fragment`]
//! is that tokenizer; [`is_iframe`] is the predicate built on top of it.
//!
//! The scanner is strict where a browser would be lenient: unbalanced tags,
//! self-closing non-void elements and unterminated constructs are errors, and
//! [`is_iframe`] treats every error as "not an iframe".

use miette::{Diagnostic, SourceSpan};
use smol_str::SmolStr;

/// Elements with no content and no end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is opaque text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "script",
    "style",
    "textarea",
    "title",
    "xmp",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
];

/// A node found at the top level of a fragment.
///
/// Only top-level structure is reported; children of elements are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevelNode {
    /// An element, with its lowercased tag name.
    Element(SmolStr),
    /// A run of character data (whitespace included).
    Text,
    /// `<!-- ... -->`
    Comment,
    /// `<!...>` or `<?...>` that is not a comment.
    Declaration,
}

/// Why a fragment could not be scanned.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("unexpected end of input inside {context}")]
    #[diagnostic(code(iframe_block::fragment::eof))]
    UnexpectedEof {
        context: &'static str,
        #[label("starts here")]
        span: SourceSpan,
    },

    #[error("unterminated attribute value")]
    #[diagnostic(code(iframe_block::fragment::attribute))]
    UnterminatedAttribute {
        #[label("quote opened here")]
        span: SourceSpan,
    },

    #[error("`<{tag}/>` cannot self-close, it is not a void element")]
    #[diagnostic(
        code(iframe_block::fragment::self_closing),
        help("write an explicit `</{tag}>` end tag")
    )]
    SelfClosing {
        tag: SmolStr,
        #[label]
        span: SourceSpan,
    },

    #[error("end tag `</{found}>` does not match open element `<{expected}>`")]
    #[diagnostic(code(iframe_block::fragment::mismatched))]
    MismatchedEndTag {
        expected: SmolStr,
        found: SmolStr,
        #[label]
        span: SourceSpan,
    },

    #[error("end tag `</{tag}>` has no open element")]
    #[diagnostic(code(iframe_block::fragment::stray))]
    StrayEndTag {
        tag: SmolStr,
        #[label]
        span: SourceSpan,
    },

    #[error("element `<{tag}>` is never closed")]
    #[diagnostic(code(iframe_block::fragment::unclosed))]
    Unclosed {
        tag: SmolStr,
        #[label("opened here")]
        span: SourceSpan,
    },

    #[error("malformed end tag")]
    #[diagnostic(code(iframe_block::fragment::malformed))]
    MalformedEndTag {
        #[label]
        span: SourceSpan,
    },
}

/// Result of validating the block's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Valid,
    Invalid,
}

impl ValidationState {
    pub fn is_valid(self) -> bool {
        self == ValidationState::Valid
    }
}

/// Validate block content: valid iff it is exactly one top-level iframe.
///
/// Empty (after trimming) content is invalid.
pub fn validate(content: &str) -> ValidationState {
    if is_iframe(content) {
        ValidationState::Valid
    } else {
        ValidationState::Invalid
    }
}

/// Check whether `content` is a single top-level `<iframe>` element.
///
/// Leading and trailing whitespace is ignored. Malformed markup yields `false`.
pub fn is_iframe(content: &str) -> bool {
    let trimmed = content.trim();
    // Cheap reject before scanning.
    if !(trimmed.starts_with('<') && trimmed.ends_with('>')) {
        return false;
    }

    match scan_fragment(trimmed) {
        Ok(nodes) => {
            matches!(nodes.as_slice(), [TopLevelNode::Element(tag)] if tag.as_str() == "iframe")
        }
        Err(err) => {
            tracing::trace!(error = %err, "rejecting malformed fragment");
            false
        }
    }
}

/// Scan `src` as an HTML fragment and return its top-level nodes.
pub fn scan_fragment(src: &str) -> Result<Vec<TopLevelNode>, FragmentError> {
    Scanner::new(src).run()
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Case-insensitive search for an ASCII needle.
fn find_ascii_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    nodes: Vec<TopLevelNode>,
    /// Open elements with the offset of their start tag.
    open: Vec<(SmolStr, usize)>,
    in_text: bool,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            bytes: src.as_bytes(),
            pos: 0,
            nodes: Vec::new(),
            open: Vec::new(),
            in_text: false,
        }
    }

    fn run(mut self) -> Result<Vec<TopLevelNode>, FragmentError> {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.text_byte();
                continue;
            }

            match self.peek(1) {
                Some(b'!') | Some(b'?') => {
                    let node = self.markup_declaration()?;
                    self.push_top_level(node);
                }
                Some(b'/') => self.end_tag()?,
                Some(b) if b.is_ascii_alphabetic() => self.element()?,
                // A lone `<` is character data.
                _ => self.text_byte(),
            }
        }

        self.end_text();
        if let Some((tag, start)) = self.open.pop() {
            return Err(FragmentError::Unclosed {
                tag,
                span: (start..self.bytes.len()).into(),
            });
        }
        Ok(self.nodes)
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn at_top_level(&self) -> bool {
        self.open.is_empty()
    }

    fn text_byte(&mut self) {
        if self.at_top_level() && !self.in_text {
            self.in_text = true;
            self.nodes.push(TopLevelNode::Text);
        }
        self.pos += 1;
    }

    fn end_text(&mut self) {
        self.in_text = false;
    }

    fn push_top_level(&mut self, node: TopLevelNode) {
        self.end_text();
        if self.at_top_level() {
            self.nodes.push(node);
        }
    }

    fn eof(&self, context: &'static str, start: usize) -> FragmentError {
        FragmentError::UnexpectedEof {
            context,
            span: (start..self.bytes.len()).into(),
        }
    }

    /// Consume `<!-- ... -->`, `<!...>` or `<?...>`.
    fn markup_declaration(&mut self) -> Result<TopLevelNode, FragmentError> {
        let start = self.pos;
        if self.bytes[start..].starts_with(b"<!--") {
            let body = start + 4;
            let close = find_ascii_ci(&self.bytes[body..], b"-->")
                .ok_or_else(|| self.eof("comment", start))?;
            self.pos = body + close + 3;
            return Ok(TopLevelNode::Comment);
        }

        let close = self.bytes[start..]
            .iter()
            .position(|&b| b == b'>')
            .ok_or_else(|| self.eof("declaration", start))?;
        self.pos = start + close + 1;
        Ok(TopLevelNode::Declaration)
    }

    fn tag_name(&mut self) -> SmolStr {
        let start = self.pos;
        while self.pos < self.bytes.len() && is_tag_name_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        let name: String = self.bytes[start..self.pos]
            .iter()
            .map(|b| b.to_ascii_lowercase() as char)
            .collect();
        SmolStr::from(name)
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn element(&mut self) -> Result<(), FragmentError> {
        let start = self.pos;
        let (tag, self_closing) = self.start_tag()?;
        self.push_top_level(TopLevelNode::Element(tag.clone()));

        if is_void(&tag) {
            return Ok(());
        }
        if self_closing {
            return Err(FragmentError::SelfClosing {
                tag,
                span: (start..self.pos).into(),
            });
        }
        if is_raw_text(&tag) {
            return self.raw_text(&tag, start);
        }
        self.open.push((tag, start));
        Ok(())
    }

    /// Consume a start tag. Returns the tag name and whether it ended in `/>`.
    fn start_tag(&mut self) -> Result<(SmolStr, bool), FragmentError> {
        let start = self.pos;
        self.pos += 1;
        let tag = self.tag_name();

        loop {
            self.skip_whitespace();
            match self.peek(0) {
                None => return Err(self.eof("start tag", start)),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok((tag, false));
                }
                Some(b'/') if self.peek(1) == Some(b'>') => {
                    self.pos += 2;
                    return Ok((tag, true));
                }
                // Stray slash between attributes.
                Some(b'/') => self.pos += 1,
                Some(_) => self.attribute()?,
            }
        }
    }

    fn attribute(&mut self) -> Result<(), FragmentError> {
        let name_start = self.pos;
        while let Some(b) = self.peek(0) {
            if b.is_ascii_whitespace() || matches!(b, b'/' | b'>' | b'=') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == name_start {
            // `=` with no name; take it as the name.
            self.pos += 1;
        }

        self.skip_whitespace();
        if self.peek(0) != Some(b'=') {
            return Ok(());
        }
        self.pos += 1;
        self.skip_whitespace();

        match self.peek(0) {
            Some(quote @ (b'"' | b'\'')) => {
                let open = self.pos;
                let close = self.bytes[open + 1..]
                    .iter()
                    .position(|&b| b == quote)
                    .ok_or(FragmentError::UnterminatedAttribute {
                        span: (open..self.bytes.len()).into(),
                    })?;
                self.pos = open + 1 + close + 1;
            }
            _ => {
                while let Some(b) = self.peek(0) {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
            }
        }
        Ok(())
    }

    fn end_tag(&mut self) -> Result<(), FragmentError> {
        let start = self.pos;
        self.pos += 2;
        if !self.peek(0).is_some_and(|b| b.is_ascii_alphabetic()) {
            return Err(FragmentError::MalformedEndTag {
                span: (start..self.pos).into(),
            });
        }
        let found = self.tag_name();
        let close = self.bytes[self.pos..]
            .iter()
            .position(|&b| b == b'>')
            .ok_or_else(|| self.eof("end tag", start))?;
        self.pos += close + 1;
        let span: SourceSpan = (start..self.pos).into();

        match self.open.pop() {
            Some((expected, _)) if expected == found => {
                self.end_text();
                Ok(())
            }
            Some((expected, _)) => Err(FragmentError::MismatchedEndTag {
                expected,
                found,
                span,
            }),
            None => Err(FragmentError::StrayEndTag { tag: found, span }),
        }
    }

    /// Skip the body of a raw-text element through its end tag.
    fn raw_text(&mut self, tag: &str, open_start: usize) -> Result<(), FragmentError> {
        let needle = format!("</{tag}");
        let mut search = self.pos;

        loop {
            let Some(rel) = find_ascii_ci(&self.bytes[search..], needle.as_bytes()) else {
                return Err(FragmentError::Unclosed {
                    tag: SmolStr::from(tag),
                    span: (open_start..self.pos).into(),
                });
            };
            let at = search + rel;
            let after = at + needle.len();

            match self.bytes.get(after) {
                Some(&b) if b.is_ascii_whitespace() || b == b'>' || b == b'/' => {
                    let close = self.bytes[after..]
                        .iter()
                        .position(|&b| b == b'>')
                        .ok_or_else(|| self.eof("end tag", at))?;
                    self.pos = after + close + 1;
                    self.end_text();
                    return Ok(());
                }
                None => return Err(self.eof("end tag", at)),
                // `</iframes` and friends are just text.
                Some(_) => search = after,
            }
        }
    }
}
