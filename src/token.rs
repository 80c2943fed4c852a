//! Flat token-stream data model
//!
//! The tokenizer flattens the markdown-it AST into an ordered `Vec<Token>`
//! whose vocabulary follows the classic markdown-it token names
//! (`bullet_list_open`, `paragraph_open`, `inline`, ...). Downstream passes
//! and renderers index into this sequence directly, so it is a plain vector
//! with constant-time backward access rather than a linked structure.

use serde::{Deserialize, Serialize};

/// Token type tag.
///
/// Serialized in `snake_case`, so the JSON form of a stream uses the same
/// names a markdown-it consumer would expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    BulletListOpen,
    BulletListClose,
    OrderedListOpen,
    OrderedListClose,
    ListItemOpen,
    ListItemClose,
    ParagraphOpen,
    ParagraphClose,
    HeadingOpen,
    HeadingClose,
    BlockquoteOpen,
    BlockquoteClose,
    /// Container for the rendered content of a paragraph or heading. The
    /// only kind whose `children` are populated.
    Inline,
    Text,
    CodeInline,
    EmOpen,
    EmClose,
    StrongOpen,
    StrongClose,
    LinkOpen,
    LinkClose,
    Image,
    Softbreak,
    Hardbreak,
    Fence,
    CodeBlock,
    Hr,
    HtmlBlock,
    HtmlInline,
    MathInline,
    MathBlock,
    BlockImage,
    Toc,
    FootnoteRef,
    FootnoteDef,
}

/// Attribute value: boolean flags (`todo`, `checked`, `has-todos`) or plain
/// strings (`href`, `id`, `level`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Str(String),
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

/// One node in the flat output sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Nesting depth: incremented after each `*_open`, decremented before
    /// the matching `*_close`.
    pub level: i32,
    /// Plain-text content for leaf tokens; for `inline` tokens, the
    /// concatenated text of `children`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Populated for `inline` tokens only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,
    /// Insertion-ordered attribute map.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, AttrValue)>,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            level: 0,
            content: String::new(),
            children: Vec::new(),
            attrs: Vec::new(),
        }
    }

    pub fn with_content(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::new(kind)
        }
    }

    /// Set an attribute, overwriting an existing value in place so the
    /// original insertion order is preserved.
    pub fn attr_set(&mut self, name: &str, value: impl Into<AttrValue>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    pub fn attr_get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Convenience accessor for boolean attributes; `None` when the
    /// attribute is absent or holds a string.
    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        match self.attr_get(name) {
            Some(AttrValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }
}
