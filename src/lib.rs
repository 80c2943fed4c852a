//! mdstream — Markdown token-stream tokenizer
//!
//! Turns one Markdown document into a flat, ordered stream of typed tokens
//! for downstream HTML rendering. This crate provides:
//! - A markdown-it based pipeline with HTML passthrough, autolinking,
//!   dollar-delimited math, block images, table of contents, and footnotes
//! - A flat token-stream data model with per-token attribute maps
//! - A todo-list annotation pass that rewrites `- [ ]` / `- [x]` list items
//!   into `todo`/`checked`/`has-todos` attributes for checkbox rendering

pub mod error;
pub mod options;
pub mod pipeline;
pub mod todos;
pub mod token;

// Re-export main types for convenience
pub use error::{TokenizeError, TokenizeResult};
pub use options::TokenizerOptions;
pub use pipeline::MarkdownTokenizer;
pub use todos::annotate_todo_items;
pub use token::{AttrValue, Token, TokenKind};

/// Tokenize one document with the given options.
///
/// Convenience wrapper for hosts that tokenize a single document at a time;
/// reuse a [`MarkdownTokenizer`] when processing many documents with the
/// same options.
pub fn tokenize(options: TokenizerOptions, text: &str) -> Vec<Token> {
    MarkdownTokenizer::with_options(options).tokenize(text)
}

/// Tokenize one document and serialize the stream to JSON.
pub fn tokenize_to_json(options: TokenizerOptions, text: &str) -> TokenizeResult<String> {
    MarkdownTokenizer::with_options(options).tokenize_to_json(text)
}
