//! Markdown tokenizer
//!
//! Owns a configured markdown-it instance. The fixed configuration mirrors
//! the hosting application: raw HTML passes through, bare URLs autolink,
//! and hard line breaks require explicit markup. Math notation is optional
//! (see `TokenizerOptions`); block images, table of contents, footnotes,
//! and the todo annotation pass are always on.

use markdown_it::MarkdownIt;
use std::path::Path;

use super::flatten::flatten;
use super::plugins;
use crate::error::{TokenizeError, TokenizeResult};
use crate::options::TokenizerOptions;
use crate::todos::annotate_todo_items;
use crate::token::Token;

pub struct MarkdownTokenizer {
    md: MarkdownIt,
    options: TokenizerOptions,
}

impl MarkdownTokenizer {
    /// Tokenizer with the default options (math enabled).
    pub fn new() -> Self {
        Self::with_options(TokenizerOptions::default())
    }

    pub fn with_options(options: TokenizerOptions) -> Self {
        let mut md = MarkdownIt::new();

        markdown_it::plugins::cmark::add(&mut md);
        markdown_it::plugins::html::add(&mut md);
        markdown_it::plugins::extra::linkify::add(&mut md);

        if options.math_enabled() {
            plugins::add_math_plugin(&mut md);
        }
        plugins::add_block_image_plugin(&mut md);
        plugins::add_toc_plugin(&mut md);
        plugins::add_footnote_plugin(&mut md);

        Self { md, options }
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Tokenize one complete document: parse, flatten, annotate todos.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let ast = self.md.parse(text);
        let mut tokens = flatten(&ast);
        annotate_todo_items(&mut tokens);
        tokens
    }

    /// Tokenize and serialize the stream to a JSON string.
    pub fn tokenize_to_json(&self, text: &str) -> TokenizeResult<String> {
        Ok(serde_json::to_string(&self.tokenize(text))?)
    }

    /// Read a document from disk and tokenize it, enforcing the configured
    /// size limit.
    pub fn tokenize_file(&self, path: &Path) -> TokenizeResult<Vec<Token>> {
        let content = std::fs::read_to_string(path)?;
        if let Some(max) = self.options.max_file_size {
            if content.len() > max {
                return Err(TokenizeError::FileTooLarge {
                    size: content.len(),
                    max,
                });
            }
        }
        Ok(self.tokenize(&content))
    }
}

impl Default for MarkdownTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use std::io::Write;

    #[test]
    fn test_tokenize_simple_paragraph() {
        let tokenizer = MarkdownTokenizer::new();
        let tokens = tokenizer.tokenize("Just a sentence.");

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::ParagraphOpen,
                TokenKind::Inline,
                TokenKind::ParagraphClose,
            ]
        );
        assert_eq!(tokens[1].content, "Just a sentence.");
    }

    #[test]
    fn test_tokenize_to_json() {
        let tokenizer = MarkdownTokenizer::new();
        let json = tokenizer.tokenize_to_json("- [ ] task").unwrap();

        assert!(json.contains("\"bullet_list_open\""));
        assert!(json.contains("\"has-todos\""));
        let back: Vec<Token> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tokenizer.tokenize("- [ ] task"));
    }

    #[test]
    fn test_tokenize_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Title\n\n- [x] shipped").unwrap();

        let tokenizer = MarkdownTokenizer::new();
        let tokens = tokenizer.tokenize_file(file.path()).unwrap();

        assert!(tokens.iter().any(|t| t.kind == TokenKind::HeadingOpen));
        assert!(tokens
            .iter()
            .any(|t| t.attr_bool("checked") == Some(true)));
    }

    #[test]
    fn test_tokenize_file_size_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", "a".repeat(200)).unwrap();

        let options = TokenizerOptions {
            max_file_size: Some(100),
            ..Default::default()
        };
        let tokenizer = MarkdownTokenizer::with_options(options);

        let err = tokenizer.tokenize_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::FileTooLarge { size: 200, max: 100 }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tokenizer = MarkdownTokenizer::new();
        let err = tokenizer
            .tokenize_file(Path::new("/nonexistent/note.md"))
            .unwrap_err();
        assert!(matches!(err, TokenizeError::Io(_)));
    }
}
