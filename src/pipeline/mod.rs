//! Document tokenizer pipeline
//!
//! Wraps the markdown-it engine, flattens its AST into the crate's token
//! stream, and runs the todo annotation pass over the result.

pub mod flatten;
pub mod plugins;
pub mod tokenizer;

pub use flatten::flatten;
pub use tokenizer::MarkdownTokenizer;
