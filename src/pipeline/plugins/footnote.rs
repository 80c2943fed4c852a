//! Footnote plugin
//!
//! Implements the standard markdown footnote subset the pipeline needs:
//! - References: `[^1]`, `[^note]`, `[^custom-reference]`
//! - Definitions: `[^1]: Footnote content here`, with indented
//!   continuation lines
//!
//! Definitions stay where they were written; moving them to the end of the
//! document is a renderer decision, not a tokenizer one.

use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use regex::Regex;
use std::sync::OnceLock;

/// Custom AST node for a footnote reference
#[derive(Debug, Clone)]
pub struct FootnoteRefNode {
    pub label: String,
}

impl NodeValue for FootnoteRefNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("sup", &[("class", "footnote-ref".to_string())]);
        fmt.open("a", &[("href", format!("#fn-{}", self.label))]);
        fmt.text(&format!("[{}]", self.label));
        fmt.close("a");
        fmt.close("sup");
    }
}

/// Custom AST node for a footnote definition
#[derive(Debug, Clone)]
pub struct FootnoteDefNode {
    pub label: String,
    pub content: String,
}

impl NodeValue for FootnoteDefNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open(
            "div",
            &[
                ("class", "footnote-definition".to_string()),
                ("id", format!("fn-{}", self.label)),
            ],
        );
        fmt.text(&self.content);
        fmt.close("div");
    }
}

fn definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Match: [^label]: content
        Regex::new(r"^\[\^([\w-]+)\]:[ \t]*(.*)$").unwrap()
    })
}

/// Footnote definition scanner - matches `[^label]: ...` lines
pub struct FootnoteDefScanner;

impl BlockRule for FootnoteDefScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        let line = state.get_line(state.line);
        if definition_regex().is_match(&line) {
            Some(())
        } else {
            None
        }
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        let start_line = state.line;
        let first_line = state.get_line(start_line);

        let caps = definition_regex().captures(&first_line)?;
        let label = caps.get(1)?.as_str().to_string();
        let mut content = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();

        // Indented lines below the definition belong to it.
        let mut current_line = start_line + 1;
        while current_line < state.line_max {
            let line = state.get_line(current_line);
            if !is_continuation(&line) {
                break;
            }
            if !content.is_empty() {
                content.push(' ');
            }
            content.push_str(line.trim_start());
            current_line += 1;
        }

        let mut node = Node::new(FootnoteDefNode { label, content });
        node.srcmap = state.get_map(start_line, current_line - 1);
        Some((node, current_line - start_line))
    }
}

/// Continuation lines use standard markdown indentation: four spaces or a
/// tab.
fn is_continuation(line: &str) -> bool {
    (line.starts_with("    ") || line.starts_with('\t')) && !line.trim().is_empty()
}

/// Footnote reference scanner - matches inline `[^label]`
pub struct FootnoteRefScanner;

impl InlineRule for FootnoteRefScanner {
    const MARKER: char = '[';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..];

        if !input.starts_with("[^") {
            return None;
        }

        let end = input.find(']')?;
        let label = &input[2..end];
        if label.is_empty()
            || !label.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return None;
        }

        let node = Node::new(FootnoteRefNode {
            label: label.to_string(),
        });
        Some((node, end + 1))
    }
}

/// Add the footnote plugin to a markdown-it parser
///
/// The definition scanner must run before the link reference rule: a
/// definition with a single-word body, `[^1]: Source.`, is also a valid
/// link reference definition (label `^1`, destination `Source.`), and
/// whichever rule runs first consumes the line.
pub fn add_footnote_plugin(md: &mut MarkdownIt) {
    md.block
        .add_rule::<FootnoteDefScanner>()
        .before::<markdown_it::plugins::cmark::block::reference::ReferenceScanner>();
    md.inline.add_rule::<FootnoteRefScanner>();
}
