//! Dollar-delimited math plugin ($...$ and $$...$$)
//!
//! Implements TeX-style math notation:
//! - `$...$` - Inline formula
//! - `$$...$$` - Display (block) formula
//!
//! Registered only when the host enables math; see `TokenizerOptions`.

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

/// Custom AST node for math notation
#[derive(Debug, Clone)]
pub struct MathNode {
    pub formula: String,
    /// `true` for `$$...$$` display math.
    pub display: bool,
}

impl NodeValue for MathNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        if self.display {
            fmt.open("div", &[("class", "math math-display".to_string())]);
            fmt.text(&self.formula);
            fmt.close("div");
        } else {
            fmt.open("span", &[("class", "math math-inline".to_string())]);
            fmt.text(&self.formula);
            fmt.close("span");
        }
    }
}

/// Math scanner - matches $...$ and $$...$$ spans
pub struct MathScanner;

impl InlineRule for MathScanner {
    const MARKER: char = '$';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..];

        if !input.starts_with('$') {
            return None;
        }

        let display = input.starts_with("$$");
        let delimiter = if display { "$$" } else { "$" };
        let start = delimiter.len();

        let end = find_closing(&input[start..], display)?;
        let formula = &input[start..start + end];

        // A formula must carry something besides whitespace. Inline
        // formulas additionally stay on one line and may not start or end
        // with whitespace, so `$ 5 or $ 6` never becomes math.
        if formula.trim().is_empty() {
            return None;
        }
        if !display
            && (formula.contains('\n')
                || formula.starts_with(char::is_whitespace)
                || formula.ends_with(char::is_whitespace))
        {
            return None;
        }

        let node = Node::new(MathNode {
            formula: formula.to_string(),
            display,
        });
        Some((node, start + end + delimiter.len()))
    }
}

/// Find the closing delimiter, skipping `\$` escapes. Returns the offset of
/// the delimiter relative to the start of the formula body.
fn find_closing(body: &str, display: bool) -> Option<usize> {
    if display {
        return body.find("$$");
    }

    let bytes = body.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'$' => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}

/// Add the math plugin to a markdown-it parser
pub fn add_math_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<MathScanner>();
}
