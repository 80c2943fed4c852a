//! Table-of-contents plugin
//!
//! A paragraph consisting solely of `[[toc]]` (or `${toc}`) becomes a TOC
//! placeholder. After parsing, a core rule walks the document's headings and
//! fills every placeholder with (level, text, slug) entries. The same
//! `slugify` is used for heading anchors in the flattened stream, so TOC
//! entries and heading ids always agree.

use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::parser::core::CoreRule;
use markdown_it::parser::inline::Text;
use markdown_it::plugins::cmark::block::heading::ATXHeading;
use markdown_it::plugins::cmark::block::lheading::SetextHeader;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One table-of-contents entry
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

/// Custom AST node for the TOC placeholder
#[derive(Debug, Clone, Default)]
pub struct TocNode {
    pub entries: Vec<TocEntry>,
}

impl NodeValue for TocNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("nav", &[("class", "table-of-contents".to_string())]);
        fmt.open("ul", &[]);
        for entry in &self.entries {
            fmt.open("li", &[("class", format!("toc-level-{}", entry.level))]);
            fmt.open("a", &[("href", format!("#{}", entry.slug))]);
            fmt.text(&entry.text);
            fmt.close("a");
            fmt.close("li");
        }
        fmt.close("ul");
        fmt.close("nav");
    }
}

fn toc_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Match a line holding only [[toc]] or ${toc}
        Regex::new(r"^[ \t]*(?:\[\[toc\]\]|\$\{toc\})[ \t]*$").unwrap()
    })
}

/// TOC scanner - matches a standalone placeholder line
pub struct TocScanner;

impl BlockRule for TocScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        let line = state.get_line(state.line);
        if toc_marker_regex().is_match(&line) {
            Some(())
        } else {
            None
        }
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        let line = state.get_line(state.line);
        if !toc_marker_regex().is_match(&line) {
            return None;
        }

        let mut node = Node::new(TocNode::default());
        node.srcmap = state.get_map(state.line, state.line);
        Some((node, 1))
    }
}

/// Fills every placeholder with the document's heading entries.
pub struct TocPopulateRule;

impl CoreRule for TocPopulateRule {
    fn run(root: &mut Node, _md: &MarkdownIt) {
        let mut entries = Vec::new();
        let mut slugs = SlugTracker::new();
        collect_headings(root, &mut entries, &mut slugs);

        fill_placeholders(root, &entries);
    }
}

fn collect_headings(node: &Node, entries: &mut Vec<TocEntry>, slugs: &mut SlugTracker) {
    let level = if let Some(heading) = node.cast::<ATXHeading>() {
        Some(heading.level)
    } else {
        node.cast::<SetextHeader>().map(|h| h.level)
    };

    if let Some(level) = level {
        let text = collect_text(node);
        let slug = slugs.unique(&slugify(&text));
        entries.push(TocEntry { level, text, slug });
        // Headings hold inline content only; no nested headings below.
        return;
    }

    for child in &node.children {
        collect_headings(child, entries, slugs);
    }
}

fn fill_placeholders(node: &mut Node, entries: &[TocEntry]) {
    if let Some(toc) = node.cast_mut::<TocNode>() {
        toc.entries = entries.to_vec();
        return;
    }
    for child in node.children.iter_mut() {
        fill_placeholders(child, entries);
    }
}

fn collect_text(node: &Node) -> String {
    let mut out = String::new();
    if let Some(text) = node.cast::<Text>() {
        out.push_str(&text.content);
    }
    for child in &node.children {
        out.push_str(&collect_text(child));
    }
    out
}

/// Lowercase the text and reduce every run of non-alphanumerics to a single
/// hyphen: `"Getting Started!"` becomes `"getting-started"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Deduplicates slugs document-wide by suffixing `-1`, `-2`, ...
pub struct SlugTracker {
    seen: HashMap<String, usize>,
}

impl SlugTracker {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    pub fn unique(&mut self, slug: &str) -> String {
        let count = self.seen.entry(slug.to_string()).or_insert(0);
        let unique = if *count == 0 {
            slug.to_string()
        } else {
            format!("{}-{}", slug, count)
        };
        *count += 1;
        unique
    }
}

impl Default for SlugTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Add the TOC plugin to a markdown-it parser
///
/// The scanner must run before the paragraph rule, which would otherwise
/// swallow the placeholder line as plain text.
pub fn add_toc_plugin(md: &mut MarkdownIt) {
    md.block
        .add_rule::<TocScanner>()
        .before::<markdown_it::plugins::cmark::block::paragraph::ParagraphScanner>();
    md.add_rule::<TocPopulateRule>();
}
