//! Block image plugin
//!
//! A paragraph whose entire content is a single image is promoted to a
//! standalone block-level figure, so renderers can treat `![alt](src)` on a
//! line of its own differently from an image buried in running text.

use markdown_it::parser::core::CoreRule;
use markdown_it::parser::inline::Text;
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::plugins::cmark::inline::image::Image;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

/// Custom AST node for a figure-style image
#[derive(Debug, Clone)]
pub struct BlockImageNode {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

impl NodeValue for BlockImageNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("figure", &[]);
        let mut attrs = vec![
            ("src", self.url.clone()),
            ("alt", self.alt.clone()),
        ];
        if let Some(title) = &self.title {
            attrs.push(("title", title.clone()));
        }
        fmt.self_close("img", &attrs);
        fmt.close("figure");
    }
}

/// Runs over the finished tree and rewrites image-only paragraphs.
pub struct BlockImageRule;

impl CoreRule for BlockImageRule {
    fn run(root: &mut Node, _md: &MarkdownIt) {
        promote_in(root);
    }
}

fn promote_in(node: &mut Node) {
    for child in node.children.iter_mut() {
        promote_in(child);

        if child.cast::<Paragraph>().is_none() || child.children.len() != 1 {
            continue;
        }
        let Some(image) = child.children[0].cast::<Image>() else {
            continue;
        };

        let block = BlockImageNode {
            url: image.url.clone(),
            title: image.title.clone(),
            alt: collect_text(&child.children[0]),
        };
        let srcmap = child.srcmap;
        let mut replacement = Node::new(block);
        replacement.srcmap = srcmap;
        *child = replacement;
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

/// Add the block image plugin to a markdown-it parser
pub fn add_block_image_plugin(md: &mut MarkdownIt) {
    md.add_rule::<BlockImageRule>();
}
