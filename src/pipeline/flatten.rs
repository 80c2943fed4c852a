//! Flatten the markdown-it AST into the token-stream data model
//!
//! Block containers become `*_open`/`*_close` token pairs; paragraph and
//! heading content becomes a single `inline` token whose children are the
//! flattened inline sub-tokens. The output is a plain vector so downstream
//! passes can index backward and forward in constant time.

use markdown_it::parser::inline::{Text, TextSpecial};
use markdown_it::plugins::cmark::block::blockquote::Blockquote;
use markdown_it::plugins::cmark::block::code::CodeBlock;
use markdown_it::plugins::cmark::block::fence::CodeFence;
use markdown_it::plugins::cmark::block::heading::ATXHeading;
use markdown_it::plugins::cmark::block::hr::ThematicBreak;
use markdown_it::plugins::cmark::block::lheading::SetextHeader;
use markdown_it::plugins::cmark::block::list::{BulletList, ListItem, OrderedList};
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::plugins::cmark::inline::backticks::CodeInline;
use markdown_it::plugins::cmark::inline::emphasis::{Em, Strong};
use markdown_it::plugins::cmark::inline::image::Image;
use markdown_it::plugins::cmark::inline::link::Link;
use markdown_it::plugins::cmark::inline::newline::{Hardbreak, Softbreak};
use markdown_it::plugins::html::html_block::HtmlBlock;
use markdown_it::plugins::html::html_inline::HtmlInline;
use markdown_it::Node;

use super::plugins::block_image::BlockImageNode;
use super::plugins::footnote::{FootnoteDefNode, FootnoteRefNode};
use super::plugins::math::MathNode;
use super::plugins::toc::{slugify, SlugTracker, TocNode};
use crate::token::{Token, TokenKind};

/// Flatten a parsed document into the token stream.
pub fn flatten(root: &Node) -> Vec<Token> {
    let mut flattener = StreamFlattener::new();
    flattener.walk_blocks(&root.children);
    flattener.tokens
}

struct StreamFlattener {
    tokens: Vec<Token>,
    level: i32,
    slugs: SlugTracker,
}

impl StreamFlattener {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            level: 0,
            slugs: SlugTracker::new(),
        }
    }

    fn push(&mut self, mut token: Token) {
        token.level = self.level;
        self.tokens.push(token);
    }

    fn open(&mut self, kind: TokenKind) -> usize {
        self.push(Token::new(kind));
        self.level += 1;
        self.tokens.len() - 1
    }

    fn close(&mut self, kind: TokenKind) {
        self.level -= 1;
        self.push(Token::new(kind));
    }

    /// Walk a sibling run of block-level nodes. Consecutive inline-level
    /// nodes (as left in tight list items) are wrapped in a synthesized
    /// paragraph, which keeps the stream shape uniform: every list item
    /// reads `list_item_open, paragraph_open, inline, ...`.
    fn walk_blocks(&mut self, children: &[Node]) {
        let mut run_start = None;
        for (i, child) in children.iter().enumerate() {
            if is_inline_node(child) {
                run_start.get_or_insert(i);
                continue;
            }
            if let Some(start) = run_start.take() {
                self.emit_paragraph(&children[start..i]);
            }
            self.walk_block(child);
        }
        if let Some(start) = run_start.take() {
            self.emit_paragraph(&children[start..]);
        }
    }

    fn walk_block(&mut self, node: &Node) {
        if node.cast::<BulletList>().is_some() {
            self.open(TokenKind::BulletListOpen);
            self.walk_blocks(&node.children);
            self.close(TokenKind::BulletListClose);
        } else if node.cast::<OrderedList>().is_some() {
            self.open(TokenKind::OrderedListOpen);
            self.walk_blocks(&node.children);
            self.close(TokenKind::OrderedListClose);
        } else if node.cast::<ListItem>().is_some() {
            self.open(TokenKind::ListItemOpen);
            self.walk_blocks(&node.children);
            self.close(TokenKind::ListItemClose);
        } else if node.cast::<Blockquote>().is_some() {
            self.open(TokenKind::BlockquoteOpen);
            self.walk_blocks(&node.children);
            self.close(TokenKind::BlockquoteClose);
        } else if node.cast::<Paragraph>().is_some() {
            self.emit_paragraph(&node.children);
        } else if let Some(heading) = node.cast::<ATXHeading>() {
            self.emit_heading(node, heading.level);
        } else if let Some(heading) = node.cast::<SetextHeader>() {
            self.emit_heading(node, heading.level);
        } else if let Some(fence) = node.cast::<CodeFence>() {
            let mut token = Token::with_content(TokenKind::Fence, fence.content.clone());
            if !fence.info.is_empty() {
                token.attr_set("info", fence.info.clone());
            }
            self.push(token);
        } else if let Some(code) = node.cast::<CodeBlock>() {
            self.push(Token::with_content(TokenKind::CodeBlock, code.content.clone()));
        } else if node.cast::<ThematicBreak>().is_some() {
            self.push(Token::new(TokenKind::Hr));
        } else if let Some(html) = node.cast::<HtmlBlock>() {
            self.push(Token::with_content(TokenKind::HtmlBlock, html.content.clone()));
        } else if let Some(image) = node.cast::<BlockImageNode>() {
            let mut token = Token::with_content(TokenKind::BlockImage, image.alt.clone());
            token.attr_set("src", image.url.clone());
            if let Some(title) = &image.title {
                token.attr_set("title", title.clone());
            }
            self.push(token);
        } else if node.cast::<TocNode>().is_some() {
            self.push(Token::new(TokenKind::Toc));
        } else if let Some(def) = node.cast::<FootnoteDefNode>() {
            let mut token = Token::with_content(TokenKind::FootnoteDef, def.content.clone());
            token.attr_set("label", def.label.clone());
            self.push(token);
        } else {
            // Unknown block container: degrade by flattening its children.
            self.walk_blocks(&node.children);
        }
    }

    fn emit_paragraph(&mut self, inline_nodes: &[Node]) {
        self.open(TokenKind::ParagraphOpen);
        let inline = build_inline_token(inline_nodes);
        self.push(inline);
        self.close(TokenKind::ParagraphClose);
    }

    fn emit_heading(&mut self, node: &Node, level: u8) {
        let text = plain_text_of(&node.children);
        let slug = self.slugs.unique(&slugify(&text));

        let index = self.open(TokenKind::HeadingOpen);
        self.tokens[index].attr_set("level", level.to_string());
        self.tokens[index].attr_set("id", slug);

        let inline = build_inline_token(&node.children);
        self.push(inline);
        self.close(TokenKind::HeadingClose);
    }
}

/// Inline-level node test, used to spot tight list items whose inline
/// content was not paragraph-wrapped by the block parser.
fn is_inline_node(node: &Node) -> bool {
    node.cast::<Text>().is_some()
        || node.cast::<TextSpecial>().is_some()
        || node.cast::<CodeInline>().is_some()
        || node.cast::<Em>().is_some()
        || node.cast::<Strong>().is_some()
        || node.cast::<Link>().is_some()
        || node.cast::<Image>().is_some()
        || node.cast::<Softbreak>().is_some()
        || node.cast::<Hardbreak>().is_some()
        || node.cast::<HtmlInline>().is_some()
        || node.cast::<MathNode>().is_some()
        || node.cast::<FootnoteRefNode>().is_some()
}

/// Build one `inline` token: children are the flattened inline sub-tokens
/// (a flat run with open/close markers, markdown-it style) and `content` is
/// their concatenated plain text.
fn build_inline_token(inline_nodes: &[Node]) -> Token {
    let mut children = Vec::new();
    for node in inline_nodes {
        walk_inline(node, &mut children, 0);
    }

    let content: String = children.iter().map(|t| t.content.as_str()).collect();
    let mut token = Token::with_content(TokenKind::Inline, content);
    token.children = children;
    token
}

fn push_text(out: &mut Vec<Token>, text: &str, level: i32) {
    // Adjacent text runs collapse into one token, so a leading marker like
    // "[ ] " always sits whole in the first child.
    if let Some(last) = out.last_mut() {
        if last.kind == TokenKind::Text && last.level == level {
            last.content.push_str(text);
            return;
        }
    }
    let mut token = Token::with_content(TokenKind::Text, text);
    token.level = level;
    out.push(token);
}

fn walk_inline(node: &Node, out: &mut Vec<Token>, level: i32) {
    if let Some(text) = node.cast::<Text>() {
        push_text(out, &text.content, level);
    } else if let Some(text) = node.cast::<TextSpecial>() {
        push_text(out, &text.content, level);
    } else if node.cast::<CodeInline>().is_some() {
        let mut token = Token::with_content(TokenKind::CodeInline, plain_text_of(&node.children));
        token.level = level;
        out.push(token);
    } else if node.cast::<Em>().is_some() {
        wrap_inline(node, out, level, TokenKind::EmOpen, TokenKind::EmClose);
    } else if node.cast::<Strong>().is_some() {
        wrap_inline(node, out, level, TokenKind::StrongOpen, TokenKind::StrongClose);
    } else if let Some(link) = node.cast::<Link>() {
        let mut open = Token::new(TokenKind::LinkOpen);
        open.level = level;
        open.attr_set("href", link.url.clone());
        if let Some(title) = &link.title {
            open.attr_set("title", title.clone());
        }
        out.push(open);
        for child in &node.children {
            walk_inline(child, out, level + 1);
        }
        let mut close = Token::new(TokenKind::LinkClose);
        close.level = level;
        out.push(close);
    } else if let Some(image) = node.cast::<Image>() {
        let mut token = Token::with_content(TokenKind::Image, plain_text_of(&node.children));
        token.level = level;
        token.attr_set("src", image.url.clone());
        if let Some(title) = &image.title {
            token.attr_set("title", title.clone());
        }
        out.push(token);
    } else if node.cast::<Softbreak>().is_some() {
        let mut token = Token::with_content(TokenKind::Softbreak, "\n");
        token.level = level;
        out.push(token);
    } else if node.cast::<Hardbreak>().is_some() {
        let mut token = Token::with_content(TokenKind::Hardbreak, "\n");
        token.level = level;
        out.push(token);
    } else if let Some(html) = node.cast::<HtmlInline>() {
        let mut token = Token::with_content(TokenKind::HtmlInline, html.content.clone());
        token.level = level;
        out.push(token);
    } else if let Some(math) = node.cast::<MathNode>() {
        let kind = if math.display {
            TokenKind::MathBlock
        } else {
            TokenKind::MathInline
        };
        let mut token = Token::with_content(kind, math.formula.clone());
        token.level = level;
        out.push(token);
    } else if let Some(reference) = node.cast::<FootnoteRefNode>() {
        let mut token = Token::new(TokenKind::FootnoteRef);
        token.level = level;
        token.attr_set("label", reference.label.clone());
        out.push(token);
    } else {
        // Unknown inline node (autolinked URLs, entities added by future
        // plugins): keep its textual children.
        for child in &node.children {
            walk_inline(child, out, level);
        }
    }
}

fn wrap_inline(node: &Node, out: &mut Vec<Token>, level: i32, open: TokenKind, close: TokenKind) {
    let mut token = Token::new(open);
    token.level = level;
    out.push(token);
    for child in &node.children {
        walk_inline(child, out, level + 1);
    }
    let mut token = Token::new(close);
    token.level = level;
    out.push(token);
}

fn plain_text_of(nodes: &[Node]) -> String {
    fn collect(node: &Node, out: &mut String) {
        if let Some(text) = node.cast::<Text>() {
            out.push_str(&text.content);
        } else if let Some(text) = node.cast::<TextSpecial>() {
            out.push_str(&text.content);
        }
        for child in &node.children {
            collect(child, out);
        }
    }

    let mut out = String::new();
    for node in nodes {
        collect(node, &mut out);
    }
    out
}
