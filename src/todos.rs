//! Todo-list annotation pass
//!
//! Runs once over the flat token stream, after inline flattening and before
//! the stream reaches a renderer. List items whose visible text starts with
//! a checkbox marker (`"[ ] "` or `"[x] "`) are annotated so the renderer
//! can emit an interactive checkbox instead of the literal marker:
//!
//! - the `list_item_open` token gains `todo = true` and `checked = <bool>`,
//! - the marker prefix is stripped from the item's inline text,
//! - the nearest enclosing `bullet_list_open` gains `has-todos = true`.
//!
//! The pass never inserts or removes tokens and raises no errors; anything
//! that is not a todo item passes through untouched.

use crate::token::{Token, TokenKind};

const UNCHECKED_MARKER: &str = "[ ] ";
const CHECKED_MARKER: &str = "[x] ";
const MARKER_LEN: usize = 4;

fn starts_with_todo_marker(text: &str) -> bool {
    text.starts_with(UNCHECKED_MARKER) || text.starts_with(CHECKED_MARKER)
}

/// A todo item shows up in the stream as the fixed three-token window
/// `list_item_open, paragraph_open, inline` with the marker at the start of
/// the inline text.
fn is_todo_inline_at(tokens: &[Token], i: usize) -> bool {
    tokens[i].kind == TokenKind::Inline
        && tokens[i - 1].kind == TokenKind::ParagraphOpen
        && tokens[i - 2].kind == TokenKind::ListItemOpen
        && starts_with_todo_marker(&tokens[i].content)
}

/// Strip the 4-character marker from the inline token's text and from its
/// first child text token. The flattener coalesces adjacent text children,
/// so the whole marker sits in the first child when one exists; an empty
/// child list means an empty item, which never matches in the first place.
fn strip_marker(token: &mut Token) {
    token.content.drain(..MARKER_LEN);
    if let Some(first) = token.children.first_mut() {
        if first.kind == TokenKind::Text && starts_with_todo_marker(&first.content) {
            first.content.drain(..MARKER_LEN);
        }
    }
}

/// Annotate todo-style list items in place.
///
/// Each index is evaluated once, left to right; a match consumes exactly one
/// `inline` token, so windows cannot overlap. A second run over already
/// annotated output is a no-op because the marker text is gone.
pub fn annotate_todo_items(tokens: &mut [Token]) {
    for i in 2..tokens.len() {
        if !is_todo_inline_at(tokens, i) {
            continue;
        }

        let checked = tokens[i].content.starts_with(CHECKED_MARKER);
        tokens[i - 2].attr_set("todo", true);
        tokens[i - 2].attr_set("checked", checked);

        strip_marker(&mut tokens[i]);

        // Flag the nearest enclosing bullet list, scanning backward from
        // just before the matched list item. A todo item outside any bullet
        // list simply goes unflagged.
        if let Some(container) = tokens[..i - 2]
            .iter()
            .rposition(|t| t.kind == TokenKind::BulletListOpen)
        {
            tokens[container].attr_set("has-todos", true);
        }
    }
}
