//! End-to-end tests for todo-list annotation over tokenized documents

use mdstream::{annotate_todo_items, MarkdownTokenizer, TokenKind};

fn find_all(tokens: &[mdstream::Token], kind: TokenKind) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind == kind)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn test_unchecked_item_end_to_end() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- [ ] buy milk");

    let list = &tokens[0];
    assert_eq!(list.kind, TokenKind::BulletListOpen);
    assert_eq!(list.attr_bool("has-todos"), Some(true));

    let items = find_all(&tokens, TokenKind::ListItemOpen);
    assert_eq!(items.len(), 1);
    let item = &tokens[items[0]];
    assert_eq!(item.attr_bool("todo"), Some(true));
    assert_eq!(item.attr_bool("checked"), Some(false));

    let inlines = find_all(&tokens, TokenKind::Inline);
    assert_eq!(tokens[inlines[0]].content, "buy milk");
    assert_eq!(tokens[inlines[0]].children[0].content, "buy milk");
}

#[test]
fn test_checked_item_end_to_end() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- [x] task one");

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::BulletListOpen,
            TokenKind::ListItemOpen,
            TokenKind::ParagraphOpen,
            TokenKind::Inline,
            TokenKind::ParagraphClose,
            TokenKind::ListItemClose,
            TokenKind::BulletListClose,
        ]
    );

    assert_eq!(tokens[0].attr_bool("has-todos"), Some(true));
    assert_eq!(tokens[1].attr_bool("todo"), Some(true));
    assert_eq!(tokens[1].attr_bool("checked"), Some(true));
    assert_eq!(tokens[3].content, "task one");
}

#[test]
fn test_mixed_list() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- [ ] todo one\n- plain item\n- [x] todo two");

    assert_eq!(tokens[0].attr_bool("has-todos"), Some(true));

    let items = find_all(&tokens, TokenKind::ListItemOpen);
    assert_eq!(items.len(), 3);
    assert_eq!(tokens[items[0]].attr_bool("checked"), Some(false));
    assert!(tokens[items[1]].attrs.is_empty());
    assert_eq!(tokens[items[2]].attr_bool("checked"), Some(true));
}

#[test]
fn test_list_without_todos_never_flagged() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- milk\n- eggs\n- bread");

    assert!(tokens[0].attr_get("has-todos").is_none());
    for index in find_all(&tokens, TokenKind::ListItemOpen) {
        assert!(tokens[index].attrs.is_empty());
    }
}

#[test]
fn test_nested_todo_flags_innermost_list_only() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- outer item\n  - [ ] inner todo");

    let lists = find_all(&tokens, TokenKind::BulletListOpen);
    assert_eq!(lists.len(), 2);
    assert!(tokens[lists[0]].attr_get("has-todos").is_none());
    assert_eq!(tokens[lists[1]].attr_bool("has-todos"), Some(true));
}

#[test]
fn test_todo_in_ordered_list_annotates_item_without_container_flag() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("1. [ ] numbered todo");

    assert_eq!(tokens[0].kind, TokenKind::OrderedListOpen);
    assert!(tokens[0].attrs.is_empty());

    let items = find_all(&tokens, TokenKind::ListItemOpen);
    assert_eq!(tokens[items[0]].attr_bool("todo"), Some(true));

    let inlines = find_all(&tokens, TokenKind::Inline);
    assert_eq!(tokens[inlines[0]].content, "numbered todo");
}

#[test]
fn test_marker_in_plain_paragraph_is_untouched() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("[ ] not a todo, just text");

    let inlines = find_all(&tokens, TokenKind::Inline);
    assert_eq!(tokens[inlines[0]].content, "[ ] not a todo, just text");
    assert!(tokens.iter().all(|t| t.attr_get("todo").is_none()));
}

#[test]
fn test_malformed_markers_are_untouched() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- [ ]no space\n- [y] wrong letter\n- [xx] long");

    assert!(tokens[0].attr_get("has-todos").is_none());
    for index in find_all(&tokens, TokenKind::ListItemOpen) {
        assert!(tokens[index].attrs.is_empty());
    }
}

#[test]
fn test_second_pass_is_noop() {
    let tokenizer = MarkdownTokenizer::new();
    let mut tokens = tokenizer.tokenize("- [ ] buy milk\n- [x] call mom");
    let after_first = tokens.clone();

    annotate_todo_items(&mut tokens);
    assert_eq!(tokens, after_first);
}

#[test]
fn test_separate_lists_flagged_independently() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- [ ] first list\n\nbreak\n\n- plain only");

    let lists = find_all(&tokens, TokenKind::BulletListOpen);
    assert_eq!(lists.len(), 2);
    assert_eq!(tokens[lists[0]].attr_bool("has-todos"), Some(true));
    assert!(tokens[lists[1]].attr_get("has-todos").is_none());
}

#[test]
fn test_todo_with_formatting_after_marker() {
    let tokenizer = MarkdownTokenizer::new();
    let tokens = tokenizer.tokenize("- [ ] review **urgent** draft");

    let inlines = find_all(&tokens, TokenKind::Inline);
    let inline = &tokens[inlines[0]];
    assert_eq!(inline.content, "review urgent draft");
    assert_eq!(inline.children[0].content, "review ");
    assert!(inline
        .children
        .iter()
        .any(|t| t.kind == TokenKind::StrongOpen));
}
