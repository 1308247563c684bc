//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals
//! - Operators and punctuation
//! - Indentation and line structure
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.py".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "def return if elif else while pass and or is True False None".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Def);
    assert_eq!(tokens[1].kind, TokenKind::Return);
    assert_eq!(tokens[2].kind, TokenKind::If);
    assert_eq!(tokens[3].kind, TokenKind::Elif);
    assert_eq!(tokens[4].kind, TokenKind::Else);
    assert_eq!(tokens[5].kind, TokenKind::While);
    assert_eq!(tokens[6].kind, TokenKind::Pass);
    assert_eq!(tokens[7].kind, TokenKind::And);
    assert_eq!(tokens[8].kind, TokenKind::Or);
    assert_eq!(tokens[9].kind, TokenKind::Is);
    assert_eq!(tokens[10].kind, TokenKind::True);
    assert_eq!(tokens[11].kind, TokenKind::False);
    assert_eq!(tokens[12].kind, TokenKind::None);
    assert_eq!(tokens[13].kind, TokenKind::Newline);
    assert_eq!(tokens[14].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore int true".to_string();
    let tokens = tokenize(source, Some("test.py".to_string())).unwrap();

    let values: Vec<&str> = tokens[..6].iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "int", "true"]);
    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0 100".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * // % / < <= > >= == != = : , -> ( )"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::SlashSlash,
            TokenKind::Percent,
            TokenKind::Slash,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Assignment,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Arrow,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let tokens = tokenize("x : int = 2".to_string(), Some("test.py".to_string())).unwrap();

    assert_eq!(tokens[2].value, "int");
    assert_eq!(tokens[2].span.start.0, 4);
    assert_eq!(tokens[2].span.end.0, 7);
    assert_eq!(tokens[2].span.start.1.as_str(), "test.py");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x".to_string(), None).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_tokenize_indented_block() {
    let source = "def f():\n    pass\nx = 1\n";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Def,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Pass,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_nested_blocks_close_at_eof() {
    let source = "while True:\n  if x:\n    pass";
    let tokens = kinds(source);

    let dedents = tokens.iter().filter(|kind| **kind == TokenKind::Dedent).count();
    let indents = tokens.iter().filter(|kind| **kind == TokenKind::Indent).count();
    assert_eq!(indents, 2);
    assert_eq!(dedents, 2);
    assert_eq!(tokens[tokens.len() - 1], TokenKind::EOF);
}

#[test]
fn test_blank_and_comment_lines_are_ignored() {
    let source = "x = 1\n\n# a comment\n   \ny = 2 # trailing\n";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_line_breaks_inside_parentheses() {
    let source = "f(1,\n  2)\n";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_inconsistent_dedent() {
    let source = "if x:\n    pass\n  pass\n";
    let error = tokenize(source.to_string(), None).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::InconsistentIndentation);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("x = $".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 4);
}
