use std::rc::Rc;

use super::{
    cursor::{SyntaxCursor, TreeCursor},
    tree::{NodeKind, SyntaxNode},
};
use crate::{lexer::lexer::tokenize, parser::parser::parse};

fn recognize(source: &str) -> SyntaxNode {
    let tokens = tokenize(source.to_string(), None).unwrap();
    parse(tokens, Rc::new("shell".to_string())).unwrap()
}

#[test]
fn test_cursor_navigation() {
    let source = "x : int = 2\nprint(x)\n";
    let tree = recognize(source);
    let root = TreeCursor::new(&tree, source);

    assert_eq!(root.kind(), NodeKind::Script);
    assert!(root.parent().is_none());
    assert!(root.next_sibling().is_none());

    let assign = root.first_child().unwrap();
    assert_eq!(assign.kind(), NodeKind::AssignStatement);
    assert_eq!(assign.text(), "x : int = 2");

    let name = assign.first_child().unwrap();
    assert_eq!(name.text(), "x");
    let type_def = name.next_sibling().unwrap();
    assert_eq!(type_def.kind(), NodeKind::TypeDef);
    assert_eq!(type_def.first_child().unwrap().next_sibling().unwrap().text(), "int");

    let call = assign.next_sibling().unwrap();
    assert_eq!(call.kind(), NodeKind::ExpressionStatement);
    assert_eq!(call.text(), "print(x)");
    assert!(call.next_sibling().is_none());
}

#[test]
fn test_cursor_moves_leave_caller_in_place() {
    let source = "a = 1\nb = 2\n";
    let tree = recognize(source);
    let root = TreeCursor::new(&tree, source);

    let first = root.first_child().unwrap();
    let _deep = first.first_child().unwrap().next_sibling().unwrap();
    let second = first.next_sibling().unwrap();

    assert_eq!(first.text(), "a = 1");
    assert_eq!(second.text(), "b = 2");
}

#[test]
fn test_cursor_parent_returns_to_enclosing_node() {
    let source = "f(1, 2)";
    let tree = recognize(source);
    let root = TreeCursor::new(&tree, source);

    let call = root.first_child().unwrap().first_child().unwrap();
    let args = call.first_child().unwrap().next_sibling().unwrap();
    assert_eq!(args.kind(), NodeKind::ArgList);

    let back = args.parent().unwrap();
    assert_eq!(back.kind(), NodeKind::CallExpression);
    assert_eq!(back.text(), "f(1, 2)");
    assert_eq!(back.parent().unwrap().parent().unwrap().kind(), NodeKind::Script);
}

#[test]
fn test_children_iterator() {
    let source = "f(1, 2)";
    let tree = recognize(source);
    let root = TreeCursor::new(&tree, source);

    let args = root
        .first_child()
        .unwrap()
        .first_child()
        .unwrap()
        .first_child()
        .unwrap()
        .next_sibling()
        .unwrap();
    let texts: Vec<String> = args.children().map(|child| child.text().to_string()).collect();

    assert_eq!(texts, vec!["(", "1", ",", "2", ")"]);
}

#[test]
fn test_expression_kinds() {
    assert!(NodeKind::BinaryExpression.is_expression());
    assert!(NodeKind::None.is_expression());
    assert!(!NodeKind::Body.is_expression());
    assert!(!NodeKind::Keyword.is_expression());
    assert_eq!(NodeKind::ReturnStatement.to_string(), "ReturnStatement");
}
