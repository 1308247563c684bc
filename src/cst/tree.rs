use std::fmt::Display;

use crate::{Position, Span};

/// Grammar-rule labels of the concrete syntax tree.
///
/// The names follow the lezer-python grammar so that trees produced by other
/// recognizers map onto the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Script,

    // Statements
    ReturnStatement,
    AssignStatement,
    ExpressionStatement,
    FunctionDefinition,
    WhileStatement,
    PassStatement,
    IfStatement,

    // Structure
    Body,
    ParamList,
    ArgList,
    TypeDef,
    AssignOp,

    // Expressions
    VariableName,
    Number,
    Boolean,
    None,
    CallExpression,
    UnaryExpression,
    BinaryExpression,
    ParenthesizedExpression,

    // Token leaves
    Keyword,
    Operator,
    OpenParen,
    CloseParen,
    Comma,
    Colon,
    Arrow,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Script => "Script",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::AssignStatement => "AssignStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::FunctionDefinition => "FunctionDefinition",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::PassStatement => "PassStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::Body => "Body",
            NodeKind::ParamList => "ParamList",
            NodeKind::ArgList => "ArgList",
            NodeKind::TypeDef => "TypeDef",
            NodeKind::AssignOp => "AssignOp",
            NodeKind::VariableName => "VariableName",
            NodeKind::Number => "Number",
            NodeKind::Boolean => "Boolean",
            NodeKind::None => "None",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::ParenthesizedExpression => "ParenthesizedExpression",
            NodeKind::Keyword => "Keyword",
            NodeKind::Operator => "Operator",
            NodeKind::OpenParen => "(",
            NodeKind::CloseParen => ")",
            NodeKind::Comma => ",",
            NodeKind::Colon => ":",
            NodeKind::Arrow => "->",
        }
    }

    /// Whether nodes of this kind denote an expression.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::VariableName
                | NodeKind::Number
                | NodeKind::Boolean
                | NodeKind::None
                | NodeKind::CallExpression
                | NodeKind::UnaryExpression
                | NodeKind::BinaryExpression
                | NodeKind::ParenthesizedExpression
        )
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A labelled node of the concrete syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn leaf(kind: NodeKind, span: Span) -> Self {
        SyntaxNode {
            kind,
            span,
            children: vec![],
        }
    }

    /// Creates an interior node spanning its first to its last child.
    pub fn branch(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
        let start = children
            .first()
            .map(|child| child.span.start.clone())
            .unwrap_or_else(Position::null);
        let end = children
            .last()
            .map(|child| child.span.end.clone())
            .unwrap_or_else(|| start.clone());

        SyntaxNode {
            kind,
            span: Span { start, end },
            children,
        }
    }
}
