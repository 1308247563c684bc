use crate::Span;

use super::ast::Op;

/// Untyped expression, as produced by the AST builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        value: i64,
        span: Span,
    },
    True {
        span: Span,
    },
    False {
        span: Span,
    },
    None {
        span: Span,
    },
    BinaryOp {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Identifier {
        name: String,
        span: Span,
    },
    /// Calls are by name only; there are no first-class functions.
    Call {
        name: String,
        args: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number { span, .. }
            | Expr::True { span }
            | Expr::False { span }
            | Expr::None { span }
            | Expr::BinaryOp { span, .. }
            | Expr::Identifier { span, .. }
            | Expr::Call { span, .. } => span,
        }
    }
}
