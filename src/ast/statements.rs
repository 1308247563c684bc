use std::fmt::Display;

use crate::Span;

use super::{
    expressions::Expr,
    types::{Parameter, Type},
};

/// Untyped statement, as produced by the AST builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name = value`
    Assign {
        name: String,
        value: Expr,
        span: Span,
    },
    /// `name : declared_type = value`
    Def {
        name: String,
        declared_type: Type,
        value: Expr,
        span: Span,
    },
    Expr {
        expr: Expr,
        span: Span,
    },
    FunctionDef {
        name: String,
        params: Vec<Parameter>,
        return_type: Type,
        body: Vec<Stmt>,
        span: Span,
    },
    Return {
        value: Expr,
        span: Span,
    },
    Flow {
        if_branch: FlowBranch,
        elif_branches: Vec<FlowBranch>,
        else_body: Vec<Stmt>,
        span: Span,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
    Pass {
        span: Span,
    },
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::Def { span, .. }
            | Stmt::Expr { span, .. }
            | Stmt::FunctionDef { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Flow { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Pass { span } => span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    If,
    Elif,
}

impl Display for BranchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchKind::If => write!(f, "if"),
            BranchKind::Elif => write!(f, "elif"),
        }
    }
}

/// One guarded arm of an `if` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowBranch {
    pub kind: BranchKind,
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}
