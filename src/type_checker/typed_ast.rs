use crate::{
    ast::{
        ast::Op,
        expressions::Expr,
        statements::{BranchKind, FlowBranch, Stmt},
        types::{Parameter, Type},
    },
    Span,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    Number(i64),
    True,
    False,
    None,
    BinaryOp {
        op: Op,
        lhs: Box<TypedExpr>,
        rhs: Box<TypedExpr>,
    },
    Identifier(String),
    Call {
        name: String,
        args: Vec<TypedExpr>,
    },
}

/// An expression together with the type the checker assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub ty: Type,
    pub span: Span,
}

impl TypedExpr {
    pub fn new(kind: TypedExprKind, ty: Type, span: Span) -> Self {
        TypedExpr { kind, ty, span }
    }

    pub fn get_type(&self) -> Type {
        self.ty
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// Drops the type annotations, giving back the expression the checker was fed.
    pub fn strip(&self) -> Expr {
        let span = self.span.clone();

        match &self.kind {
            TypedExprKind::Number(value) => Expr::Number {
                value: *value,
                span,
            },
            TypedExprKind::True => Expr::True { span },
            TypedExprKind::False => Expr::False { span },
            TypedExprKind::None => Expr::None { span },
            TypedExprKind::BinaryOp { op, lhs, rhs } => Expr::BinaryOp {
                op: *op,
                lhs: Box::new(lhs.strip()),
                rhs: Box::new(rhs.strip()),
                span,
            },
            TypedExprKind::Identifier(name) => Expr::Identifier {
                name: name.clone(),
                span,
            },
            TypedExprKind::Call { name, args } => Expr::Call {
                name: name.clone(),
                args: args.iter().map(TypedExpr::strip).collect(),
                span,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedStmtKind {
    Assign {
        name: String,
        value: TypedExpr,
    },
    Def {
        name: String,
        declared_type: Type,
        value: TypedExpr,
    },
    Expr(TypedExpr),
    FunctionDef {
        name: String,
        params: Vec<Parameter>,
        return_type: Type,
        body: Vec<TypedStmt>,
    },
    Return(TypedExpr),
    Flow {
        if_branch: TypedFlowBranch,
        elif_branches: Vec<TypedFlowBranch>,
        else_body: Vec<TypedStmt>,
    },
    While {
        condition: TypedExpr,
        body: Vec<TypedStmt>,
    },
    Pass,
}

/// A statement annotated by the checker.
///
/// Assignments carry the bound type, expression statements and returns the
/// type of their expression. Every other statement is `none`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedStmt {
    pub kind: TypedStmtKind,
    pub ty: Type,
    pub span: Span,
}

impl TypedStmt {
    pub fn new(kind: TypedStmtKind, ty: Type, span: Span) -> Self {
        TypedStmt { kind, ty, span }
    }

    pub fn get_type(&self) -> Type {
        self.ty
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn strip(&self) -> Stmt {
        let span = self.span.clone();

        match &self.kind {
            TypedStmtKind::Assign { name, value } => Stmt::Assign {
                name: name.clone(),
                value: value.strip(),
                span,
            },
            TypedStmtKind::Def {
                name,
                declared_type,
                value,
            } => Stmt::Def {
                name: name.clone(),
                declared_type: *declared_type,
                value: value.strip(),
                span,
            },
            TypedStmtKind::Expr(expr) => Stmt::Expr {
                expr: expr.strip(),
                span,
            },
            TypedStmtKind::FunctionDef {
                name,
                params,
                return_type,
                body,
            } => Stmt::FunctionDef {
                name: name.clone(),
                params: params.clone(),
                return_type: *return_type,
                body: strip_body(body),
                span,
            },
            TypedStmtKind::Return(value) => Stmt::Return {
                value: value.strip(),
                span,
            },
            TypedStmtKind::Flow {
                if_branch,
                elif_branches,
                else_body,
            } => Stmt::Flow {
                if_branch: if_branch.strip(),
                elif_branches: elif_branches.iter().map(TypedFlowBranch::strip).collect(),
                else_body: strip_body(else_body),
                span,
            },
            TypedStmtKind::While { condition, body } => Stmt::While {
                condition: condition.strip(),
                body: strip_body(body),
                span,
            },
            TypedStmtKind::Pass => Stmt::Pass { span },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedFlowBranch {
    pub kind: BranchKind,
    pub condition: TypedExpr,
    pub body: Vec<TypedStmt>,
    pub span: Span,
}

impl TypedFlowBranch {
    pub fn strip(&self) -> FlowBranch {
        FlowBranch {
            kind: self.kind,
            condition: self.condition.strip(),
            body: strip_body(&self.body),
            span: self.span.clone(),
        }
    }
}

pub fn strip_body(body: &[TypedStmt]) -> Vec<Stmt> {
    body.iter().map(TypedStmt::strip).collect()
}
