//! Statement rules of the AST builder.
//!
//! Every function takes a cursor focused on the node it builds and only
//! derives new cursors from it, so callers keep their own position.

use log::{debug, trace};

use crate::{
    ast::{
        expressions::Expr,
        statements::{BranchKind, FlowBranch, Stmt},
        types::{Parameter, Type},
    },
    cst::{cursor::SyntaxCursor, tree::NodeKind},
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::expr::build_expr;

/// Builds the top-level statements of a `Script` node.
pub fn build_program<C: SyntaxCursor>(root: &C) -> Result<Vec<Stmt>, Error> {
    expect_kind(root, NodeKind::Script)?;

    let program = root
        .children()
        .map(|stmt| build_stmt(&stmt))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("built AST with {} top-level statements", program.len());
    Ok(program)
}

pub fn build_stmt<C: SyntaxCursor>(cursor: &C) -> Result<Stmt, Error> {
    trace!("building {}", cursor.kind());

    match cursor.kind() {
        NodeKind::ReturnStatement => build_return(cursor),
        NodeKind::AssignStatement => build_assign(cursor),
        NodeKind::ExpressionStatement => {
            let expr = build_expr(&expect_child(cursor, "expression")?)?;
            Ok(Stmt::Expr {
                expr,
                span: cursor.span(),
            })
        }
        NodeKind::FunctionDefinition => build_function_definition(cursor),
        NodeKind::WhileStatement => build_while(cursor),
        NodeKind::PassStatement => Ok(Stmt::Pass {
            span: cursor.span(),
        }),
        NodeKind::IfStatement => build_if(cursor),
        _ => Err(unexpected(cursor, "statement")),
    }
}

fn build_return<C: SyntaxCursor>(cursor: &C) -> Result<Stmt, Error> {
    let keyword = expect_child(cursor, "`return`")?;
    expect_keyword(&keyword, "return")?;

    // A bare `return` gives back None.
    let value = match keyword.next_sibling() {
        Some(value) => build_expr(&value)?,
        None => Expr::None {
            span: keyword.span(),
        },
    };

    Ok(Stmt::Return {
        value,
        span: cursor.span(),
    })
}

fn build_assign<C: SyntaxCursor>(cursor: &C) -> Result<Stmt, Error> {
    let target = expect_child(cursor, "variable name")?;
    expect_kind(&target, NodeKind::VariableName)?;
    let name = target.text().to_string();

    let next = match target.next_sibling() {
        Some(next) => next,
        None => return Err(missing_type(&target)),
    };

    match next.kind() {
        NodeKind::AssignOp => {
            let value = build_expr(&expect_sibling(&next, "assigned value")?)?;
            Ok(Stmt::Assign {
                name,
                value,
                span: cursor.span(),
            })
        }
        NodeKind::TypeDef => {
            let declared_type = build_type_def(&next)?;

            let assign_op = match next.next_sibling() {
                Some(assign_op) if assign_op.kind() == NodeKind::AssignOp => assign_op,
                Some(other) => return Err(unexpected(&other, "`=`")),
                None => {
                    return Err(Error::new(
                        ErrorImpl::MissingInitializer { name },
                        next.span().end,
                    ))
                }
            };
            let value = build_expr(&expect_sibling(&assign_op, "assigned value")?)?;

            Ok(Stmt::Def {
                name,
                declared_type,
                value,
                span: cursor.span(),
            })
        }
        _ => Err(missing_type(&target)),
    }
}

fn build_function_definition<C: SyntaxCursor>(cursor: &C) -> Result<Stmt, Error> {
    let keyword = expect_child(cursor, "`def`")?;
    expect_keyword(&keyword, "def")?;

    let name_node = expect_sibling(&keyword, "function name")?;
    expect_kind(&name_node, NodeKind::VariableName)?;
    let name = name_node.text().to_string();

    let param_list = expect_sibling(&name_node, "parameter list")?;
    let params = build_parameters(&param_list)?;

    let mut next = expect_sibling(&param_list, "function body")?;
    let return_type = if next.kind() == NodeKind::TypeDef {
        let return_type = build_type_def(&next)?;
        next = expect_sibling(&next, "function body")?;
        return_type
    } else {
        Type::None
    };

    let body = build_body(&next)?;
    debug!("built function `{}` with {} parameters", name, params.len());

    Ok(Stmt::FunctionDef {
        name,
        params,
        return_type,
        body,
        span: cursor.span(),
    })
}

fn build_parameters<C: SyntaxCursor>(cursor: &C) -> Result<Vec<Parameter>, Error> {
    expect_kind(cursor, NodeKind::ParamList)?;

    let open = expect_child(cursor, "`(`")?;
    expect_kind(&open, NodeKind::OpenParen)?;

    let mut params = vec![];
    let mut current = expect_sibling(&open, "`)`")?;

    loop {
        match current.kind() {
            NodeKind::CloseParen => break,
            NodeKind::VariableName => {
                let name = current.text().to_string();
                let type_def = match current.next_sibling() {
                    Some(type_def) if type_def.kind() == NodeKind::TypeDef => type_def,
                    _ => return Err(missing_type(&current)),
                };
                let ty = build_type_def(&type_def)?;
                params.push(Parameter { name, ty });

                current = expect_sibling(&type_def, "`)`")?;
                match current.kind() {
                    NodeKind::Comma => current = expect_sibling(&current, "parameter")?,
                    NodeKind::CloseParen => {}
                    _ => return Err(unexpected(&current, "`,` or `)`")),
                }
            }
            _ => return Err(unexpected(&current, "parameter")),
        }
    }

    Ok(params)
}

/// Resolves a `TypeDef` node (`: T` or `-> T`) to its type.
fn build_type_def<C: SyntaxCursor>(cursor: &C) -> Result<Type, Error> {
    expect_kind(cursor, NodeKind::TypeDef)?;

    let punctuation = expect_child(cursor, "type annotation")?;
    build_type(&expect_sibling(&punctuation, "type name")?)
}

fn build_type<C: SyntaxCursor>(cursor: &C) -> Result<Type, Error> {
    let type_name = cursor.text();

    match cursor.kind() {
        NodeKind::VariableName => Type::from_annotation(type_name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    type_: type_name.to_string(),
                },
                cursor.span().start,
            )
        }),
        _ => Err(Error::new(
            ErrorImpl::UnknownType {
                type_: type_name.to_string(),
            },
            cursor.span().start,
        )),
    }
}

/// Builds the statements of a `Body` node, skipping its leading colon.
fn build_body<C: SyntaxCursor>(cursor: &C) -> Result<Vec<Stmt>, Error> {
    expect_kind(cursor, NodeKind::Body)?;

    cursor
        .children()
        .filter(|child| child.kind() != NodeKind::Colon)
        .map(|stmt| build_stmt(&stmt))
        .collect()
}

fn build_while<C: SyntaxCursor>(cursor: &C) -> Result<Stmt, Error> {
    let keyword = expect_child(cursor, "`while`")?;
    expect_keyword(&keyword, "while")?;

    let condition_node = expect_sibling(&keyword, "while condition")?;
    let condition = build_condition(&condition_node, "while")?;
    let body = build_body(&expect_sibling(&condition_node, "while body")?)?;

    Ok(Stmt::While {
        condition,
        body,
        span: cursor.span(),
    })
}

fn build_if<C: SyntaxCursor>(cursor: &C) -> Result<Stmt, Error> {
    let keyword = expect_child(cursor, "`if`")?;
    expect_keyword(&keyword, "if")?;

    let (if_branch, if_body) = build_flow_branch(&keyword, BranchKind::If)?;
    let mut elif_branches = vec![];
    let mut else_body = vec![];

    let mut next = if_body.next_sibling();
    while let Some(keyword) = next {
        match keyword.text() {
            "elif" => {
                let (branch, body) = build_flow_branch(&keyword, BranchKind::Elif)?;
                elif_branches.push(branch);
                next = body.next_sibling();
            }
            "else" => {
                let body = expect_sibling(&keyword, "else body")?;
                else_body = build_body(&body)?;

                if let Some(extra) = body.next_sibling() {
                    return Err(unexpected(&extra, "end of if statement"));
                }
                break;
            }
            found => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedKeyword {
                        expected: String::from("elif` or `else"),
                        found: found.to_string(),
                    },
                    keyword.span().start,
                ))
            }
        }
    }

    Ok(Stmt::Flow {
        if_branch,
        elif_branches,
        else_body,
        span: cursor.span(),
    })
}

/// Builds `keyword condition Body` starting at the keyword.
///
/// Also returns the cursor on the branch body so the caller can continue
/// with the following sibling.
fn build_flow_branch<C: SyntaxCursor>(
    keyword: &C,
    kind: BranchKind,
) -> Result<(FlowBranch, C), Error> {
    let condition_node = expect_sibling(keyword, "condition")?;
    let construct = kind.to_string();
    let condition = build_condition(&condition_node, &construct)?;

    let body_node = expect_sibling(&condition_node, "branch body")?;
    let body = build_body(&body_node)?;

    let span = Span {
        start: keyword.span().start,
        end: body_node.span().end,
    };

    Ok((
        FlowBranch {
            kind,
            condition,
            body,
            span,
        },
        body_node,
    ))
}

fn build_condition<C: SyntaxCursor>(cursor: &C, construct: &str) -> Result<Expr, Error> {
    if !cursor.kind().is_expression() {
        return Err(Error::new(
            ErrorImpl::InvalidCondition {
                construct: construct.to_string(),
                found: cursor.kind().to_string(),
            },
            cursor.span().start,
        ));
    }

    build_expr(cursor)
}

pub(super) fn expect_child<C: SyntaxCursor>(cursor: &C, expected: &str) -> Result<C, Error> {
    cursor.first_child().ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedNode {
                expected: expected.to_string(),
                found: format!("empty {}", cursor.kind()),
            },
            cursor.span().start,
        )
    })
}

pub(super) fn expect_sibling<C: SyntaxCursor>(cursor: &C, expected: &str) -> Result<C, Error> {
    cursor.next_sibling().ok_or_else(|| {
        let parent = cursor
            .parent()
            .map(|parent| parent.kind().to_string())
            .unwrap_or_else(|| String::from("input"));
        Error::new(
            ErrorImpl::UnexpectedNode {
                expected: expected.to_string(),
                found: format!("end of {}", parent),
            },
            cursor.span().end,
        )
    })
}

pub(super) fn expect_kind<C: SyntaxCursor>(cursor: &C, kind: NodeKind) -> Result<(), Error> {
    if cursor.kind() == kind {
        Ok(())
    } else {
        Err(unexpected(cursor, kind.label()))
    }
}

fn expect_keyword<C: SyntaxCursor>(cursor: &C, keyword: &str) -> Result<(), Error> {
    if cursor.text() == keyword {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::UnexpectedKeyword {
                expected: keyword.to_string(),
                found: cursor.text().to_string(),
            },
            cursor.span().start,
        ))
    }
}

pub(super) fn unexpected<C: SyntaxCursor>(cursor: &C, expected: &str) -> Error {
    Error::new(
        ErrorImpl::UnexpectedNode {
            expected: expected.to_string(),
            found: cursor.kind().to_string(),
        },
        cursor.span().start,
    )
}

fn missing_type<C: SyntaxCursor>(name: &C) -> Error {
    Error::new(
        ErrorImpl::MissingTypeAnnotation {
            name: name.text().to_string(),
        },
        name.span().start,
    )
}
