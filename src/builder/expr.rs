use log::trace;

use crate::{
    ast::{ast::Op, expressions::Expr},
    cst::{cursor::SyntaxCursor, tree::NodeKind},
    errors::errors::{Error, ErrorImpl},
};

use super::builder::{expect_child, expect_kind, expect_sibling, unexpected};

pub fn build_expr<C: SyntaxCursor>(cursor: &C) -> Result<Expr, Error> {
    trace!("building {} {:?}", cursor.kind(), cursor.text());
    let span = cursor.span();

    match cursor.kind() {
        NodeKind::None => Ok(Expr::None { span }),
        NodeKind::Boolean => match cursor.text() {
            "True" => Ok(Expr::True { span }),
            _ => Ok(Expr::False { span }),
        },
        NodeKind::Number => Ok(Expr::Number {
            value: parse_number(cursor, cursor.text())?,
            span,
        }),
        NodeKind::VariableName => Ok(Expr::Identifier {
            name: cursor.text().to_string(),
            span,
        }),
        NodeKind::CallExpression => build_call(cursor),
        NodeKind::UnaryExpression => build_unary(cursor),
        NodeKind::BinaryExpression => build_binary(cursor),
        NodeKind::ParenthesizedExpression => {
            let open = expect_child(cursor, "`(`")?;
            build_expr(&expect_sibling(&open, "expression")?)
        }
        _ => Err(unexpected(cursor, "expression")),
    }
}

fn build_call<C: SyntaxCursor>(cursor: &C) -> Result<Expr, Error> {
    let callee = expect_child(cursor, "function name")?;
    if callee.kind() != NodeKind::VariableName {
        return Err(unexpected(&callee, "function name"));
    }

    let arg_list = expect_sibling(&callee, "argument list")?;
    let args = build_arguments(&arg_list)?;

    Ok(Expr::Call {
        name: callee.text().to_string(),
        args,
        span: cursor.span(),
    })
}

/// Collects the positional arguments of an `ArgList`, dropping the
/// parentheses and commas around them.
fn build_arguments<C: SyntaxCursor>(cursor: &C) -> Result<Vec<Expr>, Error> {
    expect_kind(cursor, NodeKind::ArgList)?;

    let open = expect_child(cursor, "`(`")?;
    expect_kind(&open, NodeKind::OpenParen)?;

    let mut args = vec![];
    let mut current = expect_sibling(&open, "`)`")?;

    while current.kind() != NodeKind::CloseParen {
        args.push(build_expr(&current)?);

        current = expect_sibling(&current, "`)`")?;
        match current.kind() {
            NodeKind::Comma => current = expect_sibling(&current, "argument")?,
            NodeKind::CloseParen => {}
            _ => return Err(unexpected(&current, "`,` or `)`")),
        }
    }

    Ok(args)
}

/// Signed numeric literals are the only unary expressions.
fn build_unary<C: SyntaxCursor>(cursor: &C) -> Result<Expr, Error> {
    let operator = expect_child(cursor, "unary operator")?;
    let sign = operator.text();
    if sign != "+" && sign != "-" {
        return Err(Error::new(
            ErrorImpl::NotUnaryOperator {
                op: sign.to_string(),
            },
            operator.span().start,
        ));
    }

    let operand = expect_sibling(&operator, "number")?;
    if operand.kind() != NodeKind::Number {
        return Err(Error::new(
            ErrorImpl::NotANumber {
                token: operand.text().to_string(),
            },
            operand.span().start,
        ));
    }

    let literal = format!("{}{}", sign, operand.text());
    Ok(Expr::Number {
        value: parse_number(cursor, &literal)?,
        span: cursor.span(),
    })
}

fn build_binary<C: SyntaxCursor>(cursor: &C) -> Result<Expr, Error> {
    let lhs_node = expect_child(cursor, "left operand")?;
    let operator = expect_sibling(&lhs_node, "operator")?;
    let rhs_node = expect_sibling(&operator, "right operand")?;

    let op = Op::from_symbol(operator.text()).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnknownOperator {
                op: operator.text().to_string(),
            },
            operator.span().start,
        )
    })?;

    Ok(Expr::BinaryOp {
        op,
        lhs: Box::new(build_expr(&lhs_node)?),
        rhs: Box::new(build_expr(&rhs_node)?),
        span: cursor.span(),
    })
}

fn parse_number<C: SyntaxCursor>(cursor: &C, literal: &str) -> Result<i64, Error> {
    literal.parse::<i64>().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: literal.to_string(),
            },
            cursor.span().start,
        )
    })
}
