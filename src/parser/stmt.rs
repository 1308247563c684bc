use log::trace;

use crate::{
    cst::tree::{NodeKind, SyntaxNode},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let kind = parser.current_token_kind();
    trace!("statement starting with {}", kind);

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    if kind == TokenKind::Identifier
        && matches!(parser.peek_kind(), TokenKind::Colon | TokenKind::Assignment)
    {
        return parse_assign_stmt(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_line_end()?;

    Ok(SyntaxNode::branch(NodeKind::ExpressionStatement, vec![expr]))
}

/// `name = value` or `name : type = value`.
///
/// Either part may be missing; the AST builder decides what is acceptable.
pub fn parse_assign_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut children = vec![parser.advance_leaf(NodeKind::VariableName)];

    if parser.current_token_kind() == TokenKind::Colon {
        children.push(parse_type_def(parser, NodeKind::Colon)?);
    }

    if parser.current_token_kind() == TokenKind::Assignment {
        children.push(parser.advance_leaf(NodeKind::AssignOp));
        children.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_line_end()?;

    Ok(SyntaxNode::branch(NodeKind::AssignStatement, children))
}

/// A `TypeDef` node: the introducing punctuation followed by the type expression.
fn parse_type_def(parser: &mut Parser, introducer: NodeKind) -> Result<SyntaxNode, Error> {
    let punctuation = parser.advance_leaf(introducer);
    let ty = parse_expr(parser, BindingPower::Default)?;

    Ok(SyntaxNode::branch(NodeKind::TypeDef, vec![punctuation, ty]))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut children = vec![parser.advance_leaf(NodeKind::Keyword)];

    if !parser.current_token_kind().ends_line() {
        children.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_line_end()?;

    Ok(SyntaxNode::branch(NodeKind::ReturnStatement, children))
}

pub fn parse_pass_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let keyword = parser.advance_leaf(NodeKind::Keyword);
    parser.expect_line_end()?;

    Ok(SyntaxNode::branch(NodeKind::PassStatement, vec![keyword]))
}

pub fn parse_function_definition(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let keyword = parser.advance_leaf(NodeKind::Keyword);
    let name = SyntaxNode::leaf(
        NodeKind::VariableName,
        parser.expect(TokenKind::Identifier)?.span,
    );
    let params = parse_param_list(parser)?;

    let mut children = vec![keyword, name, params];

    if parser.current_token_kind() == TokenKind::Arrow {
        children.push(parse_type_def(parser, NodeKind::Arrow)?);
    }

    children.push(parse_body(parser)?);

    Ok(SyntaxNode::branch(NodeKind::FunctionDefinition, children))
}

fn parse_param_list(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let mut children = vec![SyntaxNode::leaf(NodeKind::OpenParen, open.span)];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let name = parser.expect(TokenKind::Identifier)?;
        children.push(SyntaxNode::leaf(NodeKind::VariableName, name.span));

        if parser.current_token_kind() == TokenKind::Colon {
            children.push(parse_type_def(parser, NodeKind::Colon)?);
        }

        match parser.current_token_kind() {
            TokenKind::Comma => children.push(parser.advance_leaf(NodeKind::Comma)),
            TokenKind::CloseParen => {}
            _ => return Err(parser.unexpected()),
        }
    }

    children.push(parser.advance_leaf(NodeKind::CloseParen));

    Ok(SyntaxNode::branch(NodeKind::ParamList, children))
}

/// `: NEWLINE INDENT stmt+ DEDENT`, or `: stmt` on the same line.
///
/// The resulting `Body` node starts with the colon leaf.
pub fn parse_body(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let colon = parser.expect(TokenKind::Colon)?;
    let mut children = vec![SyntaxNode::leaf(NodeKind::Colon, colon.span)];

    if parser.current_token_kind() != TokenKind::Newline {
        children.push(parse_stmt(parser)?);
        return Ok(SyntaxNode::branch(NodeKind::Body, children));
    }

    parser.advance();
    parser.expect(TokenKind::Indent)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::Dedent => {
                parser.advance();
                break;
            }
            TokenKind::EOF => break,
            TokenKind::Newline => {
                parser.advance();
            }
            _ => children.push(parse_stmt(parser)?),
        }
    }

    Ok(SyntaxNode::branch(NodeKind::Body, children))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let keyword = parser.advance_leaf(NodeKind::Keyword);
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_body(parser)?;

    Ok(SyntaxNode::branch(
        NodeKind::WhileStatement,
        vec![keyword, condition, body],
    ))
}

/// `if` branch, any `elif` branches and an optional `else`, as flat children.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut children = vec![parser.advance_leaf(NodeKind::Keyword)];
    children.push(parse_expr(parser, BindingPower::Default)?);
    children.push(parse_body(parser)?);

    while parser.current_token_kind() == TokenKind::Elif {
        children.push(parser.advance_leaf(NodeKind::Keyword));
        children.push(parse_expr(parser, BindingPower::Default)?);
        children.push(parse_body(parser)?);
    }

    if parser.current_token_kind() == TokenKind::Else {
        children.push(parser.advance_leaf(NodeKind::Keyword));
        children.push(parse_body(parser)?);
    }

    Ok(SyntaxNode::branch(NodeKind::IfStatement, children))
}
