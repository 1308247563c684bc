use crate::{
    cst::tree::{NodeKind, SyntaxNode},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<SyntaxNode, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the current context, extend lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let kind = match parser.current_token_kind() {
        TokenKind::Number => NodeKind::Number,
        TokenKind::Identifier => NodeKind::VariableName,
        TokenKind::True | TokenKind::False => NodeKind::Boolean,
        TokenKind::None => NodeKind::None,
        _ => return Err(parser.unexpected()),
    };

    Ok(parser.advance_leaf(kind))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: SyntaxNode,
    bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    let operator = parser.advance_leaf(NodeKind::Operator);
    let right = parse_expr(parser, bp)?;

    Ok(SyntaxNode::branch(
        NodeKind::BinaryExpression,
        vec![left, operator, right],
    ))
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let operator = parser.advance_leaf(NodeKind::Operator);
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(SyntaxNode::branch(
        NodeKind::UnaryExpression,
        vec![operator, operand],
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let open = parser.advance_leaf(NodeKind::OpenParen);
    let expr = parse_expr(parser, BindingPower::Default)?;
    let close = SyntaxNode::leaf(
        NodeKind::CloseParen,
        parser.expect(TokenKind::CloseParen)?.span,
    );

    Ok(SyntaxNode::branch(
        NodeKind::ParenthesizedExpression,
        vec![open, expr, close],
    ))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: SyntaxNode,
    _bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    let mut args = vec![parser.advance_leaf(NodeKind::OpenParen)];

    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        match parser.current_token_kind() {
            TokenKind::Comma => args.push(parser.advance_leaf(NodeKind::Comma)),
            TokenKind::CloseParen => {}
            _ => return Err(parser.unexpected()),
        }
    }

    args.push(parser.advance_leaf(NodeKind::CloseParen));

    Ok(SyntaxNode::branch(
        NodeKind::CallExpression,
        vec![left, SyntaxNode::branch(NodeKind::ArgList, args)],
    ))
}
