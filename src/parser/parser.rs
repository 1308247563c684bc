//! Syntax recognizer producing the concrete syntax tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt approach with NUD/LED handlers for expressions
//! and a statement table keyed by the leading token.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use log::debug;

use crate::{
    cst::tree::{NodeKind, SyntaxNode},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Appends an `EOF` token when the stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>, file: &Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(file)));
            let span = Span {
                start: end.clone(),
                end,
            };
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span,
            });
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    ///
    /// Past the end this keeps returning the final `EOF` token.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token as a leaf of the given kind.
    pub fn advance_leaf(&mut self, kind: NodeKind) -> SyntaxNode {
        SyntaxNode::leaf(kind, self.advance().span)
    }

    /// Consumes a token of the expected kind or fails on the current one.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: format!("expected {}", expected_kind),
                },
                token.span.start.clone(),
            ));
        }

        Ok(self.advance())
    }

    /// Error for the current token when nothing at this point accepts it.
    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        let token_text = match token.kind {
            TokenKind::Newline => String::from("end of line"),
            TokenKind::Indent => String::from("indent"),
            TokenKind::Dedent => String::from("dedent"),
            _ => token.value.clone(),
        };
        Error::new(
            ErrorImpl::UnexpectedToken { token: token_text },
            token.span.start.clone(),
        )
    }

    /// Consumes the end of a simple statement.
    pub fn expect_line_end(&mut self) -> Result<(), Error> {
        match self.current_token_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::EOF => Ok(()),
            _ => Err(self.unexpected()),
        }
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Binding powers are only consulted in infix position, so a token may
    /// have both a NUD and a LED handler.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the current position in the source file.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Recognizes a token stream as a `Script` node whose children are the
/// top-level statements.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<SyntaxNode, Error> {
    let mut parser = Parser::new(tokens, &file);
    create_token_lookups(&mut parser);

    let mut body = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::EOF => break,
            TokenKind::Newline => {
                parser.advance();
            }
            _ => body.push(parse_stmt(&mut parser)?),
        }
    }

    debug!("recognized {} top-level statements", body.len());

    Ok(SyntaxNode {
        kind: NodeKind::Script,
        span: Span {
            start: Position(0, file),
            end: parser.get_position(),
        },
        children: body,
    })
}
