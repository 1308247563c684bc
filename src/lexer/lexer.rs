use std::rc::Rc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Every pattern is anchored; order matters where one spelling prefixes another.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\r?\\n").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^[ \\t\\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^#[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: open_paren_handler },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: close_paren_handler },
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
        RegexPattern { regex: Regex::new("^//").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashSlash, "//") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
    /// Open indentation levels, innermost last. Always starts with 0.
    indent_stack: Vec<usize>,
    /// Parenthesis nesting; line breaks inside parentheses are insignificant.
    depth: usize,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
            indent_stack: vec![0],
            depth: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// The span of the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn push_layout(&mut self, kind: TokenKind) {
        let span = self.span_of(0);
        self.push(MK_TOKEN!(kind, String::new(), span));
    }

    /// Emits a logical line break unless the previous token already ended a line.
    fn push_newline(&mut self) {
        match self.tokens.last() {
            Some(token) if token.kind != TokenKind::Newline => {
                self.push_layout(TokenKind::Newline)
            }
            _ => {}
        }
    }

    /// Measures the indentation of the line starting at the cursor, skipping
    /// blank and comment-only lines, and emits `Indent`/`Dedent` tokens.
    fn read_indentation(&mut self) -> Result<(), Error> {
        loop {
            let width = self
                .remainder()
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .count();
            let rest = &self.remainder()[width..];

            if rest.is_empty() {
                self.advance_n(width);
                return Ok(());
            }

            if rest.starts_with('\n') || rest.starts_with('\r') || rest.starts_with('#') {
                let line_end = match self.remainder().find('\n') {
                    Some(index) => index + 1,
                    None => self.remainder().len(),
                };
                self.advance_n(line_end);
                continue;
            }

            self.advance_n(width);
            let current = self.indent_stack.last().copied().unwrap_or(0);

            if width > current {
                self.indent_stack.push(width);
                self.push_layout(TokenKind::Indent);
            } else {
                while width < self.indent_stack.last().copied().unwrap_or(0) {
                    self.indent_stack.pop();
                    self.push_layout(TokenKind::Dedent);
                }

                if width != self.indent_stack.last().copied().unwrap_or(0) {
                    return Err(Error::new(ErrorImpl::InconsistentIndentation, self.position()));
                }
            }

            return Ok(());
        }
    }
}

fn newline_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map(|m| m.end()).unwrap_or(1);

    if lexer.depth > 0 {
        lexer.advance_n(matched);
        return Ok(());
    }

    lexer.push_newline();
    lexer.advance_n(matched);
    lexer.read_indentation()
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map(|m| m.end()).unwrap_or(0);
    lexer.advance_n(matched);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = match regex.find(lexer.remainder()) {
        Some(m) => m.as_str().to_string(),
        None => return Err(Error::new(ErrorImpl::UnrecognisedToken { token: lexer.at().to_string() }, lexer.position())),
    };

    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = match regex.find(lexer.remainder()) {
        Some(m) => m.as_str().to_string(),
        None => return Err(Error::new(ErrorImpl::UnrecognisedToken { token: lexer.at().to_string() }, lexer.position())),
    };

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
    Ok(())
}

fn open_paren_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let span = lexer.span_of(1);
    lexer.push(MK_TOKEN!(TokenKind::OpenParen, String::from("("), span));
    lexer.advance_n(1);
    lexer.depth += 1;
    Ok(())
}

fn close_paren_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let span = lexer.span_of(1);
    lexer.push(MK_TOKEN!(TokenKind::CloseParen, String::from(")"), span));
    lexer.advance_n(1);
    lexer.depth = lexer.depth.saturating_sub(1);
    Ok(())
}

/// Splits `source` into tokens, ending with layout tokens that close every
/// open line and block, then `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    lex.read_indentation()?;

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    lex.position(),
                ))
            }
        }
    }

    lex.push_newline();
    while lex.indent_stack.len() > 1 {
        lex.indent_stack.pop();
        lex.push_layout(TokenKind::Dedent);
    }
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), lex.span_of(0)));

    debug!("tokenized {} into {} tokens", lex.file, lex.tokens.len());
    Ok(lex.tokens)
}
