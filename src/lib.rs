#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::statements::Stmt,
    builder::builder::build_program,
    cst::cursor::TreeCursor,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{type_checker::type_check, typed_ast::TypedStmt},
};

pub mod ast;
pub mod builder;
pub mod cst;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes, recognizes and builds the untyped AST of one program.
pub fn parse_program(source: &str, file: Option<String>) -> Result<Vec<Stmt>, Error> {
    let tokens = tokenize(source.to_string(), file)?;
    let file = tokens
        .first()
        .map(|token| Rc::clone(&token.span.start.1))
        .unwrap_or_else(|| Rc::new(String::from("shell")));

    let tree = parse(tokens, file)?;
    build_program(&TreeCursor::new(&tree, source))
}

/// Runs the whole front end and returns the annotated program.
pub fn check_program(source: &str, file: Option<String>) -> Result<Vec<TypedStmt>, Error> {
    let program = parse_program(source, file)?;
    type_check(&program)
}

/// Finds the line containing the byte `position`.
///
/// Returns the 1-based line number, the line text and the offset within it.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: TypeMatchError (Expected type `bool`, received `int`)
        -> test.py
           |
         1 | x : bool = 2
           | -----------^
    */

    let position = error.get_position();
    let mut output = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    output.push_str(&format!("-> {}\n", position.1));

    // Errors raised at end of input point past the last line.
    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        output.push_str(&format!("{}\n", error));
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
