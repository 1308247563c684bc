//! Syntax recognizer building the concrete syntax tree.
//!
//! This module transforms a stream of tokens into a labelled
//! [`crate::cst::tree::SyntaxNode`] tree shaped like the lezer-python
//! grammar. It uses a Pratt parser for expressions with operator
//! precedence and handles:
//!
//! - Statement recognition (assignments, functions, control flow)
//! - Indented blocks and single-line bodies
//! - Expression recognition (binary and unary ops, calls, literals)
//!
//! It does not judge meaning: unsupported operators, missing annotations
//! and unknown type names are left in the tree for the AST builder to reject.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
