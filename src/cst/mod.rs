//! Concrete syntax tree.
//!
//! The AST builder only sees the tree through [`cursor::SyntaxCursor`], so
//! any recognizer that labels its nodes with [`tree::NodeKind`] can feed it.
//! [`crate::parser`] is the recognizer shipped with this crate.

pub mod cursor;
pub mod tree;

#[cfg(test)]
mod tests;
