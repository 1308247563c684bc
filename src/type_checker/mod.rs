//! Type checking module.
//!
//! Turns the untyped AST into a typed AST while:
//!
//! - Registering every top-level function signature before any body is checked
//! - Resolving variable and function references
//! - Checking operator operands, call arity and argument types
//! - Checking return values and loop or branch conditions
//!
//! The first violation stops the check; no partial output is returned.

pub mod type_checker;
pub mod typed_ast;

#[cfg(test)]
mod tests;
