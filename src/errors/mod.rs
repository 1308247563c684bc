//! Error types and error handling for the front end.
//!
//! This module defines the single error type shared by every stage:
//!
//! - Error structures with source position information
//! - Specific error variants for tokenizing, AST building and type checking
//! - Classification into syntax, parse, type and reference errors
//! - Helpful error messages and suggestions

pub mod errors;
