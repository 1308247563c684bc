/// AST builder module
/// Turns a concrete syntax tree, seen through a `SyntaxCursor`, into the untyped AST
///
/// Submodules:
/// - builder: Program and statement rules
/// - expr: Expression rules
pub mod builder;
pub mod expr;
