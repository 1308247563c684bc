/// AST (Abstract Syntax Tree) module
/// Contains the untyped tree built from the concrete syntax tree
///
/// Submodules:
/// - ast: Operators and their typing classes
/// - expressions: The expression sum type
/// - statements: The statement sum type and `if` branches
/// - types: Value types and parameters
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
