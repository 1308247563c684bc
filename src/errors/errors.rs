use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A fatal front-end error together with the source position it was raised at.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}: {}", .internal_error.kind(), .internal_error)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::InconsistentIndentation => "InconsistentIndentation",
            ErrorImpl::UnexpectedNode { .. } => "UnexpectedNode",
            ErrorImpl::UnexpectedKeyword { .. } => "UnexpectedKeyword",
            ErrorImpl::MissingTypeAnnotation { .. } => "MissingTypeAnnotation",
            ErrorImpl::MissingInitializer { .. } => "MissingInitializer",
            ErrorImpl::UnknownOperator { .. } => "UnknownOperator",
            ErrorImpl::NotUnaryOperator { .. } => "NotUnaryOperator",
            ErrorImpl::NotANumber { .. } => "NotANumber",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidCondition { .. } => "InvalidCondition",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::ConditionTypeMismatch { .. } => "ConditionTypeMismatch",
            ErrorImpl::OperandTypeMismatch { .. } => "OperandTypeMismatch",
            ErrorImpl::UnsupportedIdentityOperands { .. } => "UnsupportedIdentityOperands",
            ErrorImpl::ReassignmentTypeMismatch { .. } => "ReassignmentTypeMismatch",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::NestedFunctionDefinition { .. } => "NestedFunctionDefinition",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::InconsistentIndentation => ErrorTip::Suggestion(String::from(
                "Dedent does not match any outer indentation level",
            )),
            ErrorImpl::UnexpectedNode { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {}, found `{}`",
                expected, found
            )),
            ErrorImpl::UnexpectedKeyword { expected, found } => ErrorTip::Suggestion(format!(
                "Expected keyword `{}`, found `{}`",
                expected, found
            )),
            ErrorImpl::MissingTypeAnnotation { name } => ErrorTip::Suggestion(format!(
                "Add a type annotation, e.g. `{} : int`",
                name
            )),
            ErrorImpl::MissingInitializer { name } => ErrorTip::Suggestion(format!(
                "Variable `{}` must be given a value when it is declared",
                name
            )),
            ErrorImpl::UnknownOperator { op } => {
                ErrorTip::Suggestion(format!("Operator `{}` is not supported", op))
            }
            ErrorImpl::NotUnaryOperator { op } => ErrorTip::Suggestion(format!(
                "Only `+` and `-` may prefix a number, found `{}`",
                op
            )),
            ErrorImpl::NotANumber { token } => ErrorTip::Suggestion(format!(
                "A sign may only be applied to a number literal, found `{}`",
                token
            )),
            ErrorImpl::UnknownType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, expected `int` or `bool`",
                type_
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InvalidCondition { construct, found } => ErrorTip::Suggestion(format!(
                "The `{}` condition must be an expression, found `{}`",
                construct, found
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(
                format!("Expected a `{}` to be returned, received `{}`", expected, received),
            ),
            ErrorImpl::ConditionTypeMismatch { construct, received } => {
                ErrorTip::Suggestion(format!(
                    "The `{}` condition must be `bool`, received `{}`",
                    construct, received
                ))
            }
            ErrorImpl::OperandTypeMismatch { op, lhs, rhs } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                op, lhs, rhs
            )),
            ErrorImpl::UnsupportedIdentityOperands { .. } => {
                ErrorTip::Suggestion(String::from("`is` can only compare `None` values"))
            }
            ErrorImpl::ReassignmentTypeMismatch {
                variable,
                bound,
                received,
            } => ErrorTip::Suggestion(format!(
                "Variable `{}` is `{}` and cannot hold `{}`",
                variable, bound, received
            )),
            ErrorImpl::UnexpectedArguments {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError {
                function,
                index,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Argument {} of `{}` must be `{}`, received `{}`",
                index, function, expected, received
            )),
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::NestedFunctionDefinition { function } => ErrorTip::Suggestion(format!(
                "Move `{}` to the top level of the program",
                function
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` must be assigned before it is used",
                variable
            )),
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// The stage-level class of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Parse,
    Type,
    Reference,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "SyntaxError"),
            ErrorKind::Parse => write!(f, "ParseError"),
            ErrorKind::Type => write!(f, "TypeError"),
            ErrorKind::Reference => write!(f, "ReferenceError"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unindent does not match any outer indentation level")]
    InconsistentIndentation,

    #[error("expected {expected}, found {found:?}")]
    UnexpectedNode { expected: String, found: String },
    #[error("expected keyword {expected:?}, found {found:?}")]
    UnexpectedKeyword { expected: String, found: String },
    #[error("{name:?} doesn't have a type")]
    MissingTypeAnnotation { name: String },
    #[error("the variable {name:?} is declared without a value")]
    MissingInitializer { name: String },
    #[error("unknown or unhandled operator: {op:?}")]
    UnknownOperator { op: String },
    #[error("not a unary operator: {op:?}")]
    NotUnaryOperator { op: String },
    #[error("not a number: {token:?}")]
    NotANumber { token: String },
    #[error("unknown type {type_}")]
    UnknownType { type_: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid {construct} condition: {found:?}")]
    InvalidCondition { construct: String, found: String },

    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("{received} returned but {expected} expected")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("{construct} condition is {received}, not bool")]
    ConditionTypeMismatch { construct: String, received: String },
    #[error("operator {op} cannot be applied to {lhs} and {rhs}")]
    OperandTypeMismatch { op: String, lhs: String, rhs: String },
    #[error("`is` can't be used on {lhs} or {rhs}")]
    UnsupportedIdentityOperands { lhs: String, rhs: String },
    #[error("cannot assign {received} to {variable:?} of type {bound}")]
    ReassignmentTypeMismatch {
        variable: String,
        bound: String,
        received: String,
    },
    #[error("{function:?} expected {expected} arguments but got {received}")]
    UnexpectedArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("got {received} as argument {index} of {function:?}, expected {expected}")]
    ArgumentTypeMatchError {
        function: String,
        index: usize,
        expected: String,
        received: String,
    },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("function {function:?} is defined inside another body")]
    NestedFunctionDefinition { function: String },

    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} not found")]
    FunctionNotDeclared { function: String },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::InconsistentIndentation => ErrorKind::Syntax,

            ErrorImpl::UnexpectedNode { .. }
            | ErrorImpl::UnexpectedKeyword { .. }
            | ErrorImpl::MissingTypeAnnotation { .. }
            | ErrorImpl::MissingInitializer { .. }
            | ErrorImpl::UnknownOperator { .. }
            | ErrorImpl::NotUnaryOperator { .. }
            | ErrorImpl::NotANumber { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InvalidCondition { .. } => ErrorKind::Parse,

            ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::ReturnTypeMismatch { .. }
            | ErrorImpl::ConditionTypeMismatch { .. }
            | ErrorImpl::OperandTypeMismatch { .. }
            | ErrorImpl::UnsupportedIdentityOperands { .. }
            | ErrorImpl::ReassignmentTypeMismatch { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::NestedFunctionDefinition { .. } => ErrorKind::Type,

            ErrorImpl::VariableNotDeclared { .. } | ErrorImpl::FunctionNotDeclared { .. } => {
                ErrorKind::Reference
            }
        }
    }
}
