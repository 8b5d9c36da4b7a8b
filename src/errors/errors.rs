use std::fmt::Display;

use thiserror::Error;

use crate::{
    ast::types::{Primitive, Type},
    Position,
};

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
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

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidEscapeSequence { .. } => "InvalidEscapeSequence",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::Redefinition { .. } => "Redefinition",
            ErrorImpl::UndefinedSymbol { .. } => "UndefinedSymbol",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::NotAVariable { .. } => "NotAVariable",
            ErrorImpl::NotAnArray { .. } => "NotAnArray",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::InvalidReferenceArgument { .. } => "InvalidReferenceArgument",
            ErrorImpl::MisplacedProcedureCall { .. } => "MisplacedProcedureCall",
            ErrorImpl::InvalidEntryPoint { .. } => "InvalidEntryPoint",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::UnexpectedReturnValue { .. } => "UnexpectedReturnValue",
            ErrorImpl::InvalidDeclaredType { .. } => "InvalidDeclaredType",
            ErrorImpl::InvalidArraySize { .. } => "InvalidArraySize",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InvalidEscapeSequence { sequence } => ErrorTip::Suggestion(format!(
                "Invalid escape sequence `{}`, expected one of \\n \\t \\r \\0 \\\\ \\' \\\" \\xHH",
                sequence
            )),
            ErrorImpl::InvalidCharLiteral { literal } => ErrorTip::Suggestion(format!(
                "Character literal `{}` must hold exactly one character",
                literal
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*)`"))
            }
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::Redefinition { name } => {
                ErrorTip::Suggestion(format!("`{}` is already defined in this scope", name))
            }
            ErrorImpl::UndefinedSymbol { name } => {
                ErrorTip::Suggestion(format!("`{}` is not defined", name))
            }
            ErrorImpl::NotAFunction { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function and cannot be called", name))
            }
            ErrorImpl::NotAVariable { name } => {
                ErrorTip::Suggestion(format!("`{}` is a function, not a variable", name))
            }
            ErrorImpl::NotAnArray { name } => {
                ErrorTip::Suggestion(format!("`{}` is not an array and cannot be indexed", name))
            }
            ErrorImpl::TypeMismatch {
                context,
                expected,
                found,
            } => ErrorTip::Suggestion(format!(
                "Expected type `{}` {}, found `{}`",
                expected, context, found
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                found,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, found
            )),
            ErrorImpl::InvalidReferenceArgument { function, position } => {
                ErrorTip::Suggestion(format!(
                    "Argument {} of `{}` is passed by reference and must be a variable, array element or string literal",
                    position, function
                ))
            }
            ErrorImpl::MisplacedProcedureCall { function } => ErrorTip::Suggestion(format!(
                "`{}` is a procedure and has no value to use",
                function
            )),
            ErrorImpl::InvalidEntryPoint { function } => ErrorTip::Suggestion(format!(
                "Program entry `{}` must take no parameters and be declared `proc`",
                function
            )),
            ErrorImpl::MissingReturnValue { function, expected } => ErrorTip::Suggestion(format!(
                "`{}` must return a value of type `{}`",
                function, expected
            )),
            ErrorImpl::UnexpectedReturnValue { function } => ErrorTip::Suggestion(format!(
                "`{}` is a procedure and cannot return a value",
                function
            )),
            ErrorImpl::InvalidDeclaredType { name } => ErrorTip::Suggestion(format!(
                "`{}` must be declared with `int` or `byte`",
                name
            )),
            ErrorImpl::InvalidArraySize { name, size } => ErrorTip::Suggestion(format!(
                "Array `{}` must have a positive size, found {}",
                name, size
            )),
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

/// Where a type mismatch was found.
#[derive(Debug, Clone, PartialEq)]
pub enum MismatchContext {
    Assignment,
    Argument { function: String, position: usize },
    Return { function: String },
    ArrayIndex { array: String },
    UnaryOperand,
    BinaryOperand,
}

impl Display for MismatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchContext::Assignment => write!(f, "in assignment"),
            MismatchContext::Argument { function, position } => {
                write!(f, "for argument {} of `{}`", position, function)
            }
            MismatchContext::Return { function } => write!(f, "in return from `{}`", function),
            MismatchContext::ArrayIndex { array } => write!(f, "as index of `{}`", array),
            MismatchContext::UnaryOperand => write!(f, "as operand of unary sign"),
            MismatchContext::BinaryOperand => write!(f, "as arithmetic operand"),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid escape sequence: {sequence:?}")]
    InvalidEscapeSequence { sequence: String },
    #[error("invalid character literal: {literal:?}")]
    InvalidCharLiteral { literal: String },
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("{name:?} already defined")]
    Redefinition { name: String },
    #[error("{name:?} not defined")]
    UndefinedSymbol { name: String },
    #[error("{name:?} is not a function")]
    NotAFunction { name: String },
    #[error("{name:?} is not a variable")]
    NotAVariable { name: String },
    #[error("{name:?} is not an array")]
    NotAnArray { name: String },
    #[error("types do not match {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: MismatchContext,
        expected: Type,
        found: Type,
    },
    #[error("{function:?} expects {expected} arguments, received {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {position} of {function:?} must be an l-value")]
    InvalidReferenceArgument { function: String, position: usize },
    #[error("procedure {function:?} used as a value")]
    MisplacedProcedureCall { function: String },
    #[error("invalid entry point {function:?}")]
    InvalidEntryPoint { function: String },
    #[error("{function:?} returns without a value, expected {expected}")]
    MissingReturnValue { function: String, expected: Primitive },
    #[error("procedure {function:?} returns a value")]
    UnexpectedReturnValue { function: String },
    #[error("{name:?} declared with a non-data type")]
    InvalidDeclaredType { name: String },
    #[error("array {name:?} has invalid size {size}")]
    InvalidArraySize { name: String, size: i32 },
}
