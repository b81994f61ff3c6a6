//! Expression error types.
//!
//! ┌ [`ExpressionError`] : text rejected while parsing (never evaluated)
//! └ [`EvaluationError`] : parsed function undefined at a given point

use thiserror::Error;

/// Malformed or disallowed expression text.
///
/// `pos` fields are byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("empty expression")]
    Empty,

    #[error("unknown identifier `{name}` at position {pos}")]
    UnknownIdentifier { name: String, pos: usize },

    #[error("unexpected `{token}` at position {pos}")]
    UnexpectedToken { token: String, pos: usize },

    #[error("invalid number `{literal}` at position {pos}")]
    BadNumber { literal: String, pos: usize },

    #[error("unbalanced parenthesis at position {pos}")]
    UnbalancedParens { pos: usize },

    #[error("function `{name}` at position {pos} takes exactly one argument")]
    WrongArity { name: &'static str, pos: usize },

    #[error("`{name}` cannot be used as the free variable")]
    InvalidVariable { name: String },

    #[error("expression ends unexpectedly")]
    UnexpectedEnd,

    #[error("expression nests deeper than {} levels at position {pos}", super::parser::MAX_DEPTH)]
    TooDeep { pos: usize },
}

/// A function undefined at the point where it was evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("{function}({arg}) is undefined")]
    Domain { function: &'static str, arg: f64 },

    #[error("division by zero at x={x}")]
    DivisionByZero { x: f64 },

    #[error("non-finite value at x={x}: {value}")]
    NonFinite { x: f64, value: f64 },
}
