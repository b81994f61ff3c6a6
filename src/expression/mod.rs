//! Restricted-grammar expressions over a single free variable.
//!
//! Text is tokenized ([`tokenizer`]), turned into an [`ast::Expr`] by a
//! shunting-yard pass ([`parser`]), then interpreted directly. Nothing outside
//! numbers, the free variable, `+ - * / ^`, parentheses and the whitelisted
//! functions/constants survives parsing.

pub mod errors;
pub mod ast;
pub mod parser;
pub(crate) mod tokenizer;
mod function;

pub use errors::{EvaluationError, ExpressionError};
pub use function::{EvaluableFunction, DEFAULT_VARIABLE};
