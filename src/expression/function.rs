use std::fmt;
use std::str::FromStr;

use log::debug;

use super::ast::{Expr, Func};
use super::errors::{EvaluationError, ExpressionError};
use super::parser::{parse_expression, CONSTANTS};

/// Name of the free variable when none is given.
pub const DEFAULT_VARIABLE: &str = "x";

/// A validated real-valued function of one variable.
///
/// Owns its parsed tree, so it is cheap to share across threads and every
/// call with the same input yields the same output.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluableFunction {
    source: String,
    variable: String,
    expr: Expr,
}

impl EvaluableFunction {
    /// Parses `text` as a function of `x`.
    ///
    /// # Errors
    /// Any [`ExpressionError`]; the text is never evaluated before it has
    /// been fully validated.
    pub fn parse(text: &str) -> Result<Self, ExpressionError> {
        Self::parse_with_variable(text, DEFAULT_VARIABLE)
    }

    /// Parses `text` as a function of `variable`.
    ///
    /// `variable` must be an identifier that does not shadow a constant or a
    /// whitelisted function.
    pub fn parse_with_variable(text: &str, variable: &str) -> Result<Self, ExpressionError> {
        let mut chars = variable.chars();
        let is_identifier = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_');
        let is_reserved = Func::from_str(variable).is_ok()
            || CONSTANTS.iter().any(|(name, _)| *name == variable);
        if !is_identifier || is_reserved {
            return Err(ExpressionError::InvalidVariable { name: variable.to_string() });
        }

        let expr = parse_expression(text, variable)?;
        debug!("parsed `{}` into {} nodes", text.trim(), expr.size());
        Ok(Self {
            source: text.trim().to_string(),
            variable: variable.to_string(),
            expr,
        })
    }

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    /// [`EvaluationError`] when the function is undefined at `x` (e.g. `log`
    /// of a non-positive number, division by zero, overflow).
    #[inline]
    pub fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        self.expr.eval(x)
    }

    /// Trimmed source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl FromStr for EvaluableFunction {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EvaluableFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f({}) = {}", self.variable, self.source)
    }
}
