//! Caller-facing entry point.
//!
//! [`solve`] parses an equation, dispatches to the requested method and
//! returns the full [`SolveResult`]. Failures are folded into [`SolveError`],
//! whose [`SolveError::kind`] is what a transport layer maps onto its own
//! error representation.

use std::str::FromStr;

use log::info;
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

use crate::expression::{EvaluableFunction, EvaluationError, ExpressionError};
use crate::root_finding::algorithms::Method;
use crate::root_finding::bisection::{bisection, BisectionCfg, BisectionError};
use crate::root_finding::config::{impl_common_cfg, positive_threshold, CommonCfg};
use crate::root_finding::errors::RootFindingError;
use crate::root_finding::newton::{newton, NewtonCfg, NewtonError, DEFAULT_DERIVATIVE_FLOOR};
use crate::root_finding::report::SolveResult;
use crate::root_finding::secant::{secant, SecantCfg, SecantError, DEFAULT_DENOMINATOR_FLOOR};


/// Method selection plus its method-specific parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "method", rename_all = "kebab-case"))]
pub enum MethodParams {
    Bisection     { a: f64, b: f64 },
    NewtonRaphson { x0: f64 },
    Secant        { x0: f64, x1: f64 },
}

impl MethodParams {
    pub fn method(&self) -> Method {
        match self {
            MethodParams::Bisection { .. }     => Method::Bisection,
            MethodParams::NewtonRaphson { .. } => Method::NewtonRaphson,
            MethodParams::Secant { .. }        => Method::Secant,
        }
    }

    /// Builds parameters from a method name and a by-name lookup of floats,
    /// e.g. fields of a decoded request.
    ///
    /// # Errors
    /// ┌ [`SolveError::UnknownMethod`]    - `method` names no supported method
    /// └ [`SolveError::MissingParameter`] - `lookup` has no value for a required name
    pub fn from_named<L>(method: &str, lookup: L) -> Result<Self, SolveError>
    where L: Fn(&str) -> Option<f64> {
        let method = Method::from_str(method.trim())
            .map_err(|_| SolveError::UnknownMethod { name: method.to_string() })?;
        let get = |name: &'static str| {
            lookup(name).ok_or(SolveError::MissingParameter { method, name })
        };

        Ok(match method {
            Method::Bisection     => MethodParams::Bisection { a: get("a")?, b: get("b")? },
            Method::NewtonRaphson => MethodParams::NewtonRaphson { x0: get("x0")? },
            Method::Secant        => MethodParams::Secant { x0: get("x0")?, x1: get("x1")? },
        })
    }
}


/// Options shared by every method of a call.
///
/// [`SolveOptions`]
/// ├ `common`            : tolerance, `max_iter`, zero guard
/// ├ `derivative_floor`  : newton only
/// └ `denominator_floor` : secant only
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolveOptions {
    common:            CommonCfg,
    derivative_floor:  f64,
    denominator_floor: f64,
}

impl SolveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common            : CommonCfg::new(),
            derivative_floor  : DEFAULT_DERIVATIVE_FLOOR,
            denominator_floor : DEFAULT_DENOMINATOR_FLOOR,
        }
    }

    pub fn set_derivative_floor(mut self, v: f64) -> Result<Self, RootFindingError> {
        self.derivative_floor = positive_threshold("derivative_floor", v)?;
        Ok(self)
    }
    pub fn set_denominator_floor(mut self, v: f64) -> Result<Self, RootFindingError> {
        self.denominator_floor = positive_threshold("denominator_floor", v)?;
        Ok(self)
    }

    pub fn derivative_floor(&self)  -> f64 { self.derivative_floor }
    pub fn denominator_floor(&self) -> f64 { self.denominator_floor }

    pub fn bisection_cfg(&self) -> BisectionCfg {
        BisectionCfg::from_common(self.common)
    }
    pub fn newton_cfg(&self) -> NewtonCfg {
        NewtonCfg::from_common(self.common, self.derivative_floor)
    }
    pub fn secant_cfg(&self) -> SecantCfg {
        SecantCfg::from_common(self.common, self.denominator_floor)
    }
}
impl Default for SolveOptions {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(SolveOptions);


/// Coarse failure category, stable across error messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    InvalidExpression,
    InvalidBracket,
    Evaluation,
    InvalidConfig,
    InvalidGuess,
    UnknownMethod,
    MissingParameter,
}


/// Everything [`solve`] can fail with before a run produces a trace.
///
/// Non-convergence is not in here; it is a [`SolveResult`] outcome.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid expression: {0}")]
    InvalidExpression(#[from] ExpressionError),

    #[error("invalid bracket: {0}")]
    InvalidBracket(BisectionError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    InvalidConfig(#[from] RootFindingError),

    #[error("{method}: {reason}")]
    InvalidGuess { method: Method, reason: String },

    #[error("unknown method `{name}`: expected bisection, newton-raphson or secant")]
    UnknownMethod { name: String },

    #[error("{method} requires parameter `{name}`")]
    MissingParameter { method: Method, name: &'static str },
}

impl SolveError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SolveError::InvalidExpression(_)     => FailureKind::InvalidExpression,
            SolveError::InvalidBracket(_)        => FailureKind::InvalidBracket,
            SolveError::Evaluation(_)            => FailureKind::Evaluation,
            SolveError::InvalidConfig(_)         => FailureKind::InvalidConfig,
            SolveError::InvalidGuess { .. }      => FailureKind::InvalidGuess,
            SolveError::UnknownMethod { .. }     => FailureKind::UnknownMethod,
            SolveError::MissingParameter { .. }  => FailureKind::MissingParameter,
        }
    }
}

impl From<BisectionError> for SolveError {
    fn from(e: BisectionError) -> Self {
        match e {
            BisectionError::RootFinding(e) => SolveError::InvalidConfig(e),
            BisectionError::Endpoint(e)    => SolveError::Evaluation(e),
            other                          => SolveError::InvalidBracket(other),
        }
    }
}
impl From<NewtonError> for SolveError {
    fn from(e: NewtonError) -> Self {
        match e {
            NewtonError::RootFinding(e) => SolveError::InvalidConfig(e),
            other @ NewtonError::InvalidGuess { .. } => SolveError::InvalidGuess {
                method: Method::NewtonRaphson, reason: other.to_string()
            },
        }
    }
}
impl From<SecantError> for SolveError {
    fn from(e: SecantError) -> Self {
        match e {
            SecantError::RootFinding(e) => SolveError::InvalidConfig(e),
            other @ SecantError::InvalidGuess { .. } => SolveError::InvalidGuess {
                method: Method::Secant, reason: other.to_string()
            },
        }
    }
}


/// Parses `equation` (a function of `x`) and runs one method on it.
///
/// # Errors
/// [`SolveError`]; the expression is rejected before any evaluation.
pub fn solve(
    equation: &str,
    params: MethodParams,
    options: &SolveOptions
) -> Result<SolveResult, SolveError> {
    let func = EvaluableFunction::parse(equation)?;
    solve_with(&func, params, options)
}


/// Runs one method on an already parsed function.
pub fn solve_with(
    func: &EvaluableFunction,
    params: MethodParams,
    options: &SolveOptions
) -> Result<SolveResult, SolveError> {
    info!("solving {func} with {} ({params:?})", params.method());
    let f = |x: f64| func.evaluate(x);

    let result = match params {
        MethodParams::Bisection { a, b } => bisection(f, a, b, options.bisection_cfg())?,
        MethodParams::NewtonRaphson { x0 } => {
            newton(f, None::<fn(f64) -> Result<f64, EvaluationError>>, x0, options.newton_cfg())?
        }
        MethodParams::Secant { x0, x1 } => secant(f, x0, x1, options.secant_cfg())?,
    };

    Ok(result)
}
