//! Root finding for equations `f(x) = 0` given as text.
//!
//! ┌ [`expression`]   : restricted-grammar parser and interpreter
//! ├ [`root_finding`] : bisection, Newton-Raphson and secant with full traces
//! ├ [`solver`]       : [`solve`] entry point for callers (e.g. an HTTP layer)
//! ├ [`comparator`]   : [`compare`] several methods on one equation
//! └ [`logging`]      : optional terminal logger for the `log` output
//!
//! ```
//! use eqtrace::{solve, MethodParams, SolveOptions};
//!
//! let res = solve("x^2 - 4", MethodParams::NewtonRaphson { x0: 3.0 }, &SolveOptions::new())?;
//! assert!(res.converged());
//! assert!((res.root.unwrap() - 2.0).abs() < 1e-6);
//! # Ok::<(), eqtrace::SolveError>(())
//! ```

pub mod expression;
pub mod root_finding;
pub mod solver;
pub mod comparator;
pub mod logging;

pub use expression::{EvaluableFunction, EvaluationError, ExpressionError};
pub use root_finding::algorithms::Method;
pub use root_finding::report::{IterationRecord, SolveResult, Summary, Termination, Verdict};
pub use solver::{solve, solve_with, FailureKind, MethodParams, SolveError, SolveOptions};
pub use comparator::{compare, compare_named, ComparisonResult, MethodFailure, MethodOutcome};
