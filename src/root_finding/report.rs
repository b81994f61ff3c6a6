//! Defines the [`SolveResult`] struct returned by all
//! root-finding algorithms, and the views derived from it.

use std::fmt;
use std::time::Duration;

use tabled::builder::Builder;
use tabled::settings::Style;

use super::algorithms::Method;


/// Reasons a root-finding run may terminate.
///
/// Only [`Termination::ExactRoot`] and [`Termination::ToleranceReached`]
/// count as convergence. Every other variant is a normal, reportable outcome
/// rather than an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Termination {
    /// f evaluated to exactly zero.
    ExactRoot,
    /// absolute error dropped below tolerance.
    ToleranceReached,
    /// `max_iter` iterates recorded without meeting tolerance.
    IterationLimit,
    /// |f'(x)| below the derivative floor (newton).
    DerivativeNearZero { x: f64, derivative: f64 },
    /// |f(x1) - f(x0)| below the denominator floor (secant).
    DenominatorNearZero { x0: f64, x1: f64 },
    /// the update from `x` produced a non-finite value.
    NonFiniteStep { x: f64 },
    /// f (or its difference quotient) undefined at `x`.
    EvaluationFailed { x: f64, reason: String },
}

impl Termination {
    pub fn is_converged(&self) -> bool {
        matches!(self, Termination::ExactRoot | Termination::ToleranceReached)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::ExactRoot          => write!(f, "exact root found"),
            Termination::ToleranceReached   => write!(f, "tolerance reached"),
            Termination::IterationLimit     => write!(f, "iteration limit reached"),
            Termination::DerivativeNearZero { x, derivative }
                => write!(f, "derivative near zero at x={x} (f'(x)={derivative})"),
            Termination::DenominatorNearZero { x0, x1 }
                => write!(f, "secant denominator near zero between x0={x0} and x1={x1}"),
            Termination::NonFiniteStep { x }
                => write!(f, "step from x={x} is not finite"),
            Termination::EvaluationFailed { x, reason }
                => write!(f, "evaluation failed at x={x}: {reason}"),
        }
    }
}


/// Convergence verdict: the boolean plus a human-readable status.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Verdict {
    pub converged: bool,
    pub message:   String,
}


/// One step of a run. Errors are `None` on the first record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IterationRecord {
    /// 1-based
    pub index:     usize,
    pub value:     f64,
    pub f_value:   f64,
    pub abs_error: Option<f64>,
    pub rel_error: Option<f64>,
}


/// Final report returned by all root-finding algorithms.
///
/// [`SolveResult`]
/// - `method`            : method that produced it
/// - `root`              : last iterate, or the exact root found; `None` if the run produced no usable iterate
/// - `f_root`            : f at `root`
/// - `iterations`        : number of recorded iterates
/// - `iterates`          : iterate sequence
/// - `f_values`          : f at each iterate
/// - `abs_errors`        : `|x_k - x_{k-1}|`, one shorter than `iterates`
/// - `rel_errors`        : relative errors, one shorter than `iterates`
/// - `final_error`       : stopping error measured last (bracket half-width for bisection)
/// - `tolerance`         : tolerance the run was held to
/// - `termination`       : why the run stopped ([`Termination`])
/// - `elapsed`           : wall-clock time of the call
/// - `peak_memory_bytes` : peak bytes held by the run's trace
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolveResult {
    pub method            : Method,
    pub root              : Option<f64>,
    pub f_root            : Option<f64>,
    pub iterations        : usize,
    pub iterates          : Vec<f64>,
    pub f_values          : Vec<f64>,
    pub abs_errors        : Vec<f64>,
    pub rel_errors        : Vec<f64>,
    pub final_error       : Option<f64>,
    pub tolerance         : f64,
    pub termination       : Termination,
    pub elapsed           : Duration,
    pub peak_memory_bytes : usize,
}

impl SolveResult {
    pub fn converged(&self) -> bool {
        self.termination.is_converged()
    }

    pub fn final_abs_error(&self) -> Option<f64> {
        self.abs_errors.last().copied()
    }

    pub fn final_rel_error(&self) -> Option<f64> {
        self.rel_errors.last().copied()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn verdict(&self) -> Verdict {
        let message = match &self.termination {
            Termination::ExactRoot        => "Converged: exact root found.".to_string(),
            Termination::ToleranceReached => "Converged.".to_string(),
            Termination::IterationLimit if self.final_error.is_none()
                => "Did not converge: the error could not be computed.".to_string(),
            Termination::IterationLimit
                => "Did not converge: maximum iterations reached or error not below tolerance.".to_string(),
            other => format!("Did not converge: {other}."),
        };
        Verdict { converged: self.converged(), message }
    }

    /// Per-iteration detail, errors aligned with the iterate they end on.
    pub fn records(&self) -> Vec<IterationRecord> {
        self.iterates
            .iter()
            .zip(&self.f_values)
            .enumerate()
            .map(|(i, (&value, &f_value))| IterationRecord {
                index     : i + 1,
                value,
                f_value,
                abs_error : i.checked_sub(1).and_then(|j| self.abs_errors.get(j).copied()),
                rel_error : i.checked_sub(1).and_then(|j| self.rel_errors.get(j).copied()),
            })
            .collect()
    }

    /// Flattened view for presentation; non-finite floats become `None`.
    pub fn summary(&self, equation: &str) -> Summary {
        let verdict = self.verdict();
        Summary {
            method            : self.method,
            equation          : equation.to_string(),
            root              : finite(self.root),
            f_root            : finite(self.f_root),
            iterations        : self.iterations,
            final_abs_error   : finite(self.final_abs_error()),
            final_rel_error   : finite(self.final_rel_error()),
            converged         : verdict.converged,
            status            : verdict.message,
            elapsed_secs      : self.elapsed_secs(),
            peak_memory_bytes : self.peak_memory_bytes,
        }
    }

    /// Iteration table rendered for terminals and logs.
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["k", "x", "f(x)", "abs error", "rel error"]);
        for r in self.records() {
            builder.push_record([
                r.index.to_string(),
                format!("{:.12e}", r.value),
                format!("{:.6e}", r.f_value),
                r.abs_error.map_or_else(|| "-".to_string(), |e| format!("{e:.6e}")),
                r.rel_error.map_or_else(|| "-".to_string(), |e| format!("{e:.6e}")),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}


/// Presentation summary of a [`SolveResult`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub method            : Method,
    pub equation          : String,
    pub root              : Option<f64>,
    pub f_root            : Option<f64>,
    pub iterations        : usize,
    pub final_abs_error   : Option<f64>,
    pub final_rel_error   : Option<f64>,
    pub converged         : bool,
    pub status            : String,
    pub elapsed_secs      : f64,
    pub peak_memory_bytes : usize,
}


#[inline]
fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}
