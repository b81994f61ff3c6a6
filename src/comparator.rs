//! Runs several methods on one equation and collects their outcomes.
//!
//! The function is parsed once and shared read-only; each method runs as an
//! independent unit of work on the rayon pool. A method that fails on its
//! inputs is recorded as [`MethodOutcome::Failed`] and never aborts the others.

use std::collections::BTreeMap;

use log::{info, warn};
use rayon::prelude::*;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::expression::EvaluableFunction;
use crate::root_finding::algorithms::Method;
use crate::root_finding::report::SolveResult;
use crate::solver::{solve_with, FailureKind, MethodParams, SolveError, SolveOptions};


/// Why one method produced no trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodFailure {
    pub kind:    FailureKind,
    pub message: String,
}

impl From<&SolveError> for MethodFailure {
    fn from(e: &SolveError) -> Self {
        Self { kind: e.kind(), message: e.to_string() }
    }
}


#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", content = "detail", rename_all = "snake_case"))]
pub enum MethodOutcome {
    Solved(SolveResult),
    Failed(MethodFailure),
}

impl MethodOutcome {
    pub fn result(&self) -> Option<&SolveResult> {
        match self {
            MethodOutcome::Solved(r) => Some(r),
            MethodOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&MethodFailure> {
        match self {
            MethodOutcome::Solved(_) => None,
            MethodOutcome::Failed(f) => Some(f),
        }
    }
}


/// Outcomes keyed by method, in [`Method`] order.
///
/// `unresolved` holds requests naming no known method, keyed by the name as
/// given; it is only ever filled by [`compare_named`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonResult {
    pub equation:   String,
    pub outcomes:   BTreeMap<Method, MethodOutcome>,
    pub unresolved: BTreeMap<String, MethodFailure>,
}

impl ComparisonResult {
    pub fn get(&self, method: Method) -> Option<&MethodOutcome> {
        self.outcomes.get(&method)
    }

    /// Successful runs only.
    pub fn results(&self) -> impl Iterator<Item = &SolveResult> {
        self.outcomes.values().filter_map(MethodOutcome::result)
    }

    /// `(iteration, abs_error)` series per solved method, for plotting.
    /// Iterations are 1-based and start at the second iterate, the first one
    /// with an error.
    pub fn error_curves(&self) -> BTreeMap<Method, Vec<(usize, f64)>> {
        self.results()
            .map(|r| {
                let curve = r.abs_errors
                    .iter()
                    .enumerate()
                    .map(|(i, &e)| (i + 2, e))
                    .collect();
                (r.method, curve)
            })
            .collect()
    }

    /// Converged method with the fewest iterations; ties go to [`Method`] order.
    pub fn fastest(&self) -> Option<Method> {
        self.results()
            .filter(|r| r.converged())
            .min_by_key(|r| r.iterations)
            .map(|r| r.method)
    }

    /// One row per method, rendered for terminals and logs.
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["method", "root", "iterations", "final abs error", "time (s)", "memory (B)", "status"]);
        for (method, outcome) in &self.outcomes {
            match outcome {
                MethodOutcome::Solved(r) => {
                    let s = r.summary(&self.equation);
                    builder.push_record([
                        method.to_string(),
                        s.root.map_or_else(|| "-".to_string(), |x| format!("{x:.12}")),
                        s.iterations.to_string(),
                        s.final_abs_error.map_or_else(|| "-".to_string(), |e| format!("{e:.3e}")),
                        format!("{:.6}", s.elapsed_secs),
                        s.peak_memory_bytes.to_string(),
                        s.status,
                    ]);
                }
                MethodOutcome::Failed(f) => {
                    builder.push_record(failure_row(method.to_string(), f));
                }
            }
        }
        for (name, f) in &self.unresolved {
            builder.push_record(failure_row(name.clone(), f));
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

fn failure_row(label: String, f: &MethodFailure) -> [String; 7] {
    [
        label,
        "-".to_string(),
        "-".to_string(),
        "-".to_string(),
        "-".to_string(),
        "-".to_string(),
        format!("{}: {}", f.kind, f.message),
    ]
}


/// Runs every entry of `methods` on `equation`.
///
/// # Arguments
/// ┌ `equation` - function of `x`, parsed once for all methods
/// ├ `methods`  - one entry per method; a later entry for the same method replaces an earlier one
/// └ `options`  - shared tolerance and iteration cap
///
/// # Errors
/// Only [`SolveError::InvalidExpression`]: a bad equation fails the whole
/// comparison. Per-method failures land in [`ComparisonResult::outcomes`].
pub fn compare(
    equation: &str,
    methods: &[MethodParams],
    options: &SolveOptions
) -> Result<ComparisonResult, SolveError> {
    let func = EvaluableFunction::parse(equation)?;
    info!("comparing {} methods on {func}", methods.len());

    Ok(ComparisonResult {
        equation:   func.source().to_string(),
        outcomes:   run_all(&func, methods, options).into_iter().collect(),
        unresolved: BTreeMap::new(),
    })
}


/// Like [`compare`], with each method given by name plus a by-name lookup
/// of its parameters (e.g. fields of a decoded request).
///
/// A request naming an unknown method lands in
/// [`ComparisonResult::unresolved`]; one missing a parameter lands in
/// [`ComparisonResult::outcomes`] as [`FailureKind::MissingParameter`]. A
/// request that resolves replaces an earlier failed one for the same method.
///
/// # Errors
/// Only [`SolveError::InvalidExpression`], as for [`compare`].
pub fn compare_named<L>(
    equation: &str,
    requests: &[(&str, L)],
    options: &SolveOptions
) -> Result<ComparisonResult, SolveError>
where L: Fn(&str) -> Option<f64> {
    let func = EvaluableFunction::parse(equation)?;
    info!("comparing {} named methods on {func}", requests.len());

    let mut resolved   = Vec::with_capacity(requests.len());
    let mut outcomes   = BTreeMap::new();
    let mut unresolved = BTreeMap::new();
    for (name, lookup) in requests {
        match MethodParams::from_named(name, lookup) {
            Ok(params) => resolved.push(params),
            Err(e) => {
                warn!("`{name}` skipped in comparison: {e}");
                let failure = MethodFailure::from(&e);
                match e {
                    SolveError::MissingParameter { method, .. } => {
                        outcomes.insert(method, MethodOutcome::Failed(failure));
                    }
                    _ => {
                        unresolved.insert(name.to_string(), failure);
                    }
                }
            }
        }
    }
    outcomes.extend(run_all(&func, &resolved, options));

    Ok(ComparisonResult {
        equation: func.source().to_string(),
        outcomes,
        unresolved,
    })
}


fn run_all(
    func: &EvaluableFunction,
    methods: &[MethodParams],
    options: &SolveOptions
) -> Vec<(Method, MethodOutcome)> {
    methods
        .par_iter()
        .map(|&params| {
            let method = params.method();
            let outcome = match solve_with(func, params, options) {
                Ok(result) => MethodOutcome::Solved(result),
                Err(e) => {
                    warn!("{method} failed in comparison: {e}");
                    MethodOutcome::Failed(MethodFailure::from(&e))
                }
            };
            (method, outcome)
        })
        .collect()
}
