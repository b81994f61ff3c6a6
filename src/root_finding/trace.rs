//! Per-run trace and instrumentation.
//!
//! [`Run`] is acquired at algorithm entry. It owns the iterate/error buffers,
//! samples a monotonic clock at start, and tracks the peak footprint of its
//! buffers after every append. Measurements are scoped to the run, so
//! concurrent runs never see each other.
//!
//! Every algorithm exit goes through [`Run::finish`] / [`Run::finish_at`]; a
//! run dropped on an error path reports through `Drop` instead.

use std::mem;
use std::time::Instant;

use log::{debug, info, warn};

use super::algorithms::Method;
use super::convergence::ConvergenceTracker;
use super::report::{SolveResult, Termination};


pub(crate) struct Run {
    method     : Method,
    tracker    : ConvergenceTracker,
    started    : Instant,
    iterates   : Vec<f64>,
    f_values   : Vec<f64>,
    abs_errors : Vec<f64>,
    rel_errors : Vec<f64>,
    peak_bytes : usize,
    finished   : bool,
}

impl Run {
    pub fn start(method: Method, tracker: ConvergenceTracker) -> Self {
        let mut run = Self {
            method,
            tracker,
            started    : Instant::now(),
            iterates   : Vec::new(),
            f_values   : Vec::new(),
            abs_errors : Vec::new(),
            rel_errors : Vec::new(),
            peak_bytes : 0,
            finished   : false,
        };
        run.sample_memory();
        run
    }

    pub fn tracker(&self) -> ConvergenceTracker { self.tracker }

    pub fn iterations(&self) -> usize { self.iterates.len() }

    /// Appends an iterate and returns its absolute error against the
    /// previous one (`None` for the first).
    pub fn record(&mut self, x: f64, fx: f64) -> Option<f64> {
        let abs_err = match self.iterates.last().copied() {
            Some(prev) => {
                let (abs_err, rel_err) = self.tracker.errors(prev, x);
                self.abs_errors.push(abs_err);
                self.rel_errors.push(rel_err);
                Some(abs_err)
            }
            None => None,
        };
        self.iterates.push(x);
        self.f_values.push(fx);
        self.sample_memory();

        debug!(
            "{} k={} x={x:e} f(x)={fx:e} abs_err={}",
            self.method, self.iterates.len(), abs_err.map_or_else(|| "-".to_string(), |e| format!("{e:e}"))
        );
        abs_err
    }

    fn footprint(&self) -> usize {
        let slots = self.iterates.capacity()
            + self.f_values.capacity()
            + self.abs_errors.capacity()
            + self.rel_errors.capacity();
        mem::size_of::<Self>() + slots * mem::size_of::<f64>()
    }

    fn sample_memory(&mut self) {
        self.peak_bytes = self.peak_bytes.max(self.footprint());
    }

    /// Closes the run with the last iterate as root.
    pub fn finish(self, termination: Termination, final_error: Option<f64>) -> SolveResult {
        let last = self.iterates.last().copied().zip(self.f_values.last().copied());
        self.conclude(last, termination, final_error)
    }

    /// Closes the run with an explicit root (e.g. an exact bracket endpoint).
    pub fn finish_at(self, root: f64, f_root: f64, termination: Termination) -> SolveResult {
        self.conclude(Some((root, f_root)), termination, None)
    }

    fn conclude(
        mut self,
        root: Option<(f64, f64)>,
        termination: Termination,
        final_error: Option<f64>
    ) -> SolveResult {
        self.finished = true;
        let elapsed = self.started.elapsed();
        let result = SolveResult {
            method            : self.method,
            root              : root.map(|(x, _)| x),
            f_root            : root.map(|(_, fx)| fx),
            iterations        : self.iterates.len(),
            iterates          : mem::take(&mut self.iterates),
            f_values          : mem::take(&mut self.f_values),
            abs_errors        : mem::take(&mut self.abs_errors),
            rel_errors        : mem::take(&mut self.rel_errors),
            final_error,
            tolerance         : self.tracker.tolerance(),
            termination,
            elapsed,
            peak_memory_bytes : self.peak_bytes,
        };

        if result.converged() {
            info!(
                "{}: {} after {} iterations in {:?}, root={:?}",
                result.method, result.termination, result.iterations, elapsed, result.root
            );
        } else {
            warn!(
                "{}: did not converge ({}) after {} iterations in {:?}",
                result.method, result.termination, result.iterations, elapsed
            );
        }
        result
    }
}

impl Drop for Run {
    fn drop(&mut self) {
        if !self.finished {
            debug!(
                "{} aborted after {:?}: {} iterations, peak {} bytes",
                self.method, self.started.elapsed(), self.iterates.len(), self.peak_bytes
            );
        }
    }
}
