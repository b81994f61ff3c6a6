//! Shared configuration for root-finding algorithms.
//!
//! Provides [`CommonCfg`] with default tolerance and iteration limit,
//! used by all root-finding configs.
//!
//! [`CommonCfg`] : universal fields
//! ├ `tolerance`  : stop once the absolute error drops below this
//! ├ `max_iter`   : iteration cap
//! └ `zero_guard` : below this |x|, relative error falls back to absolute error
//!
//! [`CommonCfg::new`] initializes configuration with default values.
//!
//! Some algorithms (e.g. newton) have additional config arguments
//! for their safety thresholds (e.g. derivative floor).

use super::convergence::ConvergenceTracker;


pub const DEFAULT_TOLERANCE  : f64   = 1e-6;
pub const DEFAULT_MAX_ITER   : usize = 100;
pub const DEFAULT_ZERO_GUARD : f64   = 1e-12;


#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CommonCfg {
    tolerance:  f64,
    max_iter:   usize,
    zero_guard: f64,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self {
            tolerance  : DEFAULT_TOLERANCE,
            max_iter   : DEFAULT_MAX_ITER,
            zero_guard : DEFAULT_ZERO_GUARD,
        }
    }

    // getters
    pub fn tolerance(&self)  -> f64   { self.tolerance }
    pub fn max_iter(&self)   -> usize { self.max_iter }
    pub fn zero_guard(&self) -> f64   { self.zero_guard }

    pub(crate) fn tracker(&self) -> ConvergenceTracker {
        ConvergenceTracker::new(self.tolerance, self.zero_guard)
    }

    // setters (internal)
    pub(crate) fn with_tolerance (&mut self, v: f64)   { self.tolerance  = v; }
    pub(crate) fn with_max_iter  (&mut self, v: usize) { self.max_iter   = v; }
    pub(crate) fn with_zero_guard(&mut self, v: f64)   { self.zero_guard = v; }
}

impl Default for CommonCfg {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn set_tolerance(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if !v.is_finite() || v <= 0.0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidTolerance { got: v }
                    );
                }
                self.common.with_tolerance(v);
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if v == 0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }
            pub fn set_zero_guard(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if !v.is_finite() || v < 0.0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidThreshold {
                            name: "zero_guard", bound: ">= 0", got: v
                        }
                    );
                }
                self.common.with_zero_guard(v);
                Ok(self)
            }

            #[inline] #[must_use] pub fn tolerance(&self)  -> f64   { self.common.tolerance() }
            #[inline] #[must_use] pub fn max_iter(&self)   -> usize { self.common.max_iter() }
            #[inline] #[must_use] pub fn zero_guard(&self) -> f64   { self.common.zero_guard() }
        }
    };
}
pub(crate) use impl_common_cfg;


/// Validates a strictly positive safety threshold.
pub(crate) fn positive_threshold(
    name: &'static str,
    v: f64
) -> Result<f64, super::errors::RootFindingError> {
    if !v.is_finite() || v <= 0.0 {
        return Err(super::errors::RootFindingError::InvalidThreshold { name, bound: "> 0", got: v });
    }
    Ok(v)
}
