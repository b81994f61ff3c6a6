// common helpers
pub mod algorithms;
pub mod report;
pub mod errors;
pub mod convergence;
pub mod config;
pub(crate) mod signs;
pub(crate) mod trace;

// algorithms
pub mod bisection;
pub mod newton;
pub mod secant;
