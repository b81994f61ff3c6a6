//! Root-finding method definitions.
//!
//! Provides the [`Method`] enum, which enumerates all supported methods.
//! Methods parse from their names (case-insensitive), so a caller can map
//! request text straight onto a variant.

use strum_macros::{EnumIter, EnumString};


/// Root-finding method variants.
/// - [`Method::Bisection`]     : bracketing, needs `a`, `b`
/// - [`Method::NewtonRaphson`] : open, needs `x0`
/// - [`Method::Secant`]        : open, needs `x0`, `x1`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Method {
    #[strum(serialize = "bisection")]
    Bisection,
    #[strum(serialize = "newton-raphson", serialize = "newton")]
    NewtonRaphson,
    #[strum(serialize = "secant")]
    Secant,
}

impl Method {
    pub const fn method_name(self) -> &'static str {
        match self {
            Method::Bisection     => "bisection",
            Method::NewtonRaphson => "newton-raphson",
            Method::Secant        => "secant",
        }
    }

    /// Names of the method-specific numeric parameters, in call order.
    pub const fn parameter_names(self) -> &'static [&'static str] {
        match self {
            Method::Bisection     => &["a", "b"],
            Method::NewtonRaphson => &["x0"],
            Method::Secant        => &["x0", "x1"],
        }
    }
}
impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.method_name())
    }
}
