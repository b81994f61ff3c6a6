//! Sign utilities for bracketing.

/// Returns `true` if `x` and `y` have opposite signs.
///
/// Zeros are handled by the caller as exact roots before this is asked.
#[inline]
pub(crate) fn opposite_signs(x: f64, y: f64) -> bool {
    x.is_sign_positive() != y.is_sign_positive()
}
