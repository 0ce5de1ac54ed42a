//! Real Scalar Types
//!
//! The eigenvalue kernels are generic over the real scalar type. Everything
//! they need from it (absolute value, a NaN sentinel, a NaN test and the
//! machine epsilon) comes from [`num_traits::Float`]; this module adds the
//! one constant that has to be chosen per precision, the default deflation
//! tolerance.

use num_traits::Float;
use std::fmt::Debug;

/// Real scalar accepted by the serial and batched eigenvalue kernels.
///
/// Implemented for `f32` and `f64`. The control flow of every kernel is
/// identical across implementations; only the tolerance scale changes
/// with the machine epsilon.
///
/// # Examples
///
/// ```
/// use batched_eigen::scalar::Real;
///
/// assert_eq!(f64::default_tolerance(), 1e5 * f64::EPSILON);
/// assert!(f32::default_tolerance() > f64::default_tolerance() as f32);
/// ```
pub trait Real: Float + Debug + Send + Sync + 'static {
    /// Relative tolerance used when the caller does not supply one:
    /// `1e5 * epsilon`.
    fn default_tolerance() -> Self;

    /// Resolves a caller-supplied tolerance. `None` or a negative value
    /// selects [`Real::default_tolerance`].
    #[inline]
    fn resolve_tolerance(user: Option<Self>) -> Self {
        match user {
            Some(tol) if tol >= Self::zero() => tol,
            _ => Self::default_tolerance(),
        }
    }
}

impl Real for f32 {
    #[inline]
    fn default_tolerance() -> Self {
        1e5 * f32::EPSILON
    }
}

impl Real for f64 {
    #[inline]
    fn default_tolerance() -> Self {
        1e5 * f64::EPSILON
    }
}
