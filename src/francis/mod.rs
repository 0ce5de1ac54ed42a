//! Francis Double-Shift Step
//!
//! One implicit double-shift QR sweep over an unreduced upper Hessenberg
//! block. The shift pair may be complex conjugate, but the sweep only ever
//! works with its real sum and product, so no complex arithmetic touches
//! the matrix.

use crate::scalar::Real;
use ndarray::ArrayViewMut2;
use num_complex::Complex;

/// Householder reflector `P = I - tau v vᵀ` with `v = [1, v1, v2]` such
/// that `P [x, y, z]ᵀ = [beta, 0, 0]ᵀ`.
///
/// Returns `(v1, v2, tau)`. A zero input vector yields `tau = 0`, i.e. the
/// identity.
#[inline]
fn householder3<T: Real>(x: T, y: T, z: T) -> (T, T, T) {
    let zero = T::zero();
    let one = T::one();
    let norm = x.hypot(y).hypot(z);
    if norm == zero {
        return (zero, zero, zero);
    }
    let alpha = if x >= zero { norm } else { -norm };
    let u0 = x + alpha;
    let v1 = y / u0;
    let v2 = z / u0;
    let tau = (one + one) / (one + v1 * v1 + v2 * v2);
    (v1, v2, tau)
}

/// First column of `(H - λ1 I)(H - λ2 I)`, scaled to avoid overflow.
///
/// Only the leading three entries are non-zero for a Hessenberg `H`.
#[inline]
fn shift_column<T: Real>(
    h: &ArrayViewMut2<'_, T>,
    lambda1: Complex<T>,
    lambda2: Complex<T>,
) -> (T, T, T) {
    let zero = T::zero();
    let h00 = h[[0, 0]];
    let h10 = h[[1, 0]];

    let s = (h00 - lambda2.re).abs() + lambda2.im.abs() + h10.abs();
    if s == zero {
        return (zero, zero, zero);
    }

    let h10s = h10 / s;
    let x = (h00 - lambda1.re) * ((h00 - lambda2.re) / s) - lambda1.im * (lambda2.im / s)
        + h[[0, 1]] * h10s;
    let y = h10s * (h00 + h[[1, 1]] - lambda1.re - lambda2.re);
    let z = h10s * h[[2, 1]];
    (x, y, z)
}

/// Applies one Francis double-shift sweep to an unreduced Hessenberg block.
///
/// The sweep is the implicit form of two consecutive QR steps with shifts
/// `lambda1` and `lambda2`: a reflector built from the first column of
/// `(H - λ1 I)(H - λ2 I)` introduces a bulge in the top-left corner, which
/// is then chased off the bottom of the block with 3-element Householder
/// reflectors (a 2-element one at the last position).
///
/// # Arguments
///
/// * `h` - Input/output: n×n upper Hessenberg block, n ≥ 3, arbitrary
///   strides. On output, an orthogonally similar Hessenberg matrix. Entries
///   below the first subdiagonal are exactly zero on exit. Blocks with
///   n < 3 are returned unchanged.
/// * `lambda1`, `lambda2` - Shift pair, normally the eigenvalues of the
///   trailing 2×2 block (see [`crate::wilkinson::wilkinson_shift`]).
/// * `is_complex` - Whether `lambda2 == conj(lambda1)`. Real shift pairs are
///   used as given (the double shift with two real values).
///
/// # Examples
///
/// ```
/// use batched_eigen::francis::francis_double_shift;
/// use batched_eigen::wilkinson::wilkinson_shift;
/// use ndarray::arr2;
///
/// let mut h = arr2(&[[5.0_f64, -11.0, 15.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
/// let (l1, l2, is_complex) = wilkinson_shift(h[[1, 1]], h[[1, 2]], h[[2, 1]], h[[2, 2]]);
/// francis_double_shift(h.view_mut(), l1, l2, is_complex);
///
/// // similarity: the trace is unchanged
/// assert!((h.diag().sum() - 5.0).abs() < 1e-12);
/// assert_eq!(h[[2, 0]], 0.0);
/// ```
///
/// # Panics
///
/// Panics if `h` is not square.
pub fn francis_double_shift<T: Real>(
    mut h: ArrayViewMut2<'_, T>,
    lambda1: Complex<T>,
    lambda2: Complex<T>,
    is_complex: bool,
) {
    let n = h.nrows();
    assert_eq!(n, h.ncols(), "Hessenberg block must be square");
    if n < 3 {
        return;
    }

    let zero = T::zero();
    let (lambda1, lambda2) = if is_complex {
        (lambda1, lambda1.conj())
    } else {
        (Complex::new(lambda1.re, zero), Complex::new(lambda2.re, zero))
    };

    let (mut x, mut y, mut z) = shift_column(&h, lambda1, lambda2);

    for k in 0..n - 1 {
        let use3 = k + 2 < n;
        let (v1, v2, tau) = if use3 {
            householder3(x, y, z)
        } else {
            householder3(x, y, zero)
        };

        if tau != zero {
            // from the left
            let col_start = if k > 0 { k - 1 } else { 0 };
            for j in col_start..n {
                let mut dot = h[[k, j]] + v1 * h[[k + 1, j]];
                if use3 {
                    dot = dot + v2 * h[[k + 2, j]];
                }
                dot = tau * dot;
                h[[k, j]] = h[[k, j]] - dot;
                h[[k + 1, j]] = h[[k + 1, j]] - dot * v1;
                if use3 {
                    h[[k + 2, j]] = h[[k + 2, j]] - dot * v2;
                }
            }

            // from the right
            let row_end = if use3 { (k + 4).min(n) } else { n };
            for i in 0..row_end {
                let mut dot = h[[i, k]] + v1 * h[[i, k + 1]];
                if use3 {
                    dot = dot + v2 * h[[i, k + 2]];
                }
                dot = tau * dot;
                h[[i, k]] = h[[i, k]] - dot;
                h[[i, k + 1]] = h[[i, k + 1]] - dot * v1;
                if use3 {
                    h[[i, k + 2]] = h[[i, k + 2]] - dot * v2;
                }
            }
        }

        // the reflector annihilated the bulge in column k-1
        if k > 0 {
            h[[k + 1, k - 1]] = zero;
            if use3 {
                h[[k + 2, k - 1]] = zero;
            }
        }

        if k + 2 < n {
            x = h[[k + 1, k]];
            y = h[[k + 2, k]];
            z = if k + 3 < n { h[[k + 3, k]] } else { zero };
        }
    }
}
