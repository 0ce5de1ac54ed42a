//! Hessenberg QR Step with Shift
//!
//! Single-shift QR iteration on an upper Hessenberg block, carried out with
//! Givens rotations directly on a strided view. The step is a similarity
//! transformation, so the spectrum of the block is preserved while the
//! subdiagonal entry next to the shift's eigenvalue shrinks.

use crate::scalar::Real;
use ndarray::ArrayViewMut2;

/// Computes a Givens rotation that annihilates `b` against `a`.
///
/// Returns `(c, s, r)` such that
/// ```text
/// [  c  s ] [ a ]   [ r ]
/// [ -s  c ] [ b ] = [ 0 ]
/// ```
/// with `c² + s² = 1` and `r = hypot(a, b)`.
///
/// # Examples
///
/// ```
/// use batched_eigen::qr::givens_rotation;
///
/// let (c, s, r) = givens_rotation(3.0_f64, 4.0);
/// assert!((r - 5.0).abs() < 1e-15);
/// assert!((-s * 3.0 + c * 4.0).abs() < 1e-15);
/// ```
#[inline]
pub fn givens_rotation<T: Real>(a: T, b: T) -> (T, T, T) {
    if b == T::zero() {
        return (T::one(), T::zero(), a);
    }
    let r = a.hypot(b);
    (a / r, b / r, r)
}

/// Applies `[c s; -s c]` to the row pair `(i0, i1)` over columns `cols`.
#[inline]
fn rotate_rows<T: Real>(
    h: &mut ArrayViewMut2<'_, T>,
    i0: usize,
    i1: usize,
    cols: std::ops::Range<usize>,
    c: T,
    s: T,
) {
    for j in cols {
        let x = h[[i0, j]];
        let y = h[[i1, j]];
        h[[i0, j]] = c * x + s * y;
        h[[i1, j]] = c * y - s * x;
    }
}

/// Applies the transpose of `[c s; -s c]` from the right to the column pair
/// `(j0, j1)` over rows `rows`.
#[inline]
fn rotate_cols<T: Real>(
    h: &mut ArrayViewMut2<'_, T>,
    j0: usize,
    j1: usize,
    rows: std::ops::Range<usize>,
    c: T,
    s: T,
) {
    for i in rows {
        let x = h[[i, j0]];
        let y = h[[i, j1]];
        h[[i, j0]] = c * x + s * y;
        h[[i, j1]] = c * y - s * x;
    }
}

/// Applies one explicitly shifted QR iteration to an upper Hessenberg block.
///
/// Overwrites `H` with `R Q + σ I`, where `Q R = H - σ I` is computed by a
/// sweep of `n - 1` Givens rotations. The right-hand application of each
/// rotation is delayed by one step, so only the previous rotation has to
/// be kept and the routine never allocates.
///
/// # Arguments
///
/// * `h` - Input/output: n×n upper Hessenberg block with arbitrary strides.
///   On output, contains the orthogonally similar matrix `R Q + σ I`, still
///   in Hessenberg form. Entries below the first subdiagonal are neither
///   read nor written.
/// * `shift` - Real shift σ. Choosing σ equal to the eigenvalue nearest the
///   bottom-right corner (a Rayleigh quotient shift) drives `H[n-1, n-2]`
///   towards zero.
///
/// # Examples
///
/// ```
/// use batched_eigen::qr::hessenberg_qr_with_shift;
/// use ndarray::arr2;
///
/// // Eigenvalues 3 and 1; shifting by 3 deflates the bottom row at once.
/// let mut h = arr2(&[[2.0_f64, 1.0], [1.0, 2.0]]);
/// hessenberg_qr_with_shift(h.view_mut(), 3.0);
/// assert!(h[[1, 0]].abs() < 1e-12);
/// assert!((h[[1, 1]] - 3.0).abs() < 1e-12);
/// ```
///
/// # Panics
///
/// Panics if `h` is not square.
pub fn hessenberg_qr_with_shift<T: Real>(mut h: ArrayViewMut2<'_, T>, shift: T) {
    let n = h.nrows();
    assert_eq!(n, h.ncols(), "Hessenberg block must be square");
    if n <= 1 {
        return;
    }

    for i in 0..n {
        h[[i, i]] = h[[i, i]] - shift;
    }

    let mut prev = (T::one(), T::zero());
    for k in 0..n - 1 {
        let (c, s, r) = givens_rotation(h[[k, k]], h[[k + 1, k]]);
        h[[k, k]] = r;
        h[[k + 1, k]] = T::zero();
        rotate_rows(&mut h, k, k + 1, k + 1..n, c, s);

        // columns k-1 and k of rows 0..=k hold final R entries only now
        if k > 0 {
            rotate_cols(&mut h, k - 1, k, 0..k + 1, prev.0, prev.1);
        }
        prev = (c, s);
    }
    rotate_cols(&mut h, n - 2, n - 1, 0..n, prev.0, prev.1);

    for i in 0..n {
        h[[i, i]] = h[[i, i]] + shift;
    }
}
