//! Wilkinson Shift
//!
//! Closed-form eigenvalues of a real 2×2 block. The eigenvalue kernel uses
//! them twice: as the shift pair of a Francis sweep, and as the final
//! eigenvalues of a block that has split off as a 2×2.

use crate::scalar::Real;
use num_complex::Complex;

/// Computes the eigenvalues of the real 2×2 matrix `[[h00, h01], [h10, h11]]`.
///
/// The eigenvalues are the roots of the characteristic quadratic
/// `λ² - (h00 + h11) λ + (h00 h11 - h01 h10)`, i.e.
/// `p ± sqrt(d)` with half-trace `p = (h00 + h11) / 2` and discriminant
/// `d = ((h00 - h11) / 2)² + h01 h10`.
///
/// # Arguments
///
/// * `h00`, `h01` - First row of the block
/// * `h10`, `h11` - Second row of the block
///
/// # Returns
///
/// A tuple `(lambda1, lambda2, is_complex)` where:
/// - `lambda1`: `p + sqrt(d)` (or `p + i sqrt(-d)` for a complex pair)
/// - `lambda2`: `p - sqrt(d)` (or `p - i sqrt(-d)`)
/// - `is_complex`: true when `d < 0`, in which case `lambda2 == conj(lambda1)`
///
/// # Examples
///
/// ```
/// use batched_eigen::wilkinson::wilkinson_shift;
///
/// // Rotation by 90 degrees: eigenvalues ±i
/// let (l1, l2, is_complex) = wilkinson_shift(0.0_f64, -1.0, 1.0, 0.0);
/// assert!(is_complex);
/// assert_eq!((l1.re, l1.im), (0.0, 1.0));
/// assert_eq!((l2.re, l2.im), (0.0, -1.0));
///
/// // Real pair
/// let (l1, l2, is_complex) = wilkinson_shift(4.0_f64, 1.0, 2.0, 3.0);
/// assert!(!is_complex);
/// assert!((l1.re - 5.0).abs() < 1e-14);
/// assert!((l2.re - 2.0).abs() < 1e-14);
/// ```
///
/// # Numerical Considerations
///
/// The block is scaled by the sum of absolute values of its entries before
/// the quadratic is formed, so squaring cannot overflow or underflow for
/// finite inputs. In the real case the root of larger magnitude is taken
/// from `p ± sqrt(d)` and the other one from `det / root`, which avoids
/// cancellation when the two eigenvalues differ by many orders of
/// magnitude.
pub fn wilkinson_shift<T: Real>(h00: T, h01: T, h10: T, h11: T) -> (Complex<T>, Complex<T>, bool) {
    let zero = T::zero();
    let half = (T::one() + T::one()).recip();

    let s = h00.abs() + h01.abs() + h10.abs() + h11.abs();
    if s == zero {
        return (Complex::new(zero, zero), Complex::new(zero, zero), false);
    }

    let a00 = h00 / s;
    let a01 = h01 / s;
    let a10 = h10 / s;
    let a11 = h11 / s;

    let p = (a00 + a11) * half;
    let q = (a00 - a11) * half;
    let disc = q * q + a01 * a10;

    if disc < zero {
        let re = s * p;
        let im = s * (-disc).sqrt();
        return (Complex::new(re, im), Complex::new(re, -im), true);
    }

    let root = disc.sqrt();
    let det = a00 * a11 - a01 * a10;
    let (l1, l2) = if p >= zero {
        let big = p + root;
        let small = if big != zero { det / big } else { p - root };
        (big, small)
    } else {
        let big = p - root;
        let small = if big != zero { det / big } else { p + root };
        (small, big)
    };

    (Complex::new(s * l1, zero), Complex::new(s * l2, zero), false)
}
