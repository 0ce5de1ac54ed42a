//! Vector Update
//!
//! The three-term vector update `z = a x + b y + c z`, with the BLAS
//! convention that a zero coefficient means the matching operand is not
//! read at all.

use ndarray::{ArrayView1, ArrayViewMut1, Zip};
use num_traits::Num;

/// Error type for [`update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// `x`, `y` and `z` must have the same length
    LengthMismatch { x: usize, y: usize, z: usize },
}

impl std::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateError::LengthMismatch { x, y, z } => write!(
                f,
                "vector lengths differ: x: {}, y: {}, z: {}",
                x, y, z
            ),
        }
    }
}

impl std::error::Error for UpdateError {}

/// Computes `z[i] = a * x[i] + b * y[i] + c * z[i]` element-wise.
///
/// A zero coefficient drops its term without reading the operand, so NaN
/// or infinite entries in an unused operand do not propagate. In
/// particular `c = 0` overwrites `z` regardless of its previous content.
///
/// # Arguments
///
/// * `a`, `x` - First term
/// * `b`, `y` - Second term
/// * `c`, `z` - Input/output: scaled previous value, overwritten with the
///   result
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(UpdateError::LengthMismatch)` if the lengths differ; `z` is left
///   untouched
///
/// # Examples
///
/// ```
/// use batched_eigen::blas::update;
/// use ndarray::array;
///
/// let x = array![1.0, 2.0, 3.0];
/// let y = array![10.0, 20.0, 30.0];
/// let mut z = array![100.0, 200.0, 300.0];
/// update(2.0, x.view(), 1.0, y.view(), -1.0, z.view_mut()).unwrap();
/// assert_eq!(z, array![-88.0, -176.0, -264.0]);
/// ```
pub fn update<T: Num + Copy>(
    a: T,
    x: ArrayView1<'_, T>,
    b: T,
    y: ArrayView1<'_, T>,
    c: T,
    z: ArrayViewMut1<'_, T>,
) -> Result<(), UpdateError> {
    if x.len() != z.len() || y.len() != z.len() {
        return Err(UpdateError::LengthMismatch {
            x: x.len(),
            y: y.len(),
            z: z.len(),
        });
    }

    let zero = T::zero();
    Zip::from(z).and(&x).and(&y).for_each(|z, &x, &y| {
        let mut acc = if c == zero { zero } else { c * *z };
        if a != zero {
            acc = acc + a * x;
        }
        if b != zero {
            acc = acc + b * y;
        }
        *z = acc;
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, s, Array1};
    use num_complex::Complex64;

    #[test]
    fn test_general_coefficients() {
        let x = array![1.0, -1.0, 0.5, 4.0];
        let y = array![2.0, 3.0, -2.0, 0.0];
        let mut z = array![1.0, 1.0, 1.0, 1.0];
        update(3.0, x.view(), -2.0, y.view(), 0.5, z.view_mut()).unwrap();
        assert_eq!(z, array![-0.5, -8.5, 6.0, 12.5]);
    }

    #[test]
    fn test_zero_c_ignores_nan_in_z() {
        let x = array![1.0, 2.0];
        let y = array![3.0, 4.0];
        let mut z = array![f64::NAN, f64::INFINITY];
        update(1.0, x.view(), 1.0, y.view(), 0.0, z.view_mut()).unwrap();
        assert_eq!(z, array![4.0, 6.0]);
    }

    #[test]
    fn test_zero_a_and_b_ignore_operands() {
        let x = array![f64::NAN, f64::NAN];
        let y = array![f64::INFINITY, f64::NAN];
        let mut z = array![2.0, -3.0];
        update(0.0, x.view(), 0.0, y.view(), 2.0, z.view_mut()).unwrap();
        assert_eq!(z, array![4.0, -6.0]);
    }

    #[test]
    fn test_length_mismatch_leaves_z() {
        let x = array![1.0, 2.0, 3.0];
        let y = array![1.0, 2.0];
        let mut z = array![7.0, 7.0, 7.0];
        let err = update(1.0, x.view(), 1.0, y.view(), 1.0, z.view_mut()).unwrap_err();
        assert_eq!(err, UpdateError::LengthMismatch { x: 3, y: 2, z: 3 });
        assert_eq!(z, array![7.0, 7.0, 7.0]);
    }

    #[test]
    fn test_strided_views() {
        let x = Array1::from(vec![1.0, 0.0, 2.0, 0.0, 3.0]);
        let y = array![1.0, 1.0, 1.0];
        let mut z = Array1::from(vec![5.0, -1.0, 5.0, -1.0, 5.0]);
        update(
            1.0,
            x.slice(s![..;2]),
            1.0,
            y.slice(s![..;-1]),
            1.0,
            z.slice_mut(s![..;2]),
        )
        .unwrap();
        assert_eq!(z.to_vec(), vec![7.0, -1.0, 8.0, -1.0, 9.0]);
    }

    #[test]
    fn test_complex_values() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let x = array![one, i];
        let y = array![i, one];
        let mut z = array![one, one];
        update(i, x.view(), one, y.view(), one, z.view_mut()).unwrap();
        assert_eq!(z, array![Complex64::new(1.0, 2.0), Complex64::new(1.0, 0.0)]);
    }

    #[test]
    fn test_empty_vectors() {
        let x: Array1<f64> = Array1::zeros(0);
        let mut z: Array1<f64> = Array1::zeros(0);
        update(1.0, x.view(), 1.0, x.view(), 1.0, z.view_mut()).unwrap();
        assert_eq!(z.len(), 0);
    }
}
