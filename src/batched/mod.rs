//! Batched Eigenvalue Driver
//!
//! Runs the serial kernel over a stack of independent Hessenberg matrices.
//! With the `rayon` feature (on by default) the batch is split across the
//! rayon thread pool; every matrix is still processed sequentially by one
//! worker, exactly as [`serial_eigenvalue`] would on its own.

use crate::eigen::{serial_eigenvalue, EigenvalueError, EigenvalueOptions};
use crate::scalar::Real;
use log::{debug, warn};
use ndarray::{ArrayViewMut2, ArrayViewMut3, Axis};
use num_complex::Complex;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Outcome of a batched run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of matrices whose eigenvalues were all found
    pub converged: usize,
    /// Batch indices that ran out of iterations, in increasing order
    pub failed: Vec<usize>,
}

impl BatchReport {
    pub fn all_converged(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Computes the eigenvalues of every matrix in a batch.
///
/// # Arguments
///
/// * `h` - Input/output: batch×m×m stack of upper Hessenberg matrices, any
///   strides. Each matrix is overwritten as by [`serial_eigenvalue`].
/// * `er` - Output: batch×(≥m) real parts, one row per matrix
/// * `ei` - Output: batch×(≥m) imaginary parts, one row per matrix
/// * `options` - Shared by every matrix of the batch
///
/// # Returns
///
/// A [`BatchReport`] on success. Matrices that did not converge do not fail
/// the call; they are listed in [`BatchReport::failed`] and their rows keep
/// the partial results. Shape errors are reported before anything is
/// written.
///
/// # Examples
///
/// ```
/// use batched_eigen::batched::batched_eigenvalue;
/// use batched_eigen::eigen::EigenvalueOptions;
/// use ndarray::{Array2, Array3};
///
/// let mut h = Array3::<f64>::zeros((4, 2, 2));
/// for (b, mut m) in h.outer_iter_mut().enumerate() {
///     m[[0, 0]] = b as f64;
///     m[[1, 1]] = -(b as f64);
/// }
/// let mut er = Array2::zeros((4, 2));
/// let mut ei = Array2::zeros((4, 2));
///
/// let report = batched_eigenvalue(
///     h.view_mut(),
///     er.view_mut(),
///     ei.view_mut(),
///     &EigenvalueOptions::default(),
/// )
/// .unwrap();
/// assert!(report.all_converged());
/// assert_eq!(report.converged, 4);
/// assert_eq!(er.row(3).to_vec(), vec![3.0, -3.0]);
/// ```
///
/// # Panics
///
/// Panics if `options.restart` is set and m ≤ 2, like the serial kernel.
pub fn batched_eigenvalue<T: Real>(
    mut h: ArrayViewMut3<'_, T>,
    mut er: ArrayViewMut2<'_, T>,
    mut ei: ArrayViewMut2<'_, T>,
    options: &EigenvalueOptions<T>,
) -> Result<BatchReport, EigenvalueError> {
    let (batch, rows, cols) = h.dim();
    if er.nrows() != batch || ei.nrows() != batch {
        return Err(EigenvalueError::BatchMismatch {
            h: batch,
            er: er.nrows(),
            ei: ei.nrows(),
        });
    }
    if rows != cols {
        return Err(EigenvalueError::NotSquare { rows, cols });
    }
    if er.ncols() < rows || ei.ncols() < rows {
        return Err(EigenvalueError::OutputTooShort {
            needed: rows,
            er: er.ncols(),
            ei: ei.ncols(),
        });
    }
    if options.restart {
        assert!(
            rows > 2,
            "restart option cannot be used for m = {}; matrices with m <= 2 are always recomputed",
            rows
        );
    }

    debug!("batched eigenvalues: {} matrices of size {}x{}", batch, rows, cols);

    #[cfg(feature = "rayon")]
    let statuses: Vec<Result<(), EigenvalueError>> = h
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(er.axis_iter_mut(Axis(0)).into_par_iter())
        .zip(ei.axis_iter_mut(Axis(0)).into_par_iter())
        .map(|((h, er), ei)| serial_eigenvalue(h, er, ei, options))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let statuses: Vec<Result<(), EigenvalueError>> = h
        .axis_iter_mut(Axis(0))
        .zip(er.axis_iter_mut(Axis(0)))
        .zip(ei.axis_iter_mut(Axis(0)))
        .map(|((h, er), ei)| serial_eigenvalue(h, er, ei, options))
        .collect();

    let mut report = BatchReport::default();
    for (index, status) in statuses.into_iter().enumerate() {
        match status {
            Ok(()) => report.converged += 1,
            Err(EigenvalueError::NotConverged { iterations }) => {
                debug!("matrix {} stopped after {} iterations", index, iterations);
                report.failed.push(index);
            }
            Err(err) => return Err(err),
        }
    }

    if !report.all_converged() {
        warn!(
            "{} of {} matrices did not converge within {} iterations",
            report.failed.len(),
            batch,
            options.max_iteration
        );
    }
    Ok(report)
}

/// Same as [`batched_eigenvalue`], writing into one batch×(≥m) interleaved
/// complex array.
pub fn batched_eigenvalue_complex<T: Real>(
    h: ArrayViewMut3<'_, T>,
    e: ArrayViewMut2<'_, Complex<T>>,
    options: &EigenvalueOptions<T>,
) -> Result<BatchReport, EigenvalueError> {
    let Complex { re, im } = e.split_complex();
    batched_eigenvalue(h, re, im, options)
}
