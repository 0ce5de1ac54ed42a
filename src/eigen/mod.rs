//! Serial Eigenvalue Kernel
//!
//! Eigenvalues of a small real upper Hessenberg matrix by the Francis
//! double-shift QR algorithm, computed in place inside a single sequential
//! unit of work. The kernel never allocates and never unwinds on the
//! numerical path: non-convergence is reported through the returned
//! `Result`, with every eigenvalue found so far left in the outputs.
//!
//! Outputs follow the usual real-pair convention: a complex-conjugate pair
//! occupies two consecutive slots, `a + bi` and `a - bi` in some order.
//! Slots that have not been assigned yet hold NaN in `er`.

use crate::francis::francis_double_shift;
use crate::scalar::Real;
use crate::wilkinson::wilkinson_shift;
use log::{debug, trace};
use ndarray::{s, ArrayViewMut1, ArrayViewMut2};
use num_complex::Complex;

/// Default iteration budget of [`serial_eigenvalue`].
pub const DEFAULT_MAX_ITERATION: usize = 300;

/// Per-call configuration of the eigenvalue kernels.
///
/// # Examples
///
/// ```
/// use batched_eigen::eigen::EigenvalueOptions;
///
/// let options = EigenvalueOptions::<f64>::default()
///     .with_max_iteration(1000)
///     .with_tolerance(1e-12);
/// assert_eq!(options.max_iteration, 1000);
/// assert_eq!(options.tolerance, Some(1e-12));
/// assert!(!options.restart);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EigenvalueOptions<T> {
    /// Maximum number of window scans (one Francis sweep each). When the
    /// budget runs out the kernel returns [`EigenvalueError::NotConverged`].
    pub max_iteration: usize,
    /// Relative deflation tolerance: `|value| < tolerance * |reference|`
    /// counts as zero. `None` or a negative value selects
    /// [`Real::default_tolerance`] (`1e5 * epsilon`).
    pub tolerance: Option<T>,
    /// Resume from the matrix and outputs left by a previous call instead of
    /// resetting the outputs. Only valid for m ≥ 3.
    pub restart: bool,
}

impl<T> Default for EigenvalueOptions<T> {
    fn default() -> Self {
        Self {
            max_iteration: DEFAULT_MAX_ITERATION,
            tolerance: None,
            restart: false,
        }
    }
}

impl<T> EigenvalueOptions<T> {
    /// Same as [`Default::default`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iteration(mut self, max_iteration: usize) -> Self {
        self.max_iteration = max_iteration;
        self
    }

    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }
}

/// Error type for the eigenvalue kernels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EigenvalueError {
    /// The Hessenberg matrix is not square
    NotSquare { rows: usize, cols: usize },
    /// An output vector holds fewer than `needed` slots
    OutputTooShort { needed: usize, er: usize, ei: usize },
    /// Batched inputs disagree on the number of matrices
    BatchMismatch { h: usize, er: usize, ei: usize },
    /// The iteration budget ran out before every eigenvalue deflated
    NotConverged { iterations: usize },
}

impl EigenvalueError {
    /// Numeric status code: -1 for non-convergence, -2 for invalid
    /// arguments.
    pub fn info(&self) -> i32 {
        match self {
            EigenvalueError::NotConverged { .. } => -1,
            _ => -2,
        }
    }
}

impl std::fmt::Display for EigenvalueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EigenvalueError::NotSquare { rows, cols } => {
                write!(f, "Hessenberg matrix must be square, got {}×{}", rows, cols)
            }
            EigenvalueError::OutputTooShort { needed, er, ei } => write!(
                f,
                "eigenvalue outputs need {} slots, got er: {}, ei: {}",
                needed, er, ei
            ),
            EigenvalueError::BatchMismatch { h, er, ei } => write!(
                f,
                "batch sizes differ: h: {}, er: {}, ei: {}",
                h, er, ei
            ),
            EigenvalueError::NotConverged { iterations } => write!(
                f,
                "eigenvalues did not converge within {} iterations",
                iterations
            ),
        }
    }
}

impl std::error::Error for EigenvalueError {}

/// Computes all eigenvalues of a real upper Hessenberg matrix.
///
/// The matrix is overwritten. For m ≥ 3 the kernel repeatedly locates the
/// active (not yet deflated) window, applies one Francis double-shift sweep
/// to it with the Wilkinson shift of its trailing 2×2 block, and records
/// eigenvalues as they split off at the bottom of the window. The matrix is
/// neither balanced nor scaled beforehand.
///
/// # Arguments
///
/// * `h` - Input/output: m×m upper Hessenberg matrix, any strides. Entries
///   below the first subdiagonal must be zero. The content on exit is
///   scratch, except that the subdiagonal entry of each 2×2 block resolved
///   as a pair is zeroed to mark it converged (this is what `restart` reads).
/// * `er` - Output: real parts, at least m slots, any stride
/// * `ei` - Output: imaginary parts, at least m slots, any stride
/// * `options` - Iteration budget, tolerance and restart flag
///
/// # Returns
///
/// * `Ok(())` - Every eigenvalue was found
/// * `Err(EigenvalueError::NotConverged)` - The budget ran out; slots found
///   so far are kept, the others still hold NaN in `er`
/// * `Err(EigenvalueError::NotSquare | OutputTooShort)` - Nothing was touched
///
/// # Examples
///
/// ```
/// use batched_eigen::eigen::{serial_eigenvalue, EigenvalueOptions};
/// use ndarray::{arr2, Array1};
///
/// // companion matrix of (x - 3)(x² - 2x + 5): eigenvalues 3 and 1 ± 2i
/// let mut h = arr2(&[[5.0, -11.0, 15.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
/// let mut er = Array1::zeros(3);
/// let mut ei = Array1::zeros(3);
///
/// serial_eigenvalue(h.view_mut(), er.view_mut(), ei.view_mut(), &EigenvalueOptions::default())
///     .unwrap();
///
/// let mut found: Vec<(f64, f64)> = er.iter().copied().zip(ei.iter().copied()).collect();
/// found.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
/// assert!((found[0].0 - 1.0).abs() < 1e-8 && (found[0].1 + 2.0).abs() < 1e-8);
/// assert!((found[1].0 - 3.0).abs() < 1e-8 && found[1].1.abs() < 1e-8);
/// assert!((found[2].0 - 1.0).abs() < 1e-8 && (found[2].1 - 2.0).abs() < 1e-8);
/// ```
///
/// # Algorithm
///
/// 1. **Window scan**: the first subdiagonal entry with
///    `|H[k,k-1]| > tol * |H[k,k]|` opens the window at `k - 1`; the next
///    one failing that test closes it.
/// 2. **Convergence**: a window of a single row means every eigenvalue has
///    split off.
/// 3. **Shift and sweep**: a 2×2 window is solved directly. Larger windows
///    get one Francis sweep, after which the bottom entry is accepted as a
///    real eigenvalue if `H[e-1,e-2]` is negligible, or the trailing 2×2 is
///    accepted as a pair if `H[e-2,e-3]` is negligible against the sum of
///    the two trailing diagonal entries.
/// 4. **Fallback**: once everything has converged, every slot still holding
///    NaN is a 1×1 block isolated by the scan and takes its diagonal entry.
///
/// # Numerical Considerations
///
/// - The default tolerance is `1e5 * epsilon`, relative to the diagonal
///   entry next to the tested subdiagonal. Zero eigenvalues therefore
///   converge only when the subdiagonal becomes exactly zero.
/// - A NaN already present on the diagonal of the input is indistinguishable
///   from the "unset" sentinel; the result is unspecified in that case.
/// - There are no exceptional shifts; matrices on which the Francis
///   iteration stagnates exhaust the budget and report `NotConverged`.
///
/// # Panics
///
/// Panics if `options.restart` is set for m ≤ 2. Those sizes are always
/// recomputed from scratch, so a restart request there is a caller bug.
pub fn serial_eigenvalue<T: Real>(
    mut h: ArrayViewMut2<'_, T>,
    mut er: ArrayViewMut1<'_, T>,
    mut ei: ArrayViewMut1<'_, T>,
    options: &EigenvalueOptions<T>,
) -> Result<(), EigenvalueError> {
    let m = h.nrows();
    if h.ncols() != m {
        return Err(EigenvalueError::NotSquare {
            rows: m,
            cols: h.ncols(),
        });
    }
    if er.len() < m || ei.len() < m {
        return Err(EigenvalueError::OutputTooShort {
            needed: m,
            er: er.len(),
            ei: ei.len(),
        });
    }

    let zero = T::zero();
    let tol = T::resolve_tolerance(options.tolerance);

    if options.restart {
        assert!(
            m > 2,
            "restart option cannot be used for m = {}; matrices with m <= 2 are always recomputed",
            m
        );
    } else {
        er.slice_mut(s![..m]).fill(T::nan());
    }

    match m {
        0 => Ok(()),
        1 => {
            er[0] = h[[0, 0]];
            ei[0] = zero;
            Ok(())
        }
        2 => {
            let (lambda1, lambda2, _) = wilkinson_shift(h[[0, 0]], h[[0, 1]], h[[1, 0]], h[[1, 1]]);
            store(&mut er, &mut ei, 0, lambda1);
            store(&mut er, &mut ei, 1, lambda2);
            Ok(())
        }
        _ => francis_eigenvalues(&mut h, &mut er, &mut ei, tol, options.max_iteration),
    }
}

/// Same as [`serial_eigenvalue`], writing into one interleaved complex
/// vector instead of separate real and imaginary parts.
///
/// # Examples
///
/// ```
/// use batched_eigen::eigen::{serial_eigenvalue_complex, EigenvalueOptions};
/// use ndarray::{arr2, Array1};
/// use num_complex::Complex64;
///
/// let mut h = arr2(&[[0.0, -1.0], [1.0, 0.0]]);
/// let mut e = Array1::from_elem(2, Complex64::new(0.0, 0.0));
/// serial_eigenvalue_complex(h.view_mut(), e.view_mut(), &EigenvalueOptions::default()).unwrap();
/// assert_eq!(e[0], Complex64::new(0.0, 1.0));
/// assert_eq!(e[1], Complex64::new(0.0, -1.0));
/// ```
pub fn serial_eigenvalue_complex<T: Real>(
    h: ArrayViewMut2<'_, T>,
    e: ArrayViewMut1<'_, Complex<T>>,
    options: &EigenvalueOptions<T>,
) -> Result<(), EigenvalueError> {
    let Complex { re, im } = e.split_complex();
    serial_eigenvalue(h, re, im, options)
}

#[inline]
fn store<T: Real>(
    er: &mut ArrayViewMut1<'_, T>,
    ei: &mut ArrayViewMut1<'_, T>,
    i: usize,
    lambda: Complex<T>,
) {
    er[i] = lambda.re;
    ei[i] = lambda.im;
}

/// Returns `[mbeg, mend)`, the first run of coupled rows.
///
/// `mbeg >= mend - 1` means no subdiagonal entry is significant. A tie at
/// the threshold, such as a zero subdiagonal next to a zero diagonal,
/// closes the window.
fn active_window<T: Real>(h: &ArrayViewMut2<'_, T>, tol: T) -> (usize, usize) {
    let m = h.nrows();
    let coupled = |k: usize| h[[k, k - 1]].abs() > tol * h[[k, k]].abs();

    let mut cnt = 1;
    while cnt < m && !coupled(cnt) {
        cnt += 1;
    }
    let mbeg = cnt - 1;
    while cnt < m && coupled(cnt) {
        cnt += 1;
    }
    (mbeg, cnt)
}

fn francis_eigenvalues<T: Real>(
    h: &mut ArrayViewMut2<'_, T>,
    er: &mut ArrayViewMut1<'_, T>,
    ei: &mut ArrayViewMut1<'_, T>,
    tol: T,
    max_iteration: usize,
) -> Result<(), EigenvalueError> {
    let m = h.nrows();
    let zero = T::zero();

    let mut iter = 0;
    let mut converge = false;
    while !converge && iter < max_iteration {
        let (mbeg, mend) = active_window(h, tol);

        if mbeg + 1 < mend {
            let (lambda1, lambda2, is_complex) = wilkinson_shift(
                h[[mend - 2, mend - 2]],
                h[[mend - 2, mend - 1]],
                h[[mend - 1, mend - 2]],
                h[[mend - 1, mend - 1]],
            );

            if mend - mbeg == 2 {
                store(er, ei, mbeg, lambda1);
                store(er, ei, mbeg + 1, lambda2);
                h[[mend - 1, mend - 2]] = zero;
                trace!("iteration {}: 2x2 block at {} resolved", iter, mbeg);
            } else {
                francis_double_shift(
                    h.slice_mut(s![mbeg..mend, mbeg..mend]),
                    lambda1,
                    lambda2,
                    is_complex,
                );

                let val1 = h[[mend - 1, mend - 2]].abs();
                let val2 = h[[mend - 2, mend - 3]].abs();
                let ref1 = h[[mend - 1, mend - 1]].abs();
                let ref2 = h[[mend - 2, mend - 2]].abs();

                if val1 < tol * ref1 {
                    er[mend - 1] = h[[mend - 1, mend - 1]];
                    ei[mend - 1] = zero;
                    trace!("iteration {}: real eigenvalue at {}", iter, mend - 1);
                } else if val2 < tol * (ref1 + ref2) {
                    // the shifts predate the sweep; solve the swept block
                    let (lambda1, lambda2, _) = wilkinson_shift(
                        h[[mend - 2, mend - 2]],
                        h[[mend - 2, mend - 1]],
                        h[[mend - 1, mend - 2]],
                        h[[mend - 1, mend - 1]],
                    );
                    store(er, ei, mend - 1, lambda1);
                    store(er, ei, mend - 2, lambda2);
                    h[[mend - 1, mend - 2]] = zero;
                    h[[mend - 2, mend - 3]] = zero;
                    trace!("iteration {}: eigenvalue pair at {}", iter, mend - 2);
                }
            }
        } else {
            converge = true;
        }
        iter += 1;
    }

    if !converge {
        debug!(
            "{}x{} Hessenberg matrix did not converge within {} iterations",
            m, m, max_iteration
        );
        return Err(EigenvalueError::NotConverged { iterations: iter });
    }

    for i in 0..m {
        if er[i].is_nan() {
            er[i] = h[[i, i]];
            ei[i] = zero;
        }
    }
    Ok(())
}
