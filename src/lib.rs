//! batched-eigen: eigenvalue kernels for small upper Hessenberg matrices
//!
//! The kernels operate in place on strided [`ndarray`] views and never
//! allocate, so one call can run inside any sequential unit of work,
//! including one worker of a batched dispatch over thousands of small
//! matrices.
//!
//! # Organization
//!
//! - `eigen`: The serial eigenvalue kernel (Francis double-shift QR with
//!   deflation and restart)
//! - `batched`: Runs the serial kernel over a stack of matrices, in
//!   parallel with the `rayon` feature
//! - `francis`: One implicit double-shift sweep (Householder bulge chase)
//! - `qr`: One explicit single-shift QR step (Givens rotations)
//! - `wilkinson`: Eigenvalues of a 2×2 block, used as shifts
//! - `blas`: Vector update `z = a x + b y + c z`
//! - `scalar`: The real scalar trait the kernels are generic over
//!
//! # Example
//!
//! ```
//! use batched_eigen::{serial_eigenvalue, EigenvalueOptions};
//! use ndarray::{arr2, Array1};
//!
//! let mut h = arr2(&[[2.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 9.0]]);
//! let mut er = Array1::zeros(3);
//! let mut ei = Array1::zeros(3);
//! serial_eigenvalue(h.view_mut(), er.view_mut(), ei.view_mut(), &EigenvalueOptions::default())
//!     .unwrap();
//! assert_eq!(er.to_vec(), vec![2.0, 5.0, 9.0]);
//! assert_eq!(ei.to_vec(), vec![0.0, 0.0, 0.0]);
//! ```

pub mod batched;
pub mod blas;
pub mod eigen;
pub mod francis;
pub mod qr;
pub mod scalar;
pub mod wilkinson;

pub use batched::{batched_eigenvalue, batched_eigenvalue_complex, BatchReport};
pub use eigen::{serial_eigenvalue, serial_eigenvalue_complex, EigenvalueError, EigenvalueOptions};
pub use scalar::Real;
