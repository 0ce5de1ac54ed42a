//! Demonstration of the serial and batched Hessenberg eigenvalue kernels

use batched_eigen::{batched_eigenvalue, serial_eigenvalue, EigenvalueOptions};
use ndarray::{arr2, Array1, Array2, Array3};

fn main() {
    println!("=== Hessenberg Eigenvalue Demonstration ===\n");

    // Test 1: companion matrix of (x - 3)(x² - 2x + 5)
    println!("Test 1: Companion matrix with eigenvalues 3 and 1 ± 2i");
    let mut h = arr2(&[[5.0, -11.0, 15.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    println!("H =");
    println!("{}\n", h);

    let mut er = Array1::zeros(3);
    let mut ei = Array1::zeros(3);
    match serial_eigenvalue(
        h.view_mut(),
        er.view_mut(),
        ei.view_mut(),
        &EigenvalueOptions::default(),
    ) {
        Ok(()) => {
            for (re, im) in er.iter().zip(ei.iter()) {
                println!("  λ = {:>10.6} {:+.6}i", re, im);
            }
        }
        Err(e) => println!("  failed: {}", e),
    }
    println!();

    // Test 2: a batch of shifted tridiagonal matrices
    println!("Test 2: Batch of 4 tridiag(-1, 2 + k, -1) matrices of order 5");
    let (batch, m) = (4, 5);
    let mut stack = Array3::zeros((batch, m, m));
    for (k, mut mat) in stack.outer_iter_mut().enumerate() {
        for i in 0..m {
            mat[[i, i]] = 2.0 + k as f64;
            if i > 0 {
                mat[[i, i - 1]] = -1.0;
                mat[[i - 1, i]] = -1.0;
            }
        }
    }

    let mut er = Array2::zeros((batch, m));
    let mut ei = Array2::zeros((batch, m));
    match batched_eigenvalue(
        stack.view_mut(),
        er.view_mut(),
        ei.view_mut(),
        &EigenvalueOptions::default(),
    ) {
        Ok(report) => {
            println!(
                "  {} converged, {} failed",
                report.converged,
                report.failed.len()
            );
            for (k, row) in er.outer_iter().enumerate() {
                let mut values = row.to_vec();
                values.sort_by(|a, b| a.total_cmp(b));
                println!("  k = {}: {:.6?}", k, values);
            }
        }
        Err(e) => println!("  failed: {}", e),
    }
    println!();

    // Test 3: a tight iteration budget
    println!("Test 3: Same companion matrix with max_iteration = 1");
    let mut h = arr2(&[[5.0, -11.0, 15.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let mut er = Array1::zeros(3);
    let mut ei = Array1::zeros(3);
    let options = EigenvalueOptions::default().with_max_iteration(1);
    match serial_eigenvalue(h.view_mut(), er.view_mut(), ei.view_mut(), &options) {
        Ok(()) => println!("  converged"),
        Err(e) => println!("  {} (info = {}), partial er = {}", e, e.info(), er),
    }
}
