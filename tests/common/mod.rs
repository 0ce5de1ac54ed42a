//! Shared helpers for the integration tests

#![allow(dead_code)]

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::Rng;

/// Random m×m upper Hessenberg matrix with entries in [-1, 1] and `shift`
/// added to the diagonal. With `shift > m + 1` every eigenvalue has a
/// positive real part (Gershgorin), so none of them sits at zero.
pub fn random_hessenberg(rng: &mut StdRng, m: usize, shift: f64) -> Array2<f64> {
    let mut h = Array2::zeros((m, m));
    for i in 0..m {
        for j in i.saturating_sub(1)..m {
            h[[i, j]] = rng.random_range(-1.0..1.0);
        }
        h[[i, i]] += shift;
    }
    h
}

/// Determinant by Gaussian elimination with partial pivoting.
pub fn complex_det(mut a: Array2<Complex64>) -> Complex64 {
    let n = a.nrows();
    let mut det = Complex64::new(1.0, 0.0);
    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| a[[i, k]].norm().partial_cmp(&a[[j, k]].norm()).unwrap())
            .unwrap();
        if a[[pivot, k]].norm() == 0.0 {
            return Complex64::new(0.0, 0.0);
        }
        if pivot != k {
            for j in 0..n {
                a.swap([k, j], [pivot, j]);
            }
            det = -det;
        }
        let akk = a[[k, k]];
        det *= akk;
        for i in k + 1..n {
            let factor = a[[i, k]] / akk;
            for j in k..n {
                let akj = a[[k, j]];
                a[[i, j]] -= factor * akj;
            }
        }
    }
    det
}

/// `det(H - λ I)` for a real `H` and complex `λ`.
pub fn shifted_det(h: &Array2<f64>, lambda: Complex64) -> Complex64 {
    let n = h.nrows();
    let mut a = h.mapv(|v| Complex64::new(v, 0.0));
    for i in 0..n {
        a[[i, i]] -= lambda;
    }
    complex_det(a)
}

pub fn eigenvalues(er: &Array1<f64>, ei: &Array1<f64>) -> Vec<Complex64> {
    er.iter()
        .zip(ei.iter())
        .map(|(&re, &im)| Complex64::new(re, im))
        .collect()
}

/// Eigenvalues sorted by real part, then imaginary part.
pub fn sorted_eigenvalues(er: &Array1<f64>, ei: &Array1<f64>) -> Vec<Complex64> {
    let mut v = eigenvalues(er, ei);
    v.sort_by(|a, b| {
        a.re.partial_cmp(&b.re)
            .unwrap()
            .then(a.im.partial_cmp(&b.im).unwrap())
    });
    v
}

/// Checks that every non-real eigenvalue is followed or preceded by its
/// conjugate in the adjacent slot.
pub fn assert_conjugate_pairs_adjacent(er: &Array1<f64>, ei: &Array1<f64>) {
    let m = er.len();
    let mut i = 0;
    while i < m {
        if ei[i] == 0.0 {
            i += 1;
            continue;
        }
        assert!(i + 1 < m, "unpaired complex eigenvalue at slot {}", i);
        assert_eq!(er[i], er[i + 1], "pair at {} has different real parts", i);
        assert_eq!(ei[i], -ei[i + 1], "pair at {} is not conjugate", i);
        i += 2;
    }
}
