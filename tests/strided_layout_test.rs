//! Layout independence of the eigenvalue kernel
//!
//! The kernel indexes through strides only, so every storage order of the
//! same logical matrix must give bit-identical eigenvalues.

mod common;

use batched_eigen::{serial_eigenvalue, serial_eigenvalue_complex, EigenvalueOptions};
use common::random_hessenberg;
use ndarray::{s, Array1, Array2, ShapeBuilder};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;

const M: usize = 7;

fn sample() -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(0xface);
    random_hessenberg(&mut rng, M, 12.0)
}

fn reference() -> (Array1<f64>, Array1<f64>) {
    let mut h = sample();
    let mut er = Array1::zeros(M);
    let mut ei = Array1::zeros(M);
    serial_eigenvalue(h.view_mut(), er.view_mut(), ei.view_mut(), &EigenvalueOptions::default())
        .unwrap();
    (er, ei)
}

#[test]
fn test_column_major_matrix() {
    let (er_ref, ei_ref) = reference();

    let mut h = Array2::zeros((M, M).f());
    h.assign(&sample());
    let mut er = Array1::zeros(M);
    let mut ei = Array1::zeros(M);
    serial_eigenvalue(h.view_mut(), er.view_mut(), ei.view_mut(), &EigenvalueOptions::default())
        .unwrap();

    assert_eq!(er, er_ref);
    assert_eq!(ei, ei_ref);
}

#[test]
fn test_stepped_subview_leaves_gaps_alone() {
    let (er_ref, ei_ref) = reference();

    let mut big = Array2::from_elem((2 * M, 3 * M), -99.0);
    big.slice_mut(s![..;2, ..;3]).assign(&sample());
    let mut er = Array1::zeros(M);
    let mut ei = Array1::zeros(M);
    serial_eigenvalue(
        big.slice_mut(s![..;2, ..;3]),
        er.view_mut(),
        ei.view_mut(),
        &EigenvalueOptions::default(),
    )
    .unwrap();

    assert_eq!(er, er_ref);
    assert_eq!(ei, ei_ref);
    for ((i, j), &v) in big.indexed_iter() {
        if i % 2 != 0 || j % 3 != 0 {
            assert_eq!(v, -99.0, "gap entry ({}, {}) was written", i, j);
        }
    }
}

#[test]
fn test_negative_strides() {
    let (er_ref, ei_ref) = reference();

    let mut storage = Array2::zeros((M, M));
    storage.slice_mut(s![..;-1, ..;-1]).assign(&sample());
    let mut er = Array1::zeros(M);
    let mut ei = Array1::zeros(M);
    serial_eigenvalue(
        storage.slice_mut(s![..;-1, ..;-1]),
        er.view_mut(),
        ei.view_mut(),
        &EigenvalueOptions::default(),
    )
    .unwrap();

    assert_eq!(er, er_ref);
    assert_eq!(ei, ei_ref);
}

#[test]
fn test_strided_outputs() {
    let (er_ref, ei_ref) = reference();

    let mut h = sample();
    let mut out = Array2::from_elem((M, 4), 5.0);
    {
        let (mut left, mut right) = out.view_mut().split_at(ndarray::Axis(1), 2);
        serial_eigenvalue(
            h.view_mut(),
            left.column_mut(1),
            right.column_mut(0),
            &EigenvalueOptions::default(),
        )
        .unwrap();
    }

    assert_eq!(out.column(1), er_ref);
    assert_eq!(out.column(2), ei_ref);
    assert!(out.column(0).iter().all(|&v| v == 5.0));
    assert!(out.column(3).iter().all(|&v| v == 5.0));
}

#[test]
fn test_reversed_output_slots() {
    let (er_ref, ei_ref) = reference();

    let mut h = sample();
    let mut er = Array1::zeros(M);
    let mut ei = Array1::zeros(M);
    serial_eigenvalue(
        h.view_mut(),
        er.slice_mut(s![..;-1]),
        ei.slice_mut(s![..;-1]),
        &EigenvalueOptions::default(),
    )
    .unwrap();

    assert_eq!(er.slice(s![..;-1]), er_ref);
    assert_eq!(ei.slice(s![..;-1]), ei_ref);
}

#[test]
fn test_interleaved_complex_output() {
    let (er_ref, ei_ref) = reference();

    let mut h = sample();
    let mut e = Array1::from_elem(M, Complex64::new(0.0, 0.0));
    serial_eigenvalue_complex(h.view_mut(), e.view_mut(), &EigenvalueOptions::default()).unwrap();

    for i in 0..M {
        assert_eq!(e[i].re, er_ref[i]);
        assert_eq!(e[i].im, ei_ref[i]);
    }
}
