#![cfg(feature = "complex")]

use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use svdecomp::{svdecomp, DynMatrix};

type C = Complex<f64>;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

const TOL: f64 = 1e-10;

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> DynMatrix<C> {
    let data: Vec<C> = (0..rows * cols)
        .map(|_| c(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    DynMatrix::from_vec(rows, cols, data)
}

fn real_diagonal(s: &[f64]) -> DynMatrix<C> {
    let d: Vec<C> = s.iter().map(|&x| c(x, 0.0)).collect();
    DynMatrix::from_diagonal(&d)
}

fn check_unitary_factors(a: &DynMatrix<C>, label: &str) -> Vec<f64> {
    let (rows, cols) = (a.nrows(), a.ncols());
    let n = rows.min(cols);
    let mut work = a.clone();
    let mut l = DynMatrix::zeros(rows, n, c(0.0, 0.0));
    let mut r = DynMatrix::zeros(n, cols, c(0.0, 0.0));
    let mut s = vec![0.0; n];
    svdecomp(&mut work, Some(&mut l), Some(&mut s[..]), Some(&mut r));

    let back = &(&l * &real_diagonal(&s)) * &r;
    let err = (&back - a).frobenius_norm();
    assert!(
        err <= TOL * a.frobenius_norm(),
        "{}: reconstruction error {}",
        label,
        err
    );

    let id = DynMatrix::eye(n, c(0.0, 0.0));
    let lhl = l.conj_transpose() * &l;
    let rrh = &r * r.conj_transpose();
    assert!((&lhl - &id).frobenius_norm() < TOL, "{}: LᴴL", label);
    assert!((&rrh - &id).frobenius_norm() < TOL, "{}: RRᴴ", label);

    for k in 0..n {
        assert!(s[k] >= 0.0);
        if k + 1 < n {
            assert!(s[k] >= s[k + 1], "{}: σ not descending at {}", label, k);
        }
    }
    s
}

#[test]
fn complex_random_shapes() {
    let mut rng = StdRng::seed_from_u64(0xc0ffee);
    for &(rows, cols) in &[(1, 1), (2, 2), (6, 3), (3, 6), (20, 20), (50, 35), (35, 50), (100, 100)] {
        let a = random_matrix(&mut rng, rows, cols);
        check_unitary_factors(&a, &format!("{}x{}", rows, cols));
    }
}

#[test]
fn complex_phases_are_absorbed() {
    // diag(3i, -2, 1 + i)
    let a = DynMatrix::from_diagonal(&[c(0.0, 3.0), c(-2.0, 0.0), c(1.0, 1.0)]);
    let s = check_unitary_factors(&a, "phases");
    assert!((s[0] - 3.0).abs() < 1e-14);
    assert!((s[1] - 2.0).abs() < 1e-14);
    assert!((s[2] - 2.0_f64.sqrt()).abs() < 1e-14);
}

#[test]
fn real_matrix_as_complex() {
    let mut rng = StdRng::seed_from_u64(5);
    let data: Vec<f64> = (0..8 * 5).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let a = DynMatrix::from_vec(8, 5, data);
    let ac = DynMatrix::from_fn(8, 5, |i, j| c(a[(i, j)], 0.0));

    let s_real = a.singular_values();
    let s_complex = check_unitary_factors(&ac, "real as complex");
    for (x, y) in s_real.iter().zip(s_complex.iter()) {
        assert!((x - y).abs() < 1e-13, "{} vs {}", x, y);
    }
}

#[test]
fn complex_rotation_invariance() {
    // multiplying by a unit phase leaves the singular values alone
    let mut rng = StdRng::seed_from_u64(13);
    let a = random_matrix(&mut rng, 9, 7);
    let phase = Complex::from_polar(1.0, 0.7);
    let b = DynMatrix::from_fn(9, 7, |i, j| a[(i, j)] * phase);
    for (x, y) in a.singular_values().iter().zip(b.singular_values().iter()) {
        assert!((x - y).abs() < 1e-13);
    }
}

#[test]
fn complex_svd_wrapper() {
    let a = DynMatrix::from_rows(
        2,
        2,
        &[c(2.0, 1.0), c(1.0, -1.0), c(1.0, 0.0), c(3.0, 2.0)],
    );
    let svd = a.svd();
    let back = svd.reconstruct();
    assert!((&back - &a).max_abs() < 1e-14);

    let b = DynMatrix::from_rows(2, 1, &[c(5.0, 3.0), c(7.0, 4.0)]);
    let x = svd.solve(&b).unwrap();
    let ax = &a * &x;
    assert!((&ax - &b).max_abs() < 1e-13);

    let inv = svd.inverse().unwrap();
    let id = &a * &inv;
    assert!((&id - &DynMatrix::eye(2, c(0.0, 0.0))).max_abs() < 1e-13);
}

#[test]
fn complex_single_precision() {
    let a = DynMatrix::from_fn(5, 4, |i, j| {
        Complex::new(((i * 4 + j) as f32 * 0.4).sin(), ((i + j) as f32 * 0.9).cos())
    });
    let svd = a.svd();
    assert!((&svd.reconstruct() - &a).frobenius_norm() < 1e-5);
}
