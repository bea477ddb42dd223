use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use svdecomp::{svdecomp, svdecomp_with_workspace, DynMatrix, SvdWorkspace};

const TOL: f64 = 1e-10;

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> DynMatrix<f64> {
    let data: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    DynMatrix::from_vec(rows, cols, data)
}

struct Factors {
    l: DynMatrix<f64>,
    s: Vec<f64>,
    r: DynMatrix<f64>,
}

fn decompose(a: &DynMatrix<f64>) -> Factors {
    let n = a.nrows().min(a.ncols());
    let mut work = a.clone();
    let mut l = DynMatrix::zeros(a.nrows(), n, 0.0);
    let mut r = DynMatrix::zeros(n, a.ncols(), 0.0);
    let mut s = vec![0.0; n];
    svdecomp(&mut work, Some(&mut l), Some(&mut s[..]), Some(&mut r));
    Factors { l, s, r }
}

/// Reconstruction, orthonormality and ordering.
fn check_factors(a: &DynMatrix<f64>, fac: &Factors, label: &str) {
    let n = fac.s.len();
    let back = &(&fac.l * &DynMatrix::from_diagonal(&fac.s)) * &fac.r;
    let norm = a.frobenius_norm();
    let err = (&back - a).frobenius_norm();
    assert!(
        err <= TOL * norm,
        "{}: reconstruction error {} (norm {})",
        label,
        err,
        norm
    );

    let id = DynMatrix::eye(n, 0.0);
    let ltl = fac.l.transpose() * &fac.l;
    let rrt = &fac.r * fac.r.transpose();
    assert!(
        (&ltl - &id).frobenius_norm() < TOL,
        "{}: LᵀL off identity by {}",
        label,
        (&ltl - &id).frobenius_norm()
    );
    assert!(
        (&rrt - &id).frobenius_norm() < TOL,
        "{}: RRᵀ off identity by {}",
        label,
        (&rrt - &id).frobenius_norm()
    );

    for k in 0..n {
        assert!(fac.s[k] >= 0.0, "{}: σ[{}] = {}", label, k, fac.s[k]);
        if k + 1 < n {
            assert!(fac.s[k] >= fac.s[k + 1], "{}: σ not descending at {}", label, k);
        }
    }
}

#[test]
fn random_shapes() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let shapes = [
        (1, 1),
        (1, 7),
        (7, 1),
        (2, 2),
        (3, 3),
        (10, 10),
        (17, 5),
        (5, 17),
        (40, 40),
        (64, 33),
        (33, 64),
        (120, 80),
        (200, 200),
    ];
    for &(rows, cols) in &shapes {
        let a = random_matrix(&mut rng, rows, cols);
        let fac = decompose(&a);
        check_factors(&a, &fac, &format!("{}x{}", rows, cols));
    }
}

#[test]
fn graded_rows() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut a = random_matrix(&mut rng, 30, 20);
    for i in 0..30 {
        let scale = 10f64.powi(-(i as i32) / 2);
        for j in 0..20 {
            a[(i, j)] *= scale;
        }
    }
    let fac = decompose(&a);
    check_factors(&a, &fac, "graded");
}

#[test]
fn extreme_magnitudes() {
    let mut rng = StdRng::seed_from_u64(11);
    let base = random_matrix(&mut rng, 12, 9);
    for &scale in &[1e-150, 1e150] {
        let a = base.scale_real(scale);
        let fac = decompose(&a);
        check_factors(&a, &fac, &format!("scale {:e}", scale));

        let reference = decompose(&base);
        for (s, r) in fac.s.iter().zip(reference.s.iter()) {
            assert!((s / scale - r).abs() < 1e-12, "{} vs {}", s / scale, r);
        }
    }
}

#[test]
fn clustered_singular_values() {
    let mut rng = StdRng::seed_from_u64(3);
    let q1 = decompose(&random_matrix(&mut rng, 25, 25)).l;
    let q2 = decompose(&random_matrix(&mut rng, 25, 25)).r;

    let sigma: Vec<f64> = (0..25)
        .map(|k| match k {
            0..=9 => 2.0,
            10..=19 => 1.0 + 1e-12 * k as f64,
            _ => 1e-3,
        })
        .collect();
    let a = &(&q1 * &DynMatrix::from_diagonal(&sigma)) * &q2;
    let fac = decompose(&a);
    check_factors(&a, &fac, "clustered");

    let mut expected = sigma.clone();
    expected.sort_by(|x, y| y.partial_cmp(x).unwrap());
    for (k, (s, e)) in fac.s.iter().zip(expected.iter()).enumerate() {
        assert!((s - e).abs() < 1e-12, "σ[{}] = {}, expected {}", k, s, e);
    }
}

#[test]
fn transpose_has_same_singular_values() {
    let mut rng = StdRng::seed_from_u64(19);
    let a = random_matrix(&mut rng, 23, 14);
    let s = a.singular_values();
    let st = a.transpose().singular_values();
    for (x, y) in s.iter().zip(st.iter()) {
        assert!((x - y).abs() < 1e-12, "{} vs {}", x, y);
    }
}

#[test]
fn rank_deficient_product() {
    let mut rng = StdRng::seed_from_u64(23);
    // rank 4
    let a = random_matrix(&mut rng, 30, 4) * random_matrix(&mut rng, 4, 25);
    let fac = decompose(&a);
    check_factors(&a, &fac, "rank 4");
    assert!(fac.s[3] > 1e-8);
    for k in 4..25 {
        assert!(fac.s[k] < 1e-12 * fac.s[0], "σ[{}] = {}", k, fac.s[k]);
    }
    assert_eq!(a.svd().rank(a.svd().default_tolerance()), 4);
}

#[test]
fn matches_nalgebra() {
    let mut rng = StdRng::seed_from_u64(29);
    for &(rows, cols) in &[(9, 6), (6, 9), (16, 16)] {
        let a = random_matrix(&mut rng, rows, cols);
        let ours = a.singular_values();

        let na = nalgebra::DMatrix::from_row_slice(rows, cols, a.as_slice());
        let mut theirs: Vec<f64> = na.singular_values().iter().copied().collect();
        theirs.sort_by(|x, y| y.partial_cmp(x).unwrap());

        assert_eq!(ours.len(), theirs.len());
        for (x, y) in ours.iter().zip(theirs.iter()) {
            assert!((x - y).abs() < 1e-12, "{}x{}: {} vs {}", rows, cols, x, y);
        }
    }
}

#[test]
fn workspace_across_sizes() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut ws = SvdWorkspace::new(50, 50);
    for &(rows, cols) in &[(50, 50), (20, 45), (45, 20), (3, 3)] {
        let a = random_matrix(&mut rng, rows, cols);
        let n = rows.min(cols);
        let mut work = a.clone();
        let mut l = DynMatrix::zeros(rows, n, 0.0);
        let mut r = DynMatrix::zeros(n, cols, 0.0);
        let mut s = vec![0.0; n];
        let stats = svdecomp_with_workspace(
            &mut work,
            Some(&mut l),
            Some(&mut s[..]),
            Some(&mut r),
            &mut ws,
        );
        assert!(stats.swaps <= n);
        check_factors(&a, &Factors { l, s, r }, &format!("ws {}x{}", rows, cols));
    }
}

#[test]
fn least_squares_residual_is_orthogonal() {
    let mut rng = StdRng::seed_from_u64(37);
    let a = random_matrix(&mut rng, 40, 6);
    let b = random_matrix(&mut rng, 40, 2);
    let x = a.svd().solve(&b).unwrap();
    let residual = &(&a * &x) - &b;
    // normal equations: Aᵀ(Ax − b) = 0
    let g = a.transpose() * &residual;
    assert!(g.max_abs() < 1e-12, "Aᵀr = {}", g.max_abs());
}
