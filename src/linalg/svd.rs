//! Singular value decomposition of a general dense matrix.
//!
//! `A` (`rows×cols`, real or complex) is reduced to a real upper bidiagonal
//! by Householder reflectors stored in place, the bidiagonal is diagonalized
//! by [`bidiagonal_svd`], and the reflectors are replayed over the rotation
//! accumulators to form the thin factors:
//!
//! ```text
//! A = L · diag(σ) · R        L: rows×n,  σ: n,  R: n×cols,  n = min(rows, cols)
//! ```
//!
//! `L` has orthonormal columns, `R` orthonormal rows, and `σ` is sorted in
//! decreasing order. Note `R` is returned as is, not as `V`: for the usual
//! `A = U Σ Vᴴ` it is `Vᴴ`.

use alloc::vec;
use alloc::vec::Vec;

use num_traits::{One, Zero};

use super::bidiag::{bidiagonalize, unroll_left, unroll_right};
use super::bidiag_svd::{bidiagonal_svd, SolveStats};
use crate::traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef};

/// Reusable scratch for [`svdecomp_with_workspace`].
///
/// Holds the two `n×n` rotation accumulators, the bidiagonal and the
/// ordering permutation, for any problem with `min(rows, cols) <= n`.
///
/// ```
/// use svdecomp::{svdecomp_with_workspace, DynMatrix, SvdWorkspace};
///
/// let mut ws = SvdWorkspace::new(4, 4);
/// let mut sigma = [0.0_f64; 3];
/// for k in 1..4 {
///     let mut a = DynMatrix::from_fn(4, 3, |i, j| ((i + k) * (j + 1)) as f64);
///     svdecomp_with_workspace(&mut a, None, Some(&mut sigma[..]), None, &mut ws);
///     assert!(sigma[0] >= sigma[1] && sigma[1] >= sigma[2]);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SvdWorkspace<R> {
    left: Vec<R>,
    right: Vec<R>,
    d: Vec<R>,
    f: Vec<R>,
    perm: Vec<usize>,
    n: usize,
}

impl<R: FloatScalar> SvdWorkspace<R> {
    /// Scratch sized for `rows×cols` inputs (and anything smaller).
    pub fn new(rows: usize, cols: usize) -> Self {
        let n = rows.min(cols);
        Self {
            left: vec![R::zero(); n * n],
            right: vec![R::zero(); n * n],
            d: vec![R::zero(); n],
            f: vec![R::zero(); n],
            perm: vec![0; n],
            n,
        }
    }

    /// Largest `min(rows, cols)` this workspace can serve.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.n
    }
}

/// Decompose `a` into `L · diag(σ) · R`.
///
/// - `a`: `rows×cols`, destroyed (it holds the Householder vectors on return).
/// - `left`: `rows×n` left factor, or `None` to skip it.
/// - `sigma`: `n` singular values, decreasing and non-negative.
/// - `right`: `n×cols` right factor.
///
/// Skipped factors are not accumulated at all, so asking for singular values
/// only is much cheaper. Returns the work counters of the bidiagonal solve.
///
/// Panics on an empty `a` or mis-sized outputs.
///
/// ```
/// use svdecomp::{svdecomp, DynMatrix};
///
/// let a = DynMatrix::from_rows(3, 2, &[3.0_f64, 0.0, 0.0, -4.0, 0.0, 0.0]);
/// let mut work = a.clone();
/// let mut l = DynMatrix::zeros(3, 2, 0.0);
/// let mut r = DynMatrix::zeros(2, 2, 0.0);
/// let mut s = [0.0; 2];
/// svdecomp(&mut work, Some(&mut l), Some(&mut s[..]), Some(&mut r));
///
/// assert!((s[0] - 4.0).abs() < 1e-14);
/// assert!((s[1] - 3.0).abs() < 1e-14);
/// let back = &(&l * &svdecomp::DynMatrix::from_diagonal(&s)) * &r;
/// assert!((&back - &a).frobenius_norm() < 1e-14);
/// ```
pub fn svdecomp<T, A>(
    a: &mut A,
    left: Option<&mut dyn MatrixMut<T>>,
    sigma: Option<&mut [T::Real]>,
    right: Option<&mut dyn MatrixMut<T>>,
) -> SolveStats
where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
{
    let mut ws = SvdWorkspace::new(a.nrows(), a.ncols());
    svdecomp_with_workspace(a, left, sigma, right, &mut ws)
}

/// [`svdecomp`] with caller-owned scratch.
///
/// Panics if `ws` was sized for a smaller problem.
pub fn svdecomp_with_workspace<T, A>(
    a: &mut A,
    left: Option<&mut dyn MatrixMut<T>>,
    sigma: Option<&mut [T::Real]>,
    right: Option<&mut dyn MatrixMut<T>>,
    ws: &mut SvdWorkspace<T::Real>,
) -> SolveStats
where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
{
    let rows = a.nrows();
    let cols = a.ncols();
    assert!(
        rows > 0 && cols > 0,
        "svdecomp needs a non-empty matrix, got {}x{}",
        rows,
        cols
    );
    let n = rows.min(cols);

    if let Some(l) = left.as_deref() {
        assert!(
            l.nrows() == rows && l.ncols() == n,
            "left factor must be {}x{}, got {}x{}",
            rows,
            n,
            l.nrows(),
            l.ncols()
        );
    }
    if let Some(s) = sigma.as_deref() {
        assert_eq!(s.len(), n, "sigma must hold {} values", n);
    }
    if let Some(r) = right.as_deref() {
        assert!(
            r.nrows() == n && r.ncols() == cols,
            "right factor must be {}x{}, got {}x{}",
            n,
            cols,
            r.nrows(),
            r.ncols()
        );
    }
    assert!(
        ws.capacity() >= n,
        "workspace holds {} singular values, {}x{} needs {}",
        ws.capacity(),
        rows,
        cols,
        n
    );

    let SvdWorkspace {
        left: lbuf,
        right: rbuf,
        d,
        f,
        perm,
        ..
    } = ws;
    let d = &mut d[..n];
    let f = &mut f[..n];
    let perm = &mut perm[..n];
    let mut lacc = if left.is_some() {
        Some(identity(&mut lbuf[..n * n], n))
    } else {
        None
    };
    let mut racc = if right.is_some() {
        Some(identity(&mut rbuf[..n * n], n))
    } else {
        None
    };

    bidiagonalize(a, d, f, lacc.as_deref_mut());
    let stats = bidiagonal_svd(d, f, perm, lacc.as_deref_mut(), racc.as_deref_mut());

    if let Some(s) = sigma {
        s.copy_from_slice(d);
    }

    if let (Some(out), Some(acc)) = (left, lacc) {
        // the accumulator holds the left vectors as rows
        for i in 0..rows {
            for j in 0..n {
                *out.get_mut(i, j) = if i < n {
                    T::from_real(acc[j * n + i])
                } else {
                    T::zero()
                };
            }
        }
        unroll_left(&*a, out);
    }

    if let (Some(out), Some(acc)) = (right, racc) {
        for i in 0..n {
            for j in 0..cols {
                *out.get_mut(i, j) = if j < n {
                    T::from_real(acc[i * n + j])
                } else {
                    T::zero()
                };
            }
        }
        unroll_right(&*a, out);
    }

    stats
}

/// Overwrite `m` with the `n×n` identity.
fn identity<R: FloatScalar>(m: &mut [R], n: usize) -> &mut [R] {
    for (k, x) in m.iter_mut().enumerate() {
        *x = if k % (n + 1) == 0 {
            <R as One>::one()
        } else {
            <R as Zero>::zero()
        };
    }
    m
}

// ── Tests ───────────────────────────────────────────────────────────
