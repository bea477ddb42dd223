use alloc::vec;
use alloc::vec::Vec;

use num_traits::{Float, One, Zero};

use super::DynMatrix;
use crate::linalg::{svdecomp, LinalgError, SolveStats};
use crate::traits::LinalgScalar;

// ── DynSvd ─────────────────────────────────────────────────────────

/// Singular value decomposition of a dynamically-sized matrix.
///
/// Holds thin U (M×K), singular values σ (length K = min(M,N), sorted
/// descending) and thin V^H (K×N) such that `A = U · diag(σ) · V^H`.
/// Tall, wide and square inputs are all decomposed directly; nothing is
/// transposed.
///
/// # Example
///
/// ```
/// use svdecomp::DynMatrix;
///
/// let a = DynMatrix::from_rows(3, 2, &[
///     1.0_f64, 0.0,
///     0.0, 1.0,
///     0.0, 0.0,
/// ]);
/// let svd = a.svd();
/// assert_eq!(svd.u().nrows(), 3);  // M
/// assert_eq!(svd.u().ncols(), 2);  // min(M,N)
/// assert_eq!(svd.vt().nrows(), 2); // min(M,N)
/// assert_eq!(svd.vt().ncols(), 2); // N
/// assert!((svd.singular_values()[0] - 1.0).abs() < 1e-10);
/// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DynSvd<T: LinalgScalar> {
    u: DynMatrix<T>,
    singular_values: Vec<T::Real>,
    vt: DynMatrix<T>,
    stats: SolveStats,
}

impl<T: LinalgScalar> DynSvd<T> {
    /// Decompose `a`.
    ///
    /// An empty matrix gives empty factors (`M×0`, `0×N`).
    pub fn new(a: &DynMatrix<T>) -> Self {
        let m = a.nrows();
        let n = a.ncols();
        let k = m.min(n);

        let mut u = DynMatrix::zeros(m, k, T::zero());
        let mut singular_values = vec![<T::Real as Zero>::zero(); k];
        let mut vt = DynMatrix::zeros(k, n, T::zero());
        if k == 0 {
            return Self {
                u,
                singular_values,
                vt,
                stats: SolveStats::default(),
            };
        }

        let mut work = a.clone();
        let stats = svdecomp(
            &mut work,
            Some(&mut u),
            Some(&mut singular_values[..]),
            Some(&mut vt),
        );
        Self {
            u,
            singular_values,
            vt,
            stats,
        }
    }

    /// Compute only the singular values (faster, no U/V accumulation).
    pub fn singular_values_only(a: &DynMatrix<T>) -> Vec<T::Real> {
        let k = a.nrows().min(a.ncols());
        let mut sigma = vec![<T::Real as Zero>::zero(); k];
        if k > 0 {
            let mut work = a.clone();
            svdecomp(&mut work, None, Some(&mut sigma[..]), None);
        }
        sigma
    }

    /// The singular values, sorted descending.
    #[inline]
    pub fn singular_values(&self) -> &[T::Real] {
        &self.singular_values
    }

    /// The left singular vectors U (M×K thin matrix, K = min(M,N)).
    /// Columns are the left singular vectors.
    #[inline]
    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    /// The right singular vectors V^H (K×N thin matrix, K = min(M,N)).
    /// Rows are the (conjugated) right singular vectors.
    #[inline]
    pub fn vt(&self) -> &DynMatrix<T> {
        &self.vt
    }

    /// Work counters of the bidiagonal solve.
    #[inline]
    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Numerical rank: number of singular values above `tol`.
    pub fn rank(&self, tol: T::Real) -> usize {
        self.singular_values.iter().filter(|&&s| s > tol).count()
    }

    /// Condition number: σ_max / σ_min.
    ///
    /// Returns infinity if the smallest singular value is zero, and one for an
    /// empty matrix.
    pub fn condition_number(&self) -> T::Real {
        match (self.singular_values.first(), self.singular_values.last()) {
            (Some(&s_max), Some(&s_min)) => {
                if s_min == <T::Real as Zero>::zero() {
                    <T::Real as Float>::infinity()
                } else {
                    s_max / s_min
                }
            }
            _ => <T::Real as One>::one(),
        }
    }

    /// Cutoff below which a singular value counts as zero:
    /// `ε · σ_max · max(M, N)`.
    pub fn default_tolerance(&self) -> T::Real {
        let dim = self.u.nrows().max(self.vt.ncols());
        let s_max = self
            .singular_values
            .first()
            .copied()
            .unwrap_or_else(<T::Real as Zero>::zero);
        T::lepsilon() * s_max * num_traits::cast(dim).unwrap_or_else(<T::Real as One>::one)
    }

    /// Moore–Penrose pseudo-inverse (N×M); singular values `≤ tol` are
    /// treated as zero.
    ///
    /// ```
    /// use svdecomp::DynMatrix;
    ///
    /// // rank one: A⁺ = Aᵀ / ‖A‖²
    /// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
    /// let p = a.svd().pseudo_inverse(1e-12);
    /// assert!((p[(1, 0)] - 2.0 / 25.0).abs() < 1e-14);
    /// ```
    pub fn pseudo_inverse(&self, tol: T::Real) -> DynMatrix<T> {
        let m = self.u.nrows();
        let n = self.vt.ncols();
        let mut p = DynMatrix::zeros(n, m, T::zero());
        for (k, &s) in self.singular_values.iter().enumerate() {
            if s <= tol {
                // sorted, the rest are smaller
                break;
            }
            let inv = T::from_real(<T::Real as One>::one() / s);
            for i in 0..n {
                let v = self.vt[(k, i)].conj() * inv;
                for j in 0..m {
                    p[(i, j)] = p[(i, j)] + v * self.u[(j, k)].conj();
                }
            }
        }
        p
    }

    /// Minimum-norm least-squares solution of `A X = B`.
    ///
    /// `B` is M×P, the result N×P. Singular values at or below
    /// [`default_tolerance`](Self::default_tolerance) are dropped.
    ///
    /// ```
    /// use svdecomp::DynMatrix;
    ///
    /// // x + y = 2 has the minimum-norm solution (1, 1)
    /// let a = DynMatrix::from_rows(1, 2, &[1.0_f64, 1.0]);
    /// let b = DynMatrix::from_rows(1, 1, &[2.0]);
    /// let x = a.svd().solve(&b).unwrap();
    /// assert!((x[(0, 0)] - 1.0).abs() < 1e-14);
    /// assert!((x[(1, 0)] - 1.0).abs() < 1e-14);
    /// ```
    pub fn solve(&self, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        let m = self.u.nrows();
        if b.nrows() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: m,
                got: b.nrows(),
            });
        }
        Ok(self.pseudo_inverse(self.default_tolerance()) * b)
    }

    /// Inverse of a square, non-singular matrix.
    ///
    /// Fails with [`LinalgError::Singular`] when
    /// `σ_min ≤ ε · σ_max · N`.
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        let m = self.u.nrows();
        let n = self.vt.ncols();
        if m != n {
            return Err(LinalgError::NotSquare { rows: m, cols: n });
        }
        let tol = self.default_tolerance();
        if let Some(&s_min) = self.singular_values.last() {
            if s_min <= tol {
                return Err(LinalgError::Singular);
            }
        }
        Ok(self.pseudo_inverse(tol))
    }

    /// `U · diag(σ) · V^H`.
    pub fn reconstruct(&self) -> DynMatrix<T> {
        let m = self.u.nrows();
        let n = self.vt.ncols();
        let mut a = DynMatrix::zeros(m, n, T::zero());
        for (k, &s) in self.singular_values.iter().enumerate() {
            let s = T::from_real(s);
            for i in 0..m {
                let us = self.u[(i, k)] * s;
                for j in 0..n {
                    a[(i, j)] = a[(i, j)] + us * self.vt[(k, j)];
                }
            }
        }
        a
    }
}

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: LinalgScalar> DynMatrix<T> {
    /// Singular value decomposition.
    ///
    /// Works for any M×N matrix (tall or wide).
    ///
    /// ```
    /// use svdecomp::DynMatrix;
    /// let a = DynMatrix::from_rows(3, 2, &[
    ///     1.0_f64, 0.0,
    ///     0.0, 1.0,
    ///     0.0, 0.0,
    /// ]);
    /// let svd = a.svd();
    /// assert!((svd.singular_values()[0] - 1.0).abs() < 1e-10);
    /// ```
    pub fn svd(&self) -> DynSvd<T> {
        DynSvd::new(self)
    }

    /// Singular values only (no U/V computation).
    ///
    /// ```
    /// use svdecomp::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
    /// let sv = a.singular_values();
    /// assert!((sv[0] - 4.0).abs() < 1e-10);
    /// assert!((sv[1] - 3.0).abs() < 1e-10);
    /// ```
    pub fn singular_values(&self) -> Vec<T::Real> {
        DynSvd::singular_values_only(self)
    }
}
