use num_traits::{Float, Zero};

use crate::traits::LinalgScalar;

use super::DynMatrix;

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: LinalgScalar> DynMatrix<T> {
    /// Frobenius norm (square root of sum of squared moduli).
    ///
    /// Accumulated with `hypot`, so it neither overflows for entries near
    /// `f64::MAX` nor underflows for denormal-scale matrices.
    ///
    /// ```
    /// use svdecomp::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        self.data
            .iter()
            .fold(<T::Real as Zero>::zero(), |acc, &x| x.lhypot(acc))
    }

    /// Squared Frobenius norm (sum of squared moduli).
    pub fn frobenius_norm_squared(&self) -> T::Real {
        self.data
            .iter()
            .fold(<T::Real as Zero>::zero(), |acc, &x| acc + x.mag2())
    }

    /// Largest element modulus (zero for an empty matrix).
    ///
    /// ```
    /// use svdecomp::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, -7.0, 3.0, 4.0]);
    /// assert_eq!(m.max_abs(), 7.0);
    /// ```
    pub fn max_abs(&self) -> T::Real {
        self.data
            .iter()
            .fold(<T::Real as Zero>::zero(), |acc, &x| Float::max(acc, x.modulus()))
    }
}
