//! Element and matrix-access traits.
//!
//! [`LinalgScalar`] carries the real/complex split the decomposition needs;
//! [`MatrixRef`] / [`MatrixMut`] let it work on any dense container.

use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point elements.
///
/// The bidiagonal solver, Givens rotations and singular values all live in
/// this type. Implies `LinalgScalar<Real = Self>` since real floats are their
/// own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Element type of a matrix that can be decomposed.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). The Householder reflectors are built in `Self`; everything
/// after bidiagonalization happens in `Self::Real`, with the phase of complex
/// entries absorbed into the reflectors.
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Squared magnitude `|z|²`.
    fn mag2(self) -> Self::Real;

    /// `hypot(acc, |self|)` without forming `|self|²`.
    ///
    /// Accumulating a norm this way cannot overflow or underflow in the
    /// intermediate squares.
    fn lhypot(self, acc: Self::Real) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;
}

/// Concrete impls for real floats.
macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn mag2(self) -> $t { self * self }
                #[inline] fn lhypot(self, acc: $t) -> $t { Float::hypot(acc, self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn mag2(self) -> T {
        self.norm_sqr()
    }

    #[inline]
    fn lhypot(self, acc: T) -> T {
        acc.hypot(self.re).hypot(self.im)
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }
}

/// Read-only access to a matrix-like type.
///
/// The decomposition routines only ever address elements through this trait,
/// so any dense container (row-major, column-major, strided view) can be
/// decomposed in place.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling the in-place
/// Householder reduction and the unrolling of reflectors into the outputs.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_hypot_accumulates() {
        let mut acc = 0.0_f64;
        for x in [3.0_f64, -4.0, 12.0] {
            acc = x.lhypot(acc);
        }
        assert!((acc - 13.0).abs() < 1e-12);
    }

    #[test]
    fn real_hypot_no_overflow() {
        let big = 1e300_f64;
        let acc = big.lhypot(big);
        assert!(acc.is_finite());
        assert!((acc / big - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn real_identities() {
        assert_eq!((-2.5_f64).conj(), -2.5);
        assert_eq!((-2.5_f64).re(), -2.5);
        assert_eq!((-2.5_f64).modulus(), 2.5);
        assert_eq!((-2.5_f64).mag2(), 6.25);
        assert_eq!(f64::from_real(1.5), 1.5);
    }

    #[cfg(feature = "complex")]
    #[test]
    fn complex_ops() {
        let z = Complex::new(3.0_f64, -4.0);
        assert!((z.modulus() - 5.0).abs() < 1e-12);
        assert!((z.mag2() - 25.0).abs() < 1e-12);
        assert_eq!(LinalgScalar::conj(z), Complex::new(3.0, 4.0));
        assert_eq!(z.re(), 3.0);
        assert!((z.lhypot(12.0) - 13.0).abs() < 1e-12);
        assert_eq!(Complex::<f64>::from_real(2.0), Complex::new(2.0, 0.0));
    }
}
