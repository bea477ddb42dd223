//! Householder reflectors stored in place in the matrix they reduce.
//!
//! A reflector built from the vector `x` is stored as `v = x / r - e₁` in the
//! very column (or row) that held `x`, where `r = ±‖x‖` carries the sign
//! opposite to `re(x₀)`. With `p = v₀` the transform is
//!
//! ```text
//! H = I + v vᴴ / p
//! ```
//!
//! which is unitary for real and complex `x` alike and maps `x` to `r e₁`.
//! Applying with `recover = true` uses `conj(p)` instead, i.e. `Hᴴ`; running
//! the stored reflectors last-built-first in that mode over a matrix rebuilds
//! the accumulated orthogonal/unitary factor.
//!
//! Row reflectors act from the right: `B ← B (I + conj(w) wᵀ / p)`.

use num_traits::{One, Zero};

use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};

/// Build a reflector from the column `a[row.., col]` and apply it to the
/// columns `col + 1..` of `a`.
///
/// Returns the signed magnitude `r` that the pivot is reflected onto. The
/// norm is accumulated with `hypot`, so no intermediate square is formed.
/// A zero column (or a pivot position outside the matrix) is already reduced:
/// `0` is returned and nothing is touched.
///
/// ```
/// use svdecomp::DynMatrix;
/// use svdecomp::linalg::householder::build_column_reflector;
///
/// let mut a = DynMatrix::from_rows(2, 2, &[3.0_f64, 1.0, 4.0, 2.0]);
/// let r = build_column_reflector(&mut a, 0, 0);
/// assert!((r + 5.0).abs() < 1e-12);
/// ```
pub fn build_column_reflector<T, A>(a: &mut A, row: usize, col: usize) -> T::Real
where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
{
    let zero = <T::Real as Zero>::zero();
    let rows = a.nrows();
    if row >= rows || col >= a.ncols() {
        return zero;
    }

    let mut mag = zero;
    for i in row..rows {
        mag = a.get(i, col).lhypot(mag);
    }
    if mag == zero {
        return zero;
    }
    // Reflect away from the pivot so v₀ never suffers cancellation.
    if a.get(row, col).re() > zero {
        mag = -mag;
    }

    let inv = T::from_real(<T::Real as One>::one() / mag);
    for i in row..rows {
        let x = a.get_mut(i, col);
        *x = *x * inv;
    }
    let pivot = a.get_mut(row, col);
    *pivot = *pivot - T::one();

    reflect_columns_in_place(a, row, col, col + 1);
    mag
}

/// Build a reflector from the row `a[row, col..]` and apply it to the rows
/// `row + 1..` of `a`.
///
/// The mirror image of [`build_column_reflector`].
pub fn build_row_reflector<T, A>(a: &mut A, row: usize, col: usize) -> T::Real
where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
{
    let zero = <T::Real as Zero>::zero();
    let cols = a.ncols();
    if row >= a.nrows() || col >= cols {
        return zero;
    }

    let mut mag = zero;
    for j in col..cols {
        mag = a.get(row, j).lhypot(mag);
    }
    if mag == zero {
        return zero;
    }
    if a.get(row, col).re() > zero {
        mag = -mag;
    }

    let inv = T::from_real(<T::Real as One>::one() / mag);
    for j in col..cols {
        let x = a.get_mut(row, j);
        *x = *x * inv;
    }
    let pivot = a.get_mut(row, col);
    *pivot = *pivot - T::one();

    reflect_rows_in_place(a, row, col, row + 1);
    mag
}

/// Apply the column reflector stored at `a[row.., col]` to the columns
/// `low..` of `target` (which must have as many rows as `a`).
///
/// `recover = false` applies `H` (forward reduction, right-hand sides);
/// `recover = true` applies `Hᴴ`, used to unroll accumulated factors.
pub fn apply_column_reflector<T, A, B>(
    a: &A,
    target: &mut B,
    row: usize,
    col: usize,
    low: usize,
    recover: bool,
) where
    T: LinalgScalar,
    A: MatrixRef<T> + ?Sized,
    B: MatrixMut<T> + ?Sized,
{
    let rows = a.nrows();
    assert_eq!(
        rows,
        target.nrows(),
        "column reflector needs matching rows: {} vs {}",
        rows,
        target.nrows()
    );
    if row >= rows || col >= a.ncols() {
        return;
    }
    let mut pivot = *a.get(row, col);
    if pivot == T::zero() {
        return;
    }
    if recover {
        pivot = pivot.conj();
    }
    let scale = T::one() / pivot;

    for j in low..target.ncols() {
        let mut sum = T::zero();
        for i in row..rows {
            sum = sum + *target.get(i, j) * a.get(i, col).conj();
        }
        sum = sum * scale;
        for i in row..rows {
            let v = *a.get(i, col);
            let x = target.get_mut(i, j);
            *x = *x + sum * v;
        }
    }
}

/// Apply the row reflector stored at `a[row, col..]` to the rows `low..` of
/// `target` (which must have as many columns as `a`).
pub fn apply_row_reflector<T, A, B>(
    a: &A,
    target: &mut B,
    row: usize,
    col: usize,
    low: usize,
    recover: bool,
) where
    T: LinalgScalar,
    A: MatrixRef<T> + ?Sized,
    B: MatrixMut<T> + ?Sized,
{
    let cols = a.ncols();
    assert_eq!(
        cols,
        target.ncols(),
        "row reflector needs matching columns: {} vs {}",
        cols,
        target.ncols()
    );
    if row >= a.nrows() || col >= cols {
        return;
    }
    let mut pivot = *a.get(row, col);
    if pivot == T::zero() {
        return;
    }
    if recover {
        pivot = pivot.conj();
    }
    let scale = T::one() / pivot;

    for i in low..target.nrows() {
        let mut sum = T::zero();
        for j in col..cols {
            sum = sum + *target.get(i, j) * a.get(row, j).conj();
        }
        sum = sum * scale;
        for j in col..cols {
            let w = *a.get(row, j);
            let x = target.get_mut(i, j);
            *x = *x + sum * w;
        }
    }
}

/// Forward-apply the freshly stored column reflector to `a`'s own columns
/// `low..`.
fn reflect_columns_in_place<T, A>(a: &mut A, row: usize, col: usize, low: usize)
where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
{
    let pivot = *a.get(row, col);
    if pivot == T::zero() {
        return;
    }
    let scale = T::one() / pivot;
    let rows = a.nrows();

    for j in low..a.ncols() {
        let mut sum = T::zero();
        for i in row..rows {
            sum = sum + *a.get(i, j) * a.get(i, col).conj();
        }
        sum = sum * scale;
        for i in row..rows {
            let v = *a.get(i, col);
            let x = a.get_mut(i, j);
            *x = *x + sum * v;
        }
    }
}

/// Forward-apply the freshly stored row reflector to `a`'s own rows `low..`.
fn reflect_rows_in_place<T, A>(a: &mut A, row: usize, col: usize, low: usize)
where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
{
    let pivot = *a.get(row, col);
    if pivot == T::zero() {
        return;
    }
    let scale = T::one() / pivot;
    let cols = a.ncols();

    for i in low..a.nrows() {
        let mut sum = T::zero();
        for j in col..cols {
            sum = sum + *a.get(i, j) * a.get(row, j).conj();
        }
        sum = sum * scale;
        for j in col..cols {
            let w = *a.get(row, j);
            let x = a.get_mut(i, j);
            *x = *x + sum * w;
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
