//! Householder reduction of a rectangular matrix to upper-bidiagonal form.
//!
//! Tall and square inputs (`rows >= cols`) alternate column and row
//! reflectors starting on the diagonal, which leaves an upper bidiagonal.
//! Wide inputs start the row reflectors on the diagonal instead; the lower
//! bidiagonal that produces is turned upper with one pass of Givens rotations
//! on the left. Either way the reflectors stay stored in `a`, and
//! [`unroll_left`] / [`unroll_right`] replay them to rebuild the factors.

use num_traits::Zero;

use super::givens::Givens;
use super::householder::{
    apply_column_reflector, apply_row_reflector, build_column_reflector, build_row_reflector,
};
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};

/// Reduce `a` (`rows×cols`) so that `a = Q_L · B · Q_R` with `B` upper
/// bidiagonal, `d` its diagonal and `f` its superdiagonal.
///
/// `d` and `f` need at least `n = min(rows, cols)` entries; `f[n - 1]` comes
/// back zero. `left`, when given, is an `n×n` row-major accumulator that
/// receives the Givens rotations of the wide case.
pub fn bidiagonalize<T, A>(
    a: &mut A,
    d: &mut [T::Real],
    f: &mut [T::Real],
    mut left: Option<&mut [T::Real]>,
) where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
{
    let rows = a.nrows();
    let cols = a.ncols();
    let n = rows.min(cols);
    assert!(
        d.len() >= n && f.len() >= n,
        "bidiagonal scratch needs {} entries, got d: {}, f: {}",
        n,
        d.len(),
        f.len()
    );
    if let Some(l) = left.as_deref() {
        assert!(l.len() >= n * n, "left accumulator needs {}x{} entries", n, n);
    }

    if rows >= cols {
        for k in 0..n {
            d[k] = build_column_reflector(a, k, k);
            f[k] = build_row_reflector(a, k, k + 1);
        }
    } else {
        for k in 0..n {
            d[k] = build_row_reflector(a, k, k);
            f[k] = build_column_reflector(a, k + 1, k);
        }
        // f holds the subdiagonal; rotate it into the superdiagonal
        for k in 0..n.saturating_sub(1) {
            let g = Givens::new(d[k], f[k]);
            d[k] = g.r;
            let (fk, dk) = g.rotate(<T::Real as Zero>::zero(), d[k + 1]);
            f[k] = fk;
            d[k + 1] = dk;
            if let Some(l) = left.as_deref_mut() {
                g.rotate_rows(l, n, k);
            }
        }
    }
}

/// Replay the column reflectors stored in a bidiagonalized `a` onto `out`
/// (`rows×n`), last-built first.
///
/// With `out` holding the lifted left factor of the bidiagonal problem this
/// produces the left factor of `a`.
pub fn unroll_left<T, A, B>(a: &A, out: &mut B)
where
    T: LinalgScalar,
    A: MatrixRef<T> + ?Sized,
    B: MatrixMut<T> + ?Sized,
{
    let rows = a.nrows();
    let cols = a.ncols();
    let offset = usize::from(rows < cols);
    for k in (0..rows.min(cols)).rev() {
        apply_column_reflector(a, out, k + offset, k, 0, true);
    }
}

/// Replay the row reflectors stored in a bidiagonalized `a` onto `out`
/// (`n×cols`), last-built first.
pub fn unroll_right<T, A, B>(a: &A, out: &mut B)
where
    T: LinalgScalar,
    A: MatrixRef<T> + ?Sized,
    B: MatrixMut<T> + ?Sized,
{
    let rows = a.nrows();
    let cols = a.ncols();
    let offset = usize::from(rows >= cols);
    for k in (0..rows.min(cols)).rev() {
        apply_row_reflector(a, out, k, k + offset, 0, true);
    }
}
