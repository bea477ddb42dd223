//! Plane (Givens) rotations on real pairs and on adjacent accumulator rows.

use crate::traits::FloatScalar;

/// A plane rotation `[c s; -s c]`.
///
/// [`Givens::new`] picks `c`, `s` so that rotating `(x, y)` yields `(r, 0)`.
///
/// ```
/// use svdecomp::linalg::givens::Givens;
///
/// let g = Givens::new(3.0_f64, 4.0);
/// assert_eq!(g.r, 5.0);
/// let (u, v) = g.rotate(3.0, 4.0);
/// assert!((u - 5.0).abs() < 1e-15 && v.abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Givens<R> {
    pub c: R,
    pub s: R,
    /// `hypot(x, y)` of the pair the rotation was built from (zero when built
    /// from explicit `c`, `s`).
    pub r: R,
}

impl<R: FloatScalar> Givens<R> {
    /// Rotation that maps `(x, y)` onto `(hypot(x, y), 0)`.
    ///
    /// A zero pair gives the identity.
    #[inline]
    pub fn new(x: R, y: R) -> Self {
        let r = x.hypot(y);
        if r <= R::zero() {
            Self {
                c: R::one(),
                s: R::zero(),
                r,
            }
        } else {
            Self {
                c: x / r,
                s: y / r,
                r,
            }
        }
    }

    /// Rotation from an explicit cosine/sine pair.
    #[inline]
    pub fn from_cs(c: R, s: R) -> Self {
        Self { c, s, r: R::zero() }
    }

    /// `(x·c + y·s, −x·s + y·c)`.
    #[inline]
    pub fn rotate(&self, x: R, y: R) -> (R, R) {
        (x * self.c + y * self.s, y * self.c - x * self.s)
    }

    /// Rotate rows `i` and `i + 1` of a row-major `n`-column matrix stored in
    /// `m`.
    pub fn rotate_rows(&self, m: &mut [R], n: usize, i: usize) {
        let (head, tail) = m.split_at_mut((i + 1) * n);
        let upper = &mut head[i * n..];
        let lower = &mut tail[..n];
        for (x, y) in upper.iter_mut().zip(lower.iter_mut()) {
            let (u, v) = self.rotate(*x, *y);
            *x = u;
            *y = v;
        }
    }
}

/// Swap rows `a` and `b` of a row-major `n`-column matrix.
pub(crate) fn swap_rows<R>(m: &mut [R], n: usize, a: usize, b: usize) {
    if a == b {
        return;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (head, tail) = m.split_at_mut(hi * n);
    head[lo * n..(lo + 1) * n].swap_with_slice(&mut tail[..n]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {}", msg, a, b);
    }

    #[test]
    fn zeroes_second_component() {
        let g = Givens::new(-1.0_f64, 2.0);
        let (u, v) = g.rotate(-1.0, 2.0);
        assert_near(u, 5.0_f64.sqrt(), 1e-15, "u");
        assert_near(v, 0.0, 1e-15, "v");
        assert_near(g.c * g.c + g.s * g.s, 1.0, 1e-15, "unit");
    }

    #[test]
    fn zero_pair_is_identity() {
        let g = Givens::new(0.0_f64, 0.0);
        assert_eq!((g.c, g.s, g.r), (1.0, 0.0, 0.0));
        assert_eq!(g.rotate(2.0, 3.0), (2.0, 3.0));
    }

    #[test]
    fn no_overflow() {
        let g = Givens::new(3e300_f64, 4e300);
        assert_near(g.r / 1e300, 5.0, 1e-14, "r");
        assert_near(g.c, 0.6, 1e-15, "c");
    }

    #[test]
    fn rotates_adjacent_rows() {
        // 3x2 row-major
        let mut m = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        Givens::from_cs(0.0, 1.0).rotate_rows(&mut m, 2, 1);
        assert_eq!(m, [1.0, 2.0, 5.0, 6.0, -3.0, -4.0]);
    }

    #[test]
    fn swaps_rows() {
        let mut m = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        swap_rows(&mut m, 2, 2, 0);
        assert_eq!(m, [5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        swap_rows(&mut m, 2, 1, 1);
        assert_eq!(m, [5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }
}
