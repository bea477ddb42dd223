//! SVD of a real upper-bidiagonal matrix.
//!
//! The matrix is given as its diagonal `d` and superdiagonal `f`. The solver
//! deflates on negligible entries, recursing into the smaller half, and
//! otherwise runs implicit-shift Golub–Kahan sweeps (Golub & Van Loan,
//! *Matrix Computations*, 4th ed., §8.6.1) until every block is at most 2×2,
//! which is diagonalized in closed form.
//!
//! Every rotation is mirrored onto the optional `n×n` accumulators `L` and `R`
//! (row-major), so that on return
//!
//! ```text
//! B = Lᵀ · diag(d) · R
//! ```
//!
//! where `B` is the input bidiagonal and `L`, `R` started as the identity.

use core::cmp::Ordering;

use super::givens::{swap_rows, Givens};
use crate::traits::FloatScalar;

/// Relative size below which an entry of the bidiagonal counts as zero.
///
/// Generic reals use `max(DEFLATION_TOLERANCE, epsilon²)`.
pub const DEFLATION_TOLERANCE: f64 = 1e-20;

/// Consecutive sweeps without a deflation after which a block drops the
/// Wilkinson shift. Sweeps stay unshifted until the block deflates.
pub const SHIFT_RETRY_LIMIT: usize = 3;

/// Whether a block that has gone `retries` sweeps without deflating still
/// sweeps with the Wilkinson shift.
#[inline]
fn shift_allowed(retries: usize) -> bool {
    retries < SHIFT_RETRY_LIMIT
}

/// Work counters of a bidiagonal solve.
///
/// ```
/// use svdecomp::linalg::bidiagonal_svd;
///
/// let mut d = [1.0_f64, 2.0, 3.0];
/// let mut f = [0.0_f64; 3];
/// let mut perm = [0usize; 3];
/// let stats = bidiagonal_svd(&mut d, &mut f, &mut perm, None, None);
/// assert!((d[0] - 3.0).abs() < 1e-14 && (d[2] - 1.0).abs() < 1e-14);
/// assert_eq!(stats.sweeps, 0);
/// assert_eq!(stats.swaps, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Golub–Kahan sweeps performed, shifted or not.
    pub sweeps: usize,
    /// Sweeps that ran with a zero shift.
    pub unshifted_sweeps: usize,
    /// Row swaps spent ordering the singular values (at most `n`).
    pub swaps: usize,
}

/// Singular value decomposition of the bidiagonal `(d, f)`.
///
/// - `d`: diagonal, length `n`; overwritten with the singular values in
///   decreasing order, all `≥ 0`.
/// - `f`: superdiagonal, at least `n - 1` entries; destroyed.
/// - `perm`: index scratch, at least `n` entries.
/// - `left`, `right`: optional `n×n` row-major accumulators, usually the
///   identity on entry.
///
/// The problem is scaled to unit size first, so inputs near the overflow or
/// underflow thresholds are fine. An all-zero bidiagonal returns immediately.
///
/// Panics if the slices are shorter than stated.
pub fn bidiagonal_svd<R: FloatScalar>(
    d: &mut [R],
    f: &mut [R],
    perm: &mut [usize],
    left: Option<&mut [R]>,
    right: Option<&mut [R]>,
) -> SolveStats {
    let n = d.len();
    if n == 0 {
        return SolveStats::default();
    }
    assert!(
        f.len() + 1 >= n,
        "superdiagonal needs {} entries, got {}",
        n - 1,
        f.len()
    );
    assert!(
        perm.len() >= n,
        "permutation needs {} entries, got {}",
        n,
        perm.len()
    );
    for acc in [left.as_deref(), right.as_deref()].into_iter().flatten() {
        assert!(
            acc.len() >= n * n,
            "accumulator needs {}x{} entries, got {}",
            n,
            n,
            acc.len()
        );
    }

    let m = n - 1;
    let mut frob = R::zero();
    for &x in d.iter() {
        frob = frob.hypot(x);
    }
    for &x in f[..m].iter() {
        frob = frob.hypot(x);
    }
    frob = frob / R::from(n).unwrap_or_else(R::one);
    if frob == R::zero() {
        return SolveStats::default();
    }

    let inv = R::one() / frob;
    for x in d.iter_mut().chain(f[..m].iter_mut()) {
        *x = *x * inv;
    }

    let mut solver = Bidiagonal::new(d, f, left, right);
    solver.solve_block(0, n);
    solver.make_nonnegative();
    solver.sort_descending(&mut perm[..n]);

    for x in solver.d.iter_mut().chain(solver.f[..m].iter_mut()) {
        *x = *x * frob;
    }

    #[cfg(feature = "log")]
    log::debug!(
        target: "svdecomp",
        "bidiagonal svd: n={} sweeps={} unshifted={} swaps={}",
        n,
        solver.stats.sweeps,
        solver.stats.unshifted_sweeps,
        solver.stats.swaps
    );

    solver.stats
}

/// A bidiagonal problem in progress, with its accumulators.
struct Bidiagonal<'a, R> {
    d: &'a mut [R],
    f: &'a mut [R],
    left: Option<&'a mut [R]>,
    right: Option<&'a mut [R]>,
    n: usize,
    eps: R,
    stats: SolveStats,
}

impl<'a, R: FloatScalar> Bidiagonal<'a, R> {
    fn new(
        d: &'a mut [R],
        f: &'a mut [R],
        left: Option<&'a mut [R]>,
        right: Option<&'a mut [R]>,
    ) -> Self {
        let n = d.len();
        let floor = R::from(DEFLATION_TOLERANCE).unwrap_or_else(R::min_positive_value);
        Self {
            d,
            f,
            left,
            right,
            n,
            eps: floor.max(R::epsilon() * R::epsilon()),
            stats: SolveStats::default(),
        }
    }

    #[inline]
    fn rotate_left(&mut self, g: &Givens<R>, i: usize) {
        if let Some(l) = self.left.as_deref_mut() {
            g.rotate_rows(l, self.n, i);
        }
    }

    #[inline]
    fn rotate_right(&mut self, g: &Givens<R>, i: usize) {
        if let Some(r) = self.right.as_deref_mut() {
            g.rotate_rows(r, self.n, i);
        }
    }

    /// Zero `f[i]` into `d[i]` with a left rotation.
    #[inline]
    fn chase_left(&mut self, i: usize) -> Givens<R> {
        let g = Givens::new(self.d[i], self.f[i]);
        self.d[i] = g.r;
        (self.f[i], self.d[i + 1]) = g.rotate(R::zero(), self.d[i + 1]);
        g
    }

    /// Flip the block `[lo, hi)` end-to-end and restore it to upper
    /// bidiagonal form, so that the larger diagonal entries sit at the top.
    fn reverse(&mut self, lo: usize, hi: usize) {
        let n = self.n;
        for i in 0..(hi - lo) / 2 {
            let (a, b) = (lo + i, hi - 1 - i);
            self.d.swap(a, b);
            if let Some(l) = self.left.as_deref_mut() {
                swap_rows(l, n, a, b);
            }
            if let Some(r) = self.right.as_deref_mut() {
                swap_rows(r, n, a, b);
            }
        }
        for i in 0..(hi - 1 - lo) / 2 {
            self.f.swap(lo + i, hi - 2 - i);
        }
        // the flip left a lower bidiagonal
        for i in lo..hi - 1 {
            let g = self.chase_left(i);
            self.rotate_left(&g, i);
        }
    }

    /// First rotation of a sweep, from the Wilkinson shift of the trailing
    /// 2×2 of `BᵀB` or, unshifted, from the top entries alone.
    fn sweep_seed(&self, lo: usize, hi: usize, shifted: bool) -> Givens<R> {
        let (d, f) = (&*self.d, &*self.f);
        if !shifted {
            return Givens::new(d[lo], f[lo]);
        }
        let half = (R::one() + R::one()).recip();
        let a = d[hi - 2] * d[hi - 2];
        let b = d[hi - 2] * f[hi - 2];
        let c = f[hi - 2] * f[hi - 2] + d[hi - 1] * d[hi - 1];
        let e = half * (a - c);
        let mu = c + e - R::one().copysign(e) * e.hypot(b);
        debug_assert!(d[lo] != R::zero(), "shift seed on a zero pivot");
        Givens::new(d[lo] - mu / d[lo], f[lo])
    }

    /// One implicit-shift QR sweep over `[lo, hi)`, `hi - lo > 2`.
    ///
    /// ```text
    ///  d0 <-- f0 <-- b1
    ///   ^      ^      ^
    ///  b0 <-- d1 <-- f1 <-- b3
    ///          ^      ^      ^
    ///         b2 <-- d2 <-- f2
    /// ```
    fn sweep(&mut self, lo: usize, hi: usize, shifted: bool) {
        let three = R::one() + R::one() + R::one();
        if three * self.d[lo].abs() < self.d[hi - 1].abs() {
            self.reverse(lo, hi);
        }

        let zero = R::zero();
        let mut bulge = zero;

        // top
        let g = self.sweep_seed(lo, hi, shifted);
        (self.d[lo], self.f[lo]) = g.rotate(self.d[lo], self.f[lo]);
        (bulge, self.d[lo + 1]) = g.rotate(bulge, self.d[lo + 1]);
        self.rotate_right(&g, lo);

        for i in lo..hi - 2 {
            // row: bulge below the diagonal
            let gr = Givens::new(self.d[i], bulge);
            self.d[i] = gr.r;
            (self.f[i], self.d[i + 1]) = gr.rotate(self.f[i], self.d[i + 1]);
            (bulge, self.f[i + 1]) = gr.rotate(zero, self.f[i + 1]);
            self.rotate_left(&gr, i);

            // column: bulge right of the superdiagonal
            let gc = Givens::new(self.f[i], bulge);
            self.f[i] = gc.r;
            (self.d[i + 1], self.f[i + 1]) = gc.rotate(self.d[i + 1], self.f[i + 1]);
            (bulge, self.d[i + 2]) = gc.rotate(zero, self.d[i + 2]);
            self.rotate_right(&gc, i + 1);
        }

        // end
        let ge = Givens::new(self.d[hi - 2], bulge);
        self.d[hi - 2] = ge.r;
        (self.f[hi - 2], self.d[hi - 1]) = ge.rotate(self.f[hi - 2], self.d[hi - 1]);
        self.rotate_left(&ge, hi - 2);
    }

    /// Deflate a negligible `d[split]` inside `[lo, hi)`.
    ///
    /// Two zero-shift passes, the first into `R` and the second into `L`,
    /// leave a zero singular value in `d[hi - 1]` and decouple
    /// `[lo, split)` from `[split, hi - 1)`.
    fn split_diagonal(&mut self, lo: usize, hi: usize, split: usize) {
        for i in lo..hi - 1 {
            let g = self.chase_left(i);
            self.rotate_right(&g, i);
        }
        for i in lo..hi - 1 {
            let g = self.chase_left(i);
            self.rotate_left(&g, i);
        }
        if split > lo {
            self.f[split - 1] = R::zero();
        }
        self.f[hi - 2] = R::zero();
    }

    /// Closed-form SVD of the 2×2 block `[[a, b], [0, c]]` at `lo`.
    ///
    /// Loosely after Hari & Matejaš, "Accuracy of two SVD algorithms for 2×2
    /// triangular matrices", Appl. Math. Comput. (2009).
    fn solve_2x2(&mut self, lo: usize) {
        let zero = R::zero();
        let a = self.d[lo];
        let b = self.f[lo];
        let c = self.d[lo + 1];

        if b == zero {
            return;
        }

        if a == zero {
            let h = b.hypot(c);
            self.d[lo] = zero;
            self.f[lo] = zero;
            self.d[lo + 1] = h;
            self.rotate_left(&Givens::from_cs(c / h, -b / h), lo);
            return;
        }

        if c == zero {
            let h = a.hypot(b);
            self.d[lo] = h;
            self.f[lo] = zero;
            self.d[lo + 1] = zero;
            self.rotate_right(&Givens::from_cs(a / h, b / h), lo);
            return;
        }

        let two = R::one() + R::one();
        let half = two.recip();
        let a2 = a * a;
        let b2 = b * b;
        let c2 = c * c;

        let (lc, ls, rc, rs);
        if a2 > c2 {
            let theta = half * (-two * b * c).atan2(a2 + b2 - c2);
            lc = theta.cos();
            ls = theta.sin();
            let (x, y) = if (ls * b + lc * c).abs() > (lc * b - ls * c).abs() {
                (ls * b + lc * c, -ls * a)
            } else {
                (lc * a, lc * b - ls * c)
            };
            let h = x.hypot(y);
            rc = x / h;
            rs = y / h;
        } else {
            let theta = half * (-two * a * b).atan2(c2 + b2 - a2);
            rc = theta.cos();
            rs = theta.sin();
            let (x, y) = if (rc * a + rs * b).abs() > (rc * b - rs * a).abs() {
                (rc * a + rs * b, -rs * c)
            } else {
                (rc * c, rc * b - rs * a)
            };
            let h = x.hypot(y);
            lc = x / h;
            ls = y / h;
        }

        self.d[lo] = rc * lc * a + rs * lc * b - rs * ls * c;
        self.d[lo + 1] = -rs * ls * a + rc * ls * b + rc * lc * c;
        self.f[lo] = zero;

        self.rotate_left(&Givens::from_cs(lc, -ls), lo);
        self.rotate_right(&Givens::from_cs(rc, rs), lo);
    }

    /// Diagonalize the block `[lo, hi)`.
    fn solve_block(&mut self, mut lo: usize, mut hi: usize) {
        let zero = R::zero();
        let eps = self.eps;
        let mut retries = 0usize;

        while hi - lo > 2 {
            let range = (lo, hi);

            // negligible superdiagonal
            let mut i = lo;
            while i + 1 < hi {
                if self.f[i].abs() <= eps * (self.d[i].abs() + self.d[i + 1].abs()) {
                    if i - lo < (hi - lo) / 2 {
                        self.solve_block(lo, i + 1);
                        lo = i + 1;
                    } else {
                        self.solve_block(i + 1, hi);
                        hi = i + 1;
                        break;
                    }
                }
                i += 1;
            }

            // negligible diagonal
            let mut i = lo;
            while i < hi {
                let f0 = if i == lo { zero } else { self.f[i - 1].abs() };
                let f1 = if i + 1 == hi { zero } else { self.f[i].abs() };
                let near = f0 + f1;
                if near > zero && self.d[i].abs() <= eps * near {
                    self.split_diagonal(lo, hi, i);
                    if i - lo < (hi - lo) / 2 {
                        self.solve_block(lo, i);
                        lo = i;
                        hi -= 1;
                    } else {
                        self.solve_block(i, hi - 1);
                        hi = i;
                        break;
                    }
                }
                i += 1;
            }

            if (lo, hi) != range {
                retries = 0;
            }
            if hi - lo > 2 {
                let shifted = shift_allowed(retries);
                if !shifted {
                    self.stats.unshifted_sweeps += 1;
                    if retries == SHIFT_RETRY_LIMIT {
                        #[cfg(feature = "log")]
                        log::trace!(
                            target: "svdecomp",
                            "dropping shift on block [{}, {}) after {} sweeps",
                            lo,
                            hi,
                            retries
                        );
                    }
                }
                self.sweep(lo, hi, shifted);
                self.stats.sweeps += 1;
                retries += 1;
            }
        }

        if hi - lo == 2 {
            self.solve_2x2(lo);
        }
    }

    /// Flip negative singular values, and their left vectors with them.
    fn make_nonnegative(&mut self) {
        let n = self.n;
        for i in 0..n {
            if self.d[i] < R::zero() {
                self.d[i] = -self.d[i];
                if let Some(l) = self.left.as_deref_mut() {
                    for x in l[i * n..(i + 1) * n].iter_mut() {
                        *x = -*x;
                    }
                }
            }
        }
    }

    /// Order by decreasing singular value.
    ///
    /// Only the index permutation is sorted; the values and accumulator rows
    /// then move along its cycles, at most one swap per element.
    fn sort_descending(&mut self, perm: &mut [usize]) {
        let n = self.n;
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i;
        }
        {
            let d = &*self.d;
            perm.sort_unstable_by(|&i, &j| d[j].partial_cmp(&d[i]).unwrap_or(Ordering::Equal));
        }

        for i in 0..n {
            let mut spot = i;
            let mut want = perm[spot];
            while spot != want {
                self.d.swap(spot, want);
                if let Some(l) = self.left.as_deref_mut() {
                    swap_rows(l, n, spot, want);
                }
                if let Some(r) = self.right.as_deref_mut() {
                    swap_rows(r, n, spot, want);
                }
                self.stats.swaps += 1;
                perm[spot] = spot;
                spot = want;
                want = perm[spot];
                if want == i {
                    perm[spot] = spot;
                    break;
                }
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
