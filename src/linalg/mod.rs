//! The decomposition pipeline, leaves first.
//!
//! - [`householder`]: reflectors built and stored in place, applied to other
//!   matrices to accumulate factors.
//! - [`givens`]: plane rotations on real pairs and accumulator rows.
//! - [`bidiag`]: Householder reduction to upper-bidiagonal form.
//! - [`bidiag_svd`]: the deflating implicit-shift bidiagonal solver.
//! - `svd`: [`svdecomp`], which wires the above together (needs `alloc`).
//!
//! Everything except `svd` works without an allocator.

pub mod bidiag;
pub mod bidiag_svd;
pub mod givens;
pub mod householder;
#[cfg(feature = "alloc")]
pub(crate) mod svd;

pub use bidiag_svd::{bidiagonal_svd, SolveStats};
#[cfg(feature = "alloc")]
pub use svd::{svdecomp, svdecomp_with_workspace, SvdWorkspace};

/// Errors from the convenience operations built on the decomposition.
///
/// Returned by [`DynSvd::solve`](crate::DynSvd::solve) and
/// [`DynSvd::inverse`](crate::DynSvd::inverse). The decomposition itself
/// cannot fail.
///
/// ```
/// use svdecomp::DynMatrix;
/// use svdecomp::linalg::LinalgError;
///
/// let singular = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(singular.svd().inverse().unwrap_err(), LinalgError::Singular);
///
/// let wide = DynMatrix::from_rows(1, 2, &[1.0_f64, 2.0]);
/// assert_eq!(
///     wide.svd().inverse().unwrap_err(),
///     LinalgError::NotSquare { rows: 1, cols: 2 }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    Singular,
    /// Operation needs a square matrix.
    NotSquare { rows: usize, cols: usize },
    /// Right-hand side does not match the matrix.
    DimensionMismatch { expected: usize, got: usize },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "matrix is not square ({}x{})", rows, cols)
            }
            LinalgError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {} rows, got {}", expected, got)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
