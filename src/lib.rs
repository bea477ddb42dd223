//! # svdecomp
//!
//! Singular value decomposition of dense real and complex matrices, in pure
//! Rust and `no_std` compatible.
//!
//! The matrix is reduced to a real upper bidiagonal with Householder
//! reflectors, the bidiagonal is diagonalized with implicit-shift QR sweeps
//! and deflation, and the singular vectors are rebuilt by replaying the
//! reflectors. Thin factors come out as `A = L · diag(σ) · R`, with `σ`
//! non-negative and decreasing.
//!
//! ## Quick start
//!
//! ```
//! use svdecomp::DynMatrix;
//!
//! let a = DynMatrix::from_rows(3, 2, &[
//!     2.0_f64, 0.0,
//!     0.0, 1.0,
//!     0.0, 0.0,
//! ]);
//! let svd = a.svd();
//! assert!((svd.singular_values()[0] - 2.0).abs() < 1e-14);
//! assert!((svd.reconstruct()[(0, 0)] - 2.0).abs() < 1e-14);
//! ```
//!
//! ## Modules
//!
//! - [`linalg`]: the pipeline. [`svdecomp`] decomposes anything implementing
//!   [`MatrixMut`] in place; [`linalg::householder`], [`linalg::bidiag`] and
//!   [`linalg::bidiagonal_svd`] are its stages and can be used on their own.
//!   The stages need no allocator.
//!
//! - [`dynmatrix`]: heap-allocated `DynMatrix<T>` with runtime dimensions
//!   (requires `alloc`, included with `std`) and the [`DynSvd`] wrapper with
//!   rank, condition number, pseudo-inverse, least-squares solve and inverse.
//!
//! - [`traits`]: element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats, the type the bidiagonal solver works in
//!   - [`LinalgScalar`]: real floats and complex numbers
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Complex matrices
//!
//! Enable the `complex` feature to decompose `Complex<f32>` /
//! `Complex<f64>` matrices. The reflectors absorb the phases, so the
//! bidiagonal and the singular values are real and the factors are unitary.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Implies `alloc`. Hardware FPU via system libm |
//! | `alloc`   | via std  | `DynMatrix`, `DynSvd`, `svdecomp`, `SvdWorkspace` |
//! | `libm`    | baseline | Pure-Rust software float fallback |
//! | `complex` | no       | `Complex<f32>` / `Complex<f64>` support via `num-complex` |
//! | `log`     | no       | Solver diagnostics through the `log` facade (target `svdecomp`) |
//! | `all`     | no       | All features: `std` + `complex` + `log` |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod dynmatrix;
pub mod linalg;
pub mod traits;

#[cfg(feature = "alloc")]
pub use dynmatrix::{DynMatrix, DynSvd};
pub use linalg::{bidiagonal_svd, LinalgError, SolveStats};
#[cfg(feature = "alloc")]
pub use linalg::{svdecomp, svdecomp_with_workspace, SvdWorkspace};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
