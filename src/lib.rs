//! # linr
//!
//! **Dense and CSR sparse linear-algebra primitives for CPU numerics.**
//!
//! linr provides contiguous-buffer dense containers (vector, matrix, tensor)
//! and a compressed sparse-row family: a sparse vector, a CSR matrix with
//! structural transforms and sparse-dense products, and a depth-extended
//! sparse tensor that overlays a sparse-vector payload onto a shared CSR
//! skeleton.
//!
//! ## Highlights
//!
//! - **CSR matrix**: counting-sort transpose, zero pruning, one-hot row
//!   expansion, SpMM against dense matrices, in-place value recomputation
//!   from two dense factors
//! - **Sparse vector**: norms and dot products against dense vectors; also
//!   the per-slot payload type of [`sparse::DepthTensor`]
//! - **Dense containers**: elementwise arithmetic, norms, row views for
//!   bulk loops
//!
//! ## Quick Start
//!
//! ```
//! use linr::prelude::*;
//!
//! // [1, 0, 2]
//! // [0, 3, 0]
//! let a = CsrMatrix::from_parts(2, 3, vec![0, 2, 3], vec![0, 2, 1], vec![1.0, 2.0, 3.0])?;
//! let b = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
//!
//! let c = a.matmul(&b)?;
//! assert_eq!(c[(0, 0)], 11.0);
//!
//! let at = a.transpose();
//! assert_eq!(at.rows(), 3);
//! # Ok::<(), linr::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): row-parallel sparse-dense products

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dense;
pub mod error;
pub mod sparse;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dense::{Matrix, Tensor, Vector};
    pub use crate::error::{Error, Result};
    pub use crate::sparse::{CsrMatrix, DepthTensor, SparseVector};
}
