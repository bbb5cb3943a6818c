//! Core CSR implementation: struct, construction, accessors

use std::fmt;

use num_traits::Float;

use crate::error::{try_alloc, Error, Result};

/// CSR (Compressed Sparse Row) sparse matrix
///
/// Storage is three owned buffers: `row_ptrs` (length `rows + 1`),
/// `col_indices` and `values` (both length `nnz`, parallel). Row `r`'s
/// entries live at positions `row_ptrs[r]..row_ptrs[r + 1]`.
///
/// # Invariants
///
/// - `row_ptrs[0] == 0`, `row_ptrs[rows] == nnz`, non-decreasing
/// - every stored column index is `< cols`
///
/// Within a row, column indices need not be sorted; operations that depend
/// on position ([`transpose`](Self::transpose)) recompute it explicitly.
/// Structural buffers are only ever replaced whole (build-then-swap), so a
/// matrix with mismatched buffer lengths is never observable.
#[derive(Debug, Clone)]
pub struct CsrMatrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) row_ptrs: Vec<usize>,
    pub(crate) col_indices: Vec<usize>,
    pub(crate) values: Vec<T>,
}

impl<T: Float> CsrMatrix<T> {
    /// Create an empty matrix: zeroed row pointers, no stored entries
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptrs: vec![0; rows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create a matrix with `nnz` preallocated, zero-initialized slots
    ///
    /// The skeleton is not yet valid CSR: the caller fills `row_ptrs`,
    /// `col_indices` and `values` through the mutable accessors before use.
    /// Buffer lengths are fixed at allocation, so partially filled storage
    /// can never mismatch in length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if a buffer cannot be allocated.
    pub fn with_nnz(rows: usize, cols: usize, nnz: usize) -> Result<Self> {
        Ok(Self {
            rows,
            cols,
            row_ptrs: try_alloc(rows + 1, 0)?,
            col_indices: try_alloc(nnz, 0)?,
            values: try_alloc(nnz, T::zero())?,
        })
    }

    /// Create a `size x size` diagonal skeleton with zero values
    ///
    /// `row_ptrs[i] = i` and `col_indices[i] = i`; the caller fills the
    /// diagonal through [`values_mut`](Self::values_mut), or uses
    /// [`from_diagonal`](Self::from_diagonal) directly.
    pub fn diagonal(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            row_ptrs: (0..=size).collect(),
            col_indices: (0..size).collect(),
            values: vec![T::zero(); size],
        }
    }

    /// Create a diagonal matrix holding `diag` on its diagonal
    pub fn from_diagonal(diag: &[T]) -> Self {
        let mut m = Self::diagonal(diag.len());
        m.values.copy_from_slice(diag);
        m
    }

    /// Create a matrix from complete CSR buffers
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `row_ptrs` length is not `rows + 1`
    /// - `col_indices` and `values` differ in length
    /// - `row_ptrs` does not start at 0, end at `nnz`, or is decreasing
    /// - any column index is `>= cols`
    pub fn from_parts(
        rows: usize,
        cols: usize,
        row_ptrs: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptrs.len() != rows + 1 {
            return Err(Error::shape_mismatch(&[rows + 1], &[row_ptrs.len()]));
        }
        if col_indices.len() != values.len() {
            return Err(Error::shape_mismatch(&[values.len()], &[col_indices.len()]));
        }
        let nnz = values.len();
        if row_ptrs[0] != 0 || row_ptrs[rows] != nnz {
            return Err(Error::Internal(format!(
                "Invalid row_ptrs: expected [0]=0 and [{}]={}, got [0]={} and [{}]={}",
                rows, nnz, row_ptrs[0], rows, row_ptrs[rows]
            )));
        }
        if row_ptrs.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::Internal("Decreasing row_ptrs".to_string()));
        }
        for &c in &col_indices {
            if c >= cols {
                return Err(Error::IndexOutOfBounds {
                    index: c,
                    size: cols,
                });
            }
        }
        Ok(Self {
            rows,
            cols,
            row_ptrs,
            col_indices,
            values,
        })
    }

    /// Returns the number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no entries are stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of stored entries in `row`
    #[inline]
    pub fn row_nnz(&self, row: usize) -> usize {
        self.row_ptrs[row + 1] - self.row_ptrs[row]
    }

    /// Value of the `local`-th stored entry of `row`
    ///
    /// `local` must be `< row_nnz(row)` (debug-asserted, not checked on
    /// release hot paths).
    #[inline]
    pub fn value_at(&self, row: usize, local: usize) -> T {
        debug_assert!(local < self.row_nnz(row));
        self.values[self.row_ptrs[row] + local]
    }

    /// Mutable value of the `local`-th stored entry of `row`
    #[inline]
    pub fn value_at_mut(&mut self, row: usize, local: usize) -> &mut T {
        debug_assert!(local < self.row_nnz(row));
        &mut self.values[self.row_ptrs[row] + local]
    }

    /// Column of the `local`-th stored entry of `row`
    #[inline]
    pub fn column_of(&self, row: usize, local: usize) -> usize {
        debug_assert!(local < self.row_nnz(row));
        self.col_indices[self.row_ptrs[row] + local]
    }

    /// Mutable column of the `local`-th stored entry of `row`
    #[inline]
    pub fn column_of_mut(&mut self, row: usize, local: usize) -> &mut usize {
        debug_assert!(local < self.row_nnz(row));
        &mut self.col_indices[self.row_ptrs[row] + local]
    }

    /// Row pointer buffer, length `rows + 1`
    #[inline]
    pub fn row_ptrs(&self) -> &[usize] {
        &self.row_ptrs
    }

    /// Mutable row pointer buffer, for filling preallocated storage
    #[inline]
    pub fn row_ptrs_mut(&mut self) -> &mut [usize] {
        &mut self.row_ptrs
    }

    /// Column index buffer, length `nnz`
    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// Mutable column index buffer, for filling preallocated storage
    #[inline]
    pub fn col_indices_mut(&mut self) -> &mut [usize] {
        &mut self.col_indices
    }

    /// Value buffer, length `nnz`
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable value buffer
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Replace the value buffer while preserving the sparsity pattern
    ///
    /// The structure (`row_ptrs`, `col_indices`) is untouched; the new
    /// buffer is adopted only after its length is verified, so a failed
    /// call leaves the matrix unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `new_values.len() != self.nnz()`.
    pub fn replace_values(&mut self, new_values: Vec<T>) -> Result<()> {
        if new_values.len() != self.values.len() {
            return Err(Error::shape_mismatch(
                &[self.values.len()],
                &[new_values.len()],
            ));
        }
        self.values = new_values;
        Ok(())
    }
}

impl<T: Float + fmt::Display> fmt::Display for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for local in 0..self.row_nnz(row) {
                write!(
                    f,
                    "({}, {}): {}\t",
                    row,
                    self.column_of(row, local),
                    self.value_at(row, local)
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
