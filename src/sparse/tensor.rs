//! Depth-extended sparse tensor: a CSR skeleton with sparse-vector payloads

use num_traits::Float;

use crate::error::{Error, Result};

use super::{CsrMatrix, SparseVector};

/// Sparse tensor that overlays a [`SparseVector`] payload onto each
/// structural slot of a 2-D CSR skeleton
///
/// The skeleton (`row_ptrs`, `col_indices`) is always deep-copied from a
/// source [`CsrMatrix`] at construction; mutating the source afterwards
/// never affects the tensor. `depth` records the nominal ambient dimension
/// of each slot's payload and is advisory: payload contents are not checked
/// against it. `elements[k]` is the payload of the k-th structural slot in
/// row-major CSR order, parallel to `col_indices`.
///
/// No arithmetic is defined at this level; it is a storage and addressing
/// structure. Combine payloads with [`SparseVector`] operations at the
/// call site.
#[derive(Debug, Clone)]
pub struct DepthTensor<T> {
    rows: usize,
    cols: usize,
    depth: usize,
    row_ptrs: Vec<usize>,
    col_indices: Vec<usize>,
    elements: Vec<SparseVector<T>>,
}

impl<T: Float> DepthTensor<T> {
    /// Build a tensor over `source`'s skeleton with empty payloads
    ///
    /// Every slot starts as a [`SparseVector`] of ambient dimension
    /// `depth` with no stored entries.
    pub fn from_matrix(source: &CsrMatrix<T>, depth: usize) -> Self {
        let nnz = source.nnz();
        Self {
            rows: source.rows(),
            cols: source.cols(),
            depth,
            row_ptrs: source.row_ptrs().to_vec(),
            col_indices: source.col_indices().to_vec(),
            elements: (0..nnz).map(|_| SparseVector::empty(depth)).collect(),
        }
    }

    /// Build a tensor over `source`'s skeleton with caller-supplied payloads
    ///
    /// `payloads` pairs one-to-one with the source's stored entries in
    /// row-major CSR order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `payloads.len() != source.nnz()`.
    pub fn with_payloads(
        source: &CsrMatrix<T>,
        depth: usize,
        payloads: Vec<SparseVector<T>>,
    ) -> Result<Self> {
        if payloads.len() != source.nnz() {
            return Err(Error::shape_mismatch(&[source.nnz()], &[payloads.len()]));
        }
        Ok(Self {
            rows: source.rows(),
            cols: source.cols(),
            depth,
            row_ptrs: source.row_ptrs().to_vec(),
            col_indices: source.col_indices().to_vec(),
            elements: payloads,
        })
    }

    /// Returns the number of skeleton rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of skeleton columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Nominal ambient dimension of each slot's payload
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of structural slots
    #[inline]
    pub fn nnz(&self) -> usize {
        self.elements.len()
    }

    /// Number of structural slots in `row`
    #[inline]
    pub fn row_nnz(&self, row: usize) -> usize {
        self.row_ptrs[row + 1] - self.row_ptrs[row]
    }

    /// Payload of the `local`-th slot of `row`
    ///
    /// `local` must be `< row_nnz(row)` (debug-asserted, not checked on
    /// release hot paths).
    #[inline]
    pub fn payload(&self, row: usize, local: usize) -> &SparseVector<T> {
        debug_assert!(local < self.row_nnz(row));
        &self.elements[self.row_ptrs[row] + local]
    }

    /// Mutable payload of the `local`-th slot of `row`
    #[inline]
    pub fn payload_mut(&mut self, row: usize, local: usize) -> &mut SparseVector<T> {
        debug_assert!(local < self.row_nnz(row));
        &mut self.elements[self.row_ptrs[row] + local]
    }

    /// Structural column of the `local`-th slot of `row`
    #[inline]
    pub fn column_of(&self, row: usize, local: usize) -> usize {
        debug_assert!(local < self.row_nnz(row));
        self.col_indices[self.row_ptrs[row] + local]
    }

    /// Mutable structural column of the `local`-th slot of `row`
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

    /// Column index buffer, length `nnz`
    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// All payloads in slot order
    #[inline]
    pub fn payloads(&self) -> &[SparseVector<T>] {
        &self.elements
    }
}
