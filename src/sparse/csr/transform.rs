//! CSR structural transforms: zero pruning, transpose, one-hot expansion
//!
//! Each transform builds complete buffers and assembles a new matrix; the
//! receiver is never mutated.

use num_traits::Float;

use super::CsrMatrix;

impl<T: Float> CsrMatrix<T> {
    /// Return a copy without the entries whose stored value equals zero
    ///
    /// Comparison is exact (`v != 0.0`), not tolerance-based. Row boundaries
    /// are preserved and surviving entries keep their relative order within
    /// each row, so the result of pruning an already-pruned matrix is
    /// structurally identical to the first pruning.
    pub fn prune_zeros(&self) -> Self {
        let kept = self.values.iter().filter(|&&v| v != T::zero()).count();

        let mut row_ptrs = vec![0usize; self.rows + 1];
        let mut col_indices = Vec::with_capacity(kept);
        let mut values = Vec::with_capacity(kept);

        for row in 0..self.rows {
            for j in self.row_ptrs[row]..self.row_ptrs[row + 1] {
                if self.values[j] != T::zero() {
                    col_indices.push(self.col_indices[j]);
                    values.push(self.values[j]);
                }
            }
            row_ptrs[row + 1] = values.len();
        }

        Self {
            rows: self.rows,
            cols: self.cols,
            row_ptrs,
            col_indices,
            values,
        }
    }

    /// Return the transpose as a new matrix
    ///
    /// Counting-sort transpose, O(rows + cols + nnz): count nonzeros per
    /// original column, prefix-sum the counts into the new row pointers,
    /// then walk the original entries row by row and drop each into the
    /// next free slot of its target row. Entries of a transposed row come
    /// out ordered by original row (stable), with no sorting and no
    /// per-entry searching.
    pub fn transpose(&self) -> Self {
        let nnz = self.nnz();

        let mut row_ptrs = vec![0usize; self.cols + 1];
        for &col in &self.col_indices {
            row_ptrs[col + 1] += 1;
        }
        for i in 1..=self.cols {
            row_ptrs[i] += row_ptrs[i - 1];
        }

        let mut col_indices = vec![0usize; nnz];
        let mut values = vec![T::zero(); nnz];

        // Next free slot per target row. The counting pass above must be
        // complete before placement starts: each cursor depends on the
        // counts of all preceding columns.
        let mut cursor = row_ptrs[..self.cols].to_vec();

        for row in 0..self.rows {
            for j in self.row_ptrs[row]..self.row_ptrs[row + 1] {
                let col = self.col_indices[j];
                let dest = cursor[col];
                col_indices[dest] = row;
                values[dest] = self.values[j];
                cursor[col] += 1;
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            row_ptrs,
            col_indices,
            values,
        }
    }

    /// Expand every stored entry into a one-hot interaction row
    ///
    /// The result has `nnz` rows and `rows + cols` columns, with exactly
    /// two entries of value 1 per row: the k-th stored entry at (row `i`,
    /// stored column `c`) becomes row `k` with ones at columns `i` and
    /// `rows + c`. Each original nonzero thus becomes one training
    /// instance pairing an entity identifier with a feature identifier,
    /// the input layout of pairwise/factorization-style learners.
    pub fn one_hot_encode(&self) -> Self {
        let nnz = self.nnz();

        let row_ptrs = (0..=nnz).map(|i| 2 * i).collect();
        let mut col_indices = Vec::with_capacity(2 * nnz);
        let values = vec![T::one(); 2 * nnz];

        for row in 0..self.rows {
            for j in self.row_ptrs[row]..self.row_ptrs[row + 1] {
                col_indices.push(row);
                col_indices.push(self.rows + self.col_indices[j]);
            }
        }

        Self {
            rows: nnz,
            cols: self.rows + self.cols,
            row_ptrs,
            col_indices,
            values,
        }
    }
}
