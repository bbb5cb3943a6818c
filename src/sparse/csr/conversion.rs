//! CSR conversion: to and from dense matrices

use num_traits::Float;

use crate::dense::Matrix;

use super::CsrMatrix;

impl<T: Float> CsrMatrix<T> {
    /// Build a CSR matrix from the nonzero entries of a dense matrix
    ///
    /// Entries compare exactly against zero, matching
    /// [`prune_zeros`](Self::prune_zeros). The result stores each row's
    /// surviving entries in ascending column order.
    pub fn from_dense(dense: &Matrix<T>) -> Self {
        let rows = dense.rows();
        let cols = dense.cols();

        let mut row_ptrs = vec![0usize; rows + 1];
        let mut col_indices = Vec::new();
        let mut values = Vec::new();

        for row in 0..rows {
            for (col, &v) in dense.row(row).iter().enumerate() {
                if v != T::zero() {
                    col_indices.push(col);
                    values.push(v);
                }
            }
            row_ptrs[row + 1] = values.len();
        }

        Self {
            rows,
            cols,
            row_ptrs,
            col_indices,
            values,
        }
    }

    /// Expand to a dense matrix
    ///
    /// Entries sharing a position accumulate.
    pub fn to_dense(&self) -> Matrix<T> {
        let mut out = Matrix::zeros(self.rows, self.cols);
        for row in 0..self.rows {
            for j in self.row_ptrs[row]..self.row_ptrs[row + 1] {
                let col = self.col_indices[j];
                out[(row, col)] = out[(row, col)] + self.values[j];
            }
        }
        out
    }
}
