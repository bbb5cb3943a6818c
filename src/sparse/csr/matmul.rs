//! CSR products: SpMM against a dense matrix, in-place factor recomputation

use num_traits::Float;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::dense::Matrix;
use crate::error::{Error, Result};

use super::CsrMatrix;

impl<T: Float + Send + Sync> CsrMatrix<T> {
    /// Sparse-dense matrix product: `C = self * dense`
    ///
    /// For each sparse row, accumulates `value * dense_row[col]` into the
    /// corresponding dense output row. Each output row depends only on its
    /// own sparse row, so rows run in parallel under the `rayon` feature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `self.cols != dense.rows`.
    ///
    /// # Example
    ///
    /// ```
    /// use linr::prelude::*;
    ///
    /// let a = CsrMatrix::from_parts(2, 2, vec![0, 2, 3], vec![0, 1, 0], vec![1.0, 2.0, 3.0])?;
    /// let b = Matrix::from_vec(2, 1, vec![1.0, 2.0])?;
    /// let c = a.matmul(&b)?;
    /// assert_eq!(c.as_slice(), &[5.0, 3.0]);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn matmul(&self, dense: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != dense.rows() {
            return Err(Error::shape_mismatch(&[self.cols], &[dense.rows()]));
        }

        let n = dense.cols();
        let mut out = Matrix::zeros(self.rows, n);
        self.spmm_into(dense, &mut out, n);
        Ok(out)
    }

    #[cfg(feature = "rayon")]
    fn spmm_into(&self, dense: &Matrix<T>, out: &mut Matrix<T>, n: usize) {
        if n == 0 {
            return;
        }
        out.as_mut_slice()
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(row, out_row)| self.spmm_row(dense, row, out_row));
    }

    #[cfg(not(feature = "rayon"))]
    fn spmm_into(&self, dense: &Matrix<T>, out: &mut Matrix<T>, n: usize) {
        if n == 0 {
            return;
        }
        for row in 0..self.rows {
            self.spmm_row(dense, row, out.row_mut(row));
        }
    }

    fn spmm_row(&self, dense: &Matrix<T>, row: usize, out_row: &mut [T]) {
        for j in self.row_ptrs[row]..self.row_ptrs[row + 1] {
            let val = self.values[j];
            let dense_row = dense.row(self.col_indices[j]);
            for (o, &d) in out_row.iter_mut().zip(dense_row) {
                *o = *o + val * d;
            }
        }
    }

    /// Recompute every stored value from two dense factors, in place
    ///
    /// The value at (row `i`, local slot `j`) becomes the dot product of
    /// `lhs` row `i` and `rhs_t` row `column_of(i, j)` over the shared
    /// inner dimension (`rhs_t` is stored one-row-per-column). Structure
    /// (`row_ptrs`, `col_indices`) is untouched; only values are
    /// overwritten, which keeps the set of observed positions while
    /// refreshing their predictions from low-rank factors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `lhs.rows != self.rows`,
    /// `rhs_t.rows != self.cols`, or the factors disagree on the inner
    /// dimension. Nothing is written on error.
    pub fn recompute_from_factors(&mut self, lhs: &Matrix<T>, rhs_t: &Matrix<T>) -> Result<()> {
        if lhs.rows() != self.rows {
            return Err(Error::shape_mismatch(&[self.rows], &[lhs.rows()]));
        }
        if rhs_t.rows() != self.cols {
            return Err(Error::shape_mismatch(&[self.cols], &[rhs_t.rows()]));
        }
        if lhs.cols() != rhs_t.cols() {
            return Err(Error::shape_mismatch(&[lhs.cols()], &[rhs_t.cols()]));
        }

        for row in 0..self.rows {
            for j in self.row_ptrs[row]..self.row_ptrs[row + 1] {
                let factor_row = lhs.row(row);
                let feature_row = rhs_t.row(self.col_indices[j]);
                let mut sum = T::zero();
                for (&a, &b) in factor_row.iter().zip(feature_row) {
                    sum = sum + a * b;
                }
                self.values[j] = sum;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul() {
        // Sparse A [2, 3]:
        // [1, 0, 2]
        // [0, 3, 0]
        let a = CsrMatrix::from_parts(2, 3, vec![0, 2, 3], vec![0, 2, 1], vec![1.0, 2.0, 3.0])
            .unwrap();

        // Dense B [3, 2]:
        // [1, 2]
        // [3, 4]
        // [5, 6]
        let b = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();

        // C[0,0] = 1*1 + 2*5 = 11, C[0,1] = 1*2 + 2*6 = 14
        // C[1,0] = 3*3 = 9,        C[1,1] = 3*4 = 12
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.rows(), 2);
        assert_eq!(c.cols(), 2);
        assert_eq!(c.as_slice(), &[11.0, 14.0, 9.0, 12.0]);
    }

    #[test]
    fn test_matmul_identity() {
        let eye = CsrMatrix::from_diagonal(&[1.0, 1.0, 1.0]);
        let b = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let c = eye.matmul(&b).unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn test_matmul_diagonal_scales_rows() {
        let d = CsrMatrix::from_diagonal(&[2.0, 0.5, -1.0]);
        let b = Matrix::from_vec(3, 2, vec![1.0, 2.0, 4.0, 8.0, 3.0, 6.0]).unwrap();
        let c = d.matmul(&b).unwrap();
        assert_eq!(c.as_slice(), &[2.0, 4.0, 2.0, 4.0, -3.0, -6.0]);
    }

    #[test]
    fn test_matmul_empty_matrix() {
        let a = CsrMatrix::<f64>::empty(2, 3);
        let b = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let a = CsrMatrix::from_parts(2, 3, vec![0, 2, 3], vec![0, 2, 1], vec![1.0, 2.0, 3.0])
            .unwrap();
        let b = Matrix::<f64>::zeros(2, 2);
        assert!(a.matmul(&b).is_err());
    }

    #[test]
    fn test_matmul_unsorted_row() {
        // Row stores columns out of order; result must not depend on order
        let a = CsrMatrix::from_parts(1, 3, vec![0, 2], vec![2, 0], vec![2.0, 1.0]).unwrap();
        let b = Matrix::from_vec(3, 1, vec![10.0, 20.0, 30.0]).unwrap();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.as_slice(), &[70.0]);
    }

    #[test]
    fn test_recompute_from_factors() {
        // Observed positions: (0,1) and (1,2); latent dimension 2
        let mut m =
            CsrMatrix::from_parts(2, 3, vec![0, 1, 2], vec![1, 2], vec![5.0, 7.0]).unwrap();

        // lhs: row factors [2 x 2], rhs_t: one row per column [3 x 2]
        let lhs = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let rhs_t = Matrix::from_vec(3, 2, vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();

        m.recompute_from_factors(&lhs, &rhs_t).unwrap();

        // (0,1): lhs row 0 . rhs_t row 1 = 2; (1,2): lhs row 1 . rhs_t row 2 = 7
        assert_eq!(m.values(), &[2.0, 7.0]);
        // Structure untouched
        assert_eq!(m.row_ptrs(), &[0, 1, 2]);
        assert_eq!(m.col_indices(), &[1, 2]);
    }

    #[test]
    fn test_recompute_from_factors_shape_checks() {
        let mut m =
            CsrMatrix::from_parts(2, 3, vec![0, 1, 2], vec![1, 2], vec![5.0, 7.0]).unwrap();

        // lhs row count off
        let lhs = Matrix::<f64>::zeros(3, 2);
        let rhs_t = Matrix::<f64>::zeros(3, 2);
        assert!(m.recompute_from_factors(&lhs, &rhs_t).is_err());

        // rhs_t row count off
        let lhs = Matrix::<f64>::zeros(2, 2);
        let rhs_t = Matrix::<f64>::zeros(2, 2);
        assert!(m.recompute_from_factors(&lhs, &rhs_t).is_err());

        // inner dimensions disagree
        let lhs = Matrix::<f64>::zeros(2, 2);
        let rhs_t = Matrix::<f64>::zeros(3, 4);
        assert!(m.recompute_from_factors(&lhs, &rhs_t).is_err());

        // Values untouched after failed calls
        assert_eq!(m.values(), &[5.0, 7.0]);
    }
}
