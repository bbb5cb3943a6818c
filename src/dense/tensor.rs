//! Dense tensor: a stack of equally-shaped matrices

use std::ops::{Index, IndexMut};

use num_traits::Float;

use crate::error::{Error, Result};

use super::Matrix;

/// Dense rank-3 tensor stored as `heights` matrices of shape `rows x cols`
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    rows: usize,
    cols: usize,
    slices: Vec<Matrix<T>>,
}

impl<T: Float> Tensor<T> {
    /// Create a zero-filled tensor
    pub fn zeros(heights: usize, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            slices: (0..heights).map(|_| Matrix::zeros(rows, cols)).collect(),
        }
    }

    /// Create a tensor with every element set to `value`
    pub fn filled(heights: usize, rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            slices: (0..heights)
                .map(|_| Matrix::filled(rows, cols, value))
                .collect(),
        }
    }

    /// Returns the number of matrix slices
    #[inline]
    pub fn heights(&self) -> usize {
        self.slices.len()
    }

    /// Returns the row count of each slice
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the column count of each slice
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Elementwise sum, returning an error on shape mismatch
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.check_shape(rhs)?;
        let slices = self
            .slices
            .iter()
            .zip(&rhs.slices)
            .map(|(a, b)| a.try_add(b))
            .collect::<Result<_>>()?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            slices,
        })
    }

    /// Elementwise difference, returning an error on shape mismatch
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.check_shape(rhs)?;
        let slices = self
            .slices
            .iter()
            .zip(&rhs.slices)
            .map(|(a, b)| a.try_sub(b))
            .collect::<Result<_>>()?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            slices,
        })
    }

    /// Sum of squared elements over every slice
    pub fn squared_sum(&self) -> T {
        let mut sum = T::zero();
        for m in &self.slices {
            sum = sum + m.squared_sum();
        }
        sum
    }

    /// Frobenius norm over every slice
    pub fn frobenius_norm(&self) -> T {
        self.squared_sum().sqrt()
    }

    fn check_shape(&self, rhs: &Self) -> Result<()> {
        if self.heights() != rhs.heights() || self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(Error::shape_mismatch(
                &[self.heights(), self.rows, self.cols],
                &[rhs.heights(), rhs.rows, rhs.cols],
            ));
        }
        Ok(())
    }
}

impl<T> Index<usize> for Tensor<T> {
    type Output = Matrix<T>;

    #[inline]
    fn index(&self, height: usize) -> &Matrix<T> {
        &self.slices[height]
    }
}

impl<T> IndexMut<usize> for Tensor<T> {
    #[inline]
    fn index_mut(&mut self, height: usize) -> &mut Matrix<T> {
        &mut self.slices[height]
    }
}
