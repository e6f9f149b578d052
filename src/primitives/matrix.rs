//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{CocinarError, Result};
use serde::{Deserialize, Serialize};

/// Pivots with a smaller magnitude than this are treated as zero by
/// [`Matrix::inverse`].
pub const PIVOT_EPSILON: f64 = 1e-12;

/// A 2D matrix of floating-point values (row-major storage).
///
/// # Examples
///
/// ```
/// use cocinar::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(CocinarError::dimension_mismatch(
                "rows*cols",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from equally sized rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(CocinarError::dimension_mismatch("row length", cols, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a Vector.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        let end = start + self.cols;
        Vector::from_slice(&self.data[start..end])
    }

    /// Returns a column as a Vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vector<T> {
        (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn eye(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            data,
            rows: n,
            cols: n,
        }
    }

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the inner dimensions differ.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(CocinarError::DimensionMismatch {
                expected: format!("{}x{} * {}xN", self.rows, self.cols, self.cols),
                actual: format!("{}x{} * {}x{}", self.rows, self.cols, other.rows, other.cols),
            });
        }

        let mut result = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                result[i * other.cols + j] = sum;
            }
        }

        Ok(Self {
            data: result,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the vector length differs from the
    /// column count.
    pub fn matvec(&self, vec: &Vector<f64>) -> Result<Vector<f64>> {
        if self.cols != vec.len() {
            return Err(CocinarError::dimension_mismatch(
                "matrix columns",
                self.cols,
                vec.len(),
            ));
        }

        Ok((0..self.rows).map(|i| self.row(i).dot(vec)).collect())
    }

    /// Inverts a square matrix by Gauss-Jordan elimination with partial
    /// pivoting.
    ///
    /// At each column the row with the largest absolute value on or below
    /// the diagonal is swapped into place, the pivot row is normalized and
    /// the column is eliminated from every other row.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for a non-square matrix and
    /// `SingularMatrix` when a pivot magnitude falls below
    /// [`PIVOT_EPSILON`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cocinar::primitives::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![4.0, 7.0, 2.0, 6.0]).expect("2x2");
    /// let inv = m.inverse().expect("non-singular");
    /// assert!((inv.get(0, 0) - 0.6).abs() < 1e-12);
    /// assert!((inv.get(0, 1) + 0.7).abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<Self> {
        if self.rows != self.cols {
            return Err(CocinarError::DimensionMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }

        let n = self.rows;
        let mut a = self.data.clone();
        let mut inv = Self::eye(n).data;

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_abs = a[col * n + col].abs();
            for row in (col + 1)..n {
                let candidate = a[row * n + col].abs();
                if candidate > pivot_abs {
                    pivot_abs = candidate;
                    pivot_row = row;
                }
            }

            if pivot_abs < PIVOT_EPSILON {
                return Err(CocinarError::SingularMatrix { pivot: pivot_abs });
            }

            if pivot_row != col {
                for j in 0..n {
                    a.swap(col * n + j, pivot_row * n + j);
                    inv.swap(col * n + j, pivot_row * n + j);
                }
            }

            let pivot = a[col * n + col];
            for j in 0..n {
                a[col * n + j] /= pivot;
                inv[col * n + j] /= pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[row * n + col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n {
                    a[row * n + j] -= factor * a[col * n + j];
                    inv[row * n + j] -= factor * inv[col * n + j];
                }
            }
        }

        Ok(Self {
            data: inv,
            rows: n,
            cols: n,
        })
    }

    /// Returns a copy with a leading column of ones (bias term).
    #[must_use]
    pub fn with_bias_column(&self) -> Self {
        let mut data = Vec::with_capacity(self.rows * (self.cols + 1));
        for i in 0..self.rows {
            data.push(1.0);
            data.extend_from_slice(&self.data[i * self.cols..(i + 1) * self.cols]);
        }
        Self {
            data,
            rows: self.rows,
            cols: self.cols + 1,
        }
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
