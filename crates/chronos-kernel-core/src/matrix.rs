//! Dense matrix multiplication.
//!
//! Matrices are stored row-major in a flat buffer. Products are computed by
//! plain triple-nested accumulation with the inner index running from 0 to
//! `cols - 1`, so results are bit-for-bit reproducible for a given input.

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// A dense, rectangular matrix of `f64`.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from nested rows.
    ///
    /// Fails if there are no rows, the first row is empty, or any row's
    /// length differs from the first.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CoreError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(CoreError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(CoreError::RaggedMatrix {
                    row: i,
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// The `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            rows: n,
            cols: n,
            data,
        }
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(<[f64]>::to_vec).collect()
    }

    /// Multiply `self × rhs`.
    ///
    /// `self.cols()` must equal `rhs.rows()`. The result is
    /// `self.rows() × rhs.cols()`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, CoreError> {
        if self.cols != rhs.rows {
            return Err(CoreError::DimensionMismatch {
                left_cols: self.cols,
                right_rows: rhs.rows,
            });
        }

        let (n, p) = (self.rows, rhs.cols);
        let mut data = vec![0.0; n * p];
        for i in 0..n {
            let a_row = self.row(i);
            for j in 0..p {
                let mut sum = 0.0;
                for (k, a) in a_row.iter().enumerate() {
                    sum += a * rhs.data[k * p + j];
                }
                data[i * p + j] = sum;
            }
        }

        Ok(Matrix {
            rows: n,
            cols: p,
            data,
        })
    }
}

impl std::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matrix({}x{})", self.rows, self.cols)
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for row in self.data.chunks(self.cols.max(1)) {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = CoreError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}
