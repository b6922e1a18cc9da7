// src/tensor/mod.rs

use crate::error::LazyNetError;

pub mod create; // Make the create module public
mod arithmetic;
mod debug;
mod linalg;

// Re-export creation functions to make them public
pub use create::{full, ones, zeros, zeros_like};

/// A dense, row-major, multi-dimensional array of `f32` values.
///
/// `Tensor` owns its buffer: cloning copies the data. Layers work with
/// 2-D tensors shaped `[batch, features]`, where each row is one sample and
/// each column one feature (channel).
///
/// There is no implicit broadcasting. Elementwise operations require equal
/// shapes and fail with [`LazyNetError::ShapeMismatch`] otherwise; the only
/// broadcast is the explicit row-vector form (`mul_row`, `add_row`).
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a new Tensor with the given f32 data and shape.
    ///
    /// This is the primary constructor for creating tensors from raw data.
    ///
    /// # Errors
    /// Returns `TensorCreationError` if `data_vec.len()` is not the product of
    /// the dimensions in `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, LazyNetError> {
        let numel: usize = shape.iter().product();
        if data_vec.len() != numel || shape.is_empty() {
            return Err(LazyNetError::TensorCreationError {
                data_len: data_vec.len(),
                shape,
            });
        }
        Ok(Tensor {
            data: data_vec,
            shape,
        })
    }

    /// Builds a `[rows.len(), n]` matrix from row slices of equal length `n`.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, LazyNetError> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(LazyNetError::shape_mismatch(&[cols], &[row.len()], "from_rows"));
            }
            data.extend_from_slice(row);
        }
        Tensor::new(data, vec![rows.len(), cols])
    }

    /// Creates a `[1, n]` row vector.
    pub fn row_vector(values: Vec<f32>) -> Result<Self, LazyNetError> {
        let n = values.len();
        Tensor::new(values, vec![1, n])
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Row-major view of the elements.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the tensor and returns its buffer.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Returns `(rows, cols)` of a 2-D tensor.
    ///
    /// # Errors
    /// `RankMismatch` if the tensor is not 2-D.
    pub fn dims2(&self) -> Result<(usize, usize), LazyNetError> {
        match self.shape.as_slice() {
            [rows, cols] => Ok((*rows, *cols)),
            _ => Err(LazyNetError::RankMismatch {
                expected: 2,
                actual: self.shape.len(),
                operation: "dims2".to_string(),
            }),
        }
    }

    /// Element at `(row, col)` of a 2-D tensor.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if either index is past the end of its axis.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, LazyNetError> {
        let (rows, cols) = self.dims2()?;
        if row >= rows || col >= cols {
            return Err(LazyNetError::IndexOutOfBounds {
                index: vec![row, col],
                shape: vec![rows, cols],
            });
        }
        Ok(self.data[row * cols + col])
    }

    /// `true` if no element is NaN or infinite.
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod create_tests;

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod arithmetic_tests;

#[cfg(test)]
#[path = "linalg_test.rs"]
mod linalg_tests;
