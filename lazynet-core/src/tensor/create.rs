// src/tensor/create.rs

use crate::error::LazyNetError;
use crate::tensor::Tensor;

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, LazyNetError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, LazyNetError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, LazyNetError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a tensor of zeros with the same shape as `other`.
pub fn zeros_like(other: &Tensor) -> Tensor {
    Tensor {
        data: vec![0.0; other.numel()],
        shape: other.shape.clone(),
    }
}
