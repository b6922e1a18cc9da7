// src/tensor/arithmetic.rs
//
// Elementwise arithmetic. Binary operations require identical shapes.

use crate::error::LazyNetError;
use crate::tensor::Tensor;

impl Tensor {
    /// Applies `f` to every element, producing a tensor of the same shape.
    pub fn map<F>(&self, f: F) -> Tensor
    where
        F: Fn(f32) -> f32,
    {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Combines two tensors of identical shape element by element.
    ///
    /// # Errors
    /// `ShapeMismatch` (tagged with `operation`) if the shapes differ.
    pub fn zip_map<F>(&self, other: &Tensor, operation: &str, f: F) -> Result<Tensor, LazyNetError>
    where
        F: Fn(f32, f32) -> f32,
    {
        if self.shape != other.shape {
            return Err(LazyNetError::shape_mismatch(&self.shape, &other.shape, operation));
        }
        Ok(Tensor {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
        })
    }

    pub fn add(&self, other: &Tensor) -> Result<Tensor, LazyNetError> {
        self.zip_map(other, "add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, LazyNetError> {
        self.zip_map(other, "sub", |a, b| a - b)
    }

    /// Hadamard (elementwise) product.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, LazyNetError> {
        self.zip_map(other, "mul", |a, b| a * b)
    }

    /// Elementwise quotient. Division by zero follows IEEE 754 (inf or NaN).
    pub fn div(&self, other: &Tensor) -> Result<Tensor, LazyNetError> {
        self.zip_map(other, "div", |a, b| a / b)
    }

    pub fn mul_scalar(&self, scalar: f32) -> Tensor {
        self.map(|x| x * scalar)
    }

    pub fn add_scalar(&self, scalar: f32) -> Tensor {
        self.map(|x| x + scalar)
    }

    pub fn square(&self) -> Tensor {
        self.map(|x| x * x)
    }

    pub fn sqrt(&self) -> Tensor {
        self.map(f32::sqrt)
    }

    /// `min(x, ceiling)` elementwise.
    pub fn clip_upper(&self, ceiling: f32) -> Tensor {
        self.map(|x| x.min(ceiling))
    }

    /// `max(x, floor)` elementwise.
    pub fn clip_lower(&self, floor: f32) -> Tensor {
        self.map(|x| x.max(floor))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
