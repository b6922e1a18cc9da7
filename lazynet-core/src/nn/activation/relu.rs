use super::ActivationFunction;
use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Rectified Linear Unit: `max(0, z)`.
///
/// The derivative at exactly zero is taken as 0.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ReLU;

impl ReLU {
    pub fn new() -> Self {
        ReLU
    }
}

impl ActivationFunction for ReLU {
    fn compute(&self, input: &Tensor) -> Tensor {
        input.map(|z| if z > 0.0 { z } else { 0.0 })
    }

    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError> {
        input.zip_map(output, "ReLU::differentiate", |z, _| if z > 0.0 { 1.0 } else { 0.0 })
    }
}

impl fmt::Display for ReLU {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReLU")
    }
}
