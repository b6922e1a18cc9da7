use super::{sigmoid, ActivationFunction};
use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Smooth approximation of ReLU: `ln(1 + eᶻ)`.
///
/// Evaluated as `max(z, 0) + ln(1 + e^-|z|)` so large inputs do not overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SoftPlus;

impl SoftPlus {
    pub fn new() -> Self {
        SoftPlus
    }
}

impl ActivationFunction for SoftPlus {
    fn compute(&self, input: &Tensor) -> Tensor {
        input.map(|z| z.max(0.0) + (-z.abs()).exp().ln_1p())
    }

    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError> {
        input.zip_map(output, "SoftPlus::differentiate", |z, _| sigmoid(z))
    }
}

impl fmt::Display for SoftPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Soft Plus")
    }
}
