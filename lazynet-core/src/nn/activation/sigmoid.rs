use super::{sigmoid, ActivationFunction};
use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Logistic sigmoid, squashing inputs into `(0, 1)`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Self {
        Sigmoid
    }
}

impl ActivationFunction for Sigmoid {
    fn compute(&self, input: &Tensor) -> Tensor {
        input.map(sigmoid::<f32>)
    }

    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError> {
        input.zip_map(output, "Sigmoid::differentiate", |_, a| a * (1.0 - a))
    }
}

impl fmt::Display for Sigmoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sigmoid")
    }
}
