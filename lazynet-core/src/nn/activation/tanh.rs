use super::ActivationFunction;
use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Hyperbolic tangent, output in `(-1, 1)`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct HyperbolicTangent;

impl HyperbolicTangent {
    pub fn new() -> Self {
        HyperbolicTangent
    }
}

impl ActivationFunction for HyperbolicTangent {
    fn compute(&self, input: &Tensor) -> Tensor {
        input.map(f32::tanh)
    }

    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError> {
        input.zip_map(output, "HyperbolicTangent::differentiate", |_, a| 1.0 - a * a)
    }
}

impl fmt::Display for HyperbolicTangent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hyperbolic Tangent")
    }
}
