use super::ActivationFunction;
use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Exponential Linear Unit: `z` for positive inputs, `alpha·(eᶻ − 1)` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ELU {
    alpha: f32,
}

impl ELU {
    /// # Errors
    /// `ConfigurationError` if `alpha` is negative or not finite.
    pub fn new(alpha: f32) -> Result<Self, LazyNetError> {
        if !(alpha >= 0.0 && alpha.is_finite()) {
            return Err(LazyNetError::ConfigurationError(format!(
                "Alpha must be greater than or equal to 0, {} given",
                alpha
            )));
        }
        Ok(ELU { alpha })
    }
}

impl Default for ELU {
    fn default() -> Self {
        ELU { alpha: 1.0 }
    }
}

impl ActivationFunction for ELU {
    fn compute(&self, input: &Tensor) -> Tensor {
        let alpha = self.alpha;
        input.map(|z| if z > 0.0 { z } else { alpha * (z.exp() - 1.0) })
    }

    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError> {
        let alpha = self.alpha;
        input.zip_map(output, "ELU::differentiate", |z, a| if z > 0.0 { 1.0 } else { a + alpha })
    }
}

impl fmt::Display for ELU {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELU (alpha: {})", self.alpha)
    }
}
