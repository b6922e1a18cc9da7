use super::ActivationFunction;
use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Leaky Rectified Linear Unit: `z` for positive inputs, `leakage·z` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakyReLU {
    leakage: f32,
}

impl LeakyReLU {
    /// # Errors
    /// `ConfigurationError` unless `0 < leakage < 1`.
    pub fn new(leakage: f32) -> Result<Self, LazyNetError> {
        if !(leakage > 0.0 && leakage < 1.0) {
            return Err(LazyNetError::ConfigurationError(format!(
                "Leakage must be between 0 and 1, {} given",
                leakage
            )));
        }
        Ok(LeakyReLU { leakage })
    }

    pub fn leakage(&self) -> f32 {
        self.leakage
    }
}

impl Default for LeakyReLU {
    fn default() -> Self {
        LeakyReLU { leakage: 0.1 }
    }
}

impl ActivationFunction for LeakyReLU {
    fn compute(&self, input: &Tensor) -> Tensor {
        let leakage = self.leakage;
        input.map(|z| if z > 0.0 { z } else { leakage * z })
    }

    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError> {
        let leakage = self.leakage;
        input.zip_map(output, "LeakyReLU::differentiate", |z, _| {
            if z > 0.0 {
                1.0
            } else {
                leakage
            }
        })
    }
}

impl fmt::Display for LeakyReLU {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Leaky ReLU (leakage: {})", self.leakage)
    }
}
