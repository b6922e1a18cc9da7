use crate::error::LazyNetError;
use crate::nn::layers::layer::{check_input_width, Input, Layer};
use crate::tensor::Tensor;
use rand::RngCore;
use std::fmt;

/// Entry layer of a network: passes samples through after checking their
/// feature count. It has no parameters and no backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    inputs: usize,
}

impl Placeholder {
    /// # Errors
    /// `ConfigurationError` if `inputs` is zero.
    pub fn new(inputs: usize) -> Result<Self, LazyNetError> {
        if inputs == 0 {
            return Err(LazyNetError::ConfigurationError(
                "Number of input features must be greater than 0".to_string(),
            ));
        }
        Ok(Placeholder { inputs })
    }
}

impl Layer for Placeholder {
    /// The width is fixed at construction; `fan_in` is ignored.
    fn initialize(&mut self, _fan_in: usize, _rng: &mut dyn RngCore) -> Result<usize, LazyNetError> {
        Ok(self.inputs)
    }

    fn width(&self) -> Result<usize, LazyNetError> {
        Ok(self.inputs)
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        self.infer(input)
    }

    fn infer(&self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        check_input_width(input, self.inputs, "Placeholder")?;
        Ok(input.clone())
    }
}

impl Input for Placeholder {}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placeholder (inputs: {})", self.inputs)
    }
}
