use crate::error::LazyNetError;
use crate::nn::deferred::Deferred;
use crate::nn::init::{Constant, Initializer};
use crate::nn::layers::layer::{
    check_input_width, check_output_gradient, check_restored_shape, take_parameter, unpack_args, warn_unused,
    ForwardCache, Hidden, Layer, Parametric,
};
use crate::nn::parameter::Parameter;
use crate::optim::Optimizer;
use crate::tensor::Tensor;
use rand::RngCore;
use std::fmt;

const NAME: &str = "PReLU";

/// Parametric ReLU: `z` for positive inputs, `α ⊙ z` otherwise, with a
/// learned `[1, width]` leakage `α`.
///
/// `dα = Σ_batch dOut ⊙ min(z, 0)`. The upstream gradient uses the `α` that
/// produced the forward output, not the updated one.
#[derive(Debug)]
pub struct PReLU {
    initializer: Box<dyn Initializer>,
    width: Option<usize>,
    alpha: Option<Parameter>,
    cache: Option<ForwardCache>,
}

impl PReLU {
    /// Creates a PReLU layer whose `α` starts at 0.25.
    pub fn new() -> Self {
        PReLU::with_initializer(Box::new(Constant::known(0.25)))
    }

    pub fn with_initializer(initializer: Box<dyn Initializer>) -> Self {
        PReLU {
            initializer,
            width: None,
            alpha: None,
            cache: None,
        }
    }

    pub fn alpha(&self) -> Option<&Parameter> {
        self.alpha.as_ref()
    }

    fn activate(&self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        let (width, alpha) = match (self.width, self.alpha.as_ref()) {
            (Some(width), Some(alpha)) => (width, alpha),
            _ => return Err(LazyNetError::not_initialized(NAME)),
        };
        check_input_width(input, width, NAME)?;
        let negative = input.clip_upper(0.0).mul_row(alpha)?;
        input.clip_lower(0.0).add(&negative)
    }

    fn gradient(args: Vec<Tensor>) -> Result<Tensor, LazyNetError> {
        let [input, alpha, d_out] = unpack_args::<3>(args, "PReLU::gradient")?;
        let (rows, cols) = input.dims2()?;
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let slope = if input.get(r, c)? > 0.0 { 1.0 } else { alpha.get(0, c)? };
                data.push(slope * d_out.get(r, c)?);
            }
        }
        Tensor::new(data, vec![rows, cols])
    }
}

impl Default for PReLU {
    fn default() -> Self {
        PReLU::new()
    }
}

impl Layer for PReLU {
    fn initialize(&mut self, fan_in: usize, rng: &mut dyn RngCore) -> Result<usize, LazyNetError> {
        if self.alpha.is_some() {
            log::warn!("Re-initializing {}; learned parameters are reset", self);
        }
        let alpha = self.initializer.initialize(1, fan_in, rng)?;

        self.width = Some(fan_in);
        self.alpha = Some(Parameter::new(alpha));
        self.cache = None;

        log::debug!("Initialized {} with width {}", self, fan_in);
        Ok(fan_in)
    }

    fn width(&self) -> Result<usize, LazyNetError> {
        self.width.ok_or_else(|| LazyNetError::not_initialized(NAME))
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        let output = self.activate(input)?;
        log::trace!("{} forward over {:?}", NAME, input.shape());
        self.cache = Some(ForwardCache {
            input: input.clone(),
            output: output.clone(),
        });
        Ok(output)
    }

    fn infer(&self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        self.activate(input)
    }
}

impl Hidden for PReLU {
    fn back(&mut self, output_gradient: Deferred, optimizer: &mut dyn Optimizer) -> Result<Deferred, LazyNetError> {
        let alpha = self.alpha.as_mut().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let ForwardCache { input, output } = self.cache.take().ok_or_else(|| LazyNetError::forward_not_run(NAME))?;

        let d_out = output_gradient.into_tensor()?;
        check_output_gradient(&d_out, output.shape(), NAME)?;

        let alpha_before = alpha.value().clone();
        let d_alpha = d_out.mul(&input.clip_upper(0.0))?.sum_rows()?;
        let step = optimizer.step(alpha, &d_alpha)?;
        alpha.update(&step)?;

        log::trace!("{} back: updated alpha {}", NAME, alpha.id());
        Ok(Deferred::new(vec![input, alpha_before, d_out], PReLU::gradient))
    }

    fn as_parametric(&self) -> Option<&dyn Parametric> {
        Some(self)
    }

    fn as_parametric_mut(&mut self) -> Option<&mut dyn Parametric> {
        Some(self)
    }
}

impl Parametric for PReLU {
    fn parameters(&self) -> Result<Vec<(String, &Parameter)>, LazyNetError> {
        let alpha = self.alpha.as_ref().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        Ok(vec![("alpha".to_string(), alpha)])
    }

    fn restore(&mut self, mut parameters: Vec<(String, Parameter)>) -> Result<(), LazyNetError> {
        let current = self.alpha.as_ref().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let alpha = take_parameter(&mut parameters, "alpha", NAME)?;
        check_restored_shape(current, &alpha, "alpha")?;
        warn_unused(&parameters, NAME);
        self.alpha = Some(alpha);
        Ok(())
    }
}

impl fmt::Display for PReLU {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PReLU (initializer: {})", self.initializer)
    }
}

#[cfg(test)]
#[path = "prelu_test.rs"]
mod tests;
