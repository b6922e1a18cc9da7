use crate::error::LazyNetError;
use crate::nn::activation::{sigmoid, ActivationFunction, SiLU};
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

const NAME: &str = "Swish";

/// Swish: a sigmoid-weighted linear unit with a learned gate per feature.
///
/// `a = z ⊙ σ(β ⊙ z)`, where `β` is a `[1, width]` parameter broadcast over
/// the batch. With `β = 1` this is exactly [`SiLU`].
///
/// The gradient of `β` is the batch sum of `dOut ⊙ z`. The upstream
/// gradient is `((a/z)·(1 − a) + a) ⊙ dOut`, the SiLU derivative evaluated
/// from the cached output, so it inherits the `0/0` singularity at `z = 0`.
#[derive(Debug)]
pub struct Swish {
    initializer: Box<dyn Initializer>,
    width: Option<usize>,
    beta: Option<Parameter>,
    cache: Option<ForwardCache>,
}

impl Swish {
    /// Creates a Swish layer whose `β` starts at 1.
    pub fn new() -> Self {
        Swish::with_initializer(Box::new(Constant::known(1.0)))
    }

    pub fn with_initializer(initializer: Box<dyn Initializer>) -> Self {
        Swish {
            initializer,
            width: None,
            beta: None,
            cache: None,
        }
    }

    /// The learned gate, once initialized.
    pub fn beta(&self) -> Option<&Parameter> {
        self.beta.as_ref()
    }

    fn activate(&self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        let (width, beta) = match (self.width, self.beta.as_ref()) {
            (Some(width), Some(beta)) => (width, beta),
            _ => return Err(LazyNetError::not_initialized(NAME)),
        };
        check_input_width(input, width, NAME)?;
        let gate = input.mul_row(beta)?.map(sigmoid::<f32>);
        gate.mul(input)
    }

    /// Upstream gradient from the captured `[input, output, dOut]`.
    fn gradient(args: Vec<Tensor>) -> Result<Tensor, LazyNetError> {
        let [input, output, d_out] = unpack_args::<3>(args, "Swish::gradient")?;
        SiLU.differentiate(&input, &output)?.mul(&d_out)
    }
}

impl Default for Swish {
    fn default() -> Self {
        Swish::new()
    }
}

impl Layer for Swish {
    fn initialize(&mut self, fan_in: usize, rng: &mut dyn RngCore) -> Result<usize, LazyNetError> {
        if self.beta.is_some() {
            log::warn!("Re-initializing {}; learned parameters are reset", self);
        }
        let fan_out = fan_in;
        let beta = self.initializer.initialize(1, fan_out, rng)?;

        self.width = Some(fan_out);
        self.beta = Some(Parameter::new(beta));
        self.cache = None;

        log::debug!("Initialized {} with width {}", self, fan_out);
        Ok(fan_out)
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

impl Hidden for Swish {
    fn back(&mut self, output_gradient: Deferred, optimizer: &mut dyn Optimizer) -> Result<Deferred, LazyNetError> {
        let beta = self.beta.as_mut().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let ForwardCache { input, output } = self.cache.take().ok_or_else(|| LazyNetError::forward_not_run(NAME))?;

        let d_out = output_gradient.into_tensor()?;
        check_output_gradient(&d_out, output.shape(), NAME)?;

        let d_beta = d_out.mul(&input)?.sum_rows()?;
        let step = optimizer.step(beta, &d_beta)?;
        beta.update(&step)?;

        log::trace!("{} back: updated beta {}", NAME, beta.id());
        Ok(Deferred::new(vec![input, output, d_out], Swish::gradient))
    }

    fn as_parametric(&self) -> Option<&dyn Parametric> {
        Some(self)
    }

    fn as_parametric_mut(&mut self) -> Option<&mut dyn Parametric> {
        Some(self)
    }
}

impl Parametric for Swish {
    fn parameters(&self) -> Result<Vec<(String, &Parameter)>, LazyNetError> {
        let beta = self.beta.as_ref().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        Ok(vec![("beta".to_string(), beta)])
    }

    fn restore(&mut self, mut parameters: Vec<(String, Parameter)>) -> Result<(), LazyNetError> {
        let current = self.beta.as_ref().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let beta = take_parameter(&mut parameters, "beta", NAME)?;
        check_restored_shape(current, &beta, "beta")?;
        warn_unused(&parameters, NAME);
        self.beta = Some(beta);
        Ok(())
    }
}

impl fmt::Display for Swish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Swish (initializer: {})", self.initializer)
    }
}

#[cfg(test)]
#[path = "swish_test.rs"]
mod tests;
