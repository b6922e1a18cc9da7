use crate::error::LazyNetError;
use crate::nn::deferred::Deferred;
use crate::nn::init::{Constant, He, Initializer};
use crate::nn::layers::layer::{
    check_input_width, check_output_gradient, check_restored_shape, take_parameter, unpack_args, warn_unused,
    ForwardCache, Hidden, Layer, Parametric,
};
use crate::nn::parameter::Parameter;
use crate::optim::Optimizer;
use crate::tensor::Tensor;
use rand::RngCore;
use std::fmt;

const NAME: &str = "Dense";

/// Fully-connected layer: `z = x · Wᵀ + b`.
///
/// Weights are stored as `[neurons, fan_in]` and the optional bias as
/// `[1, neurons]`. With an L2 penalty `λ` the weight gradient becomes
/// `dOutᵀ · x + λW`; the bias is never penalized.
///
/// The upstream gradient `dOut · W` is computed from the weights as they
/// were during the forward pass.
#[derive(Debug)]
pub struct Dense {
    neurons: usize,
    l2_penalty: f32,
    bias: bool,
    weight_initializer: Box<dyn Initializer>,
    bias_initializer: Box<dyn Initializer>,
    weights: Option<Parameter>,
    biases: Option<Parameter>,
    cache: Option<ForwardCache>,
}

impl Dense {
    /// Creates a layer of `neurons` units with He-initialized weights and a
    /// zero-initialized bias.
    ///
    /// # Errors
    /// `ConfigurationError` if `neurons` is zero.
    pub fn new(neurons: usize) -> Result<Self, LazyNetError> {
        if neurons == 0 {
            return Err(LazyNetError::ConfigurationError(
                "Number of neurons must be greater than 0".to_string(),
            ));
        }
        Ok(Dense {
            neurons,
            l2_penalty: 0.0,
            bias: true,
            weight_initializer: Box::new(He),
            bias_initializer: Box::new(Constant::known(0.0)),
            weights: None,
            biases: None,
            cache: None,
        })
    }

    /// Sets the L2 regularization strength applied to the weights.
    ///
    /// # Errors
    /// `ConfigurationError` if `l2_penalty` is negative or not finite.
    pub fn with_l2_penalty(mut self, l2_penalty: f32) -> Result<Self, LazyNetError> {
        if !(l2_penalty >= 0.0 && l2_penalty.is_finite()) {
            return Err(LazyNetError::ConfigurationError(format!(
                "L2 penalty must be a non-negative finite number, {} given",
                l2_penalty
            )));
        }
        self.l2_penalty = l2_penalty;
        Ok(self)
    }

    pub fn without_bias(mut self) -> Self {
        self.bias = false;
        self
    }

    pub fn with_weight_initializer(mut self, initializer: Box<dyn Initializer>) -> Self {
        self.weight_initializer = initializer;
        self
    }

    pub fn with_bias_initializer(mut self, initializer: Box<dyn Initializer>) -> Self {
        self.bias_initializer = initializer;
        self
    }

    pub fn neurons(&self) -> usize {
        self.neurons
    }

    pub fn weights(&self) -> Option<&Parameter> {
        self.weights.as_ref()
    }

    pub fn biases(&self) -> Option<&Parameter> {
        self.biases.as_ref()
    }

    fn activate(&self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        let weights = self.weights.as_ref().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let fan_in = weights.shape()[1];
        check_input_width(input, fan_in, NAME)?;

        let z = input.matmul(&weights.transpose()?)?;
        match &self.biases {
            Some(biases) => z.add_row(biases),
            None => Ok(z),
        }
    }

    fn gradient(args: Vec<Tensor>) -> Result<Tensor, LazyNetError> {
        let [d_out, weights] = unpack_args::<2>(args, "Dense::gradient")?;
        d_out.matmul(&weights)
    }
}

impl Layer for Dense {
    fn initialize(&mut self, fan_in: usize, rng: &mut dyn RngCore) -> Result<usize, LazyNetError> {
        if self.weights.is_some() {
            log::warn!("Re-initializing {}; learned parameters are reset", self);
        }
        let weights = self.weight_initializer.initialize(self.neurons, fan_in, rng)?;
        let biases = if self.bias {
            Some(Parameter::new(self.bias_initializer.initialize(1, self.neurons, rng)?))
        } else {
            None
        };

        self.weights = Some(Parameter::new(weights));
        self.biases = biases;
        self.cache = None;

        log::debug!("Initialized {} with fan in {}", self, fan_in);
        Ok(self.neurons)
    }

    fn width(&self) -> Result<usize, LazyNetError> {
        match self.weights {
            Some(_) => Ok(self.neurons),
            None => Err(LazyNetError::not_initialized(NAME)),
        }
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

impl Hidden for Dense {
    fn back(&mut self, output_gradient: Deferred, optimizer: &mut dyn Optimizer) -> Result<Deferred, LazyNetError> {
        let weights = self.weights.as_mut().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let ForwardCache { input, output } = self.cache.take().ok_or_else(|| LazyNetError::forward_not_run(NAME))?;

        let d_out = output_gradient.into_tensor()?;
        check_output_gradient(&d_out, output.shape(), NAME)?;

        let weights_before = weights.value().clone();
        let mut d_weights = d_out.transpose()?.matmul(&input)?;
        if self.l2_penalty > 0.0 {
            d_weights = d_weights.add(&weights_before.mul_scalar(self.l2_penalty))?;
        }
        let step = optimizer.step(weights, &d_weights)?;
        weights.update(&step)?;

        if let Some(biases) = self.biases.as_mut() {
            let d_biases = d_out.sum_rows()?;
            let step = optimizer.step(biases, &d_biases)?;
            biases.update(&step)?;
        }

        log::trace!("{} back over {:?}", NAME, d_out.shape());
        Ok(Deferred::new(vec![d_out, weights_before], Dense::gradient))
    }

    fn as_parametric(&self) -> Option<&dyn Parametric> {
        Some(self)
    }

    fn as_parametric_mut(&mut self) -> Option<&mut dyn Parametric> {
        Some(self)
    }
}

impl Parametric for Dense {
    fn parameters(&self) -> Result<Vec<(String, &Parameter)>, LazyNetError> {
        let weights = self.weights.as_ref().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let mut parameters = vec![("weights".to_string(), weights)];
        if let Some(biases) = &self.biases {
            parameters.push(("biases".to_string(), biases));
        }
        Ok(parameters)
    }

    fn restore(&mut self, mut parameters: Vec<(String, Parameter)>) -> Result<(), LazyNetError> {
        let current = self.weights.as_ref().ok_or_else(|| LazyNetError::not_initialized(NAME))?;
        let weights = take_parameter(&mut parameters, "weights", NAME)?;
        check_restored_shape(current, &weights, "weights")?;

        let biases = match &self.biases {
            Some(current) => {
                let biases = take_parameter(&mut parameters, "biases", NAME)?;
                check_restored_shape(current, &biases, "biases")?;
                Some(biases)
            }
            None => None,
        };

        warn_unused(&parameters, NAME);
        self.weights = Some(weights);
        self.biases = biases;
        Ok(())
    }
}

impl fmt::Display for Dense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dense (neurons: {}, l2 penalty: {}, bias: {}, weight initializer: {}, bias initializer: {})",
            self.neurons, self.l2_penalty, self.bias, self.weight_initializer, self.bias_initializer
        )
    }
}

#[cfg(test)]
#[path = "dense_test.rs"]
mod tests;
