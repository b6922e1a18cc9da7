use crate::error::LazyNetError;
use crate::nn::activation::ActivationFunction;
use crate::nn::deferred::Deferred;
use crate::nn::layers::layer::{check_input_width, check_output_gradient, unpack_args, ForwardCache, Hidden, Layer};
use crate::optim::Optimizer;
use crate::tensor::Tensor;
use rand::RngCore;
use std::fmt;

const NAME: &str = "Activation";

/// A parameterless layer applying an [`ActivationFunction`] elementwise.
///
/// The output width equals the input width. `back` never touches the
/// optimizer; the upstream gradient is `f'(z) ⊙ dOut`.
#[derive(Debug)]
pub struct Activation<A> {
    function: A,
    width: Option<usize>,
    cache: Option<ForwardCache>,
}

impl<A> Activation<A>
where
    A: ActivationFunction + Clone + 'static,
{
    pub fn new(function: A) -> Self {
        Activation {
            function,
            width: None,
            cache: None,
        }
    }

    pub fn function(&self) -> &A {
        &self.function
    }

    fn activate(&self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        let width = self.width()?;
        check_input_width(input, width, NAME)?;
        Ok(self.function.compute(input))
    }
}

impl<A> Default for Activation<A>
where
    A: ActivationFunction + Clone + Default + 'static,
{
    fn default() -> Self {
        Activation::new(A::default())
    }
}

impl<A> Layer for Activation<A>
where
    A: ActivationFunction + Clone + 'static,
{
    fn initialize(&mut self, fan_in: usize, _rng: &mut dyn RngCore) -> Result<usize, LazyNetError> {
        self.width = Some(fan_in);
        self.cache = None;
        log::debug!("Initialized {} with width {}", self, fan_in);
        Ok(fan_in)
    }

    fn width(&self) -> Result<usize, LazyNetError> {
        self.width.ok_or_else(|| LazyNetError::not_initialized(NAME))
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        let output = self.activate(input)?;
        log::trace!("{} forward over {:?}", self.function, input.shape());
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

impl<A> Hidden for Activation<A>
where
    A: ActivationFunction + Clone + 'static,
{
    fn back(&mut self, output_gradient: Deferred, _optimizer: &mut dyn Optimizer) -> Result<Deferred, LazyNetError> {
        self.width()?;
        let ForwardCache { input, output } = self.cache.take().ok_or_else(|| LazyNetError::forward_not_run(NAME))?;

        let d_out = output_gradient.into_tensor()?;
        check_output_gradient(&d_out, output.shape(), NAME)?;

        log::trace!("{} back over {:?}", self.function, d_out.shape());
        let function = self.function.clone();
        Ok(Deferred::new(vec![input, output, d_out], move |args| {
            let [input, output, d_out] = unpack_args::<3>(args, "Activation::gradient")?;
            function.differentiate(&input, &output)?.mul(&d_out)
        }))
    }
}

impl<A: ActivationFunction> fmt::Display for Activation<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Activation (function: {})", self.function)
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
