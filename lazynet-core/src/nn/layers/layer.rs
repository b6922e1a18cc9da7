use crate::error::LazyNetError;
use crate::nn::deferred::Deferred;
use crate::nn::parameter::Parameter;
use crate::optim::Optimizer;
use crate::tensor::Tensor;
use rand::RngCore;
use std::fmt::{Debug, Display};

/// The base trait for all layers.
///
/// Lifecycle: `initialize` once, then any number of `forward`/`back` pairs
/// (or `infer` calls, which cache nothing). Every shape-dependent call made
/// before `initialize` fails with [`LazyNetError::NotInitialized`].
///
/// `Display` renders the diagnostic name of the layer and its configuration.
pub trait Layer: Debug + Display {
    /// Allocates parameters for an input of width `fan_in` and returns the
    /// output width. Calling it again replaces the parameters, resetting
    /// anything learned so far.
    fn initialize(&mut self, fan_in: usize, rng: &mut dyn RngCore) -> Result<usize, LazyNetError>;

    /// The output width (`fan_out`).
    fn width(&self) -> Result<usize, LazyNetError>;

    /// Computes the output for a training pass and caches what `back` needs.
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, LazyNetError>;

    /// Computes the same output as `forward` without caching anything.
    fn infer(&self, input: &Tensor) -> Result<Tensor, LazyNetError>;
}

/// A layer between the input and the loss that takes part in backpropagation.
pub trait Hidden: Layer {
    /// Consumes the gradient of the loss w.r.t. this layer's output,
    /// updates this layer's parameters right away and returns the gradient
    /// w.r.t. its input as a not yet evaluated [`Deferred`].
    ///
    /// # Errors
    /// * `NotInitialized` before `initialize`.
    /// * `ForwardNotRun` without a preceding, unconsumed `forward`.
    /// * `ShapeMismatch` if the realized gradient does not match the output.
    fn back(&mut self, output_gradient: Deferred, optimizer: &mut dyn Optimizer) -> Result<Deferred, LazyNetError>;

    /// The parametric capability of this layer, if it has one.
    fn as_parametric(&self) -> Option<&dyn Parametric> {
        None
    }

    fn as_parametric_mut(&mut self) -> Option<&mut dyn Parametric> {
        None
    }
}

/// A layer owning trainable parameters.
pub trait Parametric {
    /// Named parameters, in a stable order, for persistence.
    fn parameters(&self) -> Result<Vec<(String, &Parameter)>, LazyNetError>;

    /// Replaces parameters with previously persisted ones.
    ///
    /// # Errors
    /// * `NotInitialized` before `initialize`.
    /// * `MissingParameter` if a required name is absent.
    /// * `ShapeMismatch` if a restored value has the wrong shape.
    fn restore(&mut self, parameters: Vec<(String, Parameter)>) -> Result<(), LazyNetError>;
}

/// The entry layer of a network. It has no backward pass.
pub trait Input: Layer {}

/// Input and output of the last training forward pass.
#[derive(Debug, Clone)]
pub(crate) struct ForwardCache {
    pub input: Tensor,
    pub output: Tensor,
}

/// Unpacks the tensors captured by a layer's deferred gradient.
pub(crate) fn unpack_args<const N: usize>(args: Vec<Tensor>, operation: &str) -> Result<[Tensor; N], LazyNetError> {
    <[Tensor; N]>::try_from(args).map_err(|args| {
        LazyNetError::InternalError(format!(
            "{} expected {} captured tensors, got {}",
            operation,
            N,
            args.len()
        ))
    })
}

/// Checks a layer input against the layer's width.
pub(crate) fn check_input_width(input: &Tensor, width: usize, layer: &str) -> Result<(), LazyNetError> {
    let (rows, cols) = input.dims2()?;
    if cols != width {
        return Err(LazyNetError::ShapeMismatch {
            expected: vec![rows, width],
            actual: vec![rows, cols],
            operation: format!("{} input", layer),
        });
    }
    Ok(())
}

/// Checks a realized output gradient against the cached output.
pub(crate) fn check_output_gradient(gradient: &Tensor, output_shape: &[usize], layer: &str) -> Result<(), LazyNetError> {
    if gradient.shape() != output_shape {
        return Err(LazyNetError::ShapeMismatch {
            expected: output_shape.to_vec(),
            actual: gradient.shape().to_vec(),
            operation: format!("{} output gradient", layer),
        });
    }
    Ok(())
}

/// Pulls a named parameter out of a restore list.
pub(crate) fn take_parameter(
    parameters: &mut Vec<(String, Parameter)>,
    name: &str,
    layer: &str,
) -> Result<Parameter, LazyNetError> {
    let index = parameters
        .iter()
        .position(|(n, _)| n == name)
        .ok_or_else(|| LazyNetError::MissingParameter {
            layer: layer.to_string(),
            name: name.to_string(),
        })?;
    Ok(parameters.swap_remove(index).1)
}

/// Checks a restored parameter against the one it replaces.
pub(crate) fn check_restored_shape(current: &Parameter, restored: &Parameter, name: &str) -> Result<(), LazyNetError> {
    if current.shape() != restored.shape() {
        return Err(LazyNetError::ShapeMismatch {
            expected: current.shape().to_vec(),
            actual: restored.shape().to_vec(),
            operation: format!("restore {}", name),
        });
    }
    Ok(())
}

/// Logs names left over after a restore.
pub(crate) fn warn_unused(parameters: &[(String, Parameter)], layer: &str) {
    for (name, _) in parameters {
        log::warn!("{} ignored unknown parameter '{}' on restore", layer, name);
    }
}
