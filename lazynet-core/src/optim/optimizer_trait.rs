use crate::error::LazyNetError;
use crate::nn::parameter::{ParamId, Parameter};
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Trait defining the common interface for all optimizers.
///
/// An optimizer turns the raw gradient of one parameter into an update step
/// of the same shape. It never touches the parameter itself: the owning
/// layer applies the step with [`Parameter::update`].
///
/// Stateful optimizers keep a history record per parameter, keyed by
/// [`Parameter::id`]. Records are never shared between distinct parameters,
/// even when their values are equal.
pub trait Optimizer: Debug {
    /// Prepares per-parameter state ahead of the first step.
    ///
    /// The default does nothing; stateless optimizers need no warm-up.
    fn warm(&mut self, _param: &Parameter) -> Result<(), LazyNetError> {
        Ok(())
    }

    /// Computes the update step for `param` given its `gradient`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the gradient's shape differs from the parameter's.
    fn step(&mut self, param: &Parameter, gradient: &Tensor) -> Result<Tensor, LazyNetError>;

    /// Drops the state kept for a parameter that no longer exists.
    fn forget(&mut self, _id: ParamId) {}

    /// Number of parameters the optimizer currently holds state for.
    fn state_len(&self) -> usize {
        0
    }
}

/// Checks that a gradient can be applied to `param`.
pub(crate) fn check_gradient(param: &Parameter, gradient: &Tensor, operation: &str) -> Result<(), LazyNetError> {
    if gradient.shape() != param.shape() {
        return Err(LazyNetError::shape_mismatch(param.shape(), gradient.shape(), operation));
    }
    Ok(())
}

pub(crate) fn check_rate(rate: f32) -> Result<(), LazyNetError> {
    if !(rate > 0.0 && rate.is_finite()) {
        return Err(LazyNetError::ConfigurationError(format!(
            "Learning rate must be positive, {} given",
            rate
        )));
    }
    Ok(())
}

pub(crate) fn check_decay(name: &str, decay: f32) -> Result<(), LazyNetError> {
    if !(0.0..1.0).contains(&decay) {
        return Err(LazyNetError::ConfigurationError(format!(
            "{} must be in [0, 1), {} given",
            name, decay
        )));
    }
    Ok(())
}

pub(crate) fn check_epsilon(eps: f32) -> Result<(), LazyNetError> {
    if !(eps > 0.0 && eps.is_finite()) {
        return Err(LazyNetError::ConfigurationError(format!(
            "Epsilon must be positive, {} given",
            eps
        )));
    }
    Ok(())
}
