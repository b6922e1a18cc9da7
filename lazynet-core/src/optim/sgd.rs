use crate::error::LazyNetError;
use crate::nn::parameter::{ParamId, Parameter};
use crate::optim::optimizer_trait::{check_decay, check_gradient, check_rate, Optimizer};
use crate::tensor::{zeros_like, Tensor};
use std::collections::HashMap;

/// Implements the Stochastic Gradient Descent (SGD) optimizer.
///
/// Without momentum the step is `lr · g`: a pure function of the gradient,
/// so identical gradients always give identical steps.
///
/// With momentum a velocity buffer is kept per parameter,
/// `buf ← momentum · buf + g`, and the step is `lr · buf`
/// (or `lr · (g + momentum · buf)` with Nesterov lookahead). Feeding the
/// same gradient twice then yields a larger second step.
#[derive(Debug)]
pub struct SgdOptimizer {
    lr: f32,
    momentum: f32,
    nesterov: bool,
    momentum_buffers: HashMap<ParamId, Tensor>,
}

impl SgdOptimizer {
    /// Creates a new `SgdOptimizer`.
    ///
    /// # Arguments
    ///
    /// * `lr`: The learning rate (must be positive).
    /// * `momentum`: Momentum factor in `[0, 1)`; `0.0` disables it.
    /// * `nesterov`: Enables Nesterov momentum.
    pub fn new(lr: f32, momentum: f32, nesterov: bool) -> Result<Self, LazyNetError> {
        check_rate(lr)?;
        check_decay("Momentum", momentum)?;
        if nesterov && momentum == 0.0 {
            return Err(LazyNetError::ConfigurationError(
                "Nesterov momentum requires a non-zero momentum".to_string(),
            ));
        }
        Ok(SgdOptimizer {
            lr,
            momentum,
            nesterov,
            momentum_buffers: HashMap::new(),
        })
    }

    /// Plain stateless gradient descent.
    pub fn stochastic(lr: f32) -> Result<Self, LazyNetError> {
        SgdOptimizer::new(lr, 0.0, false)
    }

    pub fn lr(&self) -> f32 {
        self.lr
    }
}

impl Default for SgdOptimizer {
    fn default() -> Self {
        SgdOptimizer {
            lr: 0.01,
            momentum: 0.0,
            nesterov: false,
            momentum_buffers: HashMap::new(),
        }
    }
}

impl Optimizer for SgdOptimizer {
    fn warm(&mut self, param: &Parameter) -> Result<(), LazyNetError> {
        if self.momentum != 0.0 {
            self.momentum_buffers
                .entry(param.id())
                .or_insert_with(|| zeros_like(param.value()));
        }
        Ok(())
    }

    fn step(&mut self, param: &Parameter, gradient: &Tensor) -> Result<Tensor, LazyNetError> {
        check_gradient(param, gradient, "SgdOptimizer::step")?;

        if self.momentum == 0.0 {
            return Ok(gradient.mul_scalar(self.lr));
        }

        let buffer = self
            .momentum_buffers
            .entry(param.id())
            .or_insert_with(|| zeros_like(gradient));
        *buffer = buffer.mul_scalar(self.momentum).add(gradient)?;

        let direction = if self.nesterov {
            gradient.add(&buffer.mul_scalar(self.momentum))?
        } else {
            buffer.clone()
        };
        Ok(direction.mul_scalar(self.lr))
    }

    fn forget(&mut self, id: ParamId) {
        self.momentum_buffers.remove(&id);
    }

    fn state_len(&self) -> usize {
        self.momentum_buffers.len()
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
