use crate::error::LazyNetError;
use crate::nn::parameter::{ParamId, Parameter};
use crate::optim::optimizer_trait::{check_decay, check_epsilon, check_gradient, check_rate, Optimizer};
use crate::tensor::{zeros_like, Tensor};
use std::collections::HashMap;

/// RMSProp: divides the step by a running root mean square of recent
/// gradients, `E ← α·E + (1 − α)·g²`, step `lr · g / (√E + ε)`.
#[derive(Debug)]
pub struct RmsPropOptimizer {
    lr: f32,
    alpha: f32,
    eps: f32,
    square_avg: HashMap<ParamId, Tensor>,
}

impl RmsPropOptimizer {
    pub fn new(lr: f32, alpha: f32, eps: f32) -> Result<Self, LazyNetError> {
        check_rate(lr)?;
        check_decay("Alpha", alpha)?;
        check_epsilon(eps)?;
        Ok(RmsPropOptimizer {
            lr,
            alpha,
            eps,
            square_avg: HashMap::new(),
        })
    }
}

impl Default for RmsPropOptimizer {
    fn default() -> Self {
        RmsPropOptimizer {
            lr: 0.001,
            alpha: 0.9,
            eps: 1e-8,
            square_avg: HashMap::new(),
        }
    }
}

impl Optimizer for RmsPropOptimizer {
    fn warm(&mut self, param: &Parameter) -> Result<(), LazyNetError> {
        self.square_avg
            .entry(param.id())
            .or_insert_with(|| zeros_like(param.value()));
        Ok(())
    }

    fn step(&mut self, param: &Parameter, gradient: &Tensor) -> Result<Tensor, LazyNetError> {
        check_gradient(param, gradient, "RmsPropOptimizer::step")?;

        let alpha = self.alpha;
        let avg = self
            .square_avg
            .entry(param.id())
            .or_insert_with(|| zeros_like(gradient));
        *avg = avg
            .mul_scalar(alpha)
            .add(&gradient.square().mul_scalar(1.0 - alpha))?;

        let denom = avg.sqrt().add_scalar(self.eps);
        gradient.mul_scalar(self.lr).div(&denom)
    }

    fn forget(&mut self, id: ParamId) {
        self.square_avg.remove(&id);
    }

    fn state_len(&self) -> usize {
        self.square_avg.len()
    }
}

#[cfg(test)]
#[path = "rmsprop_test.rs"]
mod tests;
