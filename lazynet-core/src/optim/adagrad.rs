use crate::error::LazyNetError;
use crate::nn::parameter::{ParamId, Parameter};
use crate::optim::optimizer_trait::{check_epsilon, check_gradient, check_rate, Optimizer};
use crate::tensor::{zeros_like, Tensor};
use std::collections::HashMap;

/// AdaGrad: per-element learning rates that shrink with the accumulated
/// squared gradient, `G ← G + g²`, step `lr · g / (√G + ε)`.
#[derive(Debug)]
pub struct AdagradOptimizer {
    lr: f32,
    eps: f32,
    state_sum_gradient_squares: HashMap<ParamId, Tensor>,
}

impl AdagradOptimizer {
    pub fn new(lr: f32, eps: f32) -> Result<Self, LazyNetError> {
        check_rate(lr)?;
        check_epsilon(eps)?;
        Ok(AdagradOptimizer {
            lr,
            eps,
            state_sum_gradient_squares: HashMap::new(),
        })
    }
}

impl Default for AdagradOptimizer {
    fn default() -> Self {
        AdagradOptimizer {
            lr: 0.01,
            eps: 1e-8,
            state_sum_gradient_squares: HashMap::new(),
        }
    }
}

impl Optimizer for AdagradOptimizer {
    fn warm(&mut self, param: &Parameter) -> Result<(), LazyNetError> {
        self.state_sum_gradient_squares
            .entry(param.id())
            .or_insert_with(|| zeros_like(param.value()));
        Ok(())
    }

    fn step(&mut self, param: &Parameter, gradient: &Tensor) -> Result<Tensor, LazyNetError> {
        check_gradient(param, gradient, "AdagradOptimizer::step")?;

        let sum = self
            .state_sum_gradient_squares
            .entry(param.id())
            .or_insert_with(|| zeros_like(gradient));
        *sum = sum.add(&gradient.square())?;

        let denom = sum.sqrt().add_scalar(self.eps);
        gradient.mul_scalar(self.lr).div(&denom)
    }

    fn forget(&mut self, id: ParamId) {
        self.state_sum_gradient_squares.remove(&id);
    }

    fn state_len(&self) -> usize {
        self.state_sum_gradient_squares.len()
    }
}

#[cfg(test)]
#[path = "adagrad_test.rs"]
mod tests;
