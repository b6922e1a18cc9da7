use crate::error::LazyNetError;
use crate::nn::parameter::{ParamId, Parameter};
use crate::optim::optimizer_trait::{check_decay, check_epsilon, check_gradient, check_rate, Optimizer};
use crate::tensor::{zeros_like, Tensor};
use std::collections::HashMap;

/// Represents the state for a single parameter in the Adam optimizer.
#[derive(Clone, Debug)]
pub struct AdamParamState {
    /// First moment vector (exponential moving average of gradients).
    pub m: Tensor,
    /// Second moment vector (exponential moving average of squared gradients).
    pub v: Tensor,
    /// Number of steps taken for this parameter, used for bias correction.
    pub steps: i32,
}

impl AdamParamState {
    fn zeros(like: &Tensor) -> Self {
        AdamParamState {
            m: zeros_like(like),
            v: zeros_like(like),
            steps: 0,
        }
    }
}

/// Adam optimizer with bias-corrected moment estimates.
#[derive(Debug)]
pub struct AdamOptimizer {
    lr: f32,
    beta1: f32,
    beta2: f32,
    eps: f32,
    state: HashMap<ParamId, AdamParamState>,
}

impl AdamOptimizer {
    pub fn new(lr: f32, beta1: f32, beta2: f32, eps: f32) -> Result<Self, LazyNetError> {
        check_rate(lr)?;
        check_decay("Beta1", beta1)?;
        check_decay("Beta2", beta2)?;
        check_epsilon(eps)?;
        Ok(AdamOptimizer {
            lr,
            beta1,
            beta2,
            eps,
            state: HashMap::new(),
        })
    }

    /// Per-parameter state, if the parameter has been seen.
    pub fn param_state(&self, id: ParamId) -> Option<&AdamParamState> {
        self.state.get(&id)
    }
}

impl Default for AdamOptimizer {
    fn default() -> Self {
        AdamOptimizer {
            lr: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            state: HashMap::new(),
        }
    }
}

impl Optimizer for AdamOptimizer {
    fn warm(&mut self, param: &Parameter) -> Result<(), LazyNetError> {
        self.state
            .entry(param.id())
            .or_insert_with(|| AdamParamState::zeros(param.value()));
        Ok(())
    }

    fn step(&mut self, param: &Parameter, gradient: &Tensor) -> Result<Tensor, LazyNetError> {
        check_gradient(param, gradient, "AdamOptimizer::step")?;

        let (beta1, beta2) = (self.beta1, self.beta2);
        let entry = self
            .state
            .entry(param.id())
            .or_insert_with(|| AdamParamState::zeros(gradient));

        entry.steps += 1;
        entry.m = entry.m.mul_scalar(beta1).add(&gradient.mul_scalar(1.0 - beta1))?;
        entry.v = entry
            .v
            .mul_scalar(beta2)
            .add(&gradient.square().mul_scalar(1.0 - beta2))?;

        let bias_correction1 = 1.0 - beta1.powi(entry.steps);
        let bias_correction2 = 1.0 - beta2.powi(entry.steps);

        let m_hat = entry.m.mul_scalar(1.0 / bias_correction1);
        let denom = entry.v.mul_scalar(1.0 / bias_correction2).sqrt().add_scalar(self.eps);

        Ok(m_hat.mul_scalar(self.lr).div(&denom)?)
    }

    fn forget(&mut self, id: ParamId) {
        self.state.remove(&id);
    }

    fn state_len(&self) -> usize {
        self.state.len()
    }
}

#[cfg(test)]
#[path = "adam_test.rs"]
mod tests;
