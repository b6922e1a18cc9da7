use lazynet_core::nn::{Deferred, Hidden, Parameter, Placeholder};
use lazynet_core::optim::Optimizer;
use lazynet_core::tensor::zeros_like;
use lazynet_core::{LazyNetError, Network, Tensor};

// Helpers shared by the integration test binaries; not every binary uses all of them.

/// Optimizer whose steps leave every parameter untouched.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FrozenOptimizer;

impl Optimizer for FrozenOptimizer {
    fn step(&mut self, _param: &Parameter, gradient: &Tensor) -> Result<Tensor, LazyNetError> {
        Ok(zeros_like(gradient))
    }
}

#[allow(dead_code)]
pub fn tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

/// Builds and initializes a seeded network.
#[allow(dead_code)]
pub fn network(
    inputs: usize,
    hidden: Vec<Box<dyn Hidden>>,
    optimizer: Box<dyn Optimizer>,
    seed: u64,
) -> Result<Network, LazyNetError> {
    let mut network = Network::new(Placeholder::new(inputs)?, hidden, optimizer)?.with_seed(seed);
    network.initialize()?;
    Ok(network)
}

/// Mean squared error and its gradient w.r.t. the prediction.
#[allow(dead_code)]
pub fn mse(prediction: &Tensor, target: &Tensor) -> Result<(f32, Deferred), LazyNetError> {
    let residual = prediction.sub(target)?;
    let n = residual.numel() as f32;
    let loss = residual.square().sum() / n;
    Ok((loss, Deferred::ready(residual.mul_scalar(2.0 / n))))
}
