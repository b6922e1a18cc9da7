//! # Regression with a Swish network
//!
//! Fits `y = x·sin(x)` on `[-3, 3]` with a small `Dense → Swish → Dense`
//! network trained by Adam.
//!
//! Each iteration:
//! 1. `forward` caches what every layer needs for learning.
//! 2. The mean squared error gradient is wrapped in a ready `Deferred`.
//! 3. `back` walks the stack in reverse. Every layer updates its own
//!    parameters and hands a lazy gradient to the layer before it; the
//!    gradient w.r.t. the network input is never computed.
//!
//! Run with `cargo run --example swish_regression`.

use lazynet_core::nn::{Deferred, Dense, Hidden, Placeholder, Swish};
use lazynet_core::optim::AdamOptimizer;
use lazynet_core::{LazyNetError, Network, Tensor};

fn mse(prediction: &Tensor, target: &Tensor) -> Result<(f32, Tensor), LazyNetError> {
    let residual = prediction.sub(target)?;
    let n = residual.numel() as f32;
    Ok((residual.square().sum() / n, residual.mul_scalar(2.0 / n)))
}

fn main() -> Result<(), LazyNetError> {
    let samples = 64;
    let xs: Vec<f32> = (0..samples)
        .map(|i| -3.0 + 6.0 * i as f32 / (samples - 1) as f32)
        .collect();
    let ys: Vec<f32> = xs.iter().map(|x| x * x.sin()).collect();
    let x = Tensor::new(xs, vec![samples, 1])?;
    let y = Tensor::new(ys, vec![samples, 1])?;

    let hidden: Vec<Box<dyn Hidden>> = vec![
        Box::new(Dense::new(32)?),
        Box::new(Swish::new()),
        Box::new(Dense::new(1)?),
    ];
    let optimizer = AdamOptimizer::new(0.01, 0.9, 0.999, 1e-8)?;
    let mut network = Network::new(Placeholder::new(1)?, hidden, Box::new(optimizer))?.with_seed(42);
    network.initialize()?;
    println!("{}", network);

    for epoch in 1..=500 {
        let prediction = network.forward(&x)?;
        let (loss, gradient) = mse(&prediction, &y)?;
        network.back(Deferred::ready(gradient))?;

        if epoch % 50 == 0 {
            println!("epoch {:>3}: loss = {:.5}", epoch, loss);
        }
    }

    let probe = Tensor::new(vec![-2.0, 0.0, 1.5], vec![3, 1])?;
    let predicted = network.infer(&probe)?;
    for (x, y) in probe.data().iter().zip(predicted.data()) {
        println!("f({:>4.1}) = {:>7.4} (target {:>7.4})", x, y, x * x.sin());
    }

    for (name, param) in network.parameters()? {
        if name.ends_with("beta") {
            println!("{} mean = {:.4}", name, param.sum() / param.numel() as f32);
        }
    }
    Ok(())
}
