// src/nn/activation/mod.rs

//! # Activation Functions
//!
//! Stateless elementwise transforms together with their derivatives. A
//! derivative is expressed through the already computed activation `a`
//! wherever the formula allows it, so the backward pass never has to
//! recompute the forward transform.
//!
//! ## Currently Implemented:
//! - [`SiLU`]: sigmoid-weighted linear unit, `z·σ(z)`.
//! - [`Sigmoid`], [`HyperbolicTangent`], [`SoftPlus`].
//! - [`ReLU`], [`LeakyReLU`], [`ELU`].

pub mod elu;
pub mod leaky_relu;
pub mod relu;
pub mod sigmoid;
pub mod silu;
pub mod softplus;
pub mod tanh;

pub use elu::ELU;
pub use leaky_relu::LeakyReLU;
pub use relu::ReLU;
pub use sigmoid::Sigmoid;
pub use silu::SiLU;
pub use softplus::SoftPlus;
pub use tanh::HyperbolicTangent;

use crate::error::LazyNetError;
use crate::tensor::Tensor;
use num_traits::Float;
use std::fmt::{Debug, Display};

/// An elementwise activation function and its derivative.
pub trait ActivationFunction: Debug + Display {
    /// Computes `a = f(z)` elementwise.
    fn compute(&self, input: &Tensor) -> Tensor;

    /// Computes `da/dz` given the input `z` and the output `a = f(z)`.
    ///
    /// # Errors
    /// `ShapeMismatch` if `input` and `output` disagree.
    fn differentiate(&self, input: &Tensor, output: &Tensor) -> Result<Tensor, LazyNetError>;
}

/// The logistic sigmoid, `1 / (1 + e^-x)`.
pub(crate) fn sigmoid<F: Float>(x: F) -> F {
    F::one() / (F::one() + (-x).exp())
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
