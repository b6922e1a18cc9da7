// lazynet-core/src/optim/mod.rs

//! Optimizers for training neural networks.
//!
//! This module provides the `Optimizer` trait and implementations of
//! common optimization algorithms. Each optimizer maps a parameter's
//! gradient to an update step; layers apply the step themselves during
//! their backward pass.

pub mod optimizer_trait;

pub mod adagrad;
pub mod adam;
pub mod rmsprop;
pub mod sgd;

// Re-export key items for easier access
pub use optimizer_trait::Optimizer;

pub use adagrad::AdagradOptimizer;
pub use adam::{AdamOptimizer, AdamParamState};
pub use rmsprop::RmsPropOptimizer;
pub use sgd::SgdOptimizer;
