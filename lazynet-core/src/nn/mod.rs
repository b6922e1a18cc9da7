// src/nn/mod.rs
// Neural-network building blocks: parameters, initializers, activation
// functions, deferred gradients and layers.

pub mod activation;
pub mod deferred;
pub mod init;
pub mod layers;
pub mod parameter;

// Re-export common items
pub use activation::ActivationFunction;
pub use deferred::Deferred;
pub use init::Initializer;
pub use layers::{Activation, Dense, Hidden, Input, Layer, Parametric, Placeholder, PReLU, Swish};
pub use parameter::{ParamId, Parameter};
