// src/nn/layers/mod.rs

pub mod activation;
pub mod dense;
pub mod layer;
pub mod placeholder;
pub mod prelu;
pub mod swish;

pub use activation::Activation;
pub use dense::Dense;
pub use layer::{Hidden, Input, Layer, Parametric};
pub use placeholder::Placeholder;
pub use prelu::PReLU;
pub use swish::Swish;
