//! # LazyNet core
//!
//! Neural-network layers with lazy gradient propagation. Each hidden layer
//! updates its own parameters during the backward pass and hands the
//! gradient w.r.t. its input to the previous layer as a [`nn::Deferred`],
//! which is only evaluated if that layer actually consumes it.

pub mod error;
pub mod model;
pub mod nn;
pub mod optim;
pub mod tensor;
pub mod utils;

// Re-export the main types so they are reachable as `lazynet_core::Tensor`.
pub use error::LazyNetError;
pub use model::Network;
pub use tensor::Tensor;
// Re-export traits required by public functions/structs
pub use num_traits;
