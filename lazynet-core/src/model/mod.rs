// src/model/mod.rs

//! Containers composing layers into trainable models.

pub mod network;

pub use network::Network;
