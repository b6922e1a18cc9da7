//! Parameter initializers.
//!
//! An [`Initializer`] produces the starting value of a parameter matrix. The
//! random source is always passed in by the caller, so a seeded generator
//! reproduces the same parameters and no hidden global state is involved.
//!
//! Convention: a weight matrix for a layer is requested as
//! `(rows = fan_out, cols = fan_in)`; per-feature vectors as `(1, fan_out)`.

use crate::error::LazyNetError;
use crate::tensor::{full, Tensor};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal as NormalDistribution};
use std::fmt::{self, Debug, Display};

/// Produces the initial value of a parameter.
pub trait Initializer: Debug + Display {
    /// Returns a `[rows, cols]` tensor.
    fn initialize(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError>;
}

fn check_scale(name: &str, value: f32) -> Result<(), LazyNetError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(LazyNetError::ConfigurationError(format!(
            "{} must be a positive finite number, {} given",
            name, value
        )));
    }
    Ok(())
}

fn sample_uniform(rows: usize, cols: usize, limit: f32, rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError> {
    let data = (0..rows * cols).map(|_| rng.gen_range(-limit..=limit)).collect();
    Tensor::new(data, vec![rows, cols])
}

fn sample_normal(rows: usize, cols: usize, std_dev: f32, rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError> {
    let normal = NormalDistribution::new(0.0f32, std_dev)
        .map_err(|e| LazyNetError::ConfigurationError(format!("Invalid normal distribution: {}", e)))?;
    let data = (0..rows * cols).map(|_| normal.sample(rng)).collect();
    Tensor::new(data, vec![rows, cols])
}

/// Fills every element with the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    /// # Errors
    /// `ConfigurationError` if `value` is not finite.
    pub fn new(value: f32) -> Result<Self, LazyNetError> {
        if !value.is_finite() {
            return Err(LazyNetError::ConfigurationError(format!(
                "Constant value must be finite, {} given",
                value
            )));
        }
        Ok(Constant { value })
    }

    /// Constant from a value already known to be finite.
    pub(crate) const fn known(value: f32) -> Self {
        Constant { value }
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Initializer for Constant {
    fn initialize(&self, rows: usize, cols: usize, _rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError> {
        full(&[rows, cols], self.value)
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant (value: {})", self.value)
    }
}

/// Uniform samples from `[-beta, beta]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    beta: f32,
}

impl Uniform {
    pub fn new(beta: f32) -> Result<Self, LazyNetError> {
        check_scale("Beta", beta)?;
        Ok(Uniform { beta })
    }
}

impl Default for Uniform {
    fn default() -> Self {
        Uniform { beta: 0.5 }
    }
}

impl Initializer for Uniform {
    fn initialize(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError> {
        sample_uniform(rows, cols, self.beta, rng)
    }
}

impl Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uniform (beta: {})", self.beta)
    }
}

/// Zero-mean Gaussian samples with a fixed standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    std_dev: f32,
}

impl Normal {
    pub fn new(std_dev: f32) -> Result<Self, LazyNetError> {
        check_scale("Standard deviation", std_dev)?;
        Ok(Normal { std_dev })
    }
}

impl Default for Normal {
    fn default() -> Self {
        Normal { std_dev: 0.05 }
    }
}

impl Initializer for Normal {
    fn initialize(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError> {
        sample_normal(rows, cols, self.std_dev, rng)
    }
}

impl Display for Normal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Normal (std dev: {})", self.std_dev)
    }
}

/// Glorot/Xavier uniform: `U(-s, s)` with `s = sqrt(6 / (fan_in + fan_out))`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Xavier;

impl Initializer for Xavier {
    fn initialize(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError> {
        if rows + cols == 0 {
            return Tensor::new(Vec::new(), vec![rows, cols]);
        }
        let limit = (6.0 / (rows + cols) as f32).sqrt();
        sample_uniform(rows, cols, limit, rng)
    }
}

impl Display for Xavier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Xavier")
    }
}

/// He/Kaiming normal: `N(0, sqrt(2 / fan_in))`, suited to rectifiers.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct He;

impl Initializer for He {
    fn initialize(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Result<Tensor, LazyNetError> {
        if cols == 0 {
            return Tensor::new(Vec::new(), vec![rows, cols]);
        }
        let std_dev = (2.0 / cols as f32).sqrt();
        sample_normal(rows, cols, std_dev, rng)
    }
}

impl Display for He {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "He")
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "init_test.rs"]
mod tests; // Link to the test file
