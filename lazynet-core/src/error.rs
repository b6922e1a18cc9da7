use thiserror::Error;

/// Custom error type for the LazyNet framework.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum LazyNetError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Rank mismatch: expected rank {expected}, got {actual} during operation {operation}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Index {index:?} is out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Layer {layer} has not been initialized")]
    NotInitialized { layer: String },

    #[error("Layer {layer} must perform a forward pass before backpropagating")]
    ForwardNotRun { layer: String },

    #[error("Layer {layer} is missing parameter '{name}' on restore")]
    MissingParameter { layer: String, name: String },

    #[error("Deferred computation previously failed: {0}")]
    DeferredFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LazyNetError {
    /// Shorthand for a `ShapeMismatch` raised while combining two tensors.
    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize], operation: &str) -> Self {
        LazyNetError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
            operation: operation.to_string(),
        }
    }

    pub(crate) fn not_initialized(layer: &str) -> Self {
        LazyNetError::NotInitialized {
            layer: layer.to_string(),
        }
    }

    pub(crate) fn forward_not_run(layer: &str) -> Self {
        LazyNetError::ForwardNotRun {
            layer: layer.to_string(),
        }
    }
}
