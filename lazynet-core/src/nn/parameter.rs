use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a [`Parameter`], used to key optimizer state.
///
/// Ids are handed out from a process-wide counter when a parameter is
/// created and are never reused. Two parameters holding equal values still
/// have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u64);

impl ParamId {
    fn next() -> Self {
        ParamId(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A trainable tensor owned by a layer.
///
/// The value has a fixed shape and is only mutated through [`update`],
/// which subtracts an optimizer step: `value ← value − step`.
///
/// Cloning keeps the id: a clone is the same logical parameter (for example
/// a snapshot handed to persistence and later restored).
///
/// [`update`]: Parameter::update
#[derive(Clone, PartialEq)]
pub struct Parameter {
    id: ParamId,
    value: Tensor,
}

impl Parameter {
    /// Wraps `value` in a new parameter with a fresh id.
    pub fn new(value: Tensor) -> Self {
        Parameter {
            id: ParamId::next(),
            value,
        }
    }

    pub fn id(&self) -> ParamId {
        self.id
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    /// Applies an optimizer step in place.
    ///
    /// # Errors
    /// `ShapeMismatch` if `step` does not have the parameter's shape.
    pub fn update(&mut self, step: &Tensor) -> Result<(), LazyNetError> {
        if step.shape() != self.value.shape() {
            return Err(LazyNetError::shape_mismatch(
                self.value.shape(),
                step.shape(),
                "Parameter::update",
            ));
        }
        self.value = self.value.sub(step)?;
        Ok(())
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.value
    }
}

// Read-only access to the underlying Tensor via Deref.
impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({}, {:?})", self.id, self.value)
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
