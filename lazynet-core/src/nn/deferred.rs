//! Lazy, memoizing gradient cells.
//!
//! A [`Deferred`] chains backward computations across layers without forcing
//! them early. Each layer's `back` returns a `Pending` cell holding the
//! tensors it needs plus the function that turns them into the upstream
//! gradient. The preceding layer forces it only if it actually needs the
//! gradient; the network's input layer never does.

use crate::error::LazyNetError;
use crate::tensor::Tensor;
use std::fmt;

/// Computation run by a pending [`Deferred`], consuming its captured tensors.
pub type Computation = Box<dyn FnOnce(Vec<Tensor>) -> Result<Tensor, LazyNetError>>;

enum State {
    Pending {
        args: Vec<Tensor>,
        computation: Computation,
    },
    /// Transient marker held while the computation runs.
    Forcing,
    Realized(Tensor),
    Failed(LazyNetError),
}

/// A one-shot, at-most-once-evaluated tensor value.
///
/// States: `Pending` (computation plus captured arguments) and `Realized`
/// (cached tensor). The first [`force`] runs the computation; every later
/// call returns the cached tensor. A computation that fails is not retried:
/// the first force returns its error unchanged, later forces report the
/// cached error as [`LazyNetError::DeferredFailed`].
///
/// [`force`]: Deferred::force
pub struct Deferred {
    state: State,
}

impl Deferred {
    /// Creates a pending cell that will run `computation(args)` on first force.
    pub fn new<F>(args: Vec<Tensor>, computation: F) -> Self
    where
        F: FnOnce(Vec<Tensor>) -> Result<Tensor, LazyNetError> + 'static,
    {
        Deferred {
            state: State::Pending {
                args,
                computation: Box::new(computation),
            },
        }
    }

    /// Creates an already realized cell, e.g. for a loss gradient.
    pub fn ready(value: Tensor) -> Self {
        Deferred {
            state: State::Realized(value),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    pub fn is_realized(&self) -> bool {
        matches!(self.state, State::Realized(_))
    }

    /// Realizes the value, running the computation on the first call only.
    pub fn force(&mut self) -> Result<&Tensor, LazyNetError> {
        if let State::Pending { .. } = self.state {
            let pending = std::mem::replace(&mut self.state, State::Forcing);
            if let State::Pending { args, computation } = pending {
                log::trace!("Realizing deferred computation over {} captured tensor(s)", args.len());
                match computation(args) {
                    Ok(value) => self.state = State::Realized(value),
                    Err(err) => {
                        log::debug!("Deferred computation failed: {}", err);
                        self.state = State::Failed(err.clone());
                        return Err(err);
                    }
                }
            }
        }

        match &self.state {
            State::Realized(value) => Ok(value),
            State::Failed(err) => Err(LazyNetError::DeferredFailed(err.to_string())),
            State::Forcing | State::Pending { .. } => Err(LazyNetError::InternalError(
                "Deferred left unrealized after forcing".to_string(),
            )),
        }
    }

    /// Forces the cell and takes ownership of the realized tensor.
    pub fn into_tensor(mut self) -> Result<Tensor, LazyNetError> {
        self.force()?;
        match self.state {
            State::Realized(value) => Ok(value),
            State::Failed(err) => Err(LazyNetError::DeferredFailed(err.to_string())),
            State::Forcing | State::Pending { .. } => Err(LazyNetError::InternalError(
                "Deferred left unrealized after forcing".to_string(),
            )),
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Pending { args, .. } => write!(f, "Deferred::Pending({} args)", args.len()),
            State::Forcing => write!(f, "Deferred::Forcing"),
            State::Realized(value) => write!(f, "Deferred::Realized({:?})", value),
            State::Failed(err) => write!(f, "Deferred::Failed({})", err),
        }
    }
}

#[cfg(test)]
#[path = "deferred_test.rs"]
mod tests;
