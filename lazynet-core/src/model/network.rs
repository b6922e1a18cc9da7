use crate::error::LazyNetError;
use crate::nn::deferred::Deferred;
use crate::nn::layers::{Hidden, Layer, Placeholder};
use crate::nn::parameter::{ParamId, Parameter};
use crate::optim::Optimizer;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fmt;

const NAME: &str = "Network";

/// A feed-forward stack: one input placeholder followed by hidden layers.
///
/// The network owns the optimizer and the random source used to initialize
/// its layers. Training is a `forward` followed by a `back` fed with the
/// gradient of the loss w.r.t. the network output; every hidden layer
/// updates its parameters on the way and the gradient w.r.t. the input is
/// returned unevaluated.
///
/// Parameters are named `hidden.{index}.{name}`, where `index` is the
/// position of the layer in the hidden stack.
#[derive(Debug)]
pub struct Network {
    input: Placeholder,
    hidden: Vec<Box<dyn Hidden>>,
    parametric: Vec<usize>,
    optimizer: Box<dyn Optimizer>,
    rng: StdRng,
    width: Option<usize>,
}

impl Network {
    /// Composes a network.
    ///
    /// # Errors
    /// `ConfigurationError` if `hidden` is empty.
    pub fn new(
        input: Placeholder,
        hidden: Vec<Box<dyn Hidden>>,
        optimizer: Box<dyn Optimizer>,
    ) -> Result<Self, LazyNetError> {
        if hidden.is_empty() {
            return Err(LazyNetError::ConfigurationError(
                "Network must have at least one hidden layer".to_string(),
            ));
        }
        let parametric = hidden
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.as_parametric().is_some())
            .map(|(index, _)| index)
            .collect();

        Ok(Network {
            input,
            hidden,
            parametric,
            optimizer,
            rng: StdRng::from_entropy(),
            width: None,
        })
    }

    /// Replaces the random source with one seeded from `seed`, making
    /// initialization reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn hidden(&self) -> &[Box<dyn Hidden>] {
        &self.hidden
    }

    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    /// Initializes every layer in order and warms the optimizer up with the
    /// resulting parameters. Returns the output width.
    ///
    /// Initializing again replaces every parameter; the optimizer state of
    /// the replaced parameters is dropped.
    pub fn initialize(&mut self) -> Result<usize, LazyNetError> {
        let stale = self.parameter_ids();
        let mut fan_in = self.input.initialize(0, &mut self.rng)?;
        for layer in self.hidden.iter_mut() {
            fan_in = layer.initialize(fan_in, &mut self.rng)?;
        }
        let warmed = self.sync_optimizer(&stale)?;

        self.width = Some(fan_in);
        log::debug!(
            "Initialized network of {} hidden layer(s), output width {}, {} parameter(s) warmed",
            self.hidden.len(),
            fan_in,
            warmed
        );
        Ok(fan_in)
    }

    /// The output width.
    pub fn width(&self) -> Result<usize, LazyNetError> {
        self.width.ok_or_else(|| LazyNetError::not_initialized(NAME))
    }

    /// Training forward pass; every layer caches what its `back` needs.
    pub fn forward(&mut self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        self.width()?;
        let mut activation = self.input.forward(input)?;
        for layer in self.hidden.iter_mut() {
            activation = layer.forward(&activation)?;
        }
        Ok(activation)
    }

    /// Inference pass; nothing is cached.
    pub fn infer(&self, input: &Tensor) -> Result<Tensor, LazyNetError> {
        self.width()?;
        let mut activation = self.input.infer(input)?;
        for layer in &self.hidden {
            activation = layer.infer(&activation)?;
        }
        Ok(activation)
    }

    /// Backpropagates the loss gradient through the hidden layers in
    /// reverse order, updating their parameters.
    ///
    /// The returned gradient w.r.t. the network input is not forced; the
    /// computation of the first hidden layer only runs if the caller forces it.
    pub fn back(&mut self, loss_gradient: Deferred) -> Result<Deferred, LazyNetError> {
        self.width()?;
        let mut gradient = loss_gradient;
        for layer in self.hidden.iter_mut().rev() {
            gradient = layer.back(gradient, self.optimizer.as_mut())?;
        }
        log::trace!("Network back pass over {} layer(s) done", self.hidden.len());
        Ok(gradient)
    }

    /// All trainable parameters, named `hidden.{index}.{name}`.
    pub fn parameters(&self) -> Result<Vec<(String, &Parameter)>, LazyNetError> {
        self.width()?;
        let mut named = Vec::new();
        for &index in &self.parametric {
            if let Some(parametric) = self.hidden[index].as_parametric() {
                for (name, param) in parametric.parameters()? {
                    named.push((format!("hidden.{}.{}", index, name), param));
                }
            }
        }
        Ok(named)
    }

    /// Routes named parameters back to their layers by their
    /// `hidden.{index}.` prefix. Every parametric layer must receive all of
    /// its parameters.
    pub fn restore(&mut self, parameters: Vec<(String, Parameter)>) -> Result<(), LazyNetError> {
        self.width()?;
        let mut routed: BTreeMap<usize, Vec<(String, Parameter)>> = BTreeMap::new();
        for (name, param) in parameters {
            match split_name(&name) {
                Some((index, local)) if self.parametric.contains(&index) => {
                    routed.entry(index).or_default().push((local.to_string(), param));
                }
                _ => log::warn!("{} ignored unknown parameter '{}' on restore", NAME, name),
            }
        }

        let stale = self.parameter_ids();
        let mut restored = Ok(());
        for &index in &self.parametric {
            let group = routed.remove(&index).unwrap_or_default();
            if let Some(parametric) = self.hidden[index].as_parametric_mut() {
                restored = parametric.restore(group);
                if restored.is_err() {
                    break;
                }
            }
        }
        self.sync_optimizer(&stale)?;
        restored
    }

    /// Ids of the parameters currently held by the hidden layers.
    fn parameter_ids(&self) -> Vec<ParamId> {
        self.parametric
            .iter()
            .filter_map(|&index| self.hidden[index].as_parametric())
            .filter_map(|parametric| parametric.parameters().ok())
            .flat_map(|named| named.into_iter().map(|(_, param)| param.id()))
            .collect()
    }

    /// Forgets optimizer state of `stale` parameters that were replaced and
    /// warms the current ones. Returns the number of parameters warmed.
    fn sync_optimizer(&mut self, stale: &[ParamId]) -> Result<usize, LazyNetError> {
        let current = self.parameter_ids();
        for &id in stale.iter().filter(|id| !current.contains(id)) {
            self.optimizer.forget(id);
        }

        let mut warmed = 0;
        for &index in &self.parametric {
            if let Some(parametric) = self.hidden[index].as_parametric() {
                for (_, param) in parametric.parameters()? {
                    self.optimizer.warm(param)?;
                    warmed += 1;
                }
            }
        }
        Ok(warmed)
    }
}

/// Splits `hidden.{index}.{name}` into `(index, name)`.
fn split_name(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("hidden.")?;
    let (index, local) = rest.split_once('.')?;
    Some((index.parse().ok()?, local))
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network (hidden layers: {})", self.hidden.len())?;
        writeln!(f, "  input: {}", self.input)?;
        for (index, layer) in self.hidden.iter().enumerate() {
            writeln!(f, "  hidden.{}: {}", index, layer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "network_test.rs"]
mod tests;
