//! Network: an ordered chain of layers.
//!
//! Layer 0 is the input layer; every other layer is a dense layer fed by the
//! layer right before it. Layers refer to their predecessor by position only,
//! so a `Network` can be moved or cloned freely.

use crate::architecture::NetworkConfig;
use crate::error::{NetworkError, Result};
use crate::layers::{DenseLayer, InputLayer, Layer};
use rand::RngCore;
use tracing::debug;

/// Feedforward network.
///
/// # Example
///
/// ```
/// use feedforward_nn::architecture::{LayerConfig, NetworkConfig};
/// use feedforward_nn::utils::SimpleRng;
/// use feedforward_nn::Network;
///
/// let config = NetworkConfig::new(2)
///     .layer(LayerConfig::new(4))
///     .layer(LayerConfig::new(1));
/// let mut network = Network::new(&config, &mut SimpleRng::new(42)).unwrap();
///
/// let output = network.forward_pass(&[1.0, 0.0]).unwrap();
/// assert_eq!(output.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Box<dyn Layer>>,
    training: bool,
}

impl Network {
    /// Build a network from its configuration.
    ///
    /// The configuration is validated first, then every dense layer's
    /// weights are initialized from its initializer using `rng`.
    pub fn new<R: RngCore>(config: &NetworkConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut layers: Vec<Box<dyn Layer>> = Vec::with_capacity(config.layers.len() + 1);
        layers.push(Box::new(InputLayer::new(config.input_size)?));

        let mut input_size = config.input_size;
        for layer_config in &config.layers {
            let mut layer = DenseLayer::new(layer_config, input_size)?;
            layer.initialize_weights(rng)?;
            input_size = layer.size();
            layers.push(Box::new(layer));
        }

        let network = Self {
            layers,
            training: false,
        };
        debug!(
            sizes = ?network.layers.iter().map(|l| l.size()).collect::<Vec<_>>(),
            parameters = network.parameter_count(),
            "built network"
        );
        Ok(network)
    }

    /// Number of layers, input layer included.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer at `index` (0 is the input layer).
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn layer(&self, index: usize) -> &dyn Layer {
        self.layers[index].as_ref()
    }

    /// Mutable layer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn layer_mut(&mut self, index: usize) -> &mut dyn Layer {
        self.layers[index].as_mut()
    }

    /// All layers in forward order.
    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    /// Width of the input layer.
    pub fn input_size(&self) -> usize {
        self.layers[0].size()
    }

    /// Width of the output layer.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    /// Output of the last forward pass.
    pub fn output(&self) -> &[f64] {
        self.layers[self.layers.len() - 1].output()
    }

    /// Total number of weights across all layers.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(|l| l.parameter_count()).sum()
    }

    /// Switch derivative caching on or off for subsequent forward passes.
    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Run `input` through every layer in order and return the output
    /// layer's activation.
    pub fn forward_pass(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.layers[0].set_activation(input)?;

        for index in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(index);
            rest[0].compute_activation(done[index - 1].output(), self.training)?;
        }

        Ok(self.output())
    }

    /// Copy of every dense layer's flattened weights, in forward order.
    pub fn export_weights(&self) -> Vec<Vec<f64>> {
        self.layers[1..].iter().map(|l| l.weights().to_vec()).collect()
    }

    /// Replace every dense layer's weights with arrays produced by
    /// [`Network::export_weights`].
    pub fn import_weights(&mut self, weights: &[Vec<f64>]) -> Result<()> {
        if weights.len() != self.layers.len() - 1 {
            return Err(NetworkError::InvalidTopology(format!(
                "expected weights for {} layers, got {}",
                self.layers.len() - 1,
                weights.len()
            )));
        }
        for (layer, w) in self.layers[1..].iter_mut().zip(weights) {
            layer.set_weights(w)?;
        }
        Ok(())
    }
}
