//! Architecture configuration structures
//!
//! This module provides the configuration structures that describe a network:
//! the input width and the ordered list of dense layers that follow it. The
//! same structures are built in code or loaded from JSON files, and are
//! validated in one place before any layer is constructed.

use crate::error::{NetworkError, Result};
use crate::layers::WeightInitializer;
use crate::network::Network;
use crate::utils::Activation;
use rand::RngCore;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

fn default_bias() -> bool {
    true
}

/// Configuration for a single dense layer.
///
/// Every layer is fed by the layer listed before it (or by the input layer
/// for the first entry).
///
/// # Example
///
/// ```json
/// {
///   "size": 10,
///   "bias": true,
///   "activation": "tanh",
///   "initializer": { "type": "gaussian", "mean": 0.0, "std_dev": 0.3 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerConfig {
    /// Number of neurons
    pub size: usize,

    /// Whether each neuron gets a bias weight (default: true)
    #[serde(default = "default_bias")]
    pub bias: bool,

    /// Activation function (default: logistic)
    #[serde(default)]
    pub activation: Activation,

    /// Weight initializer (default: gaussian, mean 0.0, std_dev 0.3)
    #[serde(default)]
    pub initializer: WeightInitializer,
}

impl LayerConfig {
    /// Layer of `size` neurons with bias, logistic activation and the default
    /// initializer.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            bias: true,
            activation: Activation::default(),
            initializer: WeightInitializer::default(),
        }
    }

    /// Replace the activation function.
    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Replace the weight initializer.
    pub fn initializer(mut self, initializer: WeightInitializer) -> Self {
        self.initializer = initializer;
        self
    }

    /// Drop the bias weights.
    pub fn no_bias(mut self) -> Self {
        self.bias = false;
        self
    }
}

/// Configuration for the entire network.
///
/// The input layer is described by `input_size` alone, so it is always the
/// first layer and the only one without weights.
///
/// # Example
///
/// ```json
/// {
///   "input_size": 2,
///   "layers": [
///     { "size": 10, "activation": "logistic" },
///     { "size": 1, "activation": "logistic" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkConfig {
    /// Width of the input layer
    pub input_size: usize,

    /// Dense layers, in forward order
    pub layers: Vec<LayerConfig>,
}

impl NetworkConfig {
    /// Start a configuration with the given input width and no layers.
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size,
            layers: Vec::new(),
        }
    }

    /// Append a dense layer.
    pub fn layer(mut self, layer: LayerConfig) -> Self {
        self.layers.push(layer);
        self
    }

    /// Checks that:
    /// - the input width is at least 1
    /// - there is at least one dense layer (two layers in total)
    /// - every layer has at least one neuron and a usable initializer
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(NetworkError::InvalidLayer(
                "input layer size must be greater than 0".to_string(),
            ));
        }

        if self.layers.is_empty() {
            return Err(NetworkError::InvalidTopology(
                "A network must have at least an input and an output layer".to_string(),
            ));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.size == 0 {
                return Err(NetworkError::InvalidLayer(format!(
                    "Layer {}: size must be greater than 0",
                    i + 1
                )));
            }
            layer.initializer.validate().map_err(|e| {
                NetworkError::InvalidLayer(format!("Layer {}: {}", i + 1, e))
            })?;
        }

        Ok(())
    }
}

/// Loads an architecture configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a [`NetworkConfig`] and
/// validates it.
///
/// # Examples
///
/// ```no_run
/// use feedforward_nn::architecture::load_architecture;
///
/// let arch = load_architecture("config/architectures/xor.json").unwrap();
/// assert!(!arch.layers.is_empty());
/// ```
pub fn load_architecture<P: AsRef<Path>>(path: P) -> Result<NetworkConfig> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading architecture");
    let contents = fs::read_to_string(path)?;
    let config: NetworkConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Builds a network from an architecture configuration.
///
/// Shorthand for [`Network::new`]; every dense layer's weights are
/// initialized from `rng`.
pub fn build_network<R: RngCore>(config: &NetworkConfig, rng: &mut R) -> Result<Network> {
    Network::new(config, rng)
}
