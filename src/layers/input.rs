//! Input layer: holds the raw values fed to the network.

use crate::error::{NetworkError, Result};
use crate::layers::Layer;
use rand::RngCore;

/// First layer of every network.
///
/// It has no predecessor, no weights and no activation function; its output
/// is whatever the network copies in before a forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct InputLayer {
    output: Vec<f64>,
}

impl InputLayer {
    /// Create an input layer of `size` neurons.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(NetworkError::InvalidLayer(
                "input layer size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            output: vec![0.0; size],
        })
    }
}

impl Layer for InputLayer {
    fn size(&self) -> usize {
        self.output.len()
    }

    fn input_size(&self) -> usize {
        0
    }

    fn has_bias(&self) -> bool {
        false
    }

    fn is_trainable(&self) -> bool {
        false
    }

    fn parameter_count(&self) -> usize {
        0
    }

    fn output(&self) -> &[f64] {
        &self.output
    }

    fn weights(&self) -> &[f64] {
        &[]
    }

    fn set_activation(&mut self, activation: &[f64]) -> Result<()> {
        if activation.len() != self.output.len() {
            return Err(NetworkError::ActivationSizeMismatch {
                expected: self.output.len(),
                actual: activation.len(),
            });
        }
        self.output.copy_from_slice(activation);
        Ok(())
    }

    fn initialize_weights(&mut self, _rng: &mut dyn RngCore) -> Result<()> {
        Err(NetworkError::InputLayerOperation("initialize weights"))
    }

    fn set_weights(&mut self, _weights: &[f64]) -> Result<()> {
        Err(NetworkError::InputLayerOperation("set weights"))
    }

    fn delta_weights(&mut self, _delta: &[f64]) -> Result<()> {
        Err(NetworkError::InputLayerOperation("modify weights"))
    }

    fn weight_at(&self, _index: usize) -> Result<f64> {
        Err(NetworkError::InputLayerOperation("get weights"))
    }

    fn compute_activation(&mut self, _input: &[f64], _training: bool) -> Result<()> {
        Err(NetworkError::InputLayerOperation("compute activation"))
    }

    fn activation_derivative(&self, _index: usize) -> Result<f64> {
        Err(NetworkError::InputLayerOperation(
            "compute the activation derivative",
        ))
    }

    fn clone_box(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
