//! Dense (fully connected) layer implementation
//!
//! This module provides a DenseLayer that computes, for every neuron `i`,
//! `z[i] = Σ_k input[k] * w[i, k] (+ b[i])` followed by the layer's
//! activation function.

use crate::architecture::LayerConfig;
use crate::error::{NetworkError, Result};
use crate::layers::{Layer, WeightInitializer};
use crate::utils::Activation;
use rand::RngCore;

/// Dense (fully connected) layer with optional per-neuron bias.
///
/// # Fields
///
/// * `size` - Number of neurons
/// * `input_size` - Width of the predecessor layer
/// * `weights` - Flattened weights, `size × (input_size + bias)` entries,
///   each neuron's incoming weights followed by its bias weight
/// * `z` - Pre-activation values from the last forward pass
/// * `output` - Activation values from the last forward pass
/// * `derivatives` - Activation derivatives from the last training pass
/// * `exp` - Softmax scratch buffer
///
/// # Example
///
/// ```
/// use feedforward_nn::architecture::LayerConfig;
/// use feedforward_nn::layers::{DenseLayer, Layer};
///
/// let layer = DenseLayer::new(&LayerConfig::new(3), 4).unwrap();
/// assert_eq!(layer.parameter_count(), 3 * 4 + 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    size: usize,
    input_size: usize,
    has_bias: bool,
    activation: Activation,
    initializer: WeightInitializer,
    weights: Vec<f64>,
    z: Vec<f64>,
    output: Vec<f64>,
    derivatives: Vec<f64>,
    exp: Vec<f64>,
}

impl DenseLayer {
    /// Create a dense layer fed by a predecessor of width `input_size`.
    ///
    /// Weights start at zero; call [`Layer::initialize_weights`] or
    /// [`Layer::set_weights`] before use. Networks built through
    /// [`Network::new`](crate::Network::new) are initialized already.
    pub fn new(config: &LayerConfig, input_size: usize) -> Result<Self> {
        if config.size == 0 {
            return Err(NetworkError::InvalidLayer(
                "layer size must be greater than 0".to_string(),
            ));
        }
        if input_size == 0 {
            return Err(NetworkError::InvalidLayer(
                "predecessor layer size must be greater than 0".to_string(),
            ));
        }
        config.initializer.validate()?;

        let size = config.size;
        let weight_count = size * input_size + if config.bias { size } else { 0 };

        Ok(Self {
            size,
            input_size,
            has_bias: config.bias,
            activation: config.activation,
            initializer: config.initializer,
            weights: vec![0.0; weight_count],
            z: vec![0.0; size],
            output: vec![0.0; size],
            derivatives: vec![0.0; size],
            exp: vec![0.0; size],
        })
    }

    /// Activation function of this layer.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Pre-activation values from the last forward pass.
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    fn check_weights_len(&self, len: usize) -> Result<()> {
        if len != self.weights.len() {
            return Err(NetworkError::WeightsSizeMismatch {
                expected: self.weights.len(),
                actual: len,
            });
        }
        Ok(())
    }
}

impl Layer for DenseLayer {
    fn size(&self) -> usize {
        self.size
    }

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn has_bias(&self) -> bool {
        self.has_bias
    }

    fn is_trainable(&self) -> bool {
        true
    }

    fn parameter_count(&self) -> usize {
        self.weights.len()
    }

    fn output(&self) -> &[f64] {
        &self.output
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn set_activation(&mut self, activation: &[f64]) -> Result<()> {
        if activation.len() != self.size {
            return Err(NetworkError::ActivationSizeMismatch {
                expected: self.size,
                actual: activation.len(),
            });
        }
        self.output.copy_from_slice(activation);
        Ok(())
    }

    fn initialize_weights(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        self.initializer
            .initialize(&mut self.weights, self.input_size, self.size, rng)
    }

    fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        self.check_weights_len(weights.len())?;
        self.weights.copy_from_slice(weights);
        Ok(())
    }

    fn delta_weights(&mut self, delta: &[f64]) -> Result<()> {
        self.check_weights_len(delta.len())?;
        for (w, d) in self.weights.iter_mut().zip(delta) {
            *w += d;
        }
        Ok(())
    }

    fn weight_at(&self, index: usize) -> Result<f64> {
        self.weights
            .get(index)
            .copied()
            .ok_or(NetworkError::WeightIndexOutOfRange {
                index,
                len: self.weights.len(),
            })
    }

    fn compute_activation(&mut self, input: &[f64], training: bool) -> Result<()> {
        if input.len() != self.input_size {
            return Err(NetworkError::ActivationSizeMismatch {
                expected: self.input_size,
                actual: input.len(),
            });
        }

        let mut weight_offset = 0;
        for zi in self.z.iter_mut() {
            let mut v = 0.0;
            for &x in input {
                v += x * self.weights[weight_offset];
                weight_offset += 1;
            }
            if self.has_bias {
                v += self.weights[weight_offset];
                weight_offset += 1;
            }
            *zi = v;
        }

        if training {
            self.activation.perform_with_derivative(
                &self.z,
                &mut self.output,
                &mut self.derivatives,
                &mut self.exp,
            );
        } else {
            self.activation
                .perform(&self.z, &mut self.output, &mut self.exp);
        }
        Ok(())
    }

    fn activation_derivative(&self, index: usize) -> Result<f64> {
        self.derivatives
            .get(index)
            .copied()
            .ok_or(NetworkError::ActivationSizeMismatch {
                expected: self.size,
                actual: index + 1,
            })
    }

    fn clone_box(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
