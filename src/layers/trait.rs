//! Layer trait definition for neural network layers
//!
//! This module defines the core Layer trait implemented by the input layer and
//! by dense layers. A layer owns its weights and its output buffer; it never
//! holds a reference to its predecessor. The network passes the predecessor's
//! output in when it asks a layer to compute its activation.

use crate::error::Result;
use rand::RngCore;
use std::fmt;

/// Core trait for neural network layers.
///
/// Weights are stored flattened, row-major by neuron: neuron `i`'s incoming
/// weights from every predecessor neuron are contiguous, followed by its
/// bias weight when the layer has a bias. The weight of the connection from
/// predecessor neuron `k` into neuron `i` therefore lives at
/// `i * (input_size + bias) + k`.
///
/// Operations that need weights or an activation function fail with
/// [`NetworkError::InputLayerOperation`](crate::NetworkError::InputLayerOperation)
/// on the input layer.
///
/// # Example
///
/// ```ignore
/// // Forward pass through a dense layer fed by a 2-wide predecessor
/// layer.compute_activation(&[0.0, 1.0], true)?;
/// let y = layer.output();
/// let dy = layer.activation_derivative(0)?;
/// ```
pub trait Layer: fmt::Debug {
    /// Number of neurons.
    fn size(&self) -> usize;

    /// Width of the predecessor layer (0 for the input layer).
    fn input_size(&self) -> usize;

    /// Whether each neuron carries a bias weight.
    fn has_bias(&self) -> bool;

    /// Whether the optimizer may update this layer.
    fn is_trainable(&self) -> bool;

    /// Length of the flattened weight buffer, fixed at construction.
    fn parameter_count(&self) -> usize;

    /// Output buffer filled by the last activation.
    fn output(&self) -> &[f64];

    /// Flattened weights (empty for the input layer).
    fn weights(&self) -> &[f64];

    /// Copy `activation` into the output buffer.
    ///
    /// The network uses this to feed raw values into the input layer.
    fn set_activation(&mut self, activation: &[f64]) -> Result<()>;

    /// Fill the weights with the layer's configured initializer.
    fn initialize_weights(&mut self, rng: &mut dyn RngCore) -> Result<()>;

    /// Replace the whole weight buffer.
    fn set_weights(&mut self, weights: &[f64]) -> Result<()>;

    /// Add `delta[i]` to `weight[i]` for every weight.
    fn delta_weights(&mut self, delta: &[f64]) -> Result<()>;

    /// Read a single weight.
    fn weight_at(&self, index: usize) -> Result<f64>;

    /// Compute the weighted sums from the predecessor's output and apply the
    /// activation. When `training` is set the per-neuron derivatives are
    /// cached as well.
    fn compute_activation(&mut self, input: &[f64], training: bool) -> Result<()>;

    /// Derivative cached for `index` by the last training pass.
    fn activation_derivative(&self, index: usize) -> Result<f64>;

    /// Clone into a new boxed layer.
    fn clone_box(&self) -> Box<dyn Layer>;
}

impl Clone for Box<dyn Layer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
