//! Optimizer abstractions for network weight updates
//!
//! An optimizer owns the per-layer buffers used by backpropagation: neuron
//! errors, accumulated weight gradients and, with momentum, the gradients
//! applied by the previous update.
//!
//! # Overview
//!
//! Training drives an optimizer through three calls:
//!
//! 1. [`Optimizer::train_on_sample`] after each forward pass, which
//!    propagates the output error back through the network and adds the
//!    sample's contribution to the gradient accumulators;
//! 2. [`Optimizer::update_weights`] at every batch boundary, which applies
//!    the accumulated gradients to the weights;
//! 3. [`Optimizer::on_start_epoch`] at the start of every epoch.
//!
//! The output error handed in by the loss function already points in the
//! descent direction, so updates are added to the weights.
//!
//! # Example
//!
//! ```
//! use feedforward_nn::architecture::{LayerConfig, NetworkConfig};
//! use feedforward_nn::optimizers::{Optimizer, Sgd};
//! use feedforward_nn::utils::SimpleRng;
//! use feedforward_nn::Network;
//!
//! let config = NetworkConfig::new(2).layer(LayerConfig::new(1));
//! let mut network = Network::new(&config, &mut SimpleRng::new(7)).unwrap();
//! let mut optimizer = Sgd::new(0.1);
//! optimizer.setup(&network);
//!
//! network.set_training(true);
//! network.forward_pass(&[1.0, 0.0]).unwrap();
//! optimizer.train_on_sample(&network, &[0.5]).unwrap();
//! optimizer.update_weights(&mut network).unwrap();
//! ```

pub mod sgd;

pub use sgd::Sgd;

use crate::error::Result;
use crate::network::Network;

/// Core trait for network optimizers.
pub trait Optimizer {
    /// Allocate zeroed buffers sized for `network`.
    ///
    /// Must be called again whenever the optimizer is used with a network of
    /// a different shape.
    fn setup(&mut self, network: &Network);

    /// Zero the weight-gradient accumulators.
    fn on_start_epoch(&mut self);

    /// Backpropagate `output_error` through `network` and accumulate the
    /// weight gradients of the sample whose forward pass ran last.
    ///
    /// The forward pass must have run in training mode so that activation
    /// derivatives are cached.
    fn train_on_sample(&mut self, network: &Network, output_error: &[f64]) -> Result<()>;

    /// Apply the accumulated gradients to every trainable layer and zero the
    /// accumulators.
    fn update_weights(&mut self, network: &mut Network) -> Result<()>;

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, learning_rate: f64);

    /// Zero every buffer, momentum history included.
    fn reset(&mut self);
}
