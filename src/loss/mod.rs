//! Loss functions
//!
//! A loss function accumulates a scalar loss over an epoch and, for every
//! sample, hands back the output-error gradient that seeds backpropagation.
//!
//! # Sign convention
//!
//! The returned gradient already points in the descent direction (for MSE it
//! is `target - activation`), so optimizers *add* the resulting updates to
//! the weights.
//!
//! # Available losses
//!
//! - [`MseLoss`]: mean squared error
//! - [`CrossEntropyLoss`]: binary cross-entropy with an epsilon guard

pub mod cross_entropy;
pub mod mse;

pub use cross_entropy::CrossEntropyLoss;
pub use mse::MseLoss;

use crate::dataset::DataSet;
use crate::error::Result;
use crate::network::Network;
use serde::Deserialize;
use std::fmt;

/// Core trait for loss functions.
///
/// Per epoch the caller invokes [`on_epoch_started`](LossFunction::on_epoch_started)
/// once, [`on_epoch_sample`](LossFunction::on_epoch_sample) for every sample,
/// and reads [`epoch_loss`](LossFunction::epoch_loss) at the end.
pub trait LossFunction: fmt::Debug {
    /// Reset the accumulated loss and size the gradient buffer.
    fn on_epoch_started(&mut self, output_size: usize, dataset_size: usize);

    /// Add one sample's contribution and return its output-error gradient.
    ///
    /// `activation` and `target` must both have `output_size` entries, and
    /// the epoch must have been started with a non-empty data set.
    fn on_epoch_sample(&mut self, activation: &[f64], target: &[f64]) -> &[f64];

    /// Loss accumulated since the last `on_epoch_started`.
    fn epoch_loss(&self) -> f64;

    /// Forward-pass every sample of `dataset` and return the loss.
    ///
    /// No weights are changed.
    fn compute(&mut self, network: &mut Network, dataset: &DataSet) -> Result<f64> {
        self.on_epoch_started(network.output_size(), dataset.len());
        for (input, target) in dataset.iter() {
            let activation = network.forward_pass(input)?;
            self.on_epoch_sample(activation, target);
        }
        Ok(self.epoch_loss())
    }
}

/// Loss function selector, deserialized from `"mse"` or `"cross_entropy"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    #[default]
    Mse,
    CrossEntropy,
}

impl Loss {
    /// Create a fresh accumulator for this loss.
    pub fn build(self) -> Box<dyn LossFunction> {
        match self {
            Loss::Mse => Box::new(MseLoss::new()),
            Loss::CrossEntropy => Box::new(CrossEntropyLoss::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_selects_variant() {
        let mut mse = Loss::Mse.build();
        mse.on_epoch_started(1, 1);
        mse.on_epoch_sample(&[0.0], &[2.0]);
        assert_eq!(mse.epoch_loss(), 4.0);

        let mut ce = Loss::CrossEntropy.build();
        ce.on_epoch_started(1, 1);
        ce.on_epoch_sample(&[0.5], &[1.0]);
        assert!((ce.epoch_loss() - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize() {
        let loss: Loss = serde_json::from_str(r#""cross_entropy""#).unwrap();
        assert_eq!(loss, Loss::CrossEntropy);
        assert_eq!(Loss::default(), Loss::Mse);
    }
}
