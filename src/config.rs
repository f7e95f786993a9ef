//! Configuration structures for training
//!
//! This module provides the JSON training configuration: epochs, batching,
//! optimizer parameters, loss selection, random seed and early stopping.

use crate::error::{NetworkError, Result};
use crate::loss::Loss;
use crate::optimizers::Sgd;
use crate::training::{LogEpochCallback, TrainingOptions};
use crate::utils::SimpleRng;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration for a training run
///
/// Optional fields:
///
/// - **batch_size**: samples per weight update (default: the whole training set)
/// - **momentum**: momentum for SGD in `[0, 1)` (default: none)
/// - **loss**: `"mse"` (default) or `"cross_entropy"`
/// - **seed**: seed for weight initialization and shuffling (default: time based)
/// - **validation_threshold**: stop once the validation loss falls below it
///
/// # Example
///
/// ```json
/// {
///   "epochs": 500,
///   "batch_size": 4,
///   "learning_rate": 0.1,
///   "momentum": 0.9,
///   "loss": "mse",
///   "seed": 42,
///   "validation_threshold": 0.001
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingConfig {
    pub epochs: usize,

    #[serde(default)]
    pub batch_size: Option<usize>,

    pub learning_rate: f64,

    #[serde(default)]
    pub momentum: Option<f64>,

    #[serde(default)]
    pub loss: Loss,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub validation_threshold: Option<f64>,
}

impl TrainingConfig {
    /// Options for [`Training::new`](crate::training::Training::new).
    pub fn options(&self) -> TrainingOptions {
        TrainingOptions {
            epochs: self.epochs,
            batch_size: self.batch_size,
            loss: self.loss,
        }
    }

    /// SGD optimizer with the configured learning rate and momentum.
    pub fn optimizer(&self) -> Sgd {
        match self.momentum {
            Some(momentum) => Sgd::with_momentum(self.learning_rate, momentum),
            None => Sgd::new(self.learning_rate),
        }
    }

    /// Random source seeded from `seed`, or from the clock when unset.
    pub fn rng(&self) -> SimpleRng {
        match self.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_time(),
        }
    }

    /// Logging callback stopping at `validation_threshold`.
    pub fn callback(&self) -> LogEpochCallback {
        LogEpochCallback {
            loss_threshold: self.validation_threshold,
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(invalid("epochs must be at least 1"));
        }

        if self.batch_size == Some(0) {
            return Err(invalid("batch_size must be at least 1"));
        }

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(invalid("learning_rate must be positive and finite"));
        }

        if let Some(momentum) = self.momentum {
            if !(0.0..1.0).contains(&momentum) {
                return Err(invalid("momentum must be in [0, 1)"));
            }
        }

        if let Some(threshold) = self.validation_threshold {
            if threshold.is_nan() || threshold < 0.0 {
                return Err(invalid("validation_threshold must be non-negative"));
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> NetworkError {
    NetworkError::InvalidConfig(message.to_string())
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a `TrainingConfig` and
/// validates it.
///
/// # Examples
///
/// ```no_run
/// use feedforward_nn::config::load_config;
///
/// let cfg = load_config("config/training/xor.json").unwrap();
/// assert_eq!(cfg.epochs, 2000);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading training config");

    let contents = fs::read_to_string(path)?;
    let config: TrainingConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
