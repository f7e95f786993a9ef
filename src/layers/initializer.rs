//! Weight initialization strategies
//!
//! An initializer fills a layer's flattened weight buffer in place, drawing
//! from the random source it is handed so that seeded runs are reproducible.

use crate::error::{NetworkError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;

/// Strategy used to fill a dense layer's weights before training.
///
/// Deserialized as an internally tagged object:
///
/// ```json
/// { "type": "gaussian", "mean": 0.0, "std_dev": 0.3 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeightInitializer {
    /// Each weight drawn from N(mean, std_dev²).
    Gaussian { mean: f64, std_dev: f64 },
    /// Xavier/Glorot uniform: [-limit, limit], limit = sqrt(6 / (fan_in + fan_out)).
    XavierUniform,
    /// Every weight set to the same value.
    Constant { value: f64 },
}

impl Default for WeightInitializer {
    fn default() -> Self {
        WeightInitializer::Gaussian {
            mean: 0.0,
            std_dev: 0.3,
        }
    }
}

impl WeightInitializer {
    /// Gaussian initializer with the given parameters.
    pub fn gaussian(mean: f64, std_dev: f64) -> Self {
        WeightInitializer::Gaussian { mean, std_dev }
    }

    /// Check the strategy's parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            WeightInitializer::Gaussian { mean, std_dev } => {
                if !mean.is_finite() {
                    return Err(NetworkError::InvalidLayer(format!(
                        "gaussian mean must be finite, got {}",
                        mean
                    )));
                }
                if !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(NetworkError::InvalidLayer(format!(
                        "gaussian std_dev must be finite and non-negative, got {}",
                        std_dev
                    )));
                }
            }
            WeightInitializer::Constant { value } => {
                if !value.is_finite() {
                    return Err(NetworkError::InvalidLayer(format!(
                        "constant initializer value must be finite, got {}",
                        value
                    )));
                }
            }
            WeightInitializer::XavierUniform => {}
        }
        Ok(())
    }

    /// Fill `weights` in place.
    ///
    /// `fan_in` and `fan_out` are the predecessor width and the layer width;
    /// only Xavier uses them. An empty buffer is left untouched.
    pub fn initialize<R: Rng + ?Sized>(
        &self,
        weights: &mut [f64],
        fan_in: usize,
        fan_out: usize,
        rng: &mut R,
    ) -> Result<()> {
        if weights.is_empty() {
            return Ok(());
        }

        match *self {
            WeightInitializer::Gaussian { mean, std_dev } => {
                let normal = Normal::new(mean, std_dev)
                    .map_err(|e| NetworkError::InvalidLayer(e.to_string()))?;
                for w in weights.iter_mut() {
                    *w = normal.sample(rng);
                }
            }
            WeightInitializer::XavierUniform => {
                let limit = (6.0 / (fan_in + fan_out).max(1) as f64).sqrt();
                for w in weights.iter_mut() {
                    *w = rng.gen_range(-limit..=limit);
                }
            }
            WeightInitializer::Constant { value } => weights.fill(value),
        }
        Ok(())
    }
}
