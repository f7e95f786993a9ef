//! Feedforward Neural Network Library
//!
//! A small engine for fully connected feedforward networks trained with
//! backpropagation and stochastic gradient descent.
//!
//! # Modules
//!
//! - `layers`: Layer trait, input layer, dense layer and weight initializers
//! - `network`: Ordered chain of layers and the forward pass
//! - `dataset`: In-memory (input, target) samples with shuffled read order
//! - `loss`: Loss functions (MSE, cross-entropy)
//! - `optimizers`: Optimizer trait and SGD with optional momentum
//! - `training`: Epoch loop, batching and epoch callbacks
//! - `utils`: Shared utilities (RNG, activation functions)
//! - `config`: Training configuration structures
//! - `architecture`: Architecture configuration and network building
//!
//! # Example
//!
//! ```
//! use feedforward_nn::architecture::{LayerConfig, NetworkConfig};
//! use feedforward_nn::optimizers::Sgd;
//! use feedforward_nn::training::{LossHistory, Training, TrainingOptions};
//! use feedforward_nn::utils::SimpleRng;
//! use feedforward_nn::{DataSet, Network};
//!
//! let mut rng = SimpleRng::new(1);
//! let config = NetworkConfig::new(2)
//!     .layer(LayerConfig::new(4))
//!     .layer(LayerConfig::new(1));
//! let mut network = Network::new(&config, &mut rng).unwrap();
//!
//! let mut data = DataSet::from_fn(8, |i| {
//!     let a = (i & 1) as f64;
//!     let b = ((i >> 1) & 1) as f64;
//!     (vec![a, b], vec![a.max(b)])
//! })
//! .unwrap();
//! let validation = data.clone();
//!
//! let mut optimizer = Sgd::new(0.1);
//! let mut training = Training::new(
//!     &mut network,
//!     &mut data,
//!     &validation,
//!     &mut optimizer,
//!     TrainingOptions::new(10).batch_size(1),
//! )
//! .unwrap();
//! let report = training.perform(&mut LossHistory::new(), &mut rng).unwrap();
//! assert_eq!(report.epochs_completed, 10);
//! ```

pub mod architecture;
pub mod config;
pub mod dataset;
pub mod error;
pub mod layers;
pub mod loss;
pub mod network;
pub mod optimizers;
pub mod training;
pub mod utils;

pub use dataset::DataSet;
pub use error::{NetworkError, Result};
pub use network::Network;
