//! Error types for the network engine
//!
//! Every precondition violation (bad configuration, shape mismatch, illegal
//! operation on the input layer) is reported through [`NetworkError`] at the
//! call site. Nothing is retried; the caller fixes the configuration and
//! invokes the operation again.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Data set construction or dimension check failed
    #[error("Invalid data set: {0}")]
    InvalidDataSet(String),

    /// Layer configuration is not usable
    #[error("Invalid layer: {0}")]
    InvalidLayer(String),

    /// Network topology is not a valid chain of layers
    #[error("Invalid network topology: {0}")]
    InvalidTopology(String),

    /// Training or loading configuration is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Weight buffer length does not match the layer's fixed weight count
    #[error("Weights size is supposed to be {expected} for this layer but argument has size {actual}")]
    WeightsSizeMismatch { expected: usize, actual: usize },

    /// Activation or error vector length does not match the layer width
    #[error("Activation size is supposed to be {expected} but argument has size {actual}")]
    ActivationSizeMismatch { expected: usize, actual: usize },

    /// Weight read past the end of the buffer
    #[error("Weight index {index} out of range for a layer with {len} weights")]
    WeightIndexOutOfRange { index: usize, len: usize },

    /// Operation that only makes sense on a computed layer
    #[error("Cannot {0} of an input layer")]
    InputLayerOperation(&'static str),

    /// Optimizer buffers were not allocated for this network
    #[error("Optimizer has not been set up for this network")]
    OptimizerNotReady,

    /// Backpropagation needs the derivatives cached by a training-mode pass
    #[error("Network is not in training mode; derivatives were not cached by the last forward pass")]
    NotTraining,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
