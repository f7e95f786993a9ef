//! Layer abstractions for neural networks
//!
//! This module provides the Layer trait, the input layer, dense layers and
//! the weight initialization strategies they use.

mod r#trait;
pub mod dense;
pub mod initializer;
pub mod input;

// Re-export the Layer trait for convenience
pub use dense::DenseLayer;
pub use initializer::WeightInitializer;
pub use input::InputLayer;
pub use r#trait::Layer;
