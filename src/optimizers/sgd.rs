//! Stochastic Gradient Descent (SGD) optimizer implementation
//!
//! Backpropagation plus the gradient-descent update, with optional momentum:
//!
//! `Δw = η · δ · a_prev (+ m · Δw_prev)`
//!
//! where η is the learning rate, δ the neuron error, `a_prev` the
//! predecessor's output and m the momentum.

use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::optimizers::Optimizer;

/// Stochastic Gradient Descent optimizer.
///
/// Buffers are indexed by layer position; the input layer's entries are
/// empty.
///
/// # Fields
///
/// * `learning_rate` - Scale applied to every gradient contribution
/// * `momentum` - Fraction of the previous update blended into the next one
/// * `neuron_errors` - Per-layer error terms of the last sample
/// * `weight_gradients` - Per-layer accumulated gradients, one per weight
/// * `previous_gradients` - Per-layer gradients applied by the last update
#[derive(Debug, Clone)]
pub struct Sgd {
    learning_rate: f64,
    momentum: Option<f64>,
    neuron_errors: Vec<Vec<f64>>,
    weight_gradients: Vec<Vec<f64>>,
    previous_gradients: Vec<Vec<f64>>,
}

impl Sgd {
    /// Creates an SGD optimizer without momentum.
    ///
    /// # Examples
    ///
    /// ```
    /// use feedforward_nn::optimizers::{Optimizer, Sgd};
    ///
    /// let optimizer = Sgd::new(0.01);
    /// assert_eq!(optimizer.learning_rate(), 0.01);
    /// assert_eq!(optimizer.momentum(), None);
    /// ```
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            momentum: None,
            neuron_errors: Vec::new(),
            weight_gradients: Vec::new(),
            previous_gradients: Vec::new(),
        }
    }

    /// Creates an SGD optimizer that blends `momentum` times the previous
    /// update into every update.
    pub fn with_momentum(learning_rate: f64, momentum: f64) -> Self {
        Self {
            momentum: Some(momentum),
            ..Self::new(learning_rate)
        }
    }

    pub fn momentum(&self) -> Option<f64> {
        self.momentum
    }

    /// Accumulated gradients of the layer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `setup` has not been called.
    pub fn weight_gradients(&self, index: usize) -> &[f64] {
        &self.weight_gradients[index]
    }

    /// Error terms of the layer at `index` from the last sample.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `setup` has not been called.
    pub fn neuron_errors(&self, index: usize) -> &[f64] {
        &self.neuron_errors[index]
    }

    /// Gradients applied to the layer at `index` by the last update.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `setup` has not been called.
    pub fn previous_gradients(&self, index: usize) -> &[f64] {
        &self.previous_gradients[index]
    }

    fn check_ready(&self, network: &Network) -> Result<()> {
        if self.weight_gradients.len() != network.layer_count() {
            return Err(NetworkError::OptimizerNotReady);
        }
        let shapes_match = network.layers().iter().enumerate().skip(1).all(|(i, layer)| {
            self.neuron_errors[i].len() == layer.size()
                && self.weight_gradients[i].len() == layer.parameter_count()
        });
        if shapes_match {
            Ok(())
        } else {
            Err(NetworkError::OptimizerNotReady)
        }
    }

    /// Fill the error terms of layer `index`, given the errors of the layer
    /// after it (or the output error for the last layer).
    fn compute_neuron_errors(
        &mut self,
        network: &Network,
        index: usize,
        output_error: &[f64],
    ) -> Result<()> {
        let layer = network.layer(index);
        let (lower, upper) = self.neuron_errors.split_at_mut(index + 1);
        let errors = &mut lower[index];

        if index == network.layer_count() - 1 {
            for (i, err) in errors.iter_mut().enumerate() {
                *err = output_error[i] * layer.activation_derivative(i)?;
            }
            return Ok(());
        }

        let next = network.layer(index + 1);
        let next_errors = &upper[0];
        let next_weights = next.weights();
        let step = layer.size() + usize::from(next.has_bias());

        for (i, err) in errors.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (j, next_err) in next_errors.iter().enumerate() {
                sum += next_err * next_weights[i + j * step];
            }
            *err = sum * layer.activation_derivative(i)?;
        }
        Ok(())
    }

    fn accumulate_gradients(&mut self, network: &Network, index: usize) {
        let layer = network.layer(index);
        let previous_output = network.layer(index - 1).output();
        let errors = &self.neuron_errors[index];
        let gradients = &mut self.weight_gradients[index];
        let eta = self.learning_rate;

        let mut offset = 0;
        for &err in errors {
            let scaled = eta * err;
            for &prev in previous_output {
                gradients[offset] += scaled * prev;
                offset += 1;
            }
            if layer.has_bias() {
                gradients[offset] += scaled;
                offset += 1;
            }
        }
    }
}

impl Optimizer for Sgd {
    fn setup(&mut self, network: &Network) {
        let layers = network.layers();
        self.neuron_errors = layers
            .iter()
            .enumerate()
            .map(|(i, l)| if i == 0 { Vec::new() } else { vec![0.0; l.size()] })
            .collect();
        self.weight_gradients = layers
            .iter()
            .map(|l| vec![0.0; l.parameter_count()])
            .collect();
        self.previous_gradients = self.weight_gradients.clone();
    }

    fn on_start_epoch(&mut self) {
        for gradients in &mut self.weight_gradients {
            gradients.fill(0.0);
        }
    }

    fn train_on_sample(&mut self, network: &Network, output_error: &[f64]) -> Result<()> {
        self.check_ready(network)?;
        if !network.is_training() {
            return Err(NetworkError::NotTraining);
        }
        if output_error.len() != network.output_size() {
            return Err(NetworkError::ActivationSizeMismatch {
                expected: network.output_size(),
                actual: output_error.len(),
            });
        }

        for index in (1..network.layer_count()).rev() {
            self.compute_neuron_errors(network, index, output_error)?;
            self.accumulate_gradients(network, index);
        }
        Ok(())
    }

    fn update_weights(&mut self, network: &mut Network) -> Result<()> {
        self.check_ready(network)?;

        for index in 1..network.layer_count() {
            let layer = network.layer_mut(index);
            if !layer.is_trainable() {
                continue;
            }

            let gradients = &mut self.weight_gradients[index];
            if let Some(momentum) = self.momentum {
                let previous = &mut self.previous_gradients[index];
                for (g, p) in gradients.iter_mut().zip(previous.iter_mut()) {
                    *g += *p * momentum;
                    *p = *g;
                }
            }

            layer.delta_weights(gradients.as_slice())?;
            gradients.fill(0.0);
        }
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    fn reset(&mut self) {
        for buffer in self
            .neuron_errors
            .iter_mut()
            .chain(&mut self.weight_gradients)
            .chain(&mut self.previous_gradients)
        {
            buffer.fill(0.0);
        }
    }
}
