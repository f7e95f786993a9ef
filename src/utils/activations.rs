//! Activation functions for neural networks
//!
//! Scalar functions map a pre-activation value to an output, and derivative
//! functions map that *output* back to the slope of the function at that
//! point. The [`Activation`] enum selects one of them per layer.

use serde::Deserialize;

/// Slope used by leaky ReLU for negative pre-activations.
pub const LEAKY_RELU_SLOPE: f64 = 0.001;

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative assuming y = sigmoid(z).
///
/// Returns the derivative: y * (1 - y)
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Tanh derivative assuming y = tanh(z).
pub fn tanh_derivative(y: f64) -> f64 {
    1.0 - y * y
}

/// ReLU clamped to [0, 1].
pub fn relu(z: f64) -> f64 {
    z.max(0.0).min(1.0)
}

/// ReLU derivative assuming y = relu(z).
pub fn relu_derivative(y: f64) -> f64 {
    if y <= 0.0 {
        0.0
    } else {
        1.0
    }
}

/// Leaky ReLU, capped at 1 for positive inputs.
pub fn leaky_relu(z: f64) -> f64 {
    if z < 0.0 {
        z * LEAKY_RELU_SLOPE
    } else {
        z.min(1.0)
    }
}

/// Leaky ReLU derivative assuming y = leaky_relu(z).
pub fn leaky_relu_derivative(y: f64) -> f64 {
    if y <= 0.0 {
        LEAKY_RELU_SLOPE
    } else {
        1.0
    }
}

/// Activation strategy of a dense layer.
///
/// Deserialized from snake_case names: `"logistic"`, `"tanh"`, `"relu"`,
/// `"leaky_relu"`, `"softmax"`, `"identity"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Logistic,
    Tanh,
    Relu,
    LeakyRelu,
    Softmax,
    Identity,
}

impl Activation {
    fn func(self, z: f64) -> f64 {
        match self {
            Activation::Logistic => sigmoid(z),
            Activation::Tanh => z.tanh(),
            Activation::Relu => relu(z),
            Activation::LeakyRelu => leaky_relu(z),
            Activation::Softmax => z.exp(),
            Activation::Identity => z,
        }
    }

    fn func_prime(self, y: f64) -> f64 {
        match self {
            Activation::Logistic | Activation::Softmax => sigmoid_derivative(y),
            Activation::Tanh => tanh_derivative(y),
            Activation::Relu => relu_derivative(y),
            Activation::LeakyRelu => leaky_relu_derivative(y),
            Activation::Identity => 1.0,
        }
    }

    /// Compute `output = f(z)`.
    ///
    /// `exp` is scratch space of the same length as `z`; only softmax uses it,
    /// to hold the un-normalized exponentials.
    pub fn perform(self, z: &[f64], output: &mut [f64], exp: &mut [f64]) {
        debug_assert_eq!(z.len(), output.len());
        match self {
            Activation::Softmax => {
                let sum = fill_exp(z, exp);
                for (out, &e) in output.iter_mut().zip(exp.iter()) {
                    *out = e / sum;
                }
            }
            _ => {
                for (out, &zi) in output.iter_mut().zip(z) {
                    *out = self.func(zi);
                }
            }
        }
    }

    /// Compute `output = f(z)` and the per-neuron derivative.
    ///
    /// Softmax uses `y(1 - y) * e^z` with the un-normalized exponential, the
    /// other variants derive from the output alone.
    pub fn perform_with_derivative(
        self,
        z: &[f64],
        output: &mut [f64],
        derivatives: &mut [f64],
        exp: &mut [f64],
    ) {
        debug_assert_eq!(z.len(), output.len());
        debug_assert_eq!(z.len(), derivatives.len());
        match self {
            Activation::Softmax => {
                let sum = fill_exp(z, exp);
                for ((out, d), &e) in output.iter_mut().zip(derivatives.iter_mut()).zip(exp.iter()) {
                    let y = e / sum;
                    *out = y;
                    *d = self.func_prime(y) * e;
                }
            }
            _ => {
                for ((out, d), &zi) in output.iter_mut().zip(derivatives.iter_mut()).zip(z) {
                    let y = self.func(zi);
                    *out = y;
                    *d = self.func_prime(y);
                }
            }
        }
    }
}

fn fill_exp(z: &[f64], exp: &mut [f64]) -> f64 {
    let mut sum = 0.0;
    for (e, &zi) in exp.iter_mut().zip(z) {
        *e = zi.exp();
        sum += *e;
    }
    sum
}
