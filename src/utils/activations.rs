//! Activation functions for neural networks
//!
//! This module provides the scalar activation strategies used by the engine:
//! - Sigmoid (output units and MLP hidden units)
//! - ReLU (convolution feature maps)
//!
//! Both are stateless; an [`Activation`] value is a zero-cost tag that layers
//! store by value and pass around freely.

use serde::Deserialize;

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative assuming x = sigmoid(z).
///
/// Returns the derivative: x * (1 - x)
pub fn sigmoid_derivative(x: f64) -> f64 {
    x * (1.0 - x)
}

/// ReLU activation function: max(0, x).
pub fn relu(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        0.0
    }
}

/// ReLU derivative: 1 for x > 0, otherwise 0 (including x == 0).
pub fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Scalar activation strategy selected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Sigmoid,
    Relu,
}

impl Activation {
    /// Activation value for pre-activation `z`.
    pub fn value(self, z: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(z),
            Activation::Relu => relu(z),
        }
    }

    /// Derivative dy/dz evaluated at `z`.
    pub fn derivative(self, z: f64) -> f64 {
        self.derivative_from_output(z, self.value(z))
    }

    /// Derivative dy/dz when the forward output `y = value(z)` is already known.
    ///
    /// Sigmoid reuses `y` so the exponential is evaluated only once per unit.
    pub fn derivative_from_output(self, z: f64, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid_derivative(y),
            Activation::Relu => relu_derivative(z),
        }
    }
}
