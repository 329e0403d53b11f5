//! Stochastic Gradient Descent (SGD) optimizer implementation
//!
//! This module provides a vanilla SGD optimizer that performs the basic
//! gradient descent update: `parameter = parameter - learning_rate * gradient`

use crate::error::{EngineError, Result};
use crate::optimizers::Optimizer;

/// Stochastic Gradient Descent optimizer.
///
/// Implements the basic gradient descent update rule without momentum:
///
/// `w = w - η * ∇L/∂w`
///
/// where w is the parameter, η (eta) is the learning rate, and ∇L/∂w is the gradient.
/// It carries no state besides η, so layers build one per `backward` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    /// Creates a new SGD optimizer with the specified learning rate.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// Update a single scalar parameter (biases).
    pub fn step_scalar(&self, parameter: &mut f64, gradient: f64) {
        *parameter -= self.learning_rate * gradient;
    }
}

impl Optimizer for Sgd {
    fn step(&self, parameters: &mut [f64], gradients: &[f64]) -> Result<()> {
        if parameters.len() != gradients.len() {
            return Err(EngineError::DimensionMismatch {
                context: "sgd gradients",
                expected: parameters.len(),
                actual: gradients.len(),
            });
        }

        for (param, grad) in parameters.iter_mut().zip(gradients.iter()) {
            *param -= self.learning_rate * grad;
        }
        Ok(())
    }
}
