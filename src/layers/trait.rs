//! Layer trait definition for neural network layers
//!
//! This module defines the core Layer trait that every trainable stage implements.
//! The trait provides a common interface for forward propagation and for backward
//! propagation fused with the gradient-descent update.

use crate::error::Result;

/// Core trait for neural network layers.
///
/// Layers process exactly one sample per call. `forward` stores a single cache of
/// whatever the matching `backward` needs (input, pre-activation, outputs, arg-max
/// positions); a later `forward` overwrites it.
///
/// # State machine
///
/// A freshly built layer is *not ready*. A successful `forward` makes it ready.
/// A successful `backward` consumes the cache, so calling `backward` again without
/// another `forward` fails with `BackwardBeforeForward`.
///
/// # Example
///
/// ```ignore
/// let output = layer.forward(&input)?;
/// let grad_input = layer.backward(&grad_output, learning_rate)?;
/// ```
pub trait Layer {
    /// Input accepted by `forward`.
    type Input: ?Sized;
    /// Value produced by `forward`; `backward` receives the loss gradient with
    /// respect to it in the same form.
    type Output;
    /// Gradient with respect to the input, returned by `backward`.
    type InputGrad;

    /// Forward propagation through the layer, caching what `backward` needs.
    ///
    /// # Errors
    ///
    /// Fails with a dimension or shape error if `input` does not match the layer's
    /// fixed expectation.
    fn forward(&mut self, input: &Self::Input) -> Result<Self::Output>;

    /// Backward propagation through the layer.
    ///
    /// Computes the gradient with respect to the cached input using the parameters
    /// as they were during `forward`, then applies `p ← p − learning_rate · ∂L/∂p`
    /// to every learned parameter.
    ///
    /// # Errors
    ///
    /// - `BackwardBeforeForward` when no forward cache is live
    /// - a dimension or shape error when `grad_output` does not match the cached output
    fn backward(
        &mut self,
        grad_output: &Self::Output,
        learning_rate: f64,
    ) -> Result<Self::InputGrad>;

    /// Number of learned scalars (weights plus biases).
    fn parameter_count(&self) -> usize;

    /// Whether a forward cache is live, i.e. `backward` is currently legal.
    fn is_ready(&self) -> bool;
}
