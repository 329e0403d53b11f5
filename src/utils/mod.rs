//! Shared utilities for the engine
//!
//! This module provides the stateless building blocks every layer leans on:
//! random number generation, parameter initialization, activation functions
//! and the loss.

pub mod activations;
pub mod init;
pub mod loss;
pub mod rng;

pub use activations::Activation;
pub use init::Initializer;
pub use rng::SimpleRng;
