//! Backprop Lab
//!
//! A small supervised-learning engine with hand-derived gradients for two
//! topologies: a fully-connected feed-forward network and a one-filter
//! convolutional network (convolution, 2x2 max pooling, scalar head). Training
//! processes one sample per step with plain gradient descent.
//!
//! # Modules
//!
//! - `layers`: Layer trait and implementations (Unit, Dense, Conv2D, MaxPool2D, head)
//! - `models`: the two topologies, model selection and demo samples
//! - `optimizers`: Optimizer trait and SGD
//! - `utils`: Shared utilities (RNG, initializers, activation functions, loss)
//! - `config`: Training configuration structures
//! - `error`: Error type shared by every component

pub mod config;
pub mod error;
pub mod layers;
pub mod models;
pub mod optimizers;
pub mod utils;

pub use error::{EngineError, Result};
