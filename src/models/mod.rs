//! Model topologies and model selection
//!
//! This module ties the layers together into the two trainable topologies and
//! exposes them to a driver through one capability set, [`Trainable`]:
//!
//! - [`FeedForwardNetwork`]: a stack of dense sigmoid layers (3 inputs, 1 output in the demo)
//! - [`CnnPipeline`]: convolution, 2x2 max pooling and a scalar head over an 8x8 image
//!
//! [`Model::build`] maps a [`ModelKind`] to a ready model. The recurrent and
//! attention kinds are recognised but have no implementation and fail with
//! `NotImplemented`.
//!
//! # Example
//!
//! ```
//! use backprop_lab::config::TrainingConfig;
//! use backprop_lab::models::{sample_for, Model, ModelKind, Trainable};
//!
//! let config = TrainingConfig::default();
//! let mut model = Model::build(ModelKind::Mlp, &config).unwrap();
//! let sample = sample_for(ModelKind::Mlp).unwrap();
//!
//! model.train(&sample.input, &sample.target, 0.5).unwrap();
//! let output = model.predict(&sample.input).unwrap();
//! assert!(model.loss(&output, &sample.target).unwrap() >= 0.0);
//! ```

pub mod cnn;
pub mod mlp;
pub mod samples;

pub use cnn::CnnPipeline;
pub use mlp::FeedForwardNetwork;
pub use samples::{sample_for, Sample};

use crate::config::TrainingConfig;
use crate::error::{EngineError, Result};
use crate::utils::Initializer;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Predict/train/loss capability shared by every topology.
pub trait Trainable {
    /// Forward pass for one sample.
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>>;

    /// One forward + backward + update cycle on one sample.
    fn train(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()>;

    /// Half squared-error of `output` against `target`.
    fn loss(&self, output: &[f64], target: &[f64]) -> Result<f64>;
}

/// Topology identifiers a driver may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Mlp,
    Cnn,
    #[serde(alias = "rnn")]
    Recurrent,
    #[serde(alias = "transformer")]
    Attention,
}

impl ModelKind {
    /// Learning rate used when the configuration does not set one.
    pub fn default_learning_rate(self) -> f64 {
        match self {
            ModelKind::Cnn => 0.1,
            _ => 0.5,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Mlp => "mlp",
            ModelKind::Cnn => "cnn",
            ModelKind::Recurrent => "recurrent",
            ModelKind::Attention => "attention",
        };
        f.write_str(name)
    }
}

impl FromStr for ModelKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mlp" => Ok(ModelKind::Mlp),
            "cnn" => Ok(ModelKind::Cnn),
            "rnn" | "recurrent" => Ok(ModelKind::Recurrent),
            "attention" | "transformer" => Ok(ModelKind::Attention),
            _ => Err(EngineError::UnknownTopology(s.to_string())),
        }
    }
}

/// A constructed model of one of the implemented kinds.
#[derive(Debug, Clone)]
pub enum Model {
    Mlp(FeedForwardNetwork),
    Cnn(CnnPipeline),
}

impl Model {
    /// Construct a fresh model of `kind` from the architecture sections of `config`,
    /// with weights drawn from `Initializer::seeded(config.seed)`.
    ///
    /// # Errors
    ///
    /// `NotImplemented` for the recurrent and attention kinds; construction errors
    /// from the layers otherwise.
    pub fn build(kind: ModelKind, config: &TrainingConfig) -> Result<Self> {
        let mut init = Initializer::seeded(config.seed);
        match kind {
            ModelKind::Mlp => {
                let net = FeedForwardNetwork::from_config(&config.mlp, &mut init)?;
                Ok(Model::Mlp(net))
            }
            ModelKind::Cnn => Ok(Model::Cnn(CnnPipeline::new(&config.cnn, &mut init)?)),
            ModelKind::Recurrent | ModelKind::Attention => Err(EngineError::NotImplemented(kind)),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Mlp(_) => ModelKind::Mlp,
            Model::Cnn(_) => ModelKind::Cnn,
        }
    }

    /// Expected input length.
    pub fn input_size(&self) -> usize {
        match self {
            Model::Mlp(net) => net.input_size(),
            Model::Cnn(cnn) => cnn.input_size(),
        }
    }

    pub fn parameter_count(&self) -> usize {
        match self {
            Model::Mlp(net) => net.parameter_count(),
            Model::Cnn(cnn) => cnn.parameter_count(),
        }
    }
}

impl Trainable for Model {
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        match self {
            Model::Mlp(net) => net.predict(input),
            Model::Cnn(cnn) => cnn.predict(input),
        }
    }

    fn train(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()> {
        match self {
            Model::Mlp(net) => net.train(input, target, learning_rate),
            Model::Cnn(cnn) => cnn.train(input, target, learning_rate),
        }
    }

    fn loss(&self, output: &[f64], target: &[f64]) -> Result<f64> {
        match self {
            Model::Mlp(net) => net.loss(output, target),
            Model::Cnn(cnn) => cnn.loss(output, target),
        }
    }
}
