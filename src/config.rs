//! Configuration structures for training
//!
//! This module provides the configuration used by the demo driver: which topology
//! to run, how long and how fast to train it, the initializer seed, and the shape
//! of each architecture.

use crate::models::samples::{IMAGE_SIZE, MLP_INPUT_LEN, TARGET_LEN};
use crate::models::ModelKind;
use crate::utils::Activation;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Shape of the feed-forward network.
///
/// `layer_sizes[0]` is the input dimension; each following entry is the unit count
/// of one dense layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MlpConfig {
    pub layer_sizes: Vec<usize>,
    pub activation: Activation,
}

impl Default for MlpConfig {
    fn default() -> Self {
        Self {
            layer_sizes: vec![3, 3, 2, 1],
            activation: Activation::Sigmoid,
        }
    }
}

/// Shape of the convolutional pipeline (conv -> 2x2 max pool -> head).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CnnConfig {
    pub image_height: usize,
    pub image_width: usize,
    pub kernel_height: usize,
    pub kernel_width: usize,
    pub conv_activation: Activation,
    pub head_activation: Activation,
}

impl Default for CnnConfig {
    fn default() -> Self {
        Self {
            image_height: 8,
            image_width: 8,
            kernel_height: 3,
            kernel_width: 3,
            conv_activation: Activation::Relu,
            head_activation: Activation::Sigmoid,
        }
    }
}

/// Configuration for a demo training run.
///
/// Every field is optional in the JSON file and falls back to the defaults below.
///
/// # Example
///
/// ```json
/// {
///   "model": "cnn",
///   "epochs": 20,
///   "learning_rate": 0.1,
///   "seed": 42,
///   "cnn": { "kernel_height": 3, "kernel_width": 3, "conv_activation": "relu" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Topology to run: "mlp", "cnn", "recurrent" or "attention"
    pub model: ModelKind,

    /// Number of training steps on the demo sample
    pub epochs: usize,

    /// Learning rate; the model's own default is used when absent
    pub learning_rate: Option<f64>,

    /// Seed for the uniform weight initializer
    pub seed: u64,

    pub mlp: MlpConfig,
    pub cnn: CnnConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::Mlp,
            epochs: 20,
            learning_rate: None,
            seed: 42,
            mlp: MlpConfig::default(),
            cnn: CnnConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Learning rate to use for `kind`.
    pub fn learning_rate_for(&self, kind: ModelKind) -> f64 {
        self.learning_rate.unwrap_or_else(|| kind.default_learning_rate())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epochs == 0 {
            return Err(ConfigError::Invalid("epochs must be greater than 0".into()));
        }

        if let Some(lr) = self.learning_rate {
            if !(lr > 0.0 && lr.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "learning_rate must be positive, got {}",
                    lr
                )));
            }
        }

        if self.mlp.layer_sizes.len() < 2 {
            return Err(ConfigError::Invalid(
                "mlp.layer_sizes needs an input size and at least one layer".into(),
            ));
        }
        if let Some(index) = self.mlp.layer_sizes.iter().position(|&s| s == 0) {
            return Err(ConfigError::Invalid(format!(
                "mlp.layer_sizes[{}] must be greater than 0",
                index
            )));
        }
        let sizes = &self.mlp.layer_sizes;
        let (input_len, output_len) = (sizes[0], sizes[sizes.len() - 1]);
        if input_len != MLP_INPUT_LEN {
            return Err(ConfigError::Invalid(format!(
                "mlp.layer_sizes[0] must match the {}-value demo input, got {}",
                MLP_INPUT_LEN, input_len
            )));
        }
        if output_len != TARGET_LEN {
            return Err(ConfigError::Invalid(format!(
                "mlp output size must match the {}-value demo target, got {}",
                TARGET_LEN, output_len
            )));
        }

        let cnn = &self.cnn;
        if cnn.kernel_height == 0 || cnn.kernel_width == 0 {
            return Err(ConfigError::Invalid(
                "cnn kernel dimensions must be greater than 0".into(),
            ));
        }
        if cnn.image_height < cnn.kernel_height || cnn.image_width < cnn.kernel_width {
            return Err(ConfigError::Invalid(format!(
                "cnn image {}x{} is smaller than kernel {}x{}",
                cnn.image_height, cnn.image_width, cnn.kernel_height, cnn.kernel_width
            )));
        }
        let conv_height = cnn.image_height - cnn.kernel_height + 1;
        let conv_width = cnn.image_width - cnn.kernel_width + 1;
        if conv_height / 2 == 0 || conv_width / 2 == 0 {
            return Err(ConfigError::Invalid(format!(
                "cnn pooled map of {}x{} convolution output is empty",
                conv_height, conv_width
            )));
        }
        if cnn.image_height != IMAGE_SIZE || cnn.image_width != IMAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "cnn image must match the {}x{} demo sample, got {}x{}",
                IMAGE_SIZE, IMAGE_SIZE, cnn.image_height, cnn.image_width
            )));
        }

        Ok(())
    }
}

/// Parses and validates a configuration from a JSON string.
pub fn parse_config(contents: &str) -> Result<TrainingConfig, ConfigError> {
    let config: TrainingConfig = serde_json::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path` and deserializes its JSON contents into a `TrainingConfig`.
///
/// # Returns
///
/// `Ok(TrainingConfig)` on success, or an error if the file cannot be read, the JSON is
/// invalid, or a value is out of range.
///
/// # Examples
///
/// ```no_run
/// use backprop_lab::config::load_config;
///
/// let cfg = load_config("config/cnn.json").unwrap();
/// assert!(cfg.epochs > 0);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TrainingConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&contents)
}
