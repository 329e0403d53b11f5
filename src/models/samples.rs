//! Fixed demo samples for each topology.

use crate::error::{EngineError, Result};
use crate::models::ModelKind;

/// Side length of the demo CNN image.
pub const IMAGE_SIZE: usize = 8;

/// Input length of the demo MLP sample.
pub const MLP_INPUT_LEN: usize = 3;

/// Target length shared by every demo sample.
pub const TARGET_LEN: usize = 1;

/// One training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// `(1.0, 0.5, -1.2)` with target `0.8`.
pub fn mlp_sample() -> Sample {
    Sample {
        input: vec![1.0, 0.5, -1.2],
        target: vec![0.8],
    }
}

/// Row-major 8x8 diagonal gradient `img[i,j] = (i + j) / 14` with target `1.0`.
pub fn cnn_sample() -> Sample {
    let max = (2 * (IMAGE_SIZE - 1)) as f64;
    let input = (0..IMAGE_SIZE)
        .flat_map(|i| (0..IMAGE_SIZE).map(move |j| (i + j) as f64 / max))
        .collect();
    Sample {
        input,
        target: vec![1.0],
    }
}

/// Demo sample for `kind`.
pub fn sample_for(kind: ModelKind) -> Result<Sample> {
    match kind {
        ModelKind::Mlp => Ok(mlp_sample()),
        ModelKind::Cnn => Ok(cnn_sample()),
        ModelKind::Recurrent | ModelKind::Attention => Err(EngineError::NotImplemented(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnn_sample_layout() {
        let sample = cnn_sample();
        assert_eq!(sample.input.len(), 64);
        assert_eq!(sample.input[0], 0.0);
        assert_eq!(sample.input[63], 1.0);
        // row 1, col 2
        assert!((sample.input[IMAGE_SIZE + 2] - 3.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_stub_kinds_have_no_sample() {
        assert!(sample_for(ModelKind::Recurrent).is_err());
        assert_eq!(sample_for(ModelKind::Mlp).unwrap().input.len(), 3);
    }

    #[test]
    fn test_sample_lengths_match_constants() {
        let mlp = mlp_sample();
        assert_eq!(mlp.input.len(), MLP_INPUT_LEN);
        assert_eq!(mlp.target.len(), TARGET_LEN);
        assert_eq!(cnn_sample().target.len(), TARGET_LEN);
    }
}
