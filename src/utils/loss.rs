//! Half squared-error loss.
//!
//! `L = 0.5 * Σ (y_k - t_k)^2`, chosen so that `dL/dy_k = y_k - t_k` exactly.

use crate::error::{EngineError, Result};

fn check_lengths(output: &[f64], target: &[f64]) -> Result<()> {
    if output.len() != target.len() {
        return Err(EngineError::DimensionMismatch {
            context: "loss target",
            expected: output.len(),
            actual: target.len(),
        });
    }
    Ok(())
}

/// Loss of `output` against `target`.
pub fn half_squared_error(output: &[f64], target: &[f64]) -> Result<f64> {
    check_lengths(output, target)?;
    let sum: f64 = output
        .iter()
        .zip(target)
        .map(|(&y, &t)| (y - t) * (y - t))
        .sum();
    Ok(0.5 * sum)
}

/// Gradient of the loss with respect to each output: `y_k - t_k`.
pub fn output_gradient(output: &[f64], target: &[f64]) -> Result<Vec<f64>> {
    check_lengths(output, target)?;
    Ok(output.iter().zip(target).map(|(&y, &t)| y - t).collect())
}
