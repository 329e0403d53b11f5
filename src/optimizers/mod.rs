//! Optimizer abstractions for parameter updates
//!
//! Every learned component computes its gradients in `backward` and hands them,
//! together with its parameter storage, to an [`Optimizer`]. The engine trains one
//! sample at a time, so the only optimizer needed is vanilla gradient descent.
//!
//! # Example
//!
//! ```
//! use backprop_lab::optimizers::{Optimizer, Sgd};
//!
//! let sgd = Sgd::new(0.5);
//! let mut weights = vec![1.0, -1.0];
//! sgd.step(&mut weights, &[0.2, 0.4]).unwrap();
//! assert!((weights[0] - 0.9).abs() < 1e-12);
//! ```

pub mod sgd;

pub use sgd::Sgd;

use crate::error::Result;

/// Core trait for parameter update rules.
pub trait Optimizer {
    /// Update `parameters` in place from `gradients` of the same length.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the two slices differ in length; no parameter
    /// is touched in that case.
    fn step(&self, parameters: &mut [f64], gradients: &[f64]) -> Result<()>;
}
