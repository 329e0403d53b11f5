//! Error types shared by every component of the engine.

use crate::models::ModelKind;
use thiserror::Error;

/// Errors raised by layers, networks and model selection.
///
/// Every failure is surfaced to the caller unchanged; nothing in the engine retries
/// or degrades.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{context}: expected length {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(
        "{context}: expected shape {}x{}, got {}x{}",
        .expected.0, .expected.1, .actual.0, .actual.1
    )]
    ShapeMismatch {
        context: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("{component}: backward called without a preceding forward")]
    BackwardBeforeForward { component: &'static str },

    #[error("Invalid construction: {0}")]
    InvalidConstruction(String),

    #[error("Model kind '{0}' is not implemented")]
    NotImplemented(ModelKind),

    #[error("Unknown topology: {0}")]
    UnknownTopology(String),
}

impl EngineError {
    /// Sequencing error for `component`.
    pub fn backward_before_forward(component: &'static str) -> Self {
        EngineError::BackwardBeforeForward { component }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
