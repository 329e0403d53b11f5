//! Row-major 2-D storage for images, kernels and feature maps.

use crate::error::{EngineError, Result};

/// A `height × width` matrix of `f64` stored row-major in a flat `Vec`.
///
/// Element `(row, col)` lives at `row * width + col`, the same layout the flat CNN
/// input uses, so reshaping and flattening never reorder data.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Zero-filled grid.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            data: vec![0.0; height * width],
        }
    }

    /// Wrap row-major `data` as a `height × width` grid.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `data.len() != height * width`.
    pub fn from_vec(height: usize, width: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != height * width {
            return Err(EngineError::DimensionMismatch {
                context: "grid data",
                expected: height * width,
                actual: data.len(),
            });
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(row, col)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    #[inline]
    pub fn add_at(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] += value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Flatten in row-major order.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            height: self.height,
            width: self.width,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}
