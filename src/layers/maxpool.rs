//! 2x2 max pooling with stride 2.

use crate::error::{EngineError, Result};
use crate::layers::{Grid, Layer};

/// Pooling window edge length; windows do not overlap.
pub const POOL: usize = 2;

#[derive(Debug, Clone)]
struct PoolCache {
    input_shape: (usize, usize),
    output_shape: (usize, usize),
    // Row-major over the output; input coordinates of each window's maximum.
    argmax: Vec<(usize, usize)>,
}

/// Max pooling over non-overlapping 2x2 windows.
///
/// Trailing rows or columns that do not fill a whole window are dropped, so the
/// output of an `H × W` input is `(H / 2) × (W / 2)`. No learned parameters.
#[derive(Debug, Clone, Default)]
pub struct MaxPool2D {
    cache: Option<PoolCache>,
}

impl MaxPool2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output shape for an `input_height × input_width` map.
    pub fn output_shape(input_height: usize, input_width: usize) -> (usize, usize) {
        (input_height / POOL, input_width / POOL)
    }

    /// Input coordinates that won each window in the last forward pass.
    pub fn argmax(&self) -> Option<&[(usize, usize)]> {
        self.cache.as_ref().map(|c| c.argmax.as_slice())
    }
}

impl Layer for MaxPool2D {
    type Input = Grid;
    type Output = Grid;
    type InputGrad = Grid;

    fn forward(&mut self, input: &Grid) -> Result<Grid> {
        let (out_h, out_w) = Self::output_shape(input.height(), input.width());
        let mut output = Grid::zeros(out_h, out_w);
        let mut argmax = Vec::with_capacity(out_h * out_w);

        for py in 0..out_h {
            for px in 0..out_w {
                let iy0 = py * POOL;
                let ix0 = px * POOL;

                // Strict comparison keeps the first maximum in row-major order.
                let mut best = input.get(iy0, ix0);
                let mut best_pos = (iy0, ix0);
                for dy in 0..POOL {
                    for dx in 0..POOL {
                        let v = input.get(iy0 + dy, ix0 + dx);
                        if v > best {
                            best = v;
                            best_pos = (iy0 + dy, ix0 + dx);
                        }
                    }
                }

                output.set(py, px, best);
                argmax.push(best_pos);
            }
        }

        self.cache = Some(PoolCache {
            input_shape: input.shape(),
            output_shape: (out_h, out_w),
            argmax,
        });
        Ok(output)
    }

    /// Scatter each pooled gradient onto the input cell that won its window.
    fn backward(&mut self, grad_output: &Grid, _learning_rate: f64) -> Result<Grid> {
        let expected = match &self.cache {
            Some(cache) => cache.output_shape,
            None => return Err(EngineError::backward_before_forward("maxpool2d")),
        };
        if grad_output.shape() != expected {
            return Err(EngineError::ShapeMismatch {
                context: "maxpool2d output gradient",
                expected,
                actual: grad_output.shape(),
            });
        }
        let Some(cache) = self.cache.take() else {
            return Err(EngineError::backward_before_forward("maxpool2d"));
        };

        let (in_h, in_w) = cache.input_shape;
        let mut grad_input = Grid::zeros(in_h, in_w);
        for (&(row, col), &g) in cache.argmax.iter().zip(grad_output.as_slice()) {
            grad_input.add_at(row, col, g);
        }
        Ok(grad_input)
    }

    fn parameter_count(&self) -> usize {
        0
    }

    fn is_ready(&self) -> bool {
        self.cache.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_picks_window_max() {
        // Rows [1 5 | 2 0] and [3 4 | 7 6].
        let data = vec![1.0, 5.0, 2.0, 0.0, 3.0, 4.0, 7.0, 6.0];
        let input = Grid::from_vec(2, 4, data).unwrap();
        let mut pool = MaxPool2D::new();
        let out = pool.forward(&input).unwrap();

        assert_eq!(out.as_slice(), &[5.0, 7.0]);
        assert_eq!(pool.argmax().unwrap(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn test_odd_dimensions_truncate() {
        let mut pool = MaxPool2D::new();
        let out = pool.forward(&Grid::zeros(5, 7)).unwrap();
        assert_eq!(out.shape(), (2, 3));

        let grad = pool.backward(&Grid::zeros(2, 3), 0.0).unwrap();
        assert_eq!(grad.shape(), (5, 7));
    }

    #[test]
    fn test_tie_keeps_first_in_scan_order() {
        let mut pool = MaxPool2D::new();
        let input = Grid::from_vec(2, 2, vec![1.0, 3.0, 3.0, 3.0]).unwrap();
        pool.forward(&input).unwrap();
        assert_eq!(pool.argmax().unwrap(), &[(0, 1)]);
    }

    #[test]
    fn test_backward_state_and_shape_errors() {
        let mut pool = MaxPool2D::new();
        assert!(matches!(
            pool.backward(&Grid::zeros(1, 1), 0.0),
            Err(EngineError::BackwardBeforeForward { .. })
        ));

        pool.forward(&Grid::zeros(4, 4)).unwrap();
        assert!(matches!(
            pool.backward(&Grid::zeros(4, 4), 0.0),
            Err(EngineError::ShapeMismatch { .. })
        ));
    }
}
