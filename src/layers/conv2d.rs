//! 2D Convolutional layer implementation
//!
//! This module provides a Conv2D layer with a single input channel and a single
//! filter, sliding a `kH × kW` kernel over the image in "valid" mode with stride 1
//! and no padding.

use crate::error::{EngineError, Result};
use crate::layers::{Grid, Layer};
use crate::optimizers::{Optimizer, Sgd};
use crate::utils::{Activation, Initializer};

#[derive(Debug, Clone)]
struct ConvCache {
    input: Grid,
    pre_activation: Grid,
    output: Grid,
}

/// Single-filter 2D convolution followed by an activation.
///
/// For an `H × W` input the output is `(H - kH + 1) × (W - kW + 1)`:
///
/// `Z[i,j] = Σ_{u,v} X[i+u, j+v] · K[u,v] + b`, `Y = φ(Z)`
///
/// # Example
///
/// ```
/// use backprop_lab::layers::{Conv2D, Grid, Layer};
/// use backprop_lab::utils::{Activation, Initializer};
///
/// let mut init = Initializer::seeded(42);
/// let mut conv = Conv2D::new(3, 3, Activation::Relu, &mut init).unwrap();
/// let output = conv.forward(&Grid::zeros(8, 8)).unwrap();
/// assert_eq!(output.shape(), (6, 6));
/// ```
#[derive(Debug, Clone)]
pub struct Conv2D {
    kernel: Grid,
    bias: f64,
    activation: Activation,
    cache: Option<ConvCache>,
}

impl Conv2D {
    /// Create a `kernel_height × kernel_width` filter, kernel drawn from `init` in
    /// row-major order.
    pub fn new(
        kernel_height: usize,
        kernel_width: usize,
        activation: Activation,
        init: &mut Initializer,
    ) -> Result<Self> {
        let weights = init.weights(kernel_height * kernel_width);
        let bias = init.bias();
        let kernel = Grid::from_vec(kernel_height, kernel_width, weights)?;
        Self::from_kernel(kernel, bias, activation)
    }

    /// Create a layer from an explicit kernel.
    ///
    /// # Errors
    ///
    /// `InvalidConstruction` if either kernel dimension is zero.
    pub fn from_kernel(kernel: Grid, bias: f64, activation: Activation) -> Result<Self> {
        if kernel.height() == 0 || kernel.width() == 0 {
            return Err(EngineError::InvalidConstruction(format!(
                "kernel dimensions must be positive, got {}x{}",
                kernel.height(),
                kernel.width()
            )));
        }
        Ok(Self {
            kernel,
            bias,
            activation,
            cache: None,
        })
    }

    pub fn kernel(&self) -> &Grid {
        &self.kernel
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Output shape for an `input_height × input_width` image.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the image is smaller than the kernel in either direction.
    pub fn output_shape(&self, input_height: usize, input_width: usize) -> Result<(usize, usize)> {
        let (kh, kw) = self.kernel.shape();
        if input_height < kh || input_width < kw {
            return Err(EngineError::ShapeMismatch {
                context: "conv2d input smaller than kernel",
                expected: (kh, kw),
                actual: (input_height, input_width),
            });
        }
        Ok((input_height - kh + 1, input_width - kw + 1))
    }
}

impl Layer for Conv2D {
    type Input = Grid;
    type Output = Grid;
    type InputGrad = Grid;

    fn forward(&mut self, input: &Grid) -> Result<Grid> {
        let (out_h, out_w) = self.output_shape(input.height(), input.width())?;
        let (kh, kw) = self.kernel.shape();

        let mut pre_activation = Grid::zeros(out_h, out_w);
        for i in 0..out_h {
            for j in 0..out_w {
                let mut sum = self.bias;
                for u in 0..kh {
                    for v in 0..kw {
                        sum += input.get(i + u, j + v) * self.kernel.get(u, v);
                    }
                }
                pre_activation.set(i, j, sum);
            }
        }

        let activation = self.activation;
        let output = pre_activation.map(|z| activation.value(z));
        self.cache = Some(ConvCache {
            input: input.clone(),
            pre_activation,
            output: output.clone(),
        });
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Grid, learning_rate: f64) -> Result<Grid> {
        let cache_shape = match &self.cache {
            Some(cache) => cache.output.shape(),
            None => return Err(EngineError::backward_before_forward("conv2d")),
        };
        if grad_output.shape() != cache_shape {
            return Err(EngineError::ShapeMismatch {
                context: "conv2d output gradient",
                expected: cache_shape,
                actual: grad_output.shape(),
            });
        }
        let Some(cache) = self.cache.take() else {
            return Err(EngineError::backward_before_forward("conv2d"));
        };

        let (out_h, out_w) = cache_shape;
        let (kh, kw) = self.kernel.shape();

        // dL/dZ = dL/dY · φ'(Z)
        let mut grad_pre = Grid::zeros(out_h, out_w);
        for i in 0..out_h {
            for j in 0..out_w {
                let z = cache.pre_activation.get(i, j);
                let y = cache.output.get(i, j);
                let d = grad_output.get(i, j) * self.activation.derivative_from_output(z, y);
                grad_pre.set(i, j, d);
            }
        }

        // Kernel gradient correlates the input with dL/dZ; every input pixel routes
        // its gradient back through each tap that touched it, using the pre-update
        // kernel.
        let mut grad_kernel = Grid::zeros(kh, kw);
        let mut grad_input = Grid::zeros(cache.input.height(), cache.input.width());
        let mut grad_bias = 0.0;
        for i in 0..out_h {
            for j in 0..out_w {
                let d = grad_pre.get(i, j);
                grad_bias += d;
                for u in 0..kh {
                    for v in 0..kw {
                        grad_kernel.add_at(u, v, cache.input.get(i + u, j + v) * d);
                        grad_input.add_at(i + u, j + v, d * self.kernel.get(u, v));
                    }
                }
            }
        }

        let sgd = Sgd::new(learning_rate);
        sgd.step(self.kernel.as_mut_slice(), grad_kernel.as_slice())?;
        sgd.step_scalar(&mut self.bias, grad_bias);

        Ok(grad_input)
    }

    fn parameter_count(&self) -> usize {
        self.kernel.len() + 1
    }

    fn is_ready(&self) -> bool {
        self.cache.is_some()
    }
}
