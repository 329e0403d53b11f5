//! Convolutional pipeline: conv -> 2x2 max pool -> fully connected head.

use crate::config::CnnConfig;
use crate::error::{EngineError, Result};
use crate::layers::{Conv2D, FullyConnectedHead, Grid, Layer, MaxPool2D};
use crate::models::Trainable;
use crate::utils::loss::half_squared_error;
use crate::utils::Initializer;

/// Fixed three-stage CNN over a single-channel `H × W` image.
///
/// The flat input is reshaped row-major into the image, and the pooled map is
/// flattened row-major before the head. The model has a single scalar output.
#[derive(Debug, Clone)]
pub struct CnnPipeline {
    image_height: usize,
    image_width: usize,
    pooled_shape: (usize, usize),
    conv: Conv2D,
    pool: MaxPool2D,
    head: FullyConnectedHead,
}

impl CnnPipeline {
    /// Build the pipeline described by `config`, drawing the kernel first and the
    /// head weights second from `init`.
    pub fn new(config: &CnnConfig, init: &mut Initializer) -> Result<Self> {
        let conv = Conv2D::new(
            config.kernel_height,
            config.kernel_width,
            config.conv_activation,
            init,
        )?;
        let (pool_h, pool_w) = pooled_shape_for(&conv, config.image_height, config.image_width)?;
        let head = FullyConnectedHead::new(pool_h * pool_w, config.head_activation, init)?;
        Self::from_stages(config.image_height, config.image_width, conv, head)
    }

    /// Assemble the pipeline from prebuilt stages.
    ///
    /// # Errors
    ///
    /// `InvalidConstruction` if the image is smaller than the kernel, the pooled map
    /// is empty, or the head's input size differs from the pooled map size.
    pub fn from_stages(
        image_height: usize,
        image_width: usize,
        conv: Conv2D,
        head: FullyConnectedHead,
    ) -> Result<Self> {
        let pooled_shape = pooled_shape_for(&conv, image_height, image_width)?;
        let pooled_len = pooled_shape.0 * pooled_shape.1;
        if head.input_size() != pooled_len {
            return Err(EngineError::InvalidConstruction(format!(
                "head expects {} inputs but pooled map has {}",
                head.input_size(),
                pooled_len
            )));
        }

        Ok(Self {
            image_height,
            image_width,
            pooled_shape,
            conv,
            pool: MaxPool2D::new(),
            head,
        })
    }

    pub fn input_size(&self) -> usize {
        self.image_height * self.image_width
    }

    pub fn pooled_shape(&self) -> (usize, usize) {
        self.pooled_shape
    }

    pub fn conv(&self) -> &Conv2D {
        &self.conv
    }

    pub fn head(&self) -> &FullyConnectedHead {
        &self.head
    }

    pub fn parameter_count(&self) -> usize {
        self.conv.parameter_count() + self.pool.parameter_count() + self.head.parameter_count()
    }

    fn reshape_input(&self, input: &[f64]) -> Result<Grid> {
        if input.len() != self.input_size() {
            return Err(EngineError::DimensionMismatch {
                context: "cnn input",
                expected: self.input_size(),
                actual: input.len(),
            });
        }
        Grid::from_vec(self.image_height, self.image_width, input.to_vec())
    }
}

/// Shape of the pooled map that `conv` followed by 2x2 pooling produces from an
/// `image_height × image_width` image. Fails if that map would be empty.
fn pooled_shape_for(
    conv: &Conv2D,
    image_height: usize,
    image_width: usize,
) -> Result<(usize, usize)> {
    let (conv_h, conv_w) = conv
        .output_shape(image_height, image_width)
        .map_err(|err| EngineError::InvalidConstruction(err.to_string()))?;
    let pooled = MaxPool2D::output_shape(conv_h, conv_w);
    if pooled.0 == 0 || pooled.1 == 0 {
        return Err(EngineError::InvalidConstruction(format!(
            "pooled map of {}x{} convolution output is empty",
            conv_h, conv_w
        )));
    }
    Ok(pooled)
}

impl Trainable for CnnPipeline {
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let image = self.reshape_input(input)?;
        let features = self.conv.forward(&image)?;
        let pooled = self.pool.forward(&features)?;
        let output = self.head.forward(&pooled.into_vec())?;
        Ok(vec![output])
    }

    /// Recomputes the forward pass, then runs head -> unflatten -> pool -> conv
    /// backward. The image gradient from the convolution has no consumer.
    fn train(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()> {
        if target.len() != 1 {
            return Err(EngineError::DimensionMismatch {
                context: "cnn target",
                expected: 1,
                actual: target.len(),
            });
        }

        let output = self.predict(input)?;
        let grad_output = output[0] - target[0];

        let grad_flat = self.head.backward(&grad_output, learning_rate)?;
        let (pool_h, pool_w) = self.pooled_shape;
        let grad_pooled = Grid::from_vec(pool_h, pool_w, grad_flat)?;
        let grad_features = self.pool.backward(&grad_pooled, learning_rate)?;
        self.conv.backward(&grad_features, learning_rate)?;
        Ok(())
    }

    fn loss(&self, output: &[f64], target: &[f64]) -> Result<f64> {
        half_squared_error(output, target)
    }
}
