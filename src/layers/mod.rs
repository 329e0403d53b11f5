//! Layer abstractions for neural networks
//!
//! This module provides the Layer trait and the trainable stages of both
//! topologies: units and dense layers for the MLP, and the convolution, pooling
//! and output head for the convolutional pipeline.

pub mod conv2d;
pub mod dense;
pub mod grid;
pub mod head;
pub mod maxpool;
mod r#trait;
pub mod unit;

pub use conv2d::Conv2D;
pub use dense::DenseLayer;
pub use grid::Grid;
pub use head::FullyConnectedHead;
pub use maxpool::MaxPool2D;
pub use r#trait::Layer;
pub use unit::Unit;
