//! Burn inference backend for SSD-style detectors.
//!
//! This module provides a `BurnDetector` that implements `DetectionSource`
//! for running detection models built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use burn::backend::NdArray;
//! use ssd_annotate::integration::{BurnDetector, BurnModel};
//!
//! // Implement BurnModel for your detection model
//! struct MobileNetSsd { /* ... */ }
//!
//! impl BurnModel<NdArray> for MobileNetSsd {
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> burn::tensor::Tensor<NdArray, 4> {
//!         // Run inference, return [1, 1, N, 7]
//!     }
//! }
//!
//! let model = MobileNetSsd::load("mobilenet_ssd.bin");
//! let detector = BurnDetector::new(model, Default::default());
//! ```

use burn::prelude::*;
use burn::tensor::TensorData;
use image::RgbImage;
use thiserror::Error;

use super::{DetectionSource, SsdPreprocessor};
use crate::annotator::DetectionRecord;
use crate::error::AnnotateError;

/// Error type for Burn detection failures.
#[derive(Debug, Error)]
pub enum BurnDetectorError {
    #[error("invalid input frame {width}x{height}")]
    InvalidInputDimensions { width: u32, height: u32 },
    /// Model output could not be read back from the device.
    #[error("inference error: {0}")]
    InferenceError(String),
    #[error("postprocessing error: {0}")]
    PostprocessingError(#[from] AnnotateError),
}

/// Trait for Burn-based SSD models.
///
/// Implement this trait for your specific model architecture.
pub trait BurnModel<B: Backend>: Send + Sync {
    /// Run forward pass on the input tensor.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [batch, channels, height, width]
    ///
    /// # Returns
    /// Detection output of shape [1, 1, N, 7], one row per candidate.
    fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4>;

    /// Get the expected input size (height, width).
    fn input_size(&self) -> (u32, u32) {
        (300, 300) // MobileNet-SSD deploy input
    }
}

/// Burn-based object detector implementing `DetectionSource`.
pub struct BurnDetector<B: Backend, M: BurnModel<B>> {
    model: M,
    device: B::Device,
    preprocessor: SsdPreprocessor,
}

impl<B: Backend, M: BurnModel<B>> BurnDetector<B, M> {
    /// Create a new Burn detector with the given model and device.
    pub fn new(model: M, device: B::Device) -> Self {
        let (input_height, input_width) = model.input_size();
        Self {
            model,
            device,
            preprocessor: SsdPreprocessor {
                input_width,
                input_height,
                ..SsdPreprocessor::default()
            },
        }
    }

    /// Replace the preprocessing parameters (mean, scale, channel order).
    pub fn with_preprocessor(mut self, preprocessor: SsdPreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// Preprocess an RGB frame to a Burn tensor.
    pub fn preprocess(&self, frame: &RgbImage) -> Result<Tensor<B, 4>, BurnDetectorError> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(BurnDetectorError::InvalidInputDimensions { width, height });
        }

        let blob = self.preprocessor.blob(frame);
        let shape = blob.shape().to_vec();
        let (data, _) = blob.into_raw_vec_and_offset();
        Ok(Tensor::from_data(TensorData::new(data, shape), &self.device))
    }

    /// Convert raw model output to detection records.
    fn postprocess(&self, output: Tensor<B, 4>) -> Result<Vec<DetectionRecord>, BurnDetectorError> {
        let values = output
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| BurnDetectorError::InferenceError(format!("{e:?}")))?;
        Ok(DetectionRecord::from_ssd_output(&values)?)
    }
}

impl<B: Backend, M: BurnModel<B>> DetectionSource for BurnDetector<B, M> {
    type Error = BurnDetectorError;

    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<DetectionRecord>, Self::Error> {
        let tensor = self.preprocess(frame)?;
        let output = self.model.forward(tensor);
        self.postprocess(output)
    }
}
