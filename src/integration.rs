//! Integration module for connecting object detection backends with the annotator.
//!
//! This module provides traits and utilities for feeding inference
//! backends (Burn, ONNX Runtime, etc.) into the frame annotator.

mod builder;
mod detector;
mod pipeline;
mod preprocess;

pub use builder::DetectionRecordBuilder;
pub use detector::{DetectionSource, IntoDetectionRecords, StaticDetections};
pub use pipeline::{AnnotationPipeline, PipelineError};
pub use preprocess::SsdPreprocessor;

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnDetector, BurnDetectorError, BurnModel};
