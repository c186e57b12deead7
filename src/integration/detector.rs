//! Trait for object detection inference backends.

use image::RgbImage;

use crate::annotator::DetectionRecord;

/// Trait for object detection inference backends.
///
/// Implement this trait to feed any detection model into an
/// [`AnnotationPipeline`](super::AnnotationPipeline).
///
/// # Example
///
/// ```ignore
/// use image::RgbImage;
/// use ssd_annotate::{DetectionRecord, DetectionSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &RgbImage) -> Result<Vec<DetectionRecord>, Self::Error> {
///         // Run inference and return one record per output row
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on one RGB frame.
    ///
    /// Implementations return every candidate unfiltered; thresholding is
    /// left to the annotator.
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<DetectionRecord>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `DetectionRecord`s.
pub trait IntoDetectionRecords {
    fn into_detection_records(self) -> Vec<DetectionRecord>;
}

impl IntoDetectionRecords for Vec<DetectionRecord> {
    fn into_detection_records(self) -> Vec<DetectionRecord> {
        self
    }
}

/// A source that replays a fixed set of detections for every frame.
///
/// Useful for overlaying detections computed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct StaticDetections {
    detections: Vec<DetectionRecord>,
}

impl StaticDetections {
    pub fn new(detections: impl IntoDetectionRecords) -> Self {
        Self {
            detections: detections.into_detection_records(),
        }
    }
}

impl DetectionSource for StaticDetections {
    type Error = std::convert::Infallible;

    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<DetectionRecord>, Self::Error> {
        Ok(self.detections.clone())
    }
}
