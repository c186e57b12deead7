//! AnnotationPipeline for combining detection with annotation.

use image::RgbImage;
use thiserror::Error;

use crate::annotator::{AnnotatedRegion, Annotator, AnnotatorConfig};
use crate::error::AnnotateError;

use super::DetectionSource;

/// Failure of one pipeline step.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error("detection failed: {0}")]
    Detect(E),
    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

/// Bundles a `DetectionSource` with an `Annotator`.
///
/// One call to [`process_frame`](Self::process_frame) per camera frame:
/// detect, then draw onto the same frame.
pub struct AnnotationPipeline<D: DetectionSource> {
    detector: D,
    annotator: Annotator,
}

impl<D: DetectionSource> AnnotationPipeline<D> {
    pub fn new(detector: D, config: AnnotatorConfig) -> Self {
        Self::with_annotator(detector, Annotator::new(config))
    }

    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, AnnotatorConfig::default())
    }

    pub fn with_annotator(detector: D, annotator: Annotator) -> Self {
        Self {
            detector,
            annotator,
        }
    }

    /// Detect objects in `frame` and draw them onto it.
    pub fn process_frame(
        &mut self,
        frame: &mut RgbImage,
    ) -> Result<Vec<AnnotatedRegion>, PipelineError<D::Error>> {
        let detections = self
            .detector
            .detect(frame)
            .map_err(PipelineError::Detect)?;
        Ok(self.annotator.annotate(frame, &detections)?)
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }
}
