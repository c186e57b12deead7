//! Draw SSD object-detection results onto RGB frames.
//!
//! An upstream producer (camera plus inference engine) hands over one frame
//! and the raw detections for it. The [`Annotator`] drops detections at or
//! below the confidence threshold, maps the rest from normalized to pixel
//! coordinates and draws a box, a label background and a
//! `"<class>: <confidence>"` label for each, in input order.
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use ssd_annotate::{Annotator, DetectionRecord};
//!
//! let mut frame = RgbImage::from_pixel(300, 300, Rgb([0, 0, 0]));
//! let detections = [DetectionRecord::new(15, 0.9, 0.33, 0.33, 0.66, 0.66)];
//!
//! let regions = Annotator::default().annotate(&mut frame, &detections).unwrap();
//! assert_eq!(regions[0].label, "person: 0.9");
//! ```

pub mod annotator;
pub mod config;
pub mod error;
pub mod integration;

pub use annotator::{
    AnnotatedRegion, Annotator, AnnotatorConfig, ClassLabels, DetectionRecord, FontStyle,
    InvalidClassPolicy, PixelRect, annotate,
};
pub use config::load_config;
pub use error::{AnnotateError, Result};
pub use integration::{AnnotationPipeline, DetectionRecordBuilder, DetectionSource};
