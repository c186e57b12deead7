//! Per-frame detection-to-annotation pass.

use std::sync::Arc;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use log::{debug, trace, warn};
use serde::Deserialize;

use crate::annotator::detection::DetectionRecord;
use crate::annotator::labels::ClassLabels;
use crate::annotator::rect::PixelRect;
use crate::annotator::text::{BitmapFont, FontStyle, TextRenderer};
use crate::error::{AnnotateError, Result};

/// What to do with a detection whose class index has no label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidClassPolicy {
    /// Stop and return `InvalidClassIndex`; earlier detections stay drawn.
    #[default]
    Abort,
    /// Log a warning and move on to the next detection.
    Skip,
}

/// Configuration for the [`Annotator`].
#[derive(Debug, Clone)]
pub struct AnnotatorConfig {
    pub class_labels: ClassLabels,
    /// Detections with `confidence <= confidence_threshold` are not drawn.
    pub confidence_threshold: f32,
    pub box_color: Rgb<u8>,
    pub label_background: Rgb<u8>,
    pub label_foreground: Rgb<u8>,
    pub font: FontStyle,
    /// Fixed decimals for the confidence in labels; `None` prints the
    /// shortest representation that round-trips.
    pub label_precision: Option<usize>,
    pub on_invalid_class: InvalidClassPolicy,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            class_labels: ClassLabels::pascal_voc(),
            confidence_threshold: 0.2,
            box_color: Rgb([0, 255, 0]),
            label_background: Rgb([255, 255, 255]),
            label_foreground: Rgb([0, 0, 0]),
            font: FontStyle::default(),
            label_precision: None,
            on_invalid_class: InvalidClassPolicy::Abort,
        }
    }
}

/// A detection that passed the threshold, resolved to pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRegion {
    pub rect: PixelRect,
    /// Full label text, e.g. `"cat: 0.83"`
    pub label: String,
    pub confidence: f32,
}

/// Draws boxes and labels for detections onto frames.
///
/// Holds no per-frame state; one annotator can serve any number of frames,
/// including from several threads at once.
pub struct Annotator {
    config: AnnotatorConfig,
    text: Arc<dyn TextRenderer>,
}

impl Annotator {
    pub fn new(config: AnnotatorConfig) -> Self {
        Self::with_renderer(config, Arc::new(BitmapFont))
    }

    pub fn with_default_config() -> Self {
        Self::new(AnnotatorConfig::default())
    }

    /// Create an annotator that draws label text with a custom renderer.
    pub fn with_renderer(config: AnnotatorConfig, text: Arc<dyn TextRenderer>) -> Self {
        Self { config, text }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Format the label for a class name and confidence.
    pub fn format_label(&self, name: &str, confidence: f32) -> String {
        match self.config.label_precision {
            Some(precision) => format!("{name}: {confidence:.precision$}"),
            None => format!("{name}: {confidence}"),
        }
    }

    /// Resolve one detection against a `width` x `height` frame.
    ///
    /// Returns `Ok(None)` when the detection is at or below the threshold.
    pub fn region_for(
        &self,
        record: &DetectionRecord,
        width: u32,
        height: u32,
    ) -> Result<Option<AnnotatedRegion>> {
        if record.confidence <= self.config.confidence_threshold {
            return Ok(None);
        }
        let name = self.config.class_labels.resolve(record.class_index)?;
        Ok(Some(AnnotatedRegion {
            rect: PixelRect::from_normalized(record.bbox(), width, height),
            label: self.format_label(name, record.confidence),
            confidence: record.confidence,
        }))
    }

    /// Draw every detection above the threshold onto `frame`, in input order.
    ///
    /// Returns the regions that were drawn. On `InvalidClassIndex` (with the
    /// default [`InvalidClassPolicy::Abort`]) the detections before the
    /// offending one remain drawn and nothing is drawn for it.
    pub fn annotate(
        &self,
        frame: &mut RgbImage,
        detections: &[DetectionRecord],
    ) -> Result<Vec<AnnotatedRegion>> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(AnnotateError::InvalidFrame { width, height });
        }

        let mut regions = Vec::new();
        for (i, record) in detections.iter().enumerate() {
            let region = match self.region_for(record, width, height) {
                Ok(Some(region)) => region,
                Ok(None) => {
                    trace!(
                        "detection {i} below threshold ({} <= {})",
                        record.confidence, self.config.confidence_threshold
                    );
                    continue;
                }
                Err(err @ AnnotateError::InvalidClassIndex { .. })
                    if self.config.on_invalid_class == InvalidClassPolicy::Skip =>
                {
                    warn!("skipping detection {i}: {err}");
                    continue;
                }
                Err(err) => return Err(err),
            };
            self.draw_region(frame, &region);
            regions.push(region);
        }

        debug!(
            "annotated {} of {} detections on {width}x{height} frame",
            regions.len(),
            detections.len()
        );
        Ok(regions)
    }

    /// Draw a single resolved region: box outline, label background, label text.
    pub fn draw_region(&self, frame: &mut RgbImage, region: &AnnotatedRegion) {
        let (width, height) = frame.dimensions();
        let PixelRect { left, top, .. } = region.rect;

        if let Some(rect) = region.rect.clipped(width, height).to_imageproc() {
            draw_hollow_rect_mut(frame, rect, self.config.box_color);
        }

        let size = self.text.text_size(&region.label, self.config.font);
        if size.width > 0 {
            let extent = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
            let background = PixelRect::new(
                left,
                top.saturating_sub(extent(size.height)),
                left.saturating_add(extent(size.width)),
                top.saturating_add(extent(size.baseline)),
            );
            if let Some(rect) = background.clipped(width, height).to_imageproc() {
                draw_filled_rect_mut(frame, rect, self.config.label_background);
            }
        }

        self.text.draw_text(
            frame,
            &region.label,
            (left, top),
            self.config.font,
            self.config.label_foreground,
        );
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Annotate an owned frame with a label table and threshold, returning it.
///
/// Uses the reference colors and font for everything else.
pub fn annotate(
    mut frame: RgbImage,
    detections: &[DetectionRecord],
    class_labels: &ClassLabels,
    confidence_threshold: f32,
) -> Result<RgbImage> {
    let annotator = Annotator::new(AnnotatorConfig {
        class_labels: class_labels.clone(),
        confidence_threshold,
        ..AnnotatorConfig::default()
    });
    annotator.annotate(&mut frame, detections)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const GREY: Rgb<u8> = Rgb([128, 128, 128]);

    fn grey_frame(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, GREY)
    }

    #[test]
    fn test_label_formatting() {
        let annotator = Annotator::default();
        assert_eq!(annotator.format_label("cat", 0.83), "cat: 0.83");
        assert_eq!(annotator.format_label("person", 0.9), "person: 0.9");

        let fixed = Annotator::new(AnnotatorConfig {
            label_precision: Some(2),
            ..AnnotatorConfig::default()
        });
        assert_eq!(fixed.format_label("person", 0.9), "person: 0.90");
    }

    #[test]
    fn test_region_for() {
        let annotator = Annotator::default();
        let record = DetectionRecord::new(8, 0.83, 0.1, 0.2, 0.5, 0.6);
        let region = annotator.region_for(&record, 640, 480).unwrap().unwrap();

        assert_eq!(region.rect, PixelRect::new(64, 96, 320, 288));
        assert_eq!(region.label, "cat: 0.83");
        assert_eq!(region.confidence, 0.83);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let annotator = Annotator::default();
        let at = DetectionRecord::new(15, 0.2, 0.1, 0.1, 0.2, 0.2);
        let above = DetectionRecord::new(15, 0.21, 0.1, 0.1, 0.2, 0.2);

        assert!(annotator.region_for(&at, 100, 100).unwrap().is_none());
        assert!(annotator.region_for(&above, 100, 100).unwrap().is_some());
    }

    #[test]
    fn test_low_confidence_ignores_class_index() {
        // Below-threshold detections are dropped before the label lookup.
        let annotator = Annotator::default();
        let record = DetectionRecord::new(99, 0.1, 0.1, 0.1, 0.2, 0.2);
        assert!(annotator.region_for(&record, 100, 100).unwrap().is_none());
    }

    #[test]
    fn test_invalid_frame() {
        let annotator = Annotator::default();
        let mut frame = RgbImage::new(0, 10);
        let err = annotator.annotate(&mut frame, &[]).unwrap_err();
        assert!(matches!(
            err,
            AnnotateError::InvalidFrame {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn test_draw_region_layout() {
        let annotator = Annotator::default();
        let mut frame = grey_frame(300, 300);
        let region = AnnotatedRegion {
            rect: PixelRect::new(99, 99, 198, 198),
            label: "person: 0.9".to_string(),
            confidence: 0.9,
        };
        annotator.draw_region(&mut frame, &region);

        // Box outline: right and bottom edges, untouched by the label.
        assert_eq!(frame.get_pixel(198, 150), &GREEN);
        assert_eq!(frame.get_pixel(99, 150), &GREEN);
        assert_eq!(frame.get_pixel(150, 198), &GREEN);
        assert_eq!(frame.get_pixel(198, 99), &GREEN);
        // Inside the box is untouched.
        assert_eq!(frame.get_pixel(150, 150), &GREY);

        // Label background spans x 99..=187, y 92..=100.
        assert_eq!(frame.get_pixel(187, 92), &WHITE);
        assert_eq!(frame.get_pixel(187, 100), &WHITE);
        assert_eq!(frame.get_pixel(188, 92), &GREY);
        assert_eq!(frame.get_pixel(99, 91), &GREY);

        let black = (99..=187)
            .flat_map(|x| (92..=100).map(move |y| (x, y)))
            .filter(|&(x, y)| frame.get_pixel(x, y) == &BLACK)
            .count();
        assert!(black > 0);
    }

    #[test]
    fn test_degenerate_box_draws_label_only() {
        let annotator = Annotator::default();
        let mut frame = grey_frame(100, 100);
        let record = DetectionRecord::new(8, 0.5, 0.6, 0.5, 0.4, 0.7);
        let regions = annotator.annotate(&mut frame, &[record]).unwrap();

        assert_eq!(regions.len(), 1);
        assert!(regions[0].rect.is_degenerate());
        assert!(frame.pixels().all(|p| *p != GREEN));
        assert!(frame.pixels().any(|p| *p == WHITE));
    }

    #[test]
    fn test_saturated_box_does_not_overflow() {
        let annotator = Annotator::default();
        let mut frame = grey_frame(120, 120);
        let detections = [
            DetectionRecord::new(15, 0.9, f32::NEG_INFINITY, f32::NEG_INFINITY, 0.5, 0.5),
            DetectionRecord::new(15, 0.9, 0.5, 0.5, f32::INFINITY, f32::INFINITY),
        ];
        let regions = annotator.annotate(&mut frame, &detections).unwrap();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].rect.top, i32::MIN);
        // Visible edges of the first box are still drawn.
        assert_eq!(frame.get_pixel(60, 30), &GREEN);
        assert_eq!(frame.get_pixel(30, 60), &GREEN);
        // The second box runs off the bottom-right corner; its left edge
        // below the label is visible.
        assert_eq!(frame.get_pixel(60, 100), &GREEN);
        assert_eq!(frame.get_pixel(60, 119), &GREEN);
    }

    #[test]
    fn test_oversized_font_does_not_panic() {
        let annotator = Annotator::new(AnnotatorConfig {
            font: FontStyle {
                scale: 1e9,
                thickness: 1,
            },
            ..AnnotatorConfig::default()
        });
        let mut frame = grey_frame(64, 64);
        let detections = [DetectionRecord::new(8, 0.9, 0.25, 0.5, 0.75, 0.9)];
        assert_eq!(annotator.annotate(&mut frame, &detections).unwrap().len(), 1);
    }

    #[test]
    fn test_skip_policy() {
        let annotator = Annotator::new(AnnotatorConfig {
            on_invalid_class: InvalidClassPolicy::Skip,
            ..AnnotatorConfig::default()
        });
        let mut frame = grey_frame(200, 200);
        let detections = [
            DetectionRecord::new(42, 0.9, 0.1, 0.1, 0.3, 0.3),
            DetectionRecord::new(12, 0.9, 0.5, 0.5, 0.9, 0.9),
        ];
        let regions = annotator.annotate(&mut frame, &detections).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].label, "dog: 0.9");
    }
}
