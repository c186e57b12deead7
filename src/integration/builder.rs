//! Builder for creating DetectionRecord objects from various box formats.

use crate::annotator::DetectionRecord;

/// Builder for creating `DetectionRecord` objects.
///
/// All box setters take normalized coordinates.
#[derive(Debug, Clone, Default)]
pub struct DetectionRecordBuilder {
    class_index: usize,
    confidence: f32,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl DetectionRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_index(mut self, class_index: usize) -> Self {
        self.class_index = class_index;
        self
    }

    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set bounding box in LTRB format (left, top, right, bottom).
    pub fn ltrb(mut self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        self.left = left;
        self.top = top;
        self.right = right;
        self.bottom = bottom;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.left = cx - w / 2.0;
        self.top = cy - h / 2.0;
        self.right = cx + w / 2.0;
        self.bottom = cy + h / 2.0;
        self
    }

    /// Set bounding box in LTWH format (left, top, width, height).
    pub fn ltwh(mut self, left: f32, top: f32, w: f32, h: f32) -> Self {
        self.left = left;
        self.top = top;
        self.right = left + w;
        self.bottom = top + h;
        self
    }

    pub fn build(self) -> DetectionRecord {
        DetectionRecord::new(
            self.class_index,
            self.confidence,
            self.left,
            self.top,
            self.right,
            self.bottom,
        )
    }
}
