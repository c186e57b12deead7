//! Detection records as produced by an SSD-style network.

use ndarray::{ArrayView2, Axis};
use serde::Deserialize;

use crate::error::{AnnotateError, Result};

/// Number of values per row in SSD `DetectionOutput`:
/// `[image_id, class_id, confidence, left, top, right, bottom]`.
pub const SSD_ROW_LEN: usize = 7;

/// One raw detection, before confidence filtering.
///
/// The box is normalized: each coordinate is a fraction of the frame
/// width (`left`, `right`) or height (`top`, `bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DetectionRecord {
    /// Index into the class label table
    pub class_index: usize,
    /// Detection confidence score
    pub confidence: f32,
    /// Normalized left edge
    pub left: f32,
    /// Normalized top edge
    pub top: f32,
    /// Normalized right edge
    pub right: f32,
    /// Normalized bottom edge
    pub bottom: f32,
}

impl DetectionRecord {
    pub fn new(
        class_index: usize,
        confidence: f32,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    ) -> Self {
        Self {
            class_index,
            confidence,
            left,
            top,
            right,
            bottom,
        }
    }

    /// Normalized box in LTRB order.
    #[inline]
    pub fn bbox(&self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    /// Decode a flat SSD output buffer (shape `[1, 1, N, 7]` flattened).
    ///
    /// Every row becomes one record; no thresholding is applied here.
    pub fn from_ssd_output(values: &[f32]) -> Result<Vec<Self>> {
        if values.len() % SSD_ROW_LEN != 0 {
            return Err(AnnotateError::InvalidOutputShape {
                len: values.len(),
                row_len: SSD_ROW_LEN,
            });
        }
        let rows = ArrayView2::from_shape((values.len() / SSD_ROW_LEN, SSD_ROW_LEN), values)
            .map_err(|_| AnnotateError::InvalidOutputShape {
                len: values.len(),
                row_len: SSD_ROW_LEN,
            })?;
        Self::from_ssd_rows(rows)
    }

    /// Decode SSD output that has already been reshaped to `(N, 7)`.
    pub fn from_ssd_rows(rows: ArrayView2<'_, f32>) -> Result<Vec<Self>> {
        if rows.ncols() != SSD_ROW_LEN {
            return Err(AnnotateError::InvalidOutputShape {
                len: rows.len(),
                row_len: SSD_ROW_LEN,
            });
        }

        rows.axis_iter(Axis(0))
            .enumerate()
            .map(|(i, row)| {
                let class_value = row[1];
                if !class_value.is_finite() || class_value < 0.0 {
                    return Err(AnnotateError::MalformedRow {
                        row: i,
                        reason: format!("class id {class_value} is not a non-negative integer"),
                    });
                }
                Ok(Self::new(
                    class_value as usize,
                    row[2],
                    row[3],
                    row[4],
                    row[5],
                    row[6],
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_from_ssd_output() {
        let raw = [
            0.0, 15.0, 0.9, 0.33, 0.33, 0.66, 0.66, //
            0.0, 7.0, 0.1, 0.0, 0.0, 0.5, 0.5,
        ];
        let records = DetectionRecord::from_ssd_output(&raw).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].class_index, 15);
        assert_eq!(records[0].confidence, 0.9);
        assert_eq!(records[0].bbox(), [0.33, 0.33, 0.66, 0.66]);
        // Low-confidence rows are kept; filtering belongs to the annotator.
        assert_eq!(records[1].class_index, 7);
        assert_eq!(records[1].confidence, 0.1);
    }

    #[test]
    fn test_from_ssd_output_empty() {
        assert!(DetectionRecord::from_ssd_output(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_from_ssd_output_bad_length() {
        let err = DetectionRecord::from_ssd_output(&[0.0; 10]).unwrap_err();
        assert!(matches!(
            err,
            AnnotateError::InvalidOutputShape { len: 10, row_len: 7 }
        ));
    }

    #[test]
    fn test_from_ssd_rows_negative_class() {
        let rows = Array2::from_shape_vec((1, 7), vec![0.0, -1.0, 0.9, 0.1, 0.1, 0.2, 0.2])
            .unwrap();
        let err = DetectionRecord::from_ssd_rows(rows.view()).unwrap_err();
        assert!(matches!(err, AnnotateError::MalformedRow { row: 0, .. }));
    }

    #[test]
    fn test_from_ssd_rows_wrong_width() {
        let rows = Array2::<f32>::zeros((2, 6));
        assert!(DetectionRecord::from_ssd_rows(rows.view()).is_err());
    }
}
