//! Class label table.

use std::sync::Arc;

use crate::error::{AnnotateError, Result};

/// The 20 PASCAL VOC classes MobileNet-SSD is trained on, plus background.
pub const PASCAL_VOC_LABELS: [&str; 21] = [
    "background",
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

/// Immutable mapping from network class index to display name.
///
/// Cloning is cheap; the names are shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabels {
    names: Arc<[String]>,
}

impl ClassLabels {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The reference 21-entry table, index 0 reserved for "background".
    pub fn pascal_voc() -> Self {
        Self::new(PASCAL_VOC_LABELS)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Look up a class name, failing with `InvalidClassIndex` when out of range.
    pub fn resolve(&self, index: usize) -> Result<&str> {
        self.get(index).ok_or(AnnotateError::InvalidClassIndex {
            index,
            len: self.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ClassLabels {
    fn default() -> Self {
        Self::pascal_voc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_voc() {
        let labels = ClassLabels::pascal_voc();
        assert_eq!(labels.len(), 21);
        assert_eq!(labels.get(0), Some("background"));
        assert_eq!(labels.get(7), Some("car"));
        assert_eq!(labels.get(8), Some("cat"));
        assert_eq!(labels.get(15), Some("person"));
        assert_eq!(labels.get(20), Some("tvmonitor"));
    }

    #[test]
    fn test_resolve_out_of_range() {
        let labels = ClassLabels::new(["background", "thing"]);
        assert_eq!(labels.resolve(1).unwrap(), "thing");
        assert!(matches!(
            labels.resolve(2),
            Err(AnnotateError::InvalidClassIndex { index: 2, len: 2 })
        ));
    }
}
