//! Error types shared across the crate.

use thiserror::Error;

/// Errors produced while decoding detections, loading configuration or
/// annotating a frame.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// A detection referenced a class the label table does not contain.
    #[error("class index {index} is out of range for a label table of {len} entries")]
    InvalidClassIndex { index: usize, len: usize },

    /// The frame has no pixels to draw on.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidFrame { width: u32, height: u32 },

    /// A flat detector output whose length is not a whole number of rows.
    #[error("detector output of length {len} is not a multiple of {row_len}")]
    InvalidOutputShape { len: usize, row_len: usize },

    /// A detector output row that cannot be turned into a detection record.
    #[error("malformed detection row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
