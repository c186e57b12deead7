mod detection;
mod frame_annotator;
mod labels;
mod rect;
mod text;

pub use detection::{DetectionRecord, SSD_ROW_LEN};
pub use frame_annotator::{
    AnnotatedRegion, Annotator, AnnotatorConfig, InvalidClassPolicy, annotate,
};
pub use labels::{ClassLabels, PASCAL_VOC_LABELS};
pub use rect::PixelRect;
pub use text::{BitmapFont, FontStyle, TextRenderer, TextSize};
