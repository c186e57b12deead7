//! Loading [`AnnotatorConfig`] from a TOML file.
//!
//! Every key is optional; anything left out keeps the reference default
//! (PASCAL VOC labels, threshold 0.2, green boxes, white label background,
//! black text, font scale 0.5).
//!
//! ```toml
//! confidence_threshold = 0.35
//! class_labels = ["background", "person", "car"]
//! box_color = [255, 0, 0]
//! label_precision = 2
//! on_invalid_class = "skip"
//!
//! [font]
//! scale = 1.0
//! thickness = 2
//! ```

use std::fs;
use std::path::Path;

use image::Rgb;
use log::info;
use serde::Deserialize;

use crate::annotator::{AnnotatorConfig, ClassLabels, FontStyle, InvalidClassPolicy};
use crate::error::{AnnotateError, Result};

const MAX_FONT_SCALE: f32 = 16.0;
const MAX_FONT_THICKNESS: u32 = 32;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct AnnotatorConfigFile {
    class_labels: Option<Vec<String>>,
    confidence_threshold: Option<f32>,
    box_color: Option<[u8; 3]>,
    label_background: Option<[u8; 3]>,
    label_foreground: Option<[u8; 3]>,
    font: Option<FontStyle>,
    label_precision: Option<usize>,
    on_invalid_class: Option<InvalidClassPolicy>,
}

/// Read and validate an annotator config file.
pub fn load_config(path: &Path) -> Result<AnnotatorConfig> {
    let raw = fs::read_to_string(path)?;
    let config = parse_config(&raw)?;
    info!(
        "loaded annotator config from {} ({} classes, threshold {})",
        path.display(),
        config.class_labels.len(),
        config.confidence_threshold
    );
    Ok(config)
}

/// Parse and validate an annotator config from TOML text.
pub fn parse_config(raw: &str) -> Result<AnnotatorConfig> {
    let file: AnnotatorConfigFile = toml::from_str(raw)?;
    let config = from_file(file);
    validate(&config)?;
    Ok(config)
}

fn from_file(file: AnnotatorConfigFile) -> AnnotatorConfig {
    let defaults = AnnotatorConfig::default();
    AnnotatorConfig {
        class_labels: file
            .class_labels
            .map(ClassLabels::new)
            .unwrap_or(defaults.class_labels),
        confidence_threshold: file
            .confidence_threshold
            .unwrap_or(defaults.confidence_threshold),
        box_color: file.box_color.map(Rgb).unwrap_or(defaults.box_color),
        label_background: file
            .label_background
            .map(Rgb)
            .unwrap_or(defaults.label_background),
        label_foreground: file
            .label_foreground
            .map(Rgb)
            .unwrap_or(defaults.label_foreground),
        font: file.font.unwrap_or(defaults.font),
        label_precision: file.label_precision.or(defaults.label_precision),
        on_invalid_class: file.on_invalid_class.unwrap_or(defaults.on_invalid_class),
    }
}

fn validate(config: &AnnotatorConfig) -> Result<()> {
    if config.class_labels.is_empty() {
        return Err(AnnotateError::Config(
            "class_labels must not be empty".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&config.confidence_threshold) {
        return Err(AnnotateError::Config(format!(
            "confidence_threshold must be within [0, 1], got {}",
            config.confidence_threshold
        )));
    }
    if !(config.font.scale > 0.0 && config.font.scale <= MAX_FONT_SCALE) {
        return Err(AnnotateError::Config(format!(
            "font.scale must be within (0, {MAX_FONT_SCALE}], got {}",
            config.font.scale
        )));
    }
    if !(1..=MAX_FONT_THICKNESS).contains(&config.font.thickness) {
        return Err(AnnotateError::Config(format!(
            "font.thickness must be within [1, {MAX_FONT_THICKNESS}], got {}",
            config.font.thickness
        )));
    }
    Ok(())
}
