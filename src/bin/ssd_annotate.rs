//! ssd-annotate - draw detection results onto an image file

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

use ssd_annotate::{Annotator, AnnotatorConfig, DetectionRecord, load_config};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image (PNG or JPEG).
    image: PathBuf,
    /// JSON file with detections: an array of records, or with --raw a
    /// flat array of SSD output values (7 per row).
    #[arg(long)]
    detections: PathBuf,
    /// Treat the detections file as raw SSD output.
    #[arg(long)]
    raw: bool,
    /// Annotator config (TOML).
    #[arg(long, env = "SSD_ANNOTATE_CONFIG")]
    config: Option<PathBuf>,
    /// Override the confidence threshold from the config.
    #[arg(long)]
    threshold: Option<f32>,
    /// Output image path.
    #[arg(short, long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnnotatorConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(anyhow!("--threshold must be within [0, 1], got {threshold}"));
        }
        config.confidence_threshold = threshold;
    }

    let detections = read_detections(&args)?;
    let mut frame = image::open(&args.image)
        .with_context(|| format!("failed to open image {}", args.image.display()))?
        .into_rgb8();

    let annotator = Annotator::new(config);
    let regions = annotator.annotate(&mut frame, &detections)?;
    for region in &regions {
        info!("{} at {:?}", region.label, region.rect.to_ltrb());
    }

    frame
        .save(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    info!(
        "wrote {} ({} of {} detections drawn)",
        args.out.display(),
        regions.len(),
        detections.len()
    );
    Ok(())
}

fn read_detections(args: &Args) -> Result<Vec<DetectionRecord>> {
    let bytes = fs::read(&args.detections)
        .with_context(|| format!("failed to read {}", args.detections.display()))?;
    if args.raw {
        let values: Vec<f32> = serde_json::from_slice(&bytes)?;
        Ok(DetectionRecord::from_ssd_output(&values)?)
    } else {
        Ok(serde_json::from_slice(&bytes)?)
    }
}
