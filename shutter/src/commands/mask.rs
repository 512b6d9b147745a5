// shutter/src/commands/mask.rs
//! The `mask` and `scan` commands.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};
use is_terminal::IsTerminal;
use log::{debug, info};
use shutter_core::{CommandDetector, MaskingEngine, RuleStore, StaticDetector, TextDetector};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{DetectorArgs, MaskCommand, ScanCommand};
use crate::ui::output_format;

/// Picks the detector adapter requested on the command line.
pub fn build_detector(args: &DetectorArgs) -> Result<Box<dyn TextDetector>> {
    if let Some(path) = &args.ocr_json {
        return Ok(Box::new(StaticDetector::from_json_file(path)?));
    }
    let detector = CommandDetector::from_argv(&args.ocr_command)
        .context("Either --ocr-json or an OCR command after `--` is required")?;
    Ok(Box::new(detector))
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to read image {}", path.display()))
}

/// Saves `image` in the format implied by the extension of `path`.
fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Cannot infer an image format from {}", path.display()))?;
    // JPEG has no alpha channel.
    let encoded = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image.clone(),
    };
    encoded
        .save_with_format(path, format)
        .with_context(|| format!("Failed to write image {}", path.display()))
}

pub fn run_mask(cmd: &MaskCommand, rules: Arc<RuleStore>, quiet: bool) -> Result<()> {
    let source = open_image(&cmd.input)?;
    let engine = MaskingEngine::new(build_detector(&cmd.detector)?, rules);

    // Nothing is written unless detection succeeded.
    let outcome = engine
        .mask_privacy_with_report(&source)
        .with_context(|| format!("Masking {} failed; no output written", cmd.input.display()))?;

    save_image(&outcome.image, &cmd.output)?;
    info!("Wrote masked image to {}.", cmd.output.display());

    if let Some(report_path) = &cmd.report {
        let json = serde_json::to_string_pretty(&outcome.report)?;
        fs::write(report_path, json)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        debug!("Wrote masking report to {}.", report_path.display());
    }

    if !quiet {
        let mut stderr = io::stderr();
        let color = stderr.is_terminal();
        output_format::print_mask_summary(&mut stderr, &outcome.report, color)?;
    }
    Ok(())
}

pub fn run_scan<W: Write>(cmd: &ScanCommand, rules: Arc<RuleStore>, out: &mut W) -> Result<()> {
    let source = open_image(&cmd.input)?;
    let engine = MaskingEngine::new(build_detector(&cmd.detector)?, rules);
    let verdicts = engine
        .scan(&source)
        .with_context(|| format!("Scanning {} failed", cmd.input.display()))?;

    for (index, verdict) in verdicts.iter().enumerate() {
        let confidence = verdict.fragment.confidence;
        match &verdict.hit {
            Some(hit) => writeln!(
                out,
                "{index}\tsensitive\t{}:{}\t{confidence:.2}",
                hit.tier,
                hit.public_label()
            )?,
            None => writeln!(
                out,
                "{index}\tclean\t-\t{confidence:.2}\t{}",
                verdict.fragment.text
            )?,
        }
    }
    Ok(())
}
