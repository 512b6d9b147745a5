// shutter-core/src/detector.rs
//! Defines the text detector boundary consumed by the masking engine.
//!
//! A `TextDetector` takes a raster image and returns the recognized text
//! fragments with their bounding quadrilaterals. The OCR engine itself is an
//! external collaborator; this module only fixes the output shape and ships
//! two adapters: one replaying precomputed OCR output and one that shells out
//! to an OCR program printing JSON.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{bail, Context, Result};
use image::{DynamicImage, ImageFormat};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

use crate::errors::ShutterError;

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One OCR-recognized text span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFragment {
    /// The four corners in detector order. Not guaranteed convex-normalized.
    pub region: [Point; 4],
    pub text: String,
    pub confidence: f32,
}

/// A source of text fragments for an image.
///
/// Implementations are constructed once and reused across masking passes.
/// The engine serializes calls, so implementations need not be `Sync`.
pub trait TextDetector: Send {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<TextFragment>>;
}

impl<T: TextDetector + ?Sized> TextDetector for Box<T> {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<TextFragment>> {
        (**self).detect(image)
    }
}

/// The per-item shape of RapidOCR output: `[box, text, score]`.
#[derive(Debug, Deserialize)]
struct RawFragment(Vec<[f32; 2]>, String, f32);

/// Decodes RapidOCR-shaped JSON: `[[[[x,y],[x,y],[x,y],[x,y]], "text", 0.98], ...]`.
///
/// `null` and `[]` both mean "no text found".
pub fn parse_ocr_json(json: &str) -> Result<Vec<TextFragment>, ShutterError> {
    let raw: Option<Vec<RawFragment>> = serde_json::from_str(json)
        .map_err(|e| ShutterError::SerializationError(format!("Invalid OCR output: {e}")))?;

    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, RawFragment(points, text, confidence))| -> Result<TextFragment, ShutterError> {
            let region: [[f32; 2]; 4] = points.try_into().map_err(|p: Vec<[f32; 2]>| {
                ShutterError::DetectionFailure(anyhow::anyhow!(
                    "OCR result #{index} has {} corner points, expected 4",
                    p.len()
                ))
            })?;
            Ok(TextFragment {
                region: region.map(|[x, y]| Point { x, y }),
                text,
                confidence,
            })
        })
        .collect()
}

/// Replays a fixed set of fragments for every image.
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    fragments: Vec<TextFragment>,
}

impl StaticDetector {
    pub fn new(fragments: Vec<TextFragment>) -> Self {
        Self { fragments }
    }

    /// Loads precomputed OCR output from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read OCR output {}", path.display()))?;
        let fragments = parse_ocr_json(&text)
            .with_context(|| format!("Failed to parse OCR output {}", path.display()))?;
        debug!("Loaded {} precomputed fragments from {}.", fragments.len(), path.display());
        Ok(Self { fragments })
    }
}

impl TextDetector for StaticDetector {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Vec<TextFragment>> {
        Ok(self.fragments.clone())
    }
}

/// Runs an external OCR program once per image.
///
/// The image is written to a temporary PNG whose path is appended to the
/// configured arguments. The program must print RapidOCR-shaped JSON on stdout.
#[derive(Debug, Clone)]
pub struct CommandDetector {
    program: String,
    args: Vec<String>,
}

impl CommandDetector {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Builds a detector from an argv list, program first.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .context("OCR command is empty")?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

impl TextDetector for CommandDetector {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<TextFragment>> {
        let input = tempfile::Builder::new()
            .prefix("shutter-ocr-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary image for OCR")?;
        image
            .save_with_format(input.path(), ImageFormat::Png)
            .context("Failed to write temporary image for OCR")?;

        debug!("Running OCR command '{}' on {}.", self.program, input.path().display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(input.path())
            .output()
            .with_context(|| format!("Failed to start OCR command '{}'", self.program))?;

        if !output.status.success() {
            bail!(
                "OCR command '{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8(output.stdout)
            .context("OCR command produced non-UTF-8 output")?;
        Ok(parse_ocr_json(&stdout)?)
    }
}
