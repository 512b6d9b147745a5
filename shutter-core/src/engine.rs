// shutter-core/src/engine.rs
//! The masking engine: detect text, classify fragments, burn in redactions.
//!
//! A pass runs the injected `TextDetector` once, takes a single snapshot of
//! the rule store, and paints an opaque black rectangle over every fragment
//! the snapshot reports as sensitive. Painting always happens on a private
//! copy of the input; the caller's image is never touched. A pass either
//! returns a complete image or an error, never a partially masked one.
//!
//! License: MIT OR APACHE 2.0

use anyhow::anyhow;
use image::{DynamicImage, GenericImage, GenericImageView, Rgba};
use log::{debug, info};
use std::sync::{Arc, Mutex};

use crate::detector::{TextDetector, TextFragment};
use crate::errors::ShutterError;
use crate::redaction::{
    canonical_text_hash, log_fragment_match_debug, AppliedRedaction, MaskReport, RedactionRegion,
};
use crate::rules::store::{RuleHit, RuleStore};

const MASK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// The masked image together with what was hidden.
#[derive(Debug, Clone)]
pub struct MaskOutcome {
    pub image: DynamicImage,
    pub report: MaskReport,
}

/// Classification of one fragment, without painting.
#[derive(Debug, Clone)]
pub struct FragmentVerdict {
    pub fragment: TextFragment,
    pub hit: Option<RuleHit>,
}

impl FragmentVerdict {
    pub fn is_sensitive(&self) -> bool {
        self.hit.is_some()
    }
}

/// Orchestrates detection, classification and painting.
///
/// The detector is built once by the caller and reused for every pass.
/// Calls into it are serialized by an internal mutex, so the engine can be
/// shared across threads even when the detector itself is not `Sync`.
#[derive(Debug)]
pub struct MaskingEngine<D: TextDetector> {
    detector: Mutex<D>,
    rules: Arc<RuleStore>,
}

impl<D: TextDetector> MaskingEngine<D> {
    pub fn new(detector: D, rules: Arc<RuleStore>) -> Self {
        Self {
            detector: Mutex::new(detector),
            rules,
        }
    }

    /// The shared rule store. Mutating it affects subsequent passes only.
    pub fn rules(&self) -> &Arc<RuleStore> {
        &self.rules
    }

    /// Returns a copy of `image` with every sensitive fragment blacked out.
    pub fn mask_privacy(&self, image: &DynamicImage) -> Result<DynamicImage, ShutterError> {
        self.mask_privacy_with_report(image).map(|outcome| outcome.image)
    }

    /// Like [`mask_privacy`](Self::mask_privacy), also reporting each redaction.
    pub fn mask_privacy_with_report(&self, image: &DynamicImage) -> Result<MaskOutcome, ShutterError> {
        let fragments = self.detect(image)?;
        if fragments.is_empty() {
            debug!("Detector found no text; returning an unmodified copy.");
            return Ok(MaskOutcome {
                image: image.clone(),
                report: MaskReport::default(),
            });
        }

        let rules = self.rules.snapshot();
        let mut working = image.clone();
        let mut report = MaskReport {
            fragments_scanned: fragments.len(),
            redactions: Vec::new(),
        };

        for fragment in &fragments {
            let Some(hit) = rules.find_match(&fragment.text) else {
                continue;
            };
            let rule = hit.public_label();
            log_fragment_match_debug(module_path!(), hit.tier, &rule, &fragment.text);

            let region = RedactionRegion::from_quad(&fragment.region);
            if !paint_region(&mut working, &region) {
                debug!("Region {:?} lies outside the image; nothing painted.", region);
            }
            report.redactions.push(AppliedRedaction {
                region,
                tier: hit.tier,
                rule,
                confidence: fragment.confidence,
                text_hash: canonical_text_hash(&fragment.text),
            });
        }

        info!(
            "Masked {} of {} detected fragments.",
            report.redaction_count(),
            report.fragments_scanned
        );
        Ok(MaskOutcome { image: working, report })
    }

    /// Detects and classifies fragments without producing an image.
    pub fn scan(&self, image: &DynamicImage) -> Result<Vec<FragmentVerdict>, ShutterError> {
        let fragments = self.detect(image)?;
        let rules = self.rules.snapshot();
        Ok(fragments
            .into_iter()
            .map(|fragment| {
                let hit = rules.find_match(&fragment.text);
                FragmentVerdict { fragment, hit }
            })
            .collect())
    }

    fn detect(&self, image: &DynamicImage) -> Result<Vec<TextFragment>, ShutterError> {
        let mut detector = self.detector.lock().map_err(|_| {
            ShutterError::DetectionFailure(anyhow!(
                "text detector is unusable after panicking in an earlier pass"
            ))
        })?;
        let (width, height) = image.dimensions();
        debug!("Running text detection on a {}x{} image.", width, height);
        detector.detect(image).map_err(ShutterError::DetectionFailure)
    }
}

/// Fills `region` with opaque black. Returns `false` if it lies off the image.
pub fn paint_region(image: &mut DynamicImage, region: &RedactionRegion) -> bool {
    let (width, height) = image.dimensions();
    let Some((x0, y0, x1, y1)) = region.pixel_bounds(width, height) else {
        return false;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            image.put_pixel(x, y, MASK_COLOR);
        }
    }
    true
}
