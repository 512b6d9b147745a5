//! Provides core data structures and utility functions for redaction regions,
//! masking reports and sensitive-data-safe logging within `shutter-core`.

use log::debug;
use once_cell::sync::Lazy;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::detector::Point;
use crate::rules::compiler::RuleTier;

/// Initialized once to determine if PII is allowed in debug logs.
static PII_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("SHUTTER_ALLOW_DEBUG_PII")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// An axis-aligned rectangle covering a fragment's quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RedactionRegion {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl RedactionRegion {
    /// Bounding extents of a quadrilateral. Corner order is irrelevant.
    pub fn from_quad(quad: &[Point; 4]) -> Self {
        let [first, rest @ ..] = quad;
        rest.iter().fold(
            RedactionRegion {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |region, p| RedactionRegion {
                min_x: region.min_x.min(p.x),
                min_y: region.min_y.min(p.y),
                max_x: region.max_x.max(p.x),
                max_y: region.max_y.max(p.y),
            },
        )
    }

    /// Inclusive pixel bounds `(x0, y0, x1, y1)` clipped to a `width` x `height` raster.
    ///
    /// Fractional edges are widened outward so the fill always covers the
    /// detected extents. Returns `None` when nothing of the region lies on the
    /// raster or the coordinates are not finite.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        if width == 0 || height == 0 {
            return None;
        }
        let coords = [self.min_x, self.min_y, self.max_x, self.max_y];
        if coords.iter().any(|c| !c.is_finite()) {
            return None;
        }

        let x0 = self.min_x.floor() as i64;
        let y0 = self.min_y.floor() as i64;
        let x1 = self.max_x.ceil() as i64;
        let y1 = self.max_y.ceil() as i64;

        let (w, h) = (i64::from(width), i64::from(height));
        if x1 < 0 || y1 < 0 || x0 >= w || y0 >= h {
            return None;
        }

        Some((
            x0.max(0) as u32,
            y0.max(0) as u32,
            x1.min(w - 1) as u32,
            y1.min(h - 1) as u32,
        ))
    }
}

/// One redaction burned into the output image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedRedaction {
    pub region: RedactionRegion,
    pub tier: RuleTier,
    pub rule: String,
    pub confidence: f32,
    /// Hash of the normalized fragment text. The text itself is never reported.
    pub text_hash: String,
}

/// Summary of one masking pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaskReport {
    pub fragments_scanned: usize,
    pub redactions: Vec<AppliedRedaction>,
}

impl MaskReport {
    pub fn redaction_count(&self) -> usize {
        self.redactions.len()
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

pub(crate) fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_fragment_match_debug(module_path: &str, tier: RuleTier, rule: &str, text: &str) {
    debug!(
        "{} Fragment matched {} rule '{}': '{}'",
        module_path,
        tier,
        rule,
        get_loggable_content(text)
    );
}

/// Hex digits kept from a rule fingerprint.
const RULE_FINGERPRINT_LEN: usize = 12;

/// Short, stable identifier for a user-supplied rule source.
///
/// Keywords and user patterns spell out what they hide, so reports and
/// terminal output refer to them by this fingerprint instead.
pub fn rule_fingerprint(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    hex::encode(&digest[..RULE_FINGERPRINT_LEN / 2])
}

/// Stable hash of fragment text, insensitive to case and whitespace layout.
pub fn canonical_text_hash(text: &str) -> String {
    let normalized = text
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
