// shutter-core/src/lib.rs
//! # Shutter Core Library
//!
//! `shutter-core` provides the platform-independent logic for finding personal
//! information in images and blacking it out. It classifies OCR text fragments
//! against a layered rule system and paints opaque rectangles over the
//! sensitive ones on a copy of the source image.
//!
//! The library owns no persistence and no OCR model. Rule sources arrive as
//! plain string lists (or a YAML rule file), and text detection is injected
//! through the [`TextDetector`] trait.
//!
//! ## Modules
//!
//! * `config`: The embedded built-in rule table and the user rule file format.
//! * `rules`: Rule compilation (`compiler`) and the three-tier `RuleStore` (`store`).
//! * `detector`: The `TextDetector` boundary, OCR output parsing and adapters.
//! * `engine`: The `MaskingEngine` that ties detection, classification and painting together.
//! * `redaction`: Redaction regions, masking reports and PII-safe logging helpers.
//! * `keywords`: The ordered, duplicate-free user keyword list.
//! * `headless`: One-shot convenience wrapper.
//! * `errors`: The `ShutterError` type.
//!
//! ## Rule tiers
//!
//! * **Fixed**: built-in detectors for phone numbers, postal codes, email
//!   addresses, card-like numbers and labelled address/name lines.
//! * **Keyword**: user keywords, matched case-insensitively with any amount of
//!   whitespace between characters (OCR often splits short words apart).
//! * **User pattern**: raw regular expressions authored by the user.
//!
//! A fragment is sensitive if any rule in any tier matches its text.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use image::{DynamicImage, RgbImage};
//! use shutter_core::{MaskingEngine, Point, RuleStore, StaticDetector, TextFragment};
//!
//! fn main() -> Result<(), shutter_core::ShutterError> {
//!     // 1. Build the rule store and register a keyword.
//!     let rules = Arc::new(RuleStore::new()?);
//!     rules.set_keywords(&["ACME"]);
//!
//!     // 2. Inject a detector. Real deployments wrap an OCR engine.
//!     let fragment = TextFragment {
//!         region: [
//!             Point { x: 0.0, y: 0.0 },
//!             Point { x: 20.0, y: 0.0 },
//!             Point { x: 20.0, y: 8.0 },
//!             Point { x: 0.0, y: 8.0 },
//!         ],
//!         text: "A C M E Corp".to_string(),
//!         confidence: 0.95,
//!     };
//!     let engine = MaskingEngine::new(StaticDetector::new(vec![fragment]), rules);
//!
//!     // 3. Mask. The source image is left untouched.
//!     let source = DynamicImage::ImageRgb8(RgbImage::new(32, 16));
//!     let masked = engine.mask_privacy(&source)?;
//!     assert_eq!(masked.width(), 32);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Invalid keywords and user patterns never fail a call: they are dropped at
//! the tier boundary and reported through `log::warn!`. Detector errors are
//! returned as [`ShutterError::DetectionFailure`] so the caller can decide to
//! show the original image or report the failure.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod detector;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod keywords;
pub mod redaction;
pub mod rules;

/// Re-exports the rule file and built-in table types.
pub use config::{RuleDefinition, RuleSet, UserRuleFile, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ShutterError;

/// Re-exports the detector boundary and its adapters.
pub use detector::{parse_ocr_json, CommandDetector, Point, StaticDetector, TextDetector, TextFragment};

/// Re-exports the masking engine and its results.
pub use engine::{paint_region, FragmentVerdict, MaskOutcome, MaskingEngine};

/// Re-exports redaction reporting types.
pub use redaction::{
    canonical_text_hash, redact_sensitive, rule_fingerprint, AppliedRedaction, MaskReport,
    RedactionRegion,
};

pub use keywords::KeywordList;

/// Re-exports types for one-shot, non-interactive use.
pub use headless::headless_mask_image;

// Re-export the rule compiler and store for advanced usage.
pub use rules::compiler::{
    compile_keyword, compile_rules, compile_user_pattern, keyword_pattern_source, CompiledRule,
    CompiledRules, RuleTier,
};
pub use rules::store::{RuleHit, RuleSnapshot, RuleStore, TierSizes};
