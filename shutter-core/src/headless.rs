// shutter-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot masking without managing a long-lived
//! engine. Builds a rule store, applies the given keyword and user-pattern
//! tiers, and masks a single image.

use image::DynamicImage;
use std::sync::Arc;

use crate::detector::TextDetector;
use crate::engine::MaskingEngine;
use crate::errors::ShutterError;
use crate::rules::store::RuleStore;

/// Masks one image with the built-in rules plus the given keywords and patterns.
///
/// Invalid keywords or patterns are skipped, as they are for a long-lived store.
/// Detection errors are returned as [`ShutterError::DetectionFailure`].
pub fn headless_mask_image<D, K, P>(
    detector: D,
    keywords: &[K],
    user_patterns: &[P],
    image: &DynamicImage,
) -> Result<DynamicImage, ShutterError>
where
    D: TextDetector,
    K: AsRef<str>,
    P: AsRef<str>,
{
    let store = RuleStore::new()?;
    store.set_keywords(keywords);
    store.load_user_patterns(user_patterns);

    let engine = MaskingEngine::new(detector, Arc::new(store));
    engine.mask_privacy(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{Point, StaticDetector, TextFragment};
    use image::{GrayImage, Luma};

    #[test]
    fn test_headless_mask_image_user_pattern() -> anyhow::Result<()> {
        let fragment = TextFragment {
            region: [
                Point { x: 1.0, y: 1.0 },
                Point { x: 4.0, y: 1.0 },
                Point { x: 4.0, y: 2.0 },
                Point { x: 1.0, y: 2.0 },
            ],
            text: "Project Secret".to_string(),
            confidence: 0.99,
        };
        let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(6, 4, Luma([200])));

        let masked = headless_mask_image(
            StaticDetector::new(vec![fragment]),
            &[] as &[&str],
            &[r"Project\s*Secret", "(broken"],
            &source,
        )?
        .to_luma8();

        assert_eq!(masked.get_pixel(2, 1), &Luma([0]));
        assert_eq!(masked.get_pixel(5, 3), &Luma([200]));
        Ok(())
    }
}
