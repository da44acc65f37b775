//! OCR bridge - recognized word boxes to normalized items.
//!
//! When a page has no embedded glyph runs, an external OCR engine produces
//! word boxes from the rasterized page. This module converts those boxes
//! into the same [`NormalizedItem`] shape the glyph path produces, so
//! selection mapping and stroke extraction operate uniformly regardless of
//! text origin. No merging pass is applied — recognized words are already
//! atomic.

use crate::content::PageRaster;
use crate::error::Result;
use crate::layout::{NormalizedItem, SourceKind};

/// A recognized word with its box in raster-pixel space.
///
/// Coordinates are at the scale the raster was produced with; `(x0, y0)` is
/// the top-left corner, `(x1, y1)` the bottom-right.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWordBox {
    /// Recognized text
    pub text: String,
    /// Left edge in raster pixels
    pub x0: f32,
    /// Top edge in raster pixels
    pub y0: f32,
    /// Right edge in raster pixels
    pub x1: f32,
    /// Bottom edge in raster pixels
    pub y1: f32,
}

/// External OCR engine, specified only at this boundary.
///
/// Recognition is long-running; engines report fractional progress through
/// the sink and must not block the interaction thread.
pub trait OcrEngine {
    /// Recognize text on a rasterized page.
    fn recognize(
        &self,
        raster: &PageRaster,
        progress: &mut dyn FnMut(f32),
    ) -> Result<Vec<OcrWordBox>>;
}

/// Convert recognized word boxes into normalized items.
///
/// Raster-pixel coordinates are divided by the scale the raster was
/// produced at, then mapped to `target_scale` so the output shares a
/// coordinate space with glyph-sourced items at that scale. Pass
/// `target_scale = 1.0` to obtain page space.
pub fn normalize_ocr_words(
    words: &[OcrWordBox],
    raster_scale: f32,
    target_scale: f32,
) -> Vec<NormalizedItem> {
    let factor = target_scale / raster_scale;

    words
        .iter()
        .map(|word| {
            let height = (word.y1 - word.y0) * factor;
            NormalizedItem {
                text: word.text.clone(),
                x: word.x0 * factor,
                // Word boxes have no baseline; the box bottom stands in,
                // which keeps bounds() equal to the stored box.
                y_baseline: word.y1 * factor,
                width: (word.x1 - word.x0) * factor,
                font_size: height,
                font_id: String::new(),
                horizontal_aspect: 1.0,
                rotation: 0.0,
                source: SourceKind::Ocr,
            }
        })
        .collect()
}

/// Lifecycle of the per-page background OCR task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OcrStatus {
    /// OCR has not been attempted for this page
    NotAttempted,
    /// Recognition is running; progress is in `[0, 1]`
    Running {
        /// Fraction of the page processed so far
        progress: f32,
    },
    /// Recognition finished and items were produced
    Complete,
    /// The engine reported an error; the page stays usable as image-only
    Failed,
}

impl OcrStatus {
    /// Whether this page may still start an OCR attempt.
    pub fn can_start(&self) -> bool {
        matches!(self, OcrStatus::NotAttempted)
    }
}

/// Gate for starting the background OCR task on a page.
///
/// All conditions must hold: the page is materialized, it carries no
/// embedded text, it is still visible, and OCR has not been attempted yet.
pub fn should_attempt_ocr(
    materialized: bool,
    has_embedded_text: bool,
    visible: bool,
    status: OcrStatus,
) -> bool {
    materialized && !has_embedded_text && visible && status.can_start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn word(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> OcrWordBox {
        OcrWordBox {
            text: text.to_string(),
            x0,
            y0,
            x1,
            y1,
        }
    }

    #[test]
    fn test_bridge_to_page_space() {
        // Raster produced at 2x: a 40x20px box maps to 20x10 page units.
        let items = normalize_ocr_words(&[word("scan", 80.0, 100.0, 120.0, 120.0)], 2.0, 1.0);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.x, 40.0);
        assert_eq!(item.width, 20.0);
        assert_eq!(item.font_size, 10.0);
        assert_eq!(item.source, SourceKind::Ocr);
        assert_eq!(item.bounds(), Rect::new(40.0, 50.0, 20.0, 10.0));
    }

    #[test]
    fn test_bridge_to_visual_space() {
        // Raster at 2x, page viewed at 3x: factor 1.5.
        let items = normalize_ocr_words(&[word("w", 10.0, 10.0, 30.0, 20.0)], 2.0, 3.0);
        assert_eq!(items[0].x, 15.0);
        assert_eq!(items[0].width, 30.0);
        assert_eq!(items[0].font_size, 15.0);
    }

    #[test]
    fn test_ocr_gate() {
        assert!(should_attempt_ocr(true, false, true, OcrStatus::NotAttempted));

        // Any failed condition closes the gate.
        assert!(!should_attempt_ocr(false, false, true, OcrStatus::NotAttempted));
        assert!(!should_attempt_ocr(true, true, true, OcrStatus::NotAttempted));
        assert!(!should_attempt_ocr(true, false, false, OcrStatus::NotAttempted));
        assert!(!should_attempt_ocr(true, false, true, OcrStatus::Failed));
        assert!(!should_attempt_ocr(true, false, true, OcrStatus::Complete));
        assert!(!should_attempt_ocr(
            true,
            false,
            true,
            OcrStatus::Running { progress: 0.5 }
        ));
    }
}
