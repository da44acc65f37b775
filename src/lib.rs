// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_name_repetitions)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # textlayer
//!
//! Text-layer reconstruction and coordinate mapping for paginated document
//! viewers.
//!
//! Paginated documents deliver their text as disjoint, geometrically
//! positioned glyph runs — fragmented arbitrarily, in no guaranteed
//! reading order, with font metrics that are often missing. This crate
//! rebuilds a coherent, selectable text representation from that geometry,
//! keeps it pixel-aligned with the separately rasterized page, and maps
//! user interactions (text selection, free-hand strokes) back into
//! document-space annotation geometry, losslessly across zoom levels.
//!
//! ## Core Flow
//!
//! - **Extraction**: glyph runs → [`layout::NormalizedItem`]s in visual
//!   space ([`extractors::normalize_runs`])
//! - **Reading order**: pluggable strategies, with a column-aware mode for
//!   double-page spreads ([`pipeline::reading_order`])
//! - **Merging**: de-fragmentation with inferred inter-word spaces
//!   ([`layout::merge_spans`])
//! - **Materialization**: positioned, width-corrected, selectable boxes
//!   ([`layout::Materializer`])
//! - **Interaction**: selection ranges → page-space highlight rects
//!   ([`selection::map_selection`]); free-hand strokes → covered text
//!   ([`ink::extract_stroke_text`])
//! - **OCR bridge**: recognized word boxes join the same representation
//!   for image-only pages ([`extractors::normalize_ocr_words`])
//!
//! All persisted geometry is stored in page space (scale = 1); on-screen
//! geometry is page space times the active scale, and that single
//! multiplicative relationship is the only coordinate transform in the
//! system.
//!
//! ## Quick Start
//!
//! ```ignore
//! use textlayer::pipeline::{LayerStore, PageController, TextLayerPipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = TextLayerPipeline::new();
//! let controller = PageController::new();
//! let mut store = LayerStore::new();
//! let mut font_requests = textlayer::layout::FontRequestCache::new();
//!
//! // Page 0 entered the viewport at scale 1.5.
//! let viewport = provider.viewport(0, 1.5);
//! let content = provider.text_content(0)?;
//! let token = controller.begin_run();
//! let layer = pipeline.process(0, &content, &viewport, &measurer, &fonts,
//!                              &mut font_requests, &token)?;
//! store.insert(layer);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry and scale mapping
pub mod geometry;

// Input-side types and collaborator traits
pub mod content;

// Extraction: glyph runs and the OCR bridge
pub mod extractors;

// Layout reconstruction: items, merging, materialization
pub mod layout;

// Pipeline orchestration and reading order
pub mod pipeline;

// Interaction: selection mapping
pub mod selection;

// Interaction: stroke-to-text extraction
pub mod ink;

// Re-exports
pub use content::{ContentProvider, PageTextContent, RawGlyphRun, Viewport};
pub use error::{Error, Result};
pub use extractors::{OcrEngine, OcrStatus, OcrWordBox};
pub use ink::{extract_stroke_text, Stroke, StrokeAnnotation};
pub use layout::{LayoutBox, MergedSpan, NormalizedItem, SourceKind};
pub use pipeline::{LayerStore, PageController, PageLayer, TextLayerConfig, TextLayerPipeline};
pub use selection::{map_selection, SelectionRange, SelectionRect};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorting operations never panic on NaN.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            },
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "textlayer");
    }
}
