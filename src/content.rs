//! Input-side types produced by the page-description rendering library.
//!
//! The engine never parses page descriptions itself; it consumes glyph runs,
//! viewports and rasters from an external provider behind [`ContentProvider`].
//! Everything in this module mirrors the provider's interface shape and
//! carries no behavior beyond simple accessors.

use std::collections::HashMap;

use crate::error::Result;
use crate::geometry::{Point, Transform};

/// An atomic positioned string fragment as emitted by the page description.
///
/// Runs are fragmented arbitrarily — sub-word, sub-line, or spanning
/// columns — with no guaranteed reading order. The engine's job is to turn
/// a page's runs back into coherent, selectable text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGlyphRun {
    /// Text content of the run
    pub text: String,
    /// The run's 2×3 placement transform in page units
    pub transform: Transform,
    /// Advance width declared by the page description, in page units.
    ///
    /// Absent for some producers; the extractor falls back to a
    /// length-based estimate.
    pub declared_width: Option<f32>,
    /// Resource identifier of the font the run is set in
    pub font_id: String,
}

/// Optional per-font metric hints supplied alongside the text content.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetricHints {
    /// Fraction of the font size above the baseline, when the source
    /// format supplies real metrics
    pub ascent: Option<f32>,
    /// Font family name, possibly carrying a subset prefix and style
    /// suffixes (e.g. `"ABCDEF+Times-Bold"`)
    pub font_family: Option<String>,
}

/// One page's raw text content: glyph runs plus font metric hints.
#[derive(Debug, Clone, Default)]
pub struct PageTextContent {
    /// Glyph runs in emission order (not reading order)
    pub runs: Vec<RawGlyphRun>,
    /// Metric hints keyed by font id
    pub font_hints: HashMap<String, FontMetricHints>,
}

impl PageTextContent {
    /// A page with no embedded text at all (image-only page).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the page carries any embedded glyph runs.
    pub fn has_text(&self) -> bool {
        !self.runs.is_empty()
    }
}

/// Viewport descriptor for a page at a specific rendering scale.
///
/// Exposes the scalar `scale` and the device-to-viewport point transform
/// used to place glyph-run origins in visual space.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Rendering scale; visual space is page space times this value
    pub scale: f32,
    /// Viewport width in visual units
    pub width: f32,
    /// Viewport height in visual units
    pub height: f32,
    /// Device-to-viewport point transform
    pub transform: Transform,
}

impl Viewport {
    /// Create a viewport with an explicit transform.
    pub fn new(scale: f32, width: f32, height: f32, transform: Transform) -> Self {
        Self {
            scale,
            width,
            height,
            transform,
        }
    }

    /// Create an axis-aligned viewport whose transform is a pure scale.
    ///
    /// Convenient for tests and for providers that render without
    /// rotation or flipping.
    pub fn axis_aligned(scale: f32, width: f32, height: f32) -> Self {
        Self::new(scale, width, height, Transform::scale(scale))
    }

    /// Map a page-description point into visual (viewport) space.
    pub fn transform_point(&self, p: Point) -> Point {
        self.transform.apply(p)
    }
}

/// A rasterized page surface handed to the OCR engine.
///
/// The engine does not inspect pixels; it only forwards them and needs the
/// scale the raster was produced at to map recognized word boxes back into
/// a shared coordinate space.
#[derive(Debug, Clone)]
pub struct PageRaster {
    /// Raster width in pixels
    pub width: u32,
    /// Raster height in pixels
    pub height: u32,
    /// Scale the raster was produced at, relative to page space
    pub scale: f32,
    /// Raw pixel data, in whatever layout the rasterizer and OCR engine
    /// agree on
    pub pixels: Vec<u8>,
}

/// External provider of page content: the page-description parser and
/// rasterizer, specified only at this boundary.
///
/// Fetches are cancellable by the caller's run supersession; a provider
/// whose in-flight fetch is torn down returns [`crate::Error::Cancelled`].
pub trait ContentProvider {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Fetch one page's glyph runs and font hints.
    fn text_content(&self, page: u32) -> Result<PageTextContent>;

    /// Build the viewport for a page at the given scale.
    fn viewport(&self, page: u32, scale: f32) -> Viewport;

    /// Rasterize a page for the OCR path.
    fn raster(&self, page: u32, scale: f32) -> Result<PageRaster>;
}
