//! Layout materializer - merged spans to positioned, measurable boxes.
//!
//! Each merged span becomes one invisible, selectable [`LayoutBox`] whose
//! rendered text must span exactly the width the page geometry predicts,
//! even when the host substitutes a system font with different natural
//! metrics. The host's rendering surface is reached only through the
//! [`WidthMeasurer`] and [`FontSource`] capabilities, so the whole pass is
//! testable with deterministic fakes.
//!
//! Box creation is two pure functions composed explicitly:
//! [`materialize_anchor`] places the box from the span's anchor, and
//! [`correct_width`] folds the measured width back in.

use std::collections::{HashMap, HashSet};

use crate::content::FontMetricHints;
use crate::layout::{MergedSpan, SourceKind};

/// Font identity handed to the host when measuring or styling a box.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Resource identifier from the page description
    pub id: String,
    /// Normalized family name, when hints supplied one
    pub family: Option<String>,
    /// Font size in visual units
    pub size: f32,
}

/// A materialized, positioned text box.
///
/// The four `page_*` attributes are recorded once at materialization and
/// are read-only afterward; selection mapping and stroke extraction
/// normalize them by the layer's scale. `visual_top`/`visual_height`
/// include the symmetric hit-region padding, which never leaks into the
/// persisted coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    /// Text content of the box
    pub text: String,
    /// Left edge (span anchor x)
    pub page_x: f32,
    /// Unpadded top edge: `baseline - font_size * ascent`
    pub page_top: f32,
    /// Width predicted from the page geometry
    pub page_width: f32,
    /// Height: the span's font size
    pub page_height: f32,
    /// Padded top edge used for pointer hit-testing
    pub visual_top: f32,
    /// Padded height used for pointer hit-testing
    pub visual_height: f32,
    /// Font the box renders in
    pub font: FontDescriptor,
    /// Horizontal scale applied to the rendered text: the span's aspect
    /// factor, times the width correction once measured
    pub horizontal_scale: f32,
    /// Live measured width read back from the rendering surface, if the
    /// correction pass ran
    pub measured_width: Option<f32>,
    /// Where the box's text came from
    pub source: SourceKind,
}

impl LayoutBox {
    /// Number of characters in the box's text node, the denominator for
    /// selection-offset ratios.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Tunables for box placement.
#[derive(Debug, Clone, Copy)]
pub struct MaterializeConfig {
    /// Ascent factor when no metrics are supplied
    pub default_ascent: f32,
    /// Ascent factor for detected serif families
    pub serif_ascent: f32,
    /// Symmetric vertical padding as a ratio of font size, enlarging the
    /// pointer hit-region without moving the rendered baseline
    pub padding_ratio: f32,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self {
            default_ascent: 0.85,
            serif_ascent: 0.89,
            padding_ratio: 0.20,
        }
    }
}

/// Host capability: measure the natural rendered width of text.
///
/// The measurement is taken once per box after insertion, used for the
/// width correction, then discarded.
pub trait WidthMeasurer {
    /// Natural width of `text` rendered in `font` at scale, in visual units.
    fn measure_rendered_width(&self, text: &str, font: &FontDescriptor) -> f32;
}

/// Host capability: font availability and advisory replacement fetch.
///
/// `request_family` is fire-and-forget network I/O with no success
/// contract; the materializer never awaits it and layout never depends on
/// its outcome.
pub trait FontSource {
    /// Whether the rendering surface can already shape this family.
    fn has_family(&self, family: &str) -> bool;

    /// Ask the host to fetch a replacement font by family name.
    fn request_family(&self, family: &str);
}

/// Deduplicates advisory font fetches for the lifetime of the application,
/// owned by the materializer rather than living in process-wide state.
#[derive(Debug, Default)]
pub struct FontRequestCache {
    requested: HashSet<String>,
}

impl FontRequestCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the advisory fetch once per family.
    pub fn request_once(&mut self, family: &str, source: &dyn FontSource) {
        if self.requested.insert(family.to_string()) {
            log::debug!("Requesting replacement font family {:?}", family);
            source.request_family(family);
        }
    }

    /// Number of distinct families requested so far.
    pub fn len(&self) -> usize {
        self.requested.len()
    }

    /// Whether no fetch has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

/// Strip a subsetting prefix (`ABCDEF+`) and style suffixes from a font
/// family name, leaving the bare family for lookup and fetching.
pub fn normalize_family(raw: &str) -> String {
    let name = match raw.split_once('+') {
        Some((prefix, rest))
            if prefix.len() == 6 && prefix.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            rest
        },
        _ => raw,
    };

    let base = name
        .split(|c| c == '-' || c == ',')
        .next()
        .unwrap_or(name)
        .trim();
    base.to_string()
}

/// Name-based serif detection for the ascent fallback.
pub fn is_serif_family(family: &str) -> bool {
    let lower = family.to_lowercase();
    if lower.contains("sans") {
        return false;
    }
    ["times", "georgia", "garamond", "book", "serif"]
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Resolve the ascent factor for a span: supplied metrics win, then the
/// serif constant, then the default.
pub fn resolve_ascent(
    hints: Option<&FontMetricHints>,
    family: Option<&str>,
    config: &MaterializeConfig,
) -> f32 {
    if let Some(ascent) = hints.and_then(|h| h.ascent) {
        if ascent.is_finite() && ascent > 0.0 {
            return ascent;
        }
    }
    match family {
        Some(name) if is_serif_family(name) => config.serif_ascent,
        _ => config.default_ascent,
    }
}

/// Place a layout box from a merged span's anchor. Pure.
pub fn materialize_anchor(span: &MergedSpan, ascent: f32, config: &MaterializeConfig) -> LayoutBox {
    let top = span.y_baseline - span.font_size * ascent;
    let pad = config.padding_ratio * span.font_size;

    LayoutBox {
        text: span.text.clone(),
        page_x: span.x,
        page_top: top,
        page_width: span.width,
        page_height: span.font_size,
        visual_top: top - pad,
        visual_height: span.font_size + 2.0 * pad,
        font: FontDescriptor {
            id: span.font_id.clone(),
            family: None,
            size: span.font_size,
        },
        horizontal_scale: span.horizontal_aspect,
        measured_width: None,
        source: span.source,
    }
}

/// Fold a live width measurement into a box. Pure.
///
/// The corrective factor `page_width / measured` stacks on the aspect
/// factor so the rendered text exactly spans the predicted width despite
/// font-substitution metric drift. A degenerate measurement leaves the box
/// unchanged.
pub fn correct_width(mut layout_box: LayoutBox, measured: f32) -> LayoutBox {
    if measured.is_finite() && measured > 0.0 {
        layout_box.horizontal_scale *= layout_box.page_width / measured;
        layout_box.measured_width = Some(measured);
    } else {
        log::warn!(
            "Ignoring degenerate width measurement {measured} for box {:?}",
            layout_box.text
        );
    }
    layout_box
}

/// Materializes one page's merged spans into layout boxes.
pub struct Materializer<'a> {
    config: MaterializeConfig,
    measurer: &'a dyn WidthMeasurer,
    fonts: &'a dyn FontSource,
    font_requests: &'a mut FontRequestCache,
}

impl<'a> Materializer<'a> {
    /// Create a materializer borrowing the host capabilities.
    pub fn new(
        config: MaterializeConfig,
        measurer: &'a dyn WidthMeasurer,
        fonts: &'a dyn FontSource,
        font_requests: &'a mut FontRequestCache,
    ) -> Self {
        Self {
            config,
            measurer,
            fonts,
            font_requests,
        }
    }

    /// Materialize spans in reading order.
    pub fn materialize(
        &mut self,
        spans: &[MergedSpan],
        font_hints: &HashMap<String, FontMetricHints>,
    ) -> Vec<LayoutBox> {
        spans
            .iter()
            .map(|span| self.materialize_span(span, font_hints.get(&span.font_id)))
            .collect()
    }

    fn materialize_span(
        &mut self,
        span: &MergedSpan,
        hints: Option<&FontMetricHints>,
    ) -> LayoutBox {
        let family = hints
            .and_then(|h| h.font_family.as_deref())
            .map(normalize_family);

        let ascent = resolve_ascent(hints, family.as_deref(), &self.config);
        let mut layout_box = materialize_anchor(span, ascent, &self.config);
        layout_box.font.family = family.clone();

        if let Some(name) = family.as_deref() {
            if !self.fonts.has_family(name) {
                self.font_requests.request_once(name, self.fonts);
            }
        }

        let measured = self
            .measurer
            .measure_rendered_width(&layout_box.text, &layout_box.font);
        correct_width(layout_box, measured)
    }
}
