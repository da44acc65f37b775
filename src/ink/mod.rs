//! Stroke-to-text extraction.
//!
//! A free-hand stroke drawn over a page picks up the text beneath it: the
//! stroke's padded bounding box is intersected with the page's normalized
//! items (glyph- or OCR-sourced alike) and the covered text is concatenated
//! in reading order. The result is attached to the stroke annotation,
//! making hand-drawn marks searchable and copyable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{to_page_space, Point, Rect};
use crate::layout::NormalizedItem;
use crate::utils::safe_float_cmp;

/// An ordered free-hand point sequence in page space (scale = 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke points in draw order
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create a stroke from its points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Axis-aligned bounding box of the points, or `None` for fewer than
    /// two points (a degenerate stroke selects nothing).
    pub fn bounds(&self) -> Option<Rect> {
        if self.points.len() < 2 {
            return None;
        }
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::from_points(min_x, min_y, max_x, max_y))
    }
}

/// Tunables for stroke text extraction.
#[derive(Debug, Clone, Copy)]
pub struct StrokeConfig {
    /// Padding added to the stroke bounds on all sides, in page-space
    /// units, tolerating imprecise hand strokes.
    pub pad: f32,

    /// Vertical tolerance, in page-space units, within which included
    /// items count as one line when ordering.
    pub line_tolerance: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            pad: 5.0,
            line_tolerance: 10.0,
        }
    }
}

/// Extract the text covered by a stroke.
///
/// `items` are the page's normalized items at `scale`; the stroke is in
/// page space. Items are included under strict axis-aligned overlap with
/// the padded stroke bounds, ordered by (y, x) with line grouping, and
/// concatenated without separators — word-level fragments already carry
/// their internal spacing. Degenerate input yields an empty string, never
/// an error.
pub fn extract_stroke_text(
    stroke: &Stroke,
    items: &[NormalizedItem],
    scale: f32,
    config: &StrokeConfig,
) -> String {
    let Some(bounds) = stroke.bounds() else {
        return String::new();
    };
    if items.is_empty() {
        return String::new();
    }

    let probe = bounds.expanded(config.pad);

    let mut hits: Vec<(Rect, &str)> = items
        .iter()
        .filter_map(|item| {
            let item_bounds = to_page_space(&item.bounds(), scale);
            probe
                .intersects(&item_bounds)
                .then_some((item_bounds, item.text.as_str()))
        })
        .collect();

    hits.sort_by(|(a, _), (b, _)| {
        if (a.y - b.y).abs() <= config.line_tolerance {
            safe_float_cmp(a.x, b.x)
        } else {
            safe_float_cmp(a.y, b.y)
        }
    });

    log::trace!("Stroke over {:?} covered {} items", probe, hits.len());
    hits.into_iter().map(|(_, text)| text).collect()
}

/// A stroke annotation with its attached text payload, the shape handed to
/// the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeAnnotation {
    /// Stable identifier, generated at creation
    pub id: Uuid,
    /// Page the stroke was drawn on (0-indexed)
    pub page: u32,
    /// The stroke geometry in page space
    pub stroke: Stroke,
    /// Text extracted from beneath the stroke, possibly empty
    pub text: String,
}

impl StrokeAnnotation {
    /// Create an annotation for a stroke and its extracted text.
    pub fn new(page: u32, stroke: Stroke, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            page,
            stroke,
            text,
        }
    }
}
