//! Normalized text items - the single intermediate representation.
//!
//! Every text source (embedded glyph runs, recognized OCR words) is reduced
//! to [`NormalizedItem`] before ordering, merging and materialization, so
//! selection and stroke extraction behave identically regardless of where
//! the text came from.

use crate::geometry::Rect;

/// Origin of a normalized item's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Embedded glyph run from the page description
    #[default]
    Glyph,
    /// Word box recognized by the OCR engine
    Ocr,
}

/// A positioned text item in the page's current visual coordinate space.
///
/// Coordinates are scale-dependent: every consumer must know the scale the
/// item was produced at. Items are page-scoped and scale-scoped — they are
/// discarded and recomputed whenever the page's visual scale changes.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    /// Text content
    pub text: String,
    /// Left edge in visual space
    pub x: f32,
    /// Baseline y-position in visual space (y grows downward)
    pub y_baseline: f32,
    /// Horizontal extent in visual space
    pub width: f32,
    /// Effective font size in visual units
    pub font_size: f32,
    /// Resource identifier of the item's font
    pub font_id: String,
    /// Ratio of the font's horizontal to vertical unit extent (1.0 when
    /// the transform is uniform or degenerate)
    pub horizontal_aspect: f32,
    /// Rotation in radians
    pub rotation: f32,
    /// Where the text came from
    pub source: SourceKind,
}

impl NormalizedItem {
    /// Axis-aligned bounds of the item in visual space.
    ///
    /// The vertical extent is the font size above the baseline, uniform for
    /// both glyph- and OCR-sourced items.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x,
            self.y_baseline - self.font_size,
            self.width,
            self.font_size,
        )
    }

    /// Horizontal center, used for column-side classification.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Right edge in visual space.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether the item's text is entirely whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(text: &str, x: f32, y_baseline: f32, width: f32, font_size: f32) -> NormalizedItem {
        NormalizedItem {
            text: text.to_string(),
            x,
            y_baseline,
            width,
            font_size,
            font_id: "F1".to_string(),
            horizontal_aspect: 1.0,
            rotation: 0.0,
            source: SourceKind::Glyph,
        }
    }

    #[test]
    fn test_bounds_extend_upward_from_baseline() {
        let item = make_item("Hello", 10.0, 100.0, 30.0, 12.0);
        let bounds = item.bounds();
        assert_eq!(bounds, Rect::new(10.0, 88.0, 30.0, 12.0));
    }

    #[test]
    fn test_center_and_right() {
        let item = make_item("Hello", 10.0, 100.0, 30.0, 12.0);
        assert_eq!(item.center_x(), 25.0);
        assert_eq!(item.right(), 40.0);
    }

    #[test]
    fn test_whitespace_detection() {
        assert!(make_item(" ", 0.0, 0.0, 3.0, 12.0).is_whitespace());
        assert!(make_item(" \t ", 0.0, 0.0, 3.0, 12.0).is_whitespace());
        assert!(!make_item(" a ", 0.0, 0.0, 3.0, 12.0).is_whitespace());
        // The empty string vacuously counts as whitespace-only
        assert!(make_item("", 0.0, 0.0, 0.0, 12.0).is_whitespace());
    }
}
