//! Geometry extractor - glyph runs to normalized items.
//!
//! Converts one page's raw glyph runs into [`NormalizedItem`]s in the
//! page's visual coordinate space. This is a pure data transform: no
//! rendering side effects, no ordering guarantees on the output beyond the
//! input's emission order.

use crate::content::{RawGlyphRun, Viewport};
use crate::layout::{NormalizedItem, SourceKind};

/// Fallback advance-width estimate as a fraction of font size per
/// character, used when the page description declares no width.
const WIDTH_HEURISTIC_PER_CHAR: f32 = 0.5;

/// Normalize a page's glyph runs against a viewport.
///
/// For each run the 2×3 transform is decomposed into font height, font
/// width and rotation; the baseline position is the viewport transform
/// applied to the run origin. Runs whose matrices contain non-finite
/// entries are dropped and the page continues.
pub fn normalize_runs(runs: &[RawGlyphRun], viewport: &Viewport) -> Vec<NormalizedItem> {
    let mut items = Vec::with_capacity(runs.len());

    for run in runs {
        match normalize_run(run, viewport) {
            Some(item) => items.push(item),
            None => {
                log::warn!(
                    "Dropping glyph run with non-finite transform (text={:?})",
                    run.text
                );
            },
        }
    }

    log::debug!("Normalized {} of {} glyph runs", items.len(), runs.len());
    items
}

/// Normalize a single run, or `None` when its transform is unusable.
fn normalize_run(run: &RawGlyphRun, viewport: &Viewport) -> Option<NormalizedItem> {
    if !run.transform.is_finite() {
        return None;
    }

    let font_height = run.transform.font_height();
    let font_width = run.transform.font_width();
    let rotation = run.transform.rotation();

    let baseline = viewport.transform_point(run.transform.origin());
    let font_size = font_height * viewport.scale;

    let horizontal_aspect = if font_height > 0.0 && (font_width / font_height).is_finite() {
        font_width / font_height
    } else {
        1.0
    };

    let width = match run.declared_width {
        Some(w) => w * viewport.scale,
        None => run.text.chars().count() as f32 * font_size * WIDTH_HEURISTIC_PER_CHAR,
    };

    Some(NormalizedItem {
        text: run.text.clone(),
        x: baseline.x,
        y_baseline: baseline.y,
        width,
        font_size,
        font_id: run.font_id.clone(),
        horizontal_aspect,
        rotation,
        source: SourceKind::Glyph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Transform;

    fn make_run(text: &str, size: f32, x: f32, y: f32, width: Option<f32>) -> RawGlyphRun {
        RawGlyphRun {
            text: text.to_string(),
            transform: Transform::new(size, 0.0, 0.0, size, x, y),
            declared_width: width,
            font_id: "F1".to_string(),
        }
    }

    #[test]
    fn test_normalize_upright_run() {
        let vp = Viewport::axis_aligned(1.5, 900.0, 1200.0);
        let items = normalize_runs(&[make_run("Hello", 12.0, 100.0, 200.0, Some(30.0))], &vp);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.text, "Hello");
        assert_eq!(item.x, 150.0);
        assert_eq!(item.y_baseline, 300.0);
        assert_eq!(item.font_size, 18.0);
        assert_eq!(item.width, 45.0);
        assert_eq!(item.horizontal_aspect, 1.0);
        assert_eq!(item.rotation, 0.0);
        assert_eq!(item.source, SourceKind::Glyph);
    }

    #[test]
    fn test_width_heuristic_when_undeclared() {
        let vp = Viewport::axis_aligned(1.0, 600.0, 800.0);
        let items = normalize_runs(&[make_run("abcd", 10.0, 0.0, 0.0, None)], &vp);

        // 4 chars * 10pt * 0.5
        assert_eq!(items[0].width, 20.0);
    }

    #[test]
    fn test_condensed_run_aspect() {
        let vp = Viewport::axis_aligned(1.0, 600.0, 800.0);
        let run = RawGlyphRun {
            text: "narrow".to_string(),
            transform: Transform::new(6.0, 0.0, 0.0, 12.0, 0.0, 0.0),
            declared_width: Some(20.0),
            font_id: "F2".to_string(),
        };
        let items = normalize_runs(&[run], &vp);
        assert_eq!(items[0].font_size, 12.0);
        assert_eq!(items[0].horizontal_aspect, 0.5);
    }

    #[test]
    fn test_degenerate_height_defaults_aspect() {
        let vp = Viewport::axis_aligned(1.0, 600.0, 800.0);
        let run = RawGlyphRun {
            text: "flat".to_string(),
            transform: Transform::new(8.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            declared_width: Some(10.0),
            font_id: "F1".to_string(),
        };
        let items = normalize_runs(&[run], &vp);
        assert_eq!(items[0].horizontal_aspect, 1.0);
        assert_eq!(items[0].font_size, 0.0);
    }

    #[test]
    fn test_non_finite_transform_dropped_silently() {
        let vp = Viewport::axis_aligned(1.0, 600.0, 800.0);
        let bad = RawGlyphRun {
            text: "broken".to_string(),
            transform: Transform::new(f32::NAN, 0.0, 0.0, 12.0, 0.0, 0.0),
            declared_width: None,
            font_id: "F1".to_string(),
        };
        let good = make_run("fine", 12.0, 0.0, 0.0, Some(24.0));

        let items = normalize_runs(&[bad, good], &vp);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "fine");
    }

    #[test]
    fn test_rotated_run_keeps_rotation() {
        let vp = Viewport::axis_aligned(1.0, 600.0, 800.0);
        let run = RawGlyphRun {
            text: "vertical".to_string(),
            transform: Transform::new(0.0, 12.0, -12.0, 0.0, 50.0, 60.0),
            declared_width: Some(40.0),
            font_id: "F1".to_string(),
        };
        let items = normalize_runs(&[run], &vp);
        assert!((items[0].rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((items[0].font_size - 12.0).abs() < 1e-4);
    }
}
