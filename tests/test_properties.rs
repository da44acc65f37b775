//! Property tests for the engine's geometric guarantees.

use proptest::prelude::*;

use textlayer::geometry::{to_page_space, to_screen_space, Point, Rect};
use textlayer::ink::{extract_stroke_text, Stroke, StrokeConfig};
use textlayer::layout::{
    correct_width, materialize_anchor, merge_spans, MaterializeConfig, MergeConfig, NormalizedItem,
    SourceKind,
};
use textlayer::selection::{map_selection, SelectionAnchor, SelectionConfig, SelectionRange};

// ============================================================================
// Generators
// ============================================================================

const FONT_SIZE: f32 = 12.0;

fn make_item(text: &str, x: f32, y: f32, width: f32, font_id: &str) -> NormalizedItem {
    NormalizedItem {
        text: text.to_string(),
        x,
        y_baseline: y,
        width,
        font_size: FONT_SIZE,
        font_id: font_id.to_string(),
        horizontal_aspect: 1.0,
        rotation: 0.0,
        source: SourceKind::Glyph,
    }
}

/// Reading-ordered item sequences: lines of fragments with arbitrary gaps,
/// occasional whitespace fragments and font changes.
fn arb_items() -> impl Strategy<Value = Vec<NormalizedItem>> {
    prop::collection::vec(
        (
            prop::bool::weighted(0.2), // start a new line
            -4.0f32..70.0,             // gap to the previous fragment
            1.0f32..50.0,              // fragment width
            prop::bool::weighted(0.15), // whitespace-only fragment
            prop::bool::weighted(0.2), // alternate font
        ),
        0..14,
    )
    .prop_map(|specs| {
        let mut items = Vec::with_capacity(specs.len());
        let mut right = 0.0f32;
        let mut y = 100.0f32;
        for (newline, gap, width, is_space, alt_font) in specs {
            if newline {
                y += 20.0;
                right = 0.0;
            }
            let x = right + gap;
            let text = if is_space { " " } else { "ab" };
            let font = if alt_font { "F2" } else { "F1" };
            items.push(make_item(text, x, y, width, font));
            right = x + width;
        }
        items
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Page → screen → page is the identity for any positive scale.
    #[test]
    fn prop_scale_round_trip(
        x in -2000.0f32..2000.0,
        y in -2000.0f32..2000.0,
        width in 0.0f32..800.0,
        height in 0.0f32..800.0,
        scale in 0.05f32..16.0,
    ) {
        let rect = Rect::new(x, y, width, height);
        let back = to_page_space(&to_screen_space(&rect, scale), scale);

        let tolerance = |v: f32| 1e-3 * (1.0 + v.abs());
        prop_assert!((back.x - rect.x).abs() <= tolerance(rect.x));
        prop_assert!((back.y - rect.y).abs() <= tolerance(rect.y));
        prop_assert!((back.width - rect.width).abs() <= tolerance(rect.width));
        prop_assert!((back.height - rect.height).abs() <= tolerance(rect.height));
    }

    /// Re-running the merger on its own output changes nothing.
    #[test]
    fn prop_merge_idempotent(items in arb_items()) {
        let config = MergeConfig::default();
        let once = merge_spans(items, &config);
        let twice = merge_spans(once.clone(), &config);
        prop_assert_eq!(once, twice);
    }

    /// Merging in column mode is idempotent too.
    #[test]
    fn prop_merge_idempotent_columns(items in arb_items()) {
        let config = MergeConfig::columns();
        let once = merge_spans(items, &config);
        let twice = merge_spans(once.clone(), &config);
        prop_assert_eq!(once, twice);
    }

    /// A merged span never starts after nor ends before its inputs.
    #[test]
    fn prop_merge_covers_inputs(items in arb_items()) {
        let config = MergeConfig::default();
        let max_right = items.iter().map(|i| i.right()).fold(f32::MIN, f32::max);
        let min_x = items.iter().map(|i| i.x).fold(f32::MAX, f32::min);
        let count = items.len();

        let spans = merge_spans(items, &config);
        prop_assert!(spans.len() <= count);
        if count > 0 {
            let span_min = spans.iter().map(|s| s.x).fold(f32::MAX, f32::min);
            let span_max = spans.iter().map(|s| s.right()).fold(f32::MIN, f32::max);
            // An absorbed fragment may start up to the backward-overlap
            // allowance left of its span's anchor; beyond that, the
            // leftmost input must itself be an anchor.
            prop_assert!(span_min <= min_x + config.backward_overlap_ratio * FONT_SIZE + 1e-3);
            prop_assert!(span_max >= max_right - 1e-3);
        }
    }

    /// Every emitted selection rect stays inside its box's page-space
    /// bounds, widened only by the 1% visual-width buffer.
    #[test]
    fn prop_selection_containment(
        widths in prop::collection::vec(5.0f32..120.0, 1..5),
        text_len in 1usize..15,
        measure_factor in 0.3f32..2.0,
        start_offset in 0usize..20,
        end_offset in 0usize..20,
        scale in 0.25f32..4.0,
    ) {
        let config = SelectionConfig::default();
        let materialize = MaterializeConfig::default();

        let mut boxes = Vec::new();
        let mut x = 10.0f32;
        for width in &widths {
            let span = make_item(&"x".repeat(text_len), x, 100.0, *width, "F1");
            let layout_box = materialize_anchor(&span, 0.85, &materialize);
            boxes.push(correct_width(layout_box, width * measure_factor));
            x += width + 8.0;
        }

        let last = boxes.len() - 1;
        let range = SelectionRange::new(
            SelectionAnchor::text(0, start_offset),
            SelectionAnchor::text(last, end_offset),
        );

        let rects = map_selection(&range, &boxes, scale, &config).unwrap();

        // Union of allowed regions in page space.
        let allowed: Vec<Rect> = boxes
            .iter()
            .map(|b| {
                let effective = b
                    .measured_width
                    .map(|m| b.page_width.max(m * config.width_buffer))
                    .unwrap_or(b.page_width);
                to_page_space(
                    &Rect::new(b.page_x, b.page_top, effective, b.page_height),
                    scale,
                )
            })
            .collect();

        for rect in &rects {
            let r = rect.as_rect();
            let inside = allowed.iter().any(|a| a.expanded(1e-3).contains(&r));
            prop_assert!(inside, "rect {:?} escapes all boxes", r);
        }
    }

    /// A stroke that overlaps nothing extracts nothing; a stroke fully
    /// containing an item extracts exactly its text.
    #[test]
    fn prop_ink_overlap_soundness(
        x in 0.0f32..400.0,
        y in 20.0f32..400.0,
        width in 5.0f32..80.0,
    ) {
        let config = StrokeConfig::default();
        let items = vec![make_item("covered", x, y, width, "F1")];
        let bounds = items[0].bounds();

        let containing = Stroke::new(vec![
            Point::new(bounds.left() - 1.0, bounds.top() - 1.0),
            Point::new(bounds.right() + 1.0, bounds.bottom() + 1.0),
        ]);
        prop_assert_eq!(
            extract_stroke_text(&containing, &items, 1.0, &config),
            "covered"
        );

        // Beyond the right edge by more than the pad.
        let disjoint = Stroke::new(vec![
            Point::new(bounds.right() + config.pad + 1.0, bounds.top()),
            Point::new(bounds.right() + config.pad + 40.0, bounds.bottom()),
        ]);
        prop_assert_eq!(extract_stroke_text(&disjoint, &items, 1.0, &config), "");
    }
}
