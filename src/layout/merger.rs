//! Span merger - de-fragmentation of normalized items.
//!
//! Page descriptions break words into multiple runs for precise kerning and
//! positioning, causing fragmentation like "Intr oduction" instead of
//! "Introduction". A single left-to-right pass over the reading-ordered
//! items coalesces adjacent fragments on the same line into larger
//! contiguous spans, inferring the inter-word spaces the source format
//! never encodes.
//!
//! Merging never moves a span's anchor: the first item's x, baseline, font
//! size and font id are retained, and only `text` and `width` grow. All
//! merge predicates compare against the anchor, which is what makes the
//! pass idempotent on its own output.

use crate::layout::NormalizedItem;

/// A normalized item whose `text` and `width` absorbed zero or more
/// subsequent items. The geometric anchor is the first item's.
pub type MergedSpan = NormalizedItem;

/// Thresholds for the merge pass, as ratios of the anchor's font size
/// unless noted.
#[derive(Debug, Clone, Copy)]
pub struct MergeConfig {
    /// Maximum baseline difference for two items to share a line.
    pub line_tolerance_ratio: f32,

    /// Maximum font-size difference, in absolute units, for items to merge.
    pub font_size_tolerance: f32,

    /// How far backward the next item may start inside the current span
    /// before merging is refused.
    pub backward_overlap_ratio: f32,

    /// Gap ceiling above which items do not merge.
    ///
    /// The wide default deliberately bridges large inter-column gutters
    /// when column separation is not requested; [`MergeConfig::columns`]
    /// tightens it. Tunable — the default can silently join two
    /// independent columns into one line.
    pub max_gap_ratio: f32,

    /// Gap above which a single space character is inferred at the join,
    /// unless either side already carries boundary whitespace.
    pub space_gap_ratio: f32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            line_tolerance_ratio: 0.5,
            font_size_tolerance: 2.0,
            backward_overlap_ratio: 0.5,
            max_gap_ratio: 4.0,
            space_gap_ratio: 0.25,
        }
    }
}

impl MergeConfig {
    /// Configuration for column mode: a tight gap ceiling that refuses to
    /// bridge the gutter between columns.
    pub fn columns() -> Self {
        Self {
            max_gap_ratio: 1.5,
            ..Self::default()
        }
    }
}

/// Coalesce a reading-ordered item sequence into merged spans.
///
/// Single pass maintaining one accumulator span; a non-mergeable item
/// closes the current span and starts a new one.
pub fn merge_spans(items: Vec<NormalizedItem>, config: &MergeConfig) -> Vec<MergedSpan> {
    if items.is_empty() {
        return Vec::new();
    }

    let input_len = items.len();
    let mut merged: Vec<MergedSpan> = Vec::with_capacity(input_len);
    let mut current: Option<MergedSpan> = None;

    for item in items {
        let Some(mut span) = current.take() else {
            current = Some(item);
            continue;
        };

        if can_merge(&span, &item, config) {
            absorb(&mut span, item, config);
            current = Some(span);
        } else {
            merged.push(span);
            current = Some(item);
        }
    }

    if let Some(last) = current {
        merged.push(last);
    }

    log::debug!("Merged spans: {} items -> {} spans", input_len, merged.len());
    merged
}

/// Whether `next` may be absorbed into the accumulator `current`.
///
/// All predicates compare against the accumulator's anchor fields.
fn can_merge(current: &MergedSpan, next: &NormalizedItem, config: &MergeConfig) -> bool {
    let font_size = current.font_size;

    let same_line =
        (next.y_baseline - current.y_baseline).abs() < config.line_tolerance_ratio * font_size;
    if !same_line {
        return false;
    }

    let gap = next.x - current.right();
    if gap <= -config.backward_overlap_ratio * font_size {
        return false;
    }

    // Isolated space glyphs merge regardless of gap ceiling or font
    // identity; breaking a span on one fragments the line for no reason.
    if next.is_whitespace() {
        return true;
    }

    let same_font = next.font_id == current.font_id
        && (next.font_size - current.font_size).abs() <= config.font_size_tolerance;
    if !same_font {
        return false;
    }

    gap < config.max_gap_ratio * font_size
}

/// Extend `current` over `next`: concatenate text (inferring a space where
/// the gap demands one) and recompute width from the fixed anchor.
fn absorb(current: &mut MergedSpan, next: NormalizedItem, config: &MergeConfig) {
    let gap = next.x - current.right();

    let needs_space = gap > config.space_gap_ratio * current.font_size
        && !has_boundary_whitespace(&current.text, &next.text);

    #[cfg(feature = "debug-span-merging")]
    log::trace!(
        "Merging {:?} + {:?} (gap={:.2}, space={})",
        current.text,
        next.text,
        gap,
        needs_space
    );

    if needs_space {
        current.text.push(' ');
    }
    current.text.push_str(&next.text);

    // Anchor x is untouched; width may only grow.
    current.width = current.width.max(next.right() - current.x);
}

/// Check if the join between two texts already carries whitespace.
#[inline]
fn has_boundary_whitespace(prev: &str, next: &str) -> bool {
    prev.chars().last().is_some_and(|c| c.is_whitespace())
        || next.chars().next().is_some_and(|c| c.is_whitespace())
}
