//! Column-aware reading order for two-column and double-page layouts.

use std::cmp::Ordering;

use crate::layout::NormalizedItem;

use super::{baseline_cmp, OrderingContext, ReadingOrderStrategy};

/// Reading order that partitions by the page's horizontal midpoint.
///
/// An item whose center lies in the left half always reads before one in
/// the right half, overriding vertical position. Within one side the
/// baseline comparison applies. Required for double-page spreads, where
/// left- and right-page baselines align and a purely vertical sort would
/// interleave the two sides.
pub struct ColumnAwareStrategy {
    line_tolerance_ratio: f32,
}

impl ColumnAwareStrategy {
    /// Create a strategy with the given same-line tolerance ratio.
    pub fn new(line_tolerance_ratio: f32) -> Self {
        Self {
            line_tolerance_ratio,
        }
    }
}

impl ReadingOrderStrategy for ColumnAwareStrategy {
    fn apply(&self, items: &mut [NormalizedItem], context: &OrderingContext) {
        let midpoint = context.page_width / 2.0;

        items.sort_by(|a, b| {
            let a_right = a.center_x() >= midpoint;
            let b_right = b.center_x() >= midpoint;
            match (a_right, b_right) {
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                _ => baseline_cmp(a, b, self.line_tolerance_ratio),
            }
        });

        log::trace!(
            "Ordered {} items on page {} (column split at x={})",
            items.len(),
            context.page_number,
            midpoint
        );
    }

    fn name(&self) -> &'static str {
        "ColumnAwareStrategy"
    }
}
