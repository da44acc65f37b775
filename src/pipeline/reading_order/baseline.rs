//! Baseline-grouped top-to-bottom, left-to-right reading order.

use crate::layout::NormalizedItem;

use super::{baseline_cmp, OrderingContext, ReadingOrderStrategy};

/// Baseline-grouped reading order without column handling.
///
/// Items whose baselines fall within the line tolerance are read left to
/// right; otherwise the upper baseline reads first. Works well for
/// single-column documents.
pub struct BaselineStrategy {
    line_tolerance_ratio: f32,
}

impl BaselineStrategy {
    /// Create a strategy with the given same-line tolerance ratio.
    pub fn new(line_tolerance_ratio: f32) -> Self {
        Self {
            line_tolerance_ratio,
        }
    }
}

impl ReadingOrderStrategy for BaselineStrategy {
    fn apply(&self, items: &mut [NormalizedItem], context: &OrderingContext) {
        items.sort_by(|a, b| baseline_cmp(a, b, self.line_tolerance_ratio));
        log::trace!(
            "Ordered {} items on page {} (baseline)",
            items.len(),
            context.page_number
        );
    }

    fn name(&self) -> &'static str {
        "BaselineStrategy"
    }
}
