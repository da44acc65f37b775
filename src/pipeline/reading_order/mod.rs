//! Reading-order strategies for normalized items.
//!
//! This module provides pluggable strategies for ordering a page's
//! normalized items into a deterministic reading sequence.
//!
//! # Available Strategies
//!
//! - [`BaselineStrategy`]: baseline-grouped top-to-bottom, left-to-right
//! - [`ColumnAwareStrategy`]: partitions by the page's horizontal midpoint
//!   before any vertical comparison (two-column and double-page layouts)

mod baseline;
mod column;

pub use baseline::BaselineStrategy;
pub use column::ColumnAwareStrategy;

use std::cmp::Ordering;

use crate::layout::NormalizedItem;
use crate::pipeline::config::ReadingOrderConfig;
use crate::utils::safe_float_cmp;

/// Trait for determining reading order of normalized items.
///
/// Naive top-to-bottom ordering interleaves left- and right-column content
/// whenever baselines happen to align, breaking selection order across the
/// gutter; strategies exist to make that policy explicit and swappable.
pub trait ReadingOrderStrategy: Send + Sync {
    /// Sort items into reading order, in place.
    fn apply(&self, items: &mut [NormalizedItem], context: &OrderingContext);

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;
}

/// Context information for reading-order determination.
#[derive(Debug, Clone, Default)]
pub struct OrderingContext {
    /// Page number (0-indexed), for logging only.
    pub page_number: u32,

    /// Page width in the same visual space as the items; the column
    /// strategy splits at half this value.
    pub page_width: f32,
}

impl OrderingContext {
    /// Create a context for a page of the given visual width.
    pub fn new(page_number: u32, page_width: f32) -> Self {
        Self {
            page_number,
            page_width,
        }
    }
}

/// Compare two items by baseline position.
///
/// Items whose baselines differ by less than `line_tolerance_ratio` times
/// the smaller font size are treated as the same visual line and compared
/// by x ascending; otherwise y ascending wins (y grows downward, so a
/// smaller y reads earlier).
pub(crate) fn baseline_cmp(
    a: &NormalizedItem,
    b: &NormalizedItem,
    line_tolerance_ratio: f32,
) -> Ordering {
    let tolerance = line_tolerance_ratio * a.font_size.min(b.font_size);
    if (a.y_baseline - b.y_baseline).abs() < tolerance {
        safe_float_cmp(a.x, b.x)
    } else {
        safe_float_cmp(a.y_baseline, b.y_baseline)
    }
}

/// Create a reading-order strategy based on configuration.
pub fn create_strategy(config: &ReadingOrderConfig) -> Box<dyn ReadingOrderStrategy> {
    if config.column_mode {
        Box::new(ColumnAwareStrategy::new(config.line_tolerance_ratio))
    } else {
        Box::new(BaselineStrategy::new(config.line_tolerance_ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SourceKind;

    fn make_item(x: f32, y: f32, font_size: f32) -> NormalizedItem {
        NormalizedItem {
            text: "t".to_string(),
            x,
            y_baseline: y,
            width: 10.0,
            font_size,
            font_id: "F1".to_string(),
            horizontal_aspect: 1.0,
            rotation: 0.0,
            source: SourceKind::Glyph,
        }
    }

    #[test]
    fn test_same_line_orders_by_x() {
        let a = make_item(50.0, 100.0, 12.0);
        let b = make_item(10.0, 102.0, 12.0);
        // |Δy| = 2 < 0.4 * 12 = 4.8 → same line, x decides
        assert_eq!(baseline_cmp(&a, &b, 0.4), Ordering::Greater);
        assert_eq!(baseline_cmp(&b, &a, 0.4), Ordering::Less);
    }

    #[test]
    fn test_different_lines_order_by_y() {
        let a = make_item(200.0, 100.0, 12.0);
        let b = make_item(0.0, 120.0, 12.0);
        assert_eq!(baseline_cmp(&a, &b, 0.4), Ordering::Less);
    }

    #[test]
    fn test_tolerance_uses_smaller_font() {
        // Footnote next to heading: tolerance follows the 8pt item.
        let small = make_item(0.0, 100.0, 8.0);
        let large = make_item(50.0, 103.5, 24.0);
        // |Δy| = 3.5 > 0.4 * 8 = 3.2 → different lines
        assert_eq!(baseline_cmp(&small, &large, 0.4), Ordering::Less);
    }

    #[test]
    fn test_factory_picks_strategy() {
        let simple = create_strategy(&ReadingOrderConfig {
            column_mode: false,
            line_tolerance_ratio: 0.4,
        });
        assert_eq!(simple.name(), "BaselineStrategy");

        let column = create_strategy(&ReadingOrderConfig {
            column_mode: true,
            line_tolerance_ratio: 0.4,
        });
        assert_eq!(column.name(), "ColumnAwareStrategy");
    }
}
