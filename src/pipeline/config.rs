//! Unified configuration for the text-layer pipeline.
//!
//! Every tunable threshold in the engine lives here, grouped by the stage
//! that consumes it. [`LayoutProfile`] provides ready-made configurations
//! for the common page layouts.

use crate::ink::StrokeConfig;
use crate::layout::{MaterializeConfig, MergeConfig, SeparatorConfig};
use crate::selection::SelectionConfig;

/// Reading-order policy settings.
#[derive(Debug, Clone, Copy)]
pub struct ReadingOrderConfig {
    /// Partition items by the page's horizontal midpoint before any
    /// vertical comparison (two-column documents, double-page spreads).
    pub column_mode: bool,

    /// Baseline difference treated as the same visual line, as a ratio of
    /// the smaller font size. Larger values falsely merge distinct lines;
    /// smaller values miss same-line pairs on slightly kerned baselines.
    pub line_tolerance_ratio: f32,
}

impl Default for ReadingOrderConfig {
    fn default() -> Self {
        Self {
            column_mode: false,
            line_tolerance_ratio: 0.4,
        }
    }
}

/// Configuration for the whole text-layer pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLayerConfig {
    /// Reading-order policy
    pub reading_order: ReadingOrderConfig,
    /// Span-merge thresholds
    pub merge: MergeConfig,
    /// Box placement tunables
    pub materialize: MaterializeConfig,
    /// Separator insertion thresholds
    pub separators: SeparatorConfig,
    /// Selection mapping tunables
    pub selection: SelectionConfig,
    /// Stroke extraction tunables
    pub stroke: StrokeConfig,
}

/// Page layout classification with tuned extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutProfile {
    /// One continuous column per page; wide merge tolerance bridges
    /// mid-line gaps.
    SinglePage,

    /// Two columns or a double-page spread; the midpoint partition keeps
    /// reading order from interleaving the sides, and the tight merge
    /// ceiling refuses to bridge the gutter.
    DoublePage,
}

impl LayoutProfile {
    /// Create the configuration for this profile.
    pub fn create_config(&self) -> TextLayerConfig {
        match self {
            Self::SinglePage => TextLayerConfig::default(),
            Self::DoublePage => TextLayerConfig {
                reading_order: ReadingOrderConfig {
                    column_mode: true,
                    line_tolerance_ratio: 0.4,
                },
                merge: MergeConfig::columns(),
                ..TextLayerConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_column() {
        let config = TextLayerConfig::default();
        assert!(!config.reading_order.column_mode);
        assert_eq!(config.merge.max_gap_ratio, 4.0);
        assert_eq!(config.reading_order.line_tolerance_ratio, 0.4);
    }

    #[test]
    fn test_double_page_profile() {
        let config = LayoutProfile::DoublePage.create_config();
        assert!(config.reading_order.column_mode);
        assert_eq!(config.merge.max_gap_ratio, 1.5);
        // Unrelated tunables stay at their defaults.
        assert_eq!(config.selection.width_buffer, 1.01);
        assert_eq!(config.stroke.pad, 5.0);
    }
}
