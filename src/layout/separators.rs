//! Separator insertion between consecutive spans.
//!
//! Reproduces natural reading flow when the materialized boxes are copied
//! out as plain text: line breaks at vertical jumps, paragraph breaks at
//! column jumps, spaces at word-sized horizontal gaps.

use crate::layout::MergedSpan;

/// Thresholds for separator insertion.
#[derive(Debug, Clone, Copy)]
pub struct SeparatorConfig {
    /// Vertical gap, as a ratio of font size, above which a line break is
    /// inserted.
    pub line_break_ratio: f32,

    /// Upward jump, in visual units, that signals a column change in
    /// column mode and produces a paragraph break.
    pub column_jump_threshold: f32,

    /// Horizontal gap, as a ratio of font size, above which a space is
    /// inserted.
    pub space_ratio: f32,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            line_break_ratio: 0.5,
            column_jump_threshold: 100.0,
            space_ratio: 0.1,
        }
    }
}

/// Separator to emit between two consecutive spans in reading order.
pub fn separator_between(
    current: &MergedSpan,
    next: &MergedSpan,
    column_mode: bool,
    config: &SeparatorConfig,
) -> &'static str {
    let dy = next.y_baseline - current.y_baseline;

    // A large upward jump in column mode means the next span starts a new
    // column; it is also a vertical gap, so this rule is tested first.
    if column_mode && dy < -config.column_jump_threshold {
        return "\n\n";
    }

    if dy.abs() > config.line_break_ratio * current.font_size {
        return "\n";
    }

    let hgap = next.x - current.right();
    if hgap > config.space_ratio * current.font_size {
        " "
    } else {
        ""
    }
}

/// Concatenate a page's spans into plain text with separators, the form
/// handed to the clipboard on native copy.
pub fn page_plain_text(spans: &[MergedSpan], column_mode: bool, config: &SeparatorConfig) -> String {
    let mut text = String::new();
    for (i, span) in spans.iter().enumerate() {
        if i > 0 {
            text.push_str(separator_between(&spans[i - 1], span, column_mode, config));
        }
        text.push_str(&span.text);
    }
    text
}
