//! Selection mapper - text ranges to page-space highlight rectangles.
//!
//! Given a selection range over the materialized boxes, emits one
//! [`SelectionRect`] per intersected box, interpolating partial coverage at
//! the boundary boxes by character-offset ratio. The union of the emitted
//! rects reconstructs the ragged highlight of a reading-order selection
//! without any single enclosing region.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::layout::LayoutBox;
use crate::selection::range::{AnchorNode, SelectionAnchor, SelectionRange};

/// A highlight rectangle in page space at scale = 1 — the unit persisted
/// as annotation geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl SelectionRect {
    /// View as a plain geometry rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Tunables for selection mapping.
#[derive(Debug, Clone, Copy)]
pub struct SelectionConfig {
    /// Multiplier on the measured visual width when it exceeds the
    /// predicted width; guards against sub-pixel rounding truncating
    /// end-of-line selections.
    pub width_buffer: f32,

    /// Vertical clearance, in visual units, required above the selection
    /// for the popup to anchor to its top edge.
    pub popup_clearance: f32,

    /// Coalescing window for selection-change notifications, milliseconds.
    pub debounce_ms: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            width_buffer: 1.01,
            popup_clearance: 60.0,
            debounce_ms: 300,
        }
    }
}

/// Map a selection range over a page's boxes to page-space rectangles.
///
/// `scale` is the scale the boxes were materialized at; emitted rects are
/// normalized to scale = 1. A range intersecting no boxes yields an empty
/// vec — "nothing to highlight", not a failure.
pub fn map_selection(
    range: &SelectionRange,
    boxes: &[LayoutBox],
    scale: f32,
    config: &SelectionConfig,
) -> Result<Vec<SelectionRect>> {
    if boxes.is_empty() || range.is_collapsed() {
        return Ok(Vec::new());
    }

    let range = range.normalized();
    if range.first_box() >= boxes.len() {
        return Err(Error::UnknownBox(range.first_box()));
    }
    if range.last_box() >= boxes.len() {
        return Err(Error::UnknownBox(range.last_box()));
    }

    let mut rects = Vec::new();

    for box_index in range.first_box()..=range.last_box() {
        let layout_box = &boxes[box_index];

        let start_ratio = if box_index == range.first_box() {
            boundary_ratio(&range.start, layout_box)
        } else {
            0.0
        };
        let end_ratio = if box_index == range.last_box() {
            boundary_ratio(&range.end, layout_box)
        } else {
            1.0
        };

        let start_ratio = start_ratio.clamp(0.0, 1.0);
        let end_ratio = end_ratio.clamp(0.0, 1.0);
        if end_ratio <= start_ratio {
            continue;
        }

        let effective_width = match layout_box.measured_width {
            Some(measured) => layout_box.page_width.max(measured * config.width_buffer),
            None => layout_box.page_width,
        };

        rects.push(SelectionRect {
            x: (layout_box.page_x + effective_width * start_ratio) / scale,
            y: layout_box.page_top / scale,
            width: effective_width * (end_ratio - start_ratio) / scale,
            height: layout_box.page_height / scale,
        });
    }

    log::trace!(
        "Mapped selection over boxes {}..={} to {} rects",
        range.first_box(),
        range.last_box(),
        rects.len()
    );
    Ok(rects)
}

/// Coverage ratio of a boundary anchor within a box's text.
fn boundary_ratio(anchor: &SelectionAnchor, layout_box: &LayoutBox) -> f32 {
    match anchor.node {
        AnchorNode::Text { .. } => {
            let chars = layout_box.char_count();
            if chars == 0 {
                0.0
            } else {
                anchor.offset as f32 / chars as f32
            }
        },
        // Boundary on the box element: before the text child (offset 0) or
        // after it.
        AnchorNode::Box { .. } => {
            if anchor.offset == 0 {
                0.0
            } else {
                1.0
            }
        },
    }
}

/// Bounding rectangle of a set of selection rects, if any.
pub fn selection_bounds(rects: &[SelectionRect]) -> Option<Rect> {
    let mut iter = rects.iter();
    let first = iter.next()?.as_rect();
    Some(iter.fold(first, |acc, r| acc.union(&r.as_rect())))
}

/// Edge of the selection a popup should attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEdge {
    /// Anchor above the selection's top edge
    Above,
    /// Anchor below the selection's bottom edge
    Below,
}

/// Pick the popup anchor for a selection.
///
/// Anchors to the bounding box's top edge when at least
/// `config.popup_clearance` of space exists above it inside the scroll
/// container; otherwise to the bottom edge, keeping the popup on-screen
/// above short pages. Inputs are in the container's visual space.
pub fn popup_anchor(
    bounds: &Rect,
    container_top: f32,
    config: &SelectionConfig,
) -> (Point, PopupEdge) {
    let clearance = bounds.top() - container_top;
    if clearance >= config.popup_clearance {
        (Point::new(bounds.center().x, bounds.top()), PopupEdge::Above)
    } else {
        (Point::new(bounds.center().x, bounds.bottom()), PopupEdge::Below)
    }
}
