//! Selection mapping: host text ranges to page-space highlight geometry.

pub mod debounce;
pub mod mapper;
pub mod range;

pub use debounce::SelectionDebouncer;
pub use mapper::{
    map_selection, popup_anchor, selection_bounds, PopupEdge, SelectionConfig, SelectionRect,
};
pub use range::{AnchorNode, SelectionAnchor, SelectionRange};
