//! Layout reconstruction: normalized items, span merging, materialization.

pub mod item;
pub mod materializer;
pub mod merger;
pub mod separators;

pub use item::{NormalizedItem, SourceKind};
pub use materializer::{
    correct_width, materialize_anchor, FontDescriptor, FontRequestCache, FontSource, LayoutBox,
    MaterializeConfig, Materializer, WidthMeasurer,
};
pub use merger::{merge_spans, MergeConfig, MergedSpan};
pub use separators::{page_plain_text, separator_between, SeparatorConfig};
