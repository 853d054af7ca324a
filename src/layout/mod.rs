//! Caption layout: greedy word wrap plus anchored vertical stacking.
//!
//! Layout never touches pixels. Widths come from a measure callback supplied by the rendering
//! surface, since they depend on the active font metrics.

pub(crate) mod wrap;

pub use wrap::{
    CaptionAnchor, CaptionBlock, LineEdge, PlacedLine, layout_caption, place_lines, wrap_caption,
};
