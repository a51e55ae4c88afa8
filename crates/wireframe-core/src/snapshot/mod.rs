//! Snapshot model: the render tree handed over by the document collaborator.
//!
//! A snapshot is captured fresh for every wireframe request. Geometry and
//! computed styles are already resolved by the collaborator; nothing in this
//! module computes layout. The only mutable fields are `ref_id`, written by the
//! reference tagger, and `suppressed`, written by the overlay suppressor.

mod snapshot_node;
mod snapshot_tree;
mod snapshot_types;

pub use snapshot_node::collapse_whitespace;
pub use snapshot_tree::{Ancestors, DocumentIndex, IndexedNode};
pub use snapshot_types::{
    MediaKind, Node, NodeId, Rect, RefId, Role, Snapshot, Style, TextRun, Viewport,
    OVERFLOW_BUFFER,
};

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
