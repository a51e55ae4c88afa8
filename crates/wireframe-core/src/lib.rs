//! # Wireframe Core
//!
//! Renders a captured web page into a fixed-pitch ASCII wireframe. Every
//! visible interactive element is tagged with a small reference id that later
//! actions use as their target.
//!
//! ## Pipeline
//!
//! ```text
//! Snapshot ──► OverlaySuppressor ──► ReferenceTagger ──► LayoutEngine ──► splice_labels ──► serialize_rows
//!                                          │                  │
//!                                          └── VisibilityResolver ──► OcclusionQuery (collaborator)
//! ```
//!
//! ## Example output
//!
//! ```text
//!  +-[1]LOGIN--+
//!  +--------+
//!  [2]+email------------------+
//!  +-----------------------+
//! ```
//!
//! The browser itself is out of scope: a [`DocumentBackend`] captures the render
//! tree and executes primitive actions, and an [`OcclusionQuery`] answers
//! point queries. [`PaintOrderIndex`] is an in-memory query over recorded
//! geometry.

mod collaborator;
mod error;
mod label;
mod overlay;
mod paint_index;
mod render;
mod serialize;
mod session;
mod splice;
mod tagger;
mod visibility;

pub mod grid;
pub mod snapshot;

pub use collaborator::{
    ActionTarget, BrowserAction, DocumentBackend, OcclusionQuery, ScrollDirection,
    DEFAULT_SCROLL_PIXELS,
};
pub use error::WireframeError;
pub use grid::{CharMetrics, Grid, GridPoint, Layout, LayoutEngine};
pub use label::{media_placeholder, resolve_label};
pub use overlay::{OverlayRule, OverlaySuppressor};
pub use paint_index::PaintOrderIndex;
pub use render::{render_wireframe, RenderOptions, WireframeRenderer};
pub use serialize::{parse_ref_ids, serialize_rows};
pub use session::{RefEntry, WireframeSession};
pub use snapshot::{MediaKind, Node, NodeId, Rect, RefId, Role, Snapshot, Style, TextRun, Viewport};
pub use splice::{splice_labels, PendingLabel, RowBuffer};
pub use tagger::ReferenceTagger;
pub use visibility::VisibilityResolver;
