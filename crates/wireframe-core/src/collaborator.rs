//! Collaborator capabilities supplied by the browser-automation layer.
//!
//! The core never talks to a browser. It receives a captured [`Snapshot`],
//! asks an [`OcclusionQuery`] which node is topmost at a point, and hands
//! [`BrowserAction`]s back to a [`DocumentBackend`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WireframeError;
use crate::snapshot::{NodeId, RefId, Snapshot};

/// Point-sampling primitive (`elementFromPoint`).
///
/// Only meaningful for points inside the real viewport. Calls are blocking
/// from the core's point of view.
pub trait OcclusionQuery: Send + Sync {
    /// Topmost node at `(x, y)` in viewport space, if any.
    fn topmost_at(&self, x: f64, y: f64) -> Result<Option<NodeId>, WireframeError>;

    /// Hide nodes the overlay pass classified as backdrops.
    ///
    /// Live documents apply this as `display: none`, so later point queries
    /// see through them.
    fn suppress(&mut self, _ids: &[NodeId]) -> Result<(), WireframeError> {
        Ok(())
    }
}

/// Scroll direction for [`BrowserAction::Scroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Wheel delta for a scroll of `pixels`.
    pub fn delta(&self, pixels: f64) -> (f64, f64) {
        match self {
            ScrollDirection::Up => (0.0, -pixels),
            ScrollDirection::Down => (0.0, pixels),
            ScrollDirection::Left => (-pixels, 0.0),
            ScrollDirection::Right => (pixels, 0.0),
        }
    }
}

/// Default scroll distance in pixels.
pub const DEFAULT_SCROLL_PIXELS: f64 = 100.0;

/// Resolved element for a ref-addressed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTarget {
    pub ref_id: RefId,
    pub node_id: NodeId,
    /// `[data-ref-id="<n>"]`
    pub selector: String,
    /// Center of the element's box, for coordinate-based clicks.
    pub center: (f64, f64),
}

/// Primitive action executed by the automation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BrowserAction {
    Click { target: ActionTarget },
    DoubleClick { target: ActionTarget },
    Hover { target: ActionTarget },
    Fill { target: ActionTarget, text: String },
    Type { target: ActionTarget, text: String },
    Select { target: ActionTarget, value: String },
    Check { target: ActionTarget },
    Uncheck { target: ActionTarget },
    Press { key: String },
    Scroll { direction: ScrollDirection, pixels: f64 },
}

impl BrowserAction {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserAction::Click { .. } => "click",
            BrowserAction::DoubleClick { .. } => "dblclick",
            BrowserAction::Hover { .. } => "hover",
            BrowserAction::Fill { .. } => "fill",
            BrowserAction::Type { .. } => "type",
            BrowserAction::Select { .. } => "select",
            BrowserAction::Check { .. } => "check",
            BrowserAction::Uncheck { .. } => "uncheck",
            BrowserAction::Press { .. } => "press",
            BrowserAction::Scroll { .. } => "scroll",
        }
    }

    pub fn target(&self) -> Option<&ActionTarget> {
        match self {
            BrowserAction::Click { target }
            | BrowserAction::DoubleClick { target }
            | BrowserAction::Hover { target }
            | BrowserAction::Fill { target, .. }
            | BrowserAction::Type { target, .. }
            | BrowserAction::Select { target, .. }
            | BrowserAction::Check { target }
            | BrowserAction::Uncheck { target } => Some(target),
            BrowserAction::Press { .. } | BrowserAction::Scroll { .. } => None,
        }
    }
}

/// The live document behind a wireframe session.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Capture the current render tree with geometry and styles resolved.
    async fn capture_render_tree(&self) -> Result<Snapshot, WireframeError>;

    /// Point-query oracle for the document as captured in `snapshot`.
    fn occlusion_query(
        &self,
        snapshot: &Snapshot,
    ) -> Result<Box<dyn OcclusionQuery + '_>, WireframeError>;

    /// Execute a primitive action.
    async fn perform(&self, action: BrowserAction) -> Result<(), WireframeError>;
}
