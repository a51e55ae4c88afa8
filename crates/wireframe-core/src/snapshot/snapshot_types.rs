//! Snapshot type definitions: Viewport, Rect, Style, Role, TextRun, Node, Snapshot.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Extra pixels below the viewport that are still captured.
///
/// Normalization can push high z-index content just below the fold; the
/// capture band is `viewport.height + OVERFLOW_BUFFER`.
pub const OVERFLOW_BUFFER: f64 = 200.0;

/// Opaque node identity, stable across snapshots of the same live document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Reference id assigned to an interactive node. 1-based, decimal, no gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefId(pub u32);

impl RefId {
    /// The `[n]` label spliced into the wireframe.
    pub fn label(&self) -> String {
        format!("[{}]", self.0)
    }

    /// Selector the action collaborator uses to find the tagged element.
    pub fn selector(&self) -> String {
        format!("[data-ref-id=\"{}\"]", self.0)
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height of the capture band.
    pub fn capture_height(&self, overflow_buffer: f64) -> f64 {
        self.height + overflow_buffer
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Pixel rectangle in viewport coordinates. May be negative or off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Subset of the computed style the wireframe cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,
    pub cursor: String,
    /// `None` for `z-index: auto`.
    pub z_index: Option<i32>,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
            cursor: "auto".to_string(),
            z_index: None,
            background_color: None,
            background_image: None,
        }
    }
}

/// Semantic classification of a node, resolved by the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Anchor,
    Button,
    Input,
    Textarea,
    Select,
    GenericRoleButton,
    ClickableContainer,
    Container,
    #[default]
    Other,
}

/// Replaced media element the wireframe shows as a text placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Img,
    Svg,
    Video,
    Canvas,
}

/// One contiguous text node and the line fragments it was rendered into.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    /// One rect per rendered line fragment, in reading order.
    #[serde(default)]
    pub rects: Vec<Rect>,
}

/// One element of the rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "box")]
    pub bounds: Rect,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Direct text children only; descendants carry their own runs.
    #[serde(default)]
    pub text_runs: Vec<TextRun>,
    #[serde(default)]
    pub children: Vec<Node>,
    /// Set when the node is an `img`, `svg`, `video` or `canvas` element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<RefId>,
    /// Set by the overlay suppressor; behaves like `display: none`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub suppressed: bool,
}

/// One capture of the render tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Viewport reported by the collaborator, if it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    /// Document body. `None` when the document has no content node yet.
    #[serde(default)]
    pub root: Option<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
