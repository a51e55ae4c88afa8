//! Wireframe session: render, then act on elements by reference id.
//!
//! Reference ids stay valid until the next [`WireframeSession::wireframe`]
//! call. Requests are serialized, since capturing a snapshot while an action
//! mutates the document would race.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::collaborator::{ActionTarget, BrowserAction, DocumentBackend, ScrollDirection};
use crate::error::WireframeError;
use crate::label::resolve_label;
use crate::render::WireframeRenderer;
use crate::snapshot::{Node, Rect, RefId, Role, Snapshot, Viewport};

/// One tagged element of the last wireframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefEntry {
    pub ref_id: RefId,
    pub role: Role,
    pub label: String,
    pub bounds: Rect,
}

impl RefEntry {
    fn from_node(ref_id: RefId, node: &Node) -> Self {
        let text = node.visible_text();
        let label = if !text.is_empty() {
            text
        } else {
            resolve_label(node)
                .or_else(|| {
                    ["selected-text", "value", "placeholder"]
                        .iter()
                        .find_map(|name| node.attr(name))
                        .map(str::to_string)
                })
                .unwrap_or_default()
        };
        Self {
            ref_id,
            role: node.role,
            label,
            bounds: node.bounds,
        }
    }
}

#[derive(Default)]
struct SessionState {
    /// Tagged snapshot from the last render.
    last: Option<Snapshot>,
}

/// Drives a [`DocumentBackend`] through wireframes and ref-addressed actions.
pub struct WireframeSession<B: DocumentBackend> {
    backend: B,
    renderer: WireframeRenderer,
    default_viewport: Viewport,
    state: Mutex<SessionState>,
}

impl<B: DocumentBackend> WireframeSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            renderer: WireframeRenderer::default(),
            default_viewport: Viewport::default(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn with_renderer(mut self, renderer: WireframeRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Viewport used when a snapshot does not carry its own.
    pub fn with_default_viewport(mut self, viewport: Viewport) -> Self {
        self.default_viewport = viewport;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Capture the document, render it and remember the tagged snapshot.
    pub async fn wireframe(&self) -> Result<String, WireframeError> {
        let mut state = self.state.lock().await;
        let (wireframe, snapshot) = self.capture_and_render().await?;
        state.last = Some(snapshot);
        Ok(wireframe)
    }

    async fn capture_and_render(&self) -> Result<(String, Snapshot), WireframeError> {
        let mut snapshot = self.backend.capture_render_tree().await?;
        let viewport = snapshot.viewport.unwrap_or(self.default_viewport);
        let wireframe = {
            let mut query = self.backend.occlusion_query(&snapshot)?;
            self.renderer.render(&mut snapshot, viewport, query.as_mut())?
        };
        info!(
            refs = snapshot.tagged_nodes().len(),
            lines = wireframe.lines().count(),
            "rendered wireframe"
        );
        Ok((wireframe, snapshot))
    }

    /// Tagged elements of the last wireframe, in id order.
    pub async fn refs(&self) -> Vec<RefEntry> {
        let state = self.state.lock().await;
        let Some(snapshot) = state.last.as_ref() else {
            return Vec::new();
        };
        let mut entries: Vec<RefEntry> = snapshot
            .tagged_nodes()
            .into_iter()
            .filter_map(|node| node.ref_id.map(|ref_id| RefEntry::from_node(ref_id, node)))
            .collect();
        entries.sort_by_key(|entry| entry.ref_id);
        entries
    }

    /// Resolve a reference id into an action target, rendering first if no
    /// wireframe has been produced yet.
    pub async fn resolve(&self, ref_id: u32) -> Result<ActionTarget, WireframeError> {
        let mut state = self.state.lock().await;
        self.resolve_locked(&mut state, ref_id).await
    }

    async fn resolve_locked(
        &self,
        state: &mut SessionState,
        ref_id: u32,
    ) -> Result<ActionTarget, WireframeError> {
        if state.last.is_none() {
            let (_, snapshot) = self.capture_and_render().await?;
            state.last = Some(snapshot);
        }
        let ref_id = RefId(ref_id);
        let node = state
            .last
            .as_ref()
            .and_then(|snapshot| snapshot.node_by_ref(ref_id))
            .ok_or(WireframeError::UnknownRef(ref_id.0))?;
        Ok(ActionTarget {
            ref_id,
            node_id: node.id.clone(),
            selector: ref_id.selector(),
            center: node.bounds.center(),
        })
    }

    async fn act_on<F>(&self, ref_id: u32, build: F) -> Result<(), WireframeError>
    where
        F: FnOnce(ActionTarget) -> BrowserAction,
    {
        let mut state = self.state.lock().await;
        let target = self.resolve_locked(&mut state, ref_id).await?;
        self.dispatch(build(target)).await
    }

    async fn dispatch(&self, action: BrowserAction) -> Result<(), WireframeError> {
        debug!(
            action = action.name(),
            target = ?action.target().map(|t| t.ref_id.0),
            "dispatching"
        );
        self.backend.perform(action).await
    }

    pub async fn click(&self, ref_id: u32) -> Result<(), WireframeError> {
        self.act_on(ref_id, |target| BrowserAction::Click { target }).await
    }

    pub async fn dblclick(&self, ref_id: u32) -> Result<(), WireframeError> {
        self.act_on(ref_id, |target| BrowserAction::DoubleClick { target }).await
    }

    pub async fn hover(&self, ref_id: u32) -> Result<(), WireframeError> {
        self.act_on(ref_id, |target| BrowserAction::Hover { target }).await
    }

    pub async fn check(&self, ref_id: u32) -> Result<(), WireframeError> {
        self.act_on(ref_id, |target| BrowserAction::Check { target }).await
    }

    pub async fn uncheck(&self, ref_id: u32) -> Result<(), WireframeError> {
        self.act_on(ref_id, |target| BrowserAction::Uncheck { target }).await
    }

    /// Clear the field and set its value.
    pub async fn fill(&self, ref_id: u32, text: &str) -> Result<(), WireframeError> {
        let text = text.to_string();
        self.act_on(ref_id, |target| BrowserAction::Fill { target, text }).await
    }

    /// Type keystrokes into the field.
    pub async fn type_text(&self, ref_id: u32, text: &str) -> Result<(), WireframeError> {
        let text = text.to_string();
        self.act_on(ref_id, |target| BrowserAction::Type { target, text }).await
    }

    pub async fn select(&self, ref_id: u32, value: &str) -> Result<(), WireframeError> {
        let value = value.to_string();
        self.act_on(ref_id, |target| BrowserAction::Select { target, value }).await
    }

    pub async fn press(&self, key: &str) -> Result<(), WireframeError> {
        let _state = self.state.lock().await;
        self.dispatch(BrowserAction::Press {
            key: key.to_string(),
        })
        .await
    }

    pub async fn scroll(
        &self,
        direction: ScrollDirection,
        pixels: f64,
    ) -> Result<(), WireframeError> {
        let _state = self.state.lock().await;
        self.dispatch(BrowserAction::Scroll { direction, pixels }).await
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
