//! SnapshotBackend: a recorded render tree behind the DocumentBackend seam.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};
use wireframe_core::{
    ActionTarget, BrowserAction, DocumentBackend, Node, OcclusionQuery, PaintOrderIndex, Role,
    Snapshot, WireframeError,
};

use crate::error::BackendError;

/// Document backend over an in-memory snapshot.
///
/// Captures return a copy of the current document. Actions are applied to it
/// the way a browser would change the page: fills set `value`, scrolls shift
/// every box, and so on. Every performed action is kept in a log.
pub struct SnapshotBackend {
    document: RwLock<Snapshot>,
    actions: Mutex<Vec<BrowserAction>>,
    closed: AtomicBool,
}

impl SnapshotBackend {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            document: RwLock::new(snapshot),
            actions: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Parse a snapshot from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, BackendError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, BackendError> {
        let json = std::fs::read_to_string(path)?;
        let backend = Self::from_json_str(&json)?;
        info!("Loaded snapshot from {}", path.display());
        Ok(backend)
    }

    /// Current state of the document.
    pub fn document(&self) -> Snapshot {
        self.document.read().clone()
    }

    /// Actions performed so far, oldest first.
    pub fn actions(&self) -> Vec<BrowserAction> {
        self.actions.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Refuse all further captures and actions.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> Result<(), BackendError> {
        if self.is_closed() {
            return Err(BackendError::Closed);
        }
        Ok(())
    }

    fn apply(&self, action: &BrowserAction) -> Result<(), BackendError> {
        let mut document = self.document.write();

        if let BrowserAction::Scroll { direction, pixels } = action {
            let (dx, dy) = direction.delta(*pixels);
            if let Some(root) = document.root.as_mut() {
                root.walk_mut(&mut |node| {
                    node.bounds.translate(dx, dy);
                    for run in &mut node.text_runs {
                        for rect in &mut run.rects {
                            rect.translate(dx, dy);
                        }
                    }
                });
            }
            return Ok(());
        }

        let Some(target) = action.target() else {
            return Ok(());
        };
        let node = find_target(&mut document, target)?;

        match action {
            BrowserAction::Fill { text, .. } => {
                ensure_editable(node)?;
                node.attributes.insert("value".to_string(), text.clone());
            }
            BrowserAction::Type { text, .. } => {
                ensure_editable(node)?;
                node.attributes
                    .entry("value".to_string())
                    .or_default()
                    .push_str(text);
            }
            BrowserAction::Select { value, .. } => {
                if node.role != Role::Select {
                    return Err(BackendError::ActionFailed(format!(
                        "{} is not a select element",
                        node.id
                    )));
                }
                node.attributes.insert("value".to_string(), value.clone());
                node.attributes
                    .insert("selected-text".to_string(), value.clone());
            }
            BrowserAction::Check { .. } => {
                node.attributes
                    .insert("checked".to_string(), "true".to_string());
            }
            BrowserAction::Uncheck { .. } => {
                node.attributes.remove("checked");
            }
            _ => {}
        }
        Ok(())
    }
}

fn find_target<'a>(
    document: &'a mut Snapshot,
    target: &ActionTarget,
) -> Result<&'a mut Node, BackendError> {
    document
        .root
        .as_mut()
        .and_then(|root| root.find_mut(&target.node_id))
        .ok_or_else(|| BackendError::ElementNotFound(target.selector.clone()))
}

fn ensure_editable(node: &Node) -> Result<(), BackendError> {
    if matches!(node.role, Role::Input | Role::Textarea) {
        Ok(())
    } else {
        Err(BackendError::ActionFailed(format!(
            "{} is not an editable element",
            node.id
        )))
    }
}

#[async_trait]
impl DocumentBackend for SnapshotBackend {
    async fn capture_render_tree(&self) -> Result<Snapshot, WireframeError> {
        self.ensure_open()?;
        Ok(self.document())
    }

    fn occlusion_query(
        &self,
        snapshot: &Snapshot,
    ) -> Result<Box<dyn OcclusionQuery + '_>, WireframeError> {
        self.ensure_open()?;
        Ok(Box::new(PaintOrderIndex::from_snapshot(snapshot)))
    }

    async fn perform(&self, action: BrowserAction) -> Result<(), WireframeError> {
        self.ensure_open()?;
        debug!(action = action.name(), "applying action to snapshot");
        self.apply(&action)?;
        self.actions.lock().push(action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireframe_core::{NodeId, Rect, RefId, ScrollDirection};

    fn backend() -> SnapshotBackend {
        let root = Node::new("body", Role::Container, Rect::new(0.0, 0.0, 400.0, 300.0))
            .with_child(Node::new("name", Role::Input, Rect::new(10.0, 10.0, 200.0, 30.0)))
            .with_child(Node::new("size", Role::Select, Rect::new(10.0, 50.0, 100.0, 30.0)))
            .with_child(
                Node::new("ok", Role::Button, Rect::new(10.0, 90.0, 60.0, 30.0))
                    .with_text("OK", Rect::new(20.0, 96.0, 16.0, 18.0)),
            );
        SnapshotBackend::new(Snapshot::new(root))
    }

    fn target(id: &str) -> ActionTarget {
        ActionTarget {
            ref_id: RefId(1),
            node_id: NodeId::from(id),
            selector: RefId(1).selector(),
            center: (0.0, 0.0),
        }
    }

    fn node(backend: &SnapshotBackend, id: &str) -> Node {
        backend
            .document()
            .root
            .unwrap()
            .find(&NodeId::from(id))
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fill_then_type() {
        let backend = backend();
        backend
            .perform(BrowserAction::Fill {
                target: target("name"),
                text: "Ada".to_string(),
            })
            .await
            .unwrap();
        backend
            .perform(BrowserAction::Type {
                target: target("name"),
                text: " L".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(node(&backend, "name").attr("value"), Some("Ada L"));
        assert_eq!(backend.actions().len(), 2);
    }

    #[tokio::test]
    async fn test_fill_button_fails() {
        let backend = backend();
        let err = backend
            .perform(BrowserAction::Fill {
                target: target("ok"),
                text: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WireframeError::ActionFailed(_)));
        assert!(backend.actions().is_empty());
    }

    #[tokio::test]
    async fn test_select_sets_display_text() {
        let backend = backend();
        backend
            .perform(BrowserAction::Select {
                target: target("size"),
                value: "Large".to_string(),
            })
            .await
            .unwrap();
        let size = node(&backend, "size");
        assert_eq!(size.attr("selected-text"), Some("Large"));
        assert_eq!(size.attr("value"), Some("Large"));
    }

    #[tokio::test]
    async fn test_check_and_uncheck() {
        let backend = backend();
        backend
            .perform(BrowserAction::Check { target: target("name") })
            .await
            .unwrap();
        assert_eq!(node(&backend, "name").attr("checked"), Some("true"));
        backend
            .perform(BrowserAction::Uncheck { target: target("name") })
            .await
            .unwrap();
        assert_eq!(node(&backend, "name").attr("checked"), None);
    }

    #[tokio::test]
    async fn test_missing_target() {
        let backend = backend();
        let err = backend
            .perform(BrowserAction::Click { target: target("gone") })
            .await
            .unwrap_err();
        assert!(matches!(err, WireframeError::ActionFailed(_)));
    }

    #[tokio::test]
    async fn test_scroll_shifts_boxes_and_text() {
        let backend = backend();
        backend
            .perform(BrowserAction::Scroll {
                direction: ScrollDirection::Down,
                pixels: 50.0,
            })
            .await
            .unwrap();
        let ok = node(&backend, "ok");
        assert_eq!(ok.bounds.top, 40.0);
        assert_eq!(ok.text_runs[0].rects[0].top, 46.0);
    }

    #[tokio::test]
    async fn test_closed_backend_is_unavailable() {
        let backend = backend();
        backend.close();
        let err = backend.capture_render_tree().await.unwrap_err();
        assert!(matches!(err, WireframeError::CollaboratorUnavailable(_)));
    }

    #[test]
    fn test_invalid_json() {
        let result = SnapshotBackend::from_json_str("{\"root\": 3}");
        assert!(matches!(result, Err(BackendError::InvalidSnapshot(_))));
    }
}
