//! In-memory paint-order hit testing over a captured snapshot.

use std::collections::HashSet;

use crate::collaborator::OcclusionQuery;
use crate::error::WireframeError;
use crate::snapshot::{Node, NodeId, Rect, Snapshot};

#[derive(Debug, Clone)]
struct PaintEntry {
    id: NodeId,
    bounds: Rect,
    /// Own z-index, or the nearest ancestor's when `auto`.
    z_index: i32,
    parent: Option<usize>,
    hidden: bool,
}

/// [`OcclusionQuery`] backed by recorded geometry.
///
/// The topmost node at a point is the painted node containing it with the
/// highest effective z-index; ties go to the later node in document order.
#[derive(Debug, Clone, Default)]
pub struct PaintOrderIndex {
    entries: Vec<PaintEntry>,
}

impl PaintOrderIndex {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut index = Self::default();
        if let Some(root) = &snapshot.root {
            index.push(root, None, 0, false);
        }
        index
    }

    fn push(&mut self, node: &Node, parent: Option<usize>, inherited_z: i32, hidden: bool) {
        let position = self.entries.len();
        let z_index = node.style.z_index.unwrap_or(inherited_z);
        let subtree_hidden = hidden || node.hides_subtree();
        self.entries.push(PaintEntry {
            id: node.id.clone(),
            bounds: node.bounds,
            z_index,
            parent,
            hidden: subtree_hidden || node.is_self_hidden(),
        });
        for child in &node.children {
            self.push(child, Some(position), z_index, subtree_hidden);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OcclusionQuery for PaintOrderIndex {
    fn topmost_at(&self, x: f64, y: f64) -> Result<Option<NodeId>, WireframeError> {
        let hit = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.hidden && e.bounds.is_renderable() && e.bounds.contains(x, y))
            .max_by_key(|(order, e)| (e.z_index, *order))
            .map(|(_, e)| e.id.clone());
        Ok(hit)
    }

    fn suppress(&mut self, ids: &[NodeId]) -> Result<(), WireframeError> {
        let ids: HashSet<&NodeId> = ids.iter().collect();
        let mut suppressed = vec![false; self.entries.len()];
        // Parents precede children, so one forward sweep hides whole subtrees.
        for position in 0..self.entries.len() {
            let inherited = self.entries[position]
                .parent
                .is_some_and(|parent| suppressed[parent]);
            if inherited || ids.contains(&self.entries[position].id) {
                suppressed[position] = true;
                self.entries[position].hidden = true;
            }
        }
        Ok(())
    }
}
