//! Reference tagging.
//!
//! Interactive nodes are selected in two passes over document order:
//!
//! 1. **Semantic**: anchors, buttons, form fields, `role=button`, nodes with an
//!    explicit click handler, and `tabindex="0"` nodes.
//! 2. **Heuristic**: div/span-like containers with `cursor: pointer` and direct
//!    text, neither inside nor wrapping an already selected node.
//!
//! Every candidate must pass the visibility check at its own center. Selected
//! nodes are then numbered from 1 in document order. All previous ids are
//! cleared first, so tagging an unchanged tree twice gives the same result.

use std::collections::HashMap;

use tracing::debug;

use crate::error::WireframeError;
use crate::snapshot::{DocumentIndex, IndexedNode, Node, NodeId, RefId};
use crate::visibility::VisibilityResolver;

/// Assigns ordinal reference ids to visible interactive nodes.
pub struct ReferenceTagger<'r, 'q> {
    resolver: &'r VisibilityResolver<'q>,
}

impl<'r, 'q> ReferenceTagger<'r, 'q> {
    pub fn new(resolver: &'r VisibilityResolver<'q>) -> Self {
        Self { resolver }
    }

    /// Clear and reassign reference ids under `root`. Returns the number of
    /// tagged nodes.
    pub fn tag(&self, root: &mut Node) -> Result<usize, WireframeError> {
        root.walk_mut(&mut |node| node.ref_id = None);

        let assignments = {
            let index = DocumentIndex::build(root);
            self.select(&index)?
        };

        let count = assignments.len();
        root.walk_mut(&mut |node| {
            if let Some(ref_id) = assignments.get(&node.id) {
                node.ref_id = Some(*ref_id);
            }
        });
        debug!(count, "tagged interactive elements");
        Ok(count)
    }

    fn select(&self, index: &DocumentIndex<'_>) -> Result<HashMap<NodeId, RefId>, WireframeError> {
        let mut selected = vec![false; index.len()];

        for (position, entry) in index.iter() {
            if is_semantic_candidate(entry) && self.resolver.is_node_visible(index, position)? {
                selected[position] = true;
            }
        }

        for (position, entry) in index.iter() {
            if selected[position] || !is_heuristic_candidate(entry) {
                continue;
            }
            // Tagging never nests, in either direction.
            if index.ancestors(position).any(|p| selected[p]) {
                continue;
            }
            let wraps_selected = (position + 1..index.len())
                .any(|p| selected[p] && index.is_ancestor_or_self(position, p));
            if wraps_selected {
                continue;
            }
            if self.resolver.is_node_visible(index, position)? {
                selected[position] = true;
            }
        }

        let mut assignments = HashMap::new();
        let mut next = 1;
        for (position, entry) in index.iter() {
            if !selected[position] {
                continue;
            }
            // Duplicate ids from the collaborator keep their first ordinal.
            if assignments.contains_key(&entry.node.id) {
                continue;
            }
            assignments.insert(entry.node.id.clone(), RefId(next));
            next += 1;
        }
        Ok(assignments)
    }
}

fn is_semantic_candidate(entry: &IndexedNode<'_>) -> bool {
    let node = entry.node;
    node.role.is_semantic_interactive() || node.has_click_handler() || node.is_tab_stop()
}

fn is_heuristic_candidate(entry: &IndexedNode<'_>) -> bool {
    let node = entry.node;
    node.role.is_container() && node.style.has_pointer_cursor() && node.has_direct_text()
}

#[cfg(test)]
#[path = "tagger_tests.rs"]
mod tests;
