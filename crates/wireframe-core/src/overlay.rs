//! Overlay suppression.
//!
//! Full-viewport, high z-index containers with (almost) no text are modal
//! backdrops. They block point queries for the real content beneath them, so
//! they are suppressed before tagging. Containers with real text are treated
//! as genuine dialogs and left alone. Runs on every render; new overlays can
//! appear between actions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::snapshot::{Node, NodeId, Role, Viewport};

/// Thresholds for classifying a container as a backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRule {
    pub min_z_index: i32,
    /// Fraction of the viewport width and height the box must cover.
    pub min_coverage: f64,
    /// Backdrops carry fewer visible characters than this.
    pub max_text_len: usize,
}

impl Default for OverlayRule {
    fn default() -> Self {
        Self {
            min_z_index: 100,
            min_coverage: 0.9,
            max_text_len: 5,
        }
    }
}

/// Marks backdrop containers as suppressed.
#[derive(Debug, Clone)]
pub struct OverlaySuppressor {
    rule: OverlayRule,
    viewport: Viewport,
}

impl OverlaySuppressor {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            rule: OverlayRule::default(),
            viewport,
        }
    }

    pub fn with_rule(mut self, rule: OverlayRule) -> Self {
        self.rule = rule;
        self
    }

    /// Suppress every backdrop under `root`. Returns the suppressed ids in
    /// document order.
    pub fn suppress(&self, root: &mut Node) -> Vec<NodeId> {
        let mut suppressed = Vec::new();
        self.visit(root, &mut suppressed);
        if !suppressed.is_empty() {
            debug!(count = suppressed.len(), "suppressed overlay backdrops");
        }
        suppressed
    }

    fn visit(&self, node: &mut Node, suppressed: &mut Vec<NodeId>) {
        // Nothing inside a hidden subtree has a box to block with.
        if node.hides_subtree() {
            return;
        }
        if self.is_backdrop(node) {
            node.suppressed = true;
            suppressed.push(node.id.clone());
            return;
        }
        for child in &mut node.children {
            self.visit(child, suppressed);
        }
    }

    /// Whether `node` matches the backdrop rule.
    pub fn is_backdrop(&self, node: &Node) -> bool {
        if node.role != Role::Container || node.style.is_display_none() {
            return false;
        }
        if node.style.z_index_or_zero() < self.rule.min_z_index {
            return false;
        }
        let covers_width = node.bounds.width >= self.viewport.width * self.rule.min_coverage;
        let covers_height = node.bounds.height >= self.viewport.height * self.rule.min_coverage;
        if !(covers_width && covers_height) {
            return false;
        }
        node.visible_text().chars().count() < self.rule.max_text_len
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
