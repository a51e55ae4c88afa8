//! Rect geometry, style and role predicates, and Node helpers.

use super::{MediaKind, Node, NodeId, Rect, RefId, Role, Snapshot, Style, TextRun, Viewport};

/// Attributes that mark an explicit click handler on a non-semantic node.
const CLICK_HANDLER_ATTRIBUTES: [&str; 2] = ["onclick", "data-click-handler"];

/// Fold runs of whitespace into single spaces and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Get the center point of this rect.
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Finite coordinates and a strictly positive size.
    pub fn is_renderable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Check if a point is inside this rect.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Whether any part of the rect overlaps `[0, viewport.width)` horizontally
    /// and `[0, capture_height)` vertically.
    pub fn overlaps_capture_band(&self, viewport: &Viewport, capture_height: f64) -> bool {
        self.right() > 0.0
            && self.left < viewport.width
            && self.bottom() > 0.0
            && self.top < capture_height
    }

    /// Shift the rect by a scroll delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.left -= dx;
        self.top -= dy;
    }
}

impl Style {
    pub fn is_display_none(&self) -> bool {
        self.display.eq_ignore_ascii_case("none")
    }

    pub fn is_visibility_hidden(&self) -> bool {
        let v = self.visibility.to_ascii_lowercase();
        v == "hidden" || v == "collapse"
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity <= 0.0
    }

    pub fn is_inline(&self) -> bool {
        self.display.eq_ignore_ascii_case("inline")
    }

    pub fn has_pointer_cursor(&self) -> bool {
        self.cursor.eq_ignore_ascii_case("pointer")
    }

    /// `z-index: auto` counts as 0.
    pub fn z_index_or_zero(&self) -> i32 {
        self.z_index.unwrap_or(0)
    }
}

impl Role {
    /// Roles tagged by the semantic pass.
    pub fn is_semantic_interactive(&self) -> bool {
        matches!(
            self,
            Role::Anchor
                | Role::Button
                | Role::Input
                | Role::Textarea
                | Role::Select
                | Role::GenericRoleButton
        )
    }

    /// Native form controls whose content is rendered from value/placeholder.
    pub fn is_form_field(&self) -> bool {
        matches!(self, Role::Input | Role::Textarea | Role::Select)
    }

    /// Roles that receive a rectangle outline when tagged.
    pub fn is_bordered_control(&self) -> bool {
        matches!(
            self,
            Role::Input | Role::Textarea | Role::Select | Role::Button
        )
    }

    /// Roles the normalization stylesheet upper-cases.
    pub fn is_uppercased(&self) -> bool {
        matches!(self, Role::Anchor | Role::Button | Role::GenericRoleButton)
    }

    /// div/span-like roles eligible for the heuristic clickable pass.
    pub fn is_container(&self) -> bool {
        matches!(self, Role::Container | Role::ClickableContainer)
    }
}

impl Node {
    /// Create a node with default style and no content.
    pub fn new(id: impl Into<String>, role: Role, bounds: Rect) -> Self {
        Self {
            id: NodeId::new(id),
            bounds,
            style: Style::default(),
            role,
            attributes: Default::default(),
            text_runs: Vec::new(),
            children: Vec::new(),
            media: None,
            ref_id: None,
            suppressed: false,
        }
    }

    /// Add a single-line text run rendered at `rect`.
    pub fn with_text(mut self, text: impl Into<String>, rect: Rect) -> Self {
        self.text_runs.push(TextRun {
            text: text.into(),
            rects: vec![rect],
        });
        self
    }

    /// Add a text run wrapped over several line rects.
    pub fn with_text_lines(mut self, text: impl Into<String>, rects: Vec<Rect>) -> Self {
        self.text_runs.push(TextRun {
            text: text.into(),
            rects,
        });
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_media(mut self, kind: MediaKind) -> Self {
        self.media = Some(kind);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value, ignoring blank values.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// The node itself is not painted.
    pub fn is_self_hidden(&self) -> bool {
        self.hides_subtree() || self.style.is_visibility_hidden()
    }

    /// Nothing inside this node is painted.
    pub fn hides_subtree(&self) -> bool {
        self.suppressed || self.style.is_display_none() || self.style.is_transparent()
    }

    pub fn has_click_handler(&self) -> bool {
        CLICK_HANDLER_ATTRIBUTES
            .iter()
            .any(|name| self.attributes.contains_key(*name))
    }

    pub fn is_tab_stop(&self) -> bool {
        self.attributes
            .get("tabindex")
            .is_some_and(|v| v.trim() == "0")
    }

    /// At least one direct text child with non-whitespace content.
    pub fn has_direct_text(&self) -> bool {
        self.text_runs.iter().any(|run| !run.text.trim().is_empty())
    }

    /// Text a user would see inside this node, like `innerText`.
    pub fn visible_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_visible_text(&mut parts);
        collapse_whitespace(&parts.join(" "))
    }

    fn collect_visible_text(&self, parts: &mut Vec<String>) {
        if self.hides_subtree() {
            return;
        }
        if !self.style.is_visibility_hidden() {
            parts.extend(self.text_runs.iter().map(|run| run.text.clone()));
        }
        for child in &self.children {
            child.collect_visible_text(parts);
        }
    }

    /// Visit this node and every descendant in document order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Mutable variant of [`Node::walk`].
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }

    /// Find a node by id in this subtree.
    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Find a node by id in this subtree, mutably.
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}

impl Snapshot {
    pub fn new(root: Node) -> Self {
        Self {
            root: Some(root),
            ..Default::default()
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Tagged nodes in document order.
    pub fn tagged_nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.walk(&mut |node| {
                if node.ref_id.is_some() {
                    out.push(node);
                }
            });
        }
        out
    }

    /// Find the node carrying `ref_id`.
    pub fn node_by_ref(&self, ref_id: RefId) -> Option<&Node> {
        self.tagged_nodes()
            .into_iter()
            .find(|node| node.ref_id == Some(ref_id))
    }

    /// Remove every reference id left over from a previous pass.
    pub fn clear_ref_ids(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.walk_mut(&mut |node| node.ref_id = None);
        }
    }
}
