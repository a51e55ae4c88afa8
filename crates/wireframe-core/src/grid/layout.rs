//! Layout engine: borders, text, media placeholders, form content and label
//! anchors.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::buffer::{Grid, GridPoint};
use super::metrics::CharMetrics;
use crate::error::WireframeError;
use crate::label::{media_placeholder, resolve_label};
use crate::snapshot::{collapse_whitespace, DocumentIndex, IndexedNode, Node, Rect, RefId, Role};
use crate::visibility::VisibilityResolver;

/// Grid plus the cell where each reference label should be spliced.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub anchors: BTreeMap<RefId, GridPoint>,
}

/// A node's bounds in grid cells. Width and height are at least 2.
#[derive(Debug, Clone, Copy)]
struct CellBox {
    row: i64,
    col: i64,
    width: i64,
    height: i64,
}

impl CellBox {
    fn mid_row(&self) -> i64 {
        self.row + (self.height - 1) / 2
    }
}

/// Converts pixel geometry of a tagged tree into a character grid.
pub struct LayoutEngine<'r, 'q> {
    resolver: &'r VisibilityResolver<'q>,
    metrics: CharMetrics,
}

impl<'r, 'q> LayoutEngine<'r, 'q> {
    pub fn new(resolver: &'r VisibilityResolver<'q>, metrics: CharMetrics) -> Self {
        Self {
            resolver,
            metrics: metrics.sanitized(),
        }
    }

    pub fn metrics(&self) -> CharMetrics {
        self.metrics
    }

    /// Lay out every node in `index`. The tree must already be tagged.
    pub fn layout(&self, index: &DocumentIndex<'_>) -> Result<Layout, WireframeError> {
        let viewport = self.resolver.viewport();
        let cols = (viewport.width / self.metrics.char_width).ceil().max(0.0) as usize;
        let rows = (self.resolver.capture_height() / self.metrics.char_height)
            .ceil()
            .max(0.0) as usize;

        let mut layout = Layout {
            grid: Grid::new(cols, rows),
            anchors: BTreeMap::new(),
        };

        self.draw_borders(index, &mut layout.grid);
        self.place_text(index, &mut layout)?;
        self.place_media(index, &mut layout)?;
        self.place_form_content(index, &mut layout);
        self.place_fallback_anchors(index, &mut layout);

        debug!(cols, rows, anchors = layout.anchors.len(), "grid laid out");
        Ok(layout)
    }

    fn cell_box(&self, rect: &Rect) -> CellBox {
        CellBox {
            row: self.metrics.row(rect.top),
            col: self.metrics.column(rect.left),
            width: self.metrics.columns_spanned(rect.width).max(2),
            height: self.metrics.rows_spanned(rect.height).max(2),
        }
    }

    fn draw_borders(&self, index: &DocumentIndex<'_>, grid: &mut Grid) {
        for (position, entry) in index.iter() {
            let node = entry.node;
            if node.ref_id.is_none() || !has_border(node) {
                continue;
            }
            if !self.resolver.is_displayed(index, position, &node.bounds) {
                continue;
            }
            let cells = self.cell_box(&node.bounds);
            grid.draw_box(cells.row, cells.col, cells.width, cells.height);
        }
    }

    fn place_text(
        &self,
        index: &DocumentIndex<'_>,
        layout: &mut Layout,
    ) -> Result<(), WireframeError> {
        for (position, entry) in index.iter() {
            // Form controls render their own content.
            if entry.hidden || entry.in_form_field || entry.node.text_runs.is_empty() {
                continue;
            }
            let owner = index.nearest_ref(position);

            for run in &entry.node.text_runs {
                let text = display_text(entry, &run.text);
                if text.is_empty() {
                    continue;
                }
                let chars: Vec<char> = text.chars().collect();
                let mut offset = 0usize;
                let mut first_written = false;

                for rect in &run.rects {
                    if offset >= chars.len() {
                        break;
                    }
                    if is_malformed(rect) {
                        warn!(node = %entry.node.id, ?rect, "skipping malformed text rect");
                        continue;
                    }
                    if !rect.is_renderable() {
                        continue;
                    }
                    let budget = self.metrics.columns_spanned(rect.width).max(1) as usize;
                    if !self.resolver.is_rect_visible(index, position, rect)? {
                        offset += budget;
                        continue;
                    }

                    let end = (offset + budget).min(chars.len());
                    let slice: String = chars[offset..end].iter().collect();
                    let row = self.metrics.row(rect.top);
                    let col = self.metrics.column(rect.left);
                    layout.grid.write(row, col, &slice);

                    if !first_written {
                        first_written = true;
                        if let Some(ref_id) = owner {
                            layout
                                .anchors
                                .entry(ref_id)
                                .or_insert_with(|| GridPoint::new(row, col));
                        }
                    }
                    offset = end;
                }
            }
        }
        Ok(())
    }

    /// Media shows as borderless placeholder text at its top-left cell,
    /// cut to the media's width.
    fn place_media(
        &self,
        index: &DocumentIndex<'_>,
        layout: &mut Layout,
    ) -> Result<(), WireframeError> {
        for (position, entry) in index.iter() {
            let Some(placeholder) = media_placeholder(entry.node) else {
                continue;
            };
            if !self.resolver.is_node_visible(index, position)? {
                continue;
            }
            let cells = self.cell_box(&entry.node.bounds);
            let room = self.metrics.columns_spanned(entry.node.bounds.width).max(1) as usize;
            let text: String = display_text(entry, &placeholder).chars().take(room).collect();
            layout.grid.write(cells.row, cells.col, &text);

            if let Some(ref_id) = index.nearest_ref(position) {
                layout
                    .anchors
                    .entry(ref_id)
                    .or_insert_with(|| GridPoint::new(cells.row, cells.col));
            }
        }
        Ok(())
    }

    fn place_form_content(&self, index: &DocumentIndex<'_>, layout: &mut Layout) {
        for (position, entry) in index.iter() {
            let node = entry.node;
            if !node.role.is_form_field() {
                continue;
            }
            if !self.resolver.is_displayed(index, position, &node.bounds) {
                continue;
            }
            let cells = self.cell_box(&node.bounds);
            let row = cells.mid_row();

            if node.role == Role::Select {
                let selected = node
                    .attr("selected-text")
                    .or_else(|| node.attr("value"))
                    .unwrap_or_default();
                let room = (cells.width - 4).max(0) as usize;
                let content: String = selected.chars().take(room).collect();
                if !content.is_empty() {
                    layout.grid.write(row, cells.col + 1, &content);
                }
                layout.grid.write(row, cells.col + cells.width - 2, "v");
            } else if let Some(value) = node.attr("value").or_else(|| node.attr("placeholder")) {
                layout.grid.write(row, cells.col + 1, value);
            }

            if let Some(ref_id) = node.ref_id {
                layout
                    .anchors
                    .entry(ref_id)
                    .or_insert_with(|| GridPoint::new(row, cells.col));
            }
        }
    }

    fn place_fallback_anchors(&self, index: &DocumentIndex<'_>, layout: &mut Layout) {
        for (position, entry) in index.iter() {
            let node = entry.node;
            let Some(ref_id) = node.ref_id else {
                continue;
            };
            if layout.anchors.contains_key(&ref_id) {
                continue;
            }
            if !self.resolver.is_displayed(index, position, &node.bounds) {
                continue;
            }
            let cells = self.cell_box(&node.bounds);

            // Icon-only controls show their accessible label instead of nothing.
            if node.role.is_uppercased() {
                if let Some(label) = resolve_label(node) {
                    let label = label.to_uppercase();
                    if has_border(node) {
                        layout.grid.write(cells.mid_row(), cells.col + 1, &label);
                    } else {
                        layout.grid.write(cells.row, cells.col, &label);
                    }
                }
            }
            layout
                .anchors
                .insert(ref_id, GridPoint::new(cells.row, cells.col));
        }
    }
}

/// Form controls and block-level `role=button` nodes get an outline.
fn has_border(node: &Node) -> bool {
    node.role.is_bordered_control()
        || (node.role == Role::GenericRoleButton && !node.style.is_inline())
}

fn display_text(entry: &IndexedNode<'_>, raw: &str) -> String {
    let text = collapse_whitespace(raw);
    if entry.uppercased {
        text.to_uppercase()
    } else {
        text
    }
}

fn is_malformed(rect: &Rect) -> bool {
    !(rect.left.is_finite()
        && rect.top.is_finite()
        && rect.width.is_finite()
        && rect.height.is_finite())
        || rect.width < 0.0
        || rect.height < 0.0
}
