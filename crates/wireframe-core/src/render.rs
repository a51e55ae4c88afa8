//! The full wireframe pipeline.
//!
//! overlay suppression -> tagging -> grid layout -> label splicing -> serialization

use tracing::debug;

use crate::collaborator::OcclusionQuery;
use crate::error::WireframeError;
use crate::grid::{CharMetrics, LayoutEngine};
use crate::overlay::{OverlayRule, OverlaySuppressor};
use crate::serialize::serialize_rows;
use crate::snapshot::{DocumentIndex, Snapshot, Viewport, OVERFLOW_BUFFER};
use crate::splice::splice_labels;
use crate::tagger::ReferenceTagger;
use crate::visibility::VisibilityResolver;

/// Tunables for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub metrics: CharMetrics,
    pub overflow_buffer: f64,
    pub overlay: OverlayRule,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            metrics: CharMetrics::default(),
            overflow_buffer: OVERFLOW_BUFFER,
            overlay: OverlayRule::default(),
        }
    }
}

/// Renders snapshots into ASCII wireframes.
#[derive(Debug, Clone, Default)]
pub struct WireframeRenderer {
    options: RenderOptions,
}

impl WireframeRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `snapshot` as seen in `viewport`.
    ///
    /// The snapshot is mutated: backdrops are marked suppressed and reference
    /// ids are reassigned. A snapshot without a root renders as an empty
    /// string. The only error is a failing collaborator.
    pub fn render(
        &self,
        snapshot: &mut Snapshot,
        viewport: Viewport,
        query: &mut dyn OcclusionQuery,
    ) -> Result<String, WireframeError> {
        debug!(width = viewport.width, height = viewport.height, "rendering wireframe");
        let Some(root) = snapshot.root.as_mut() else {
            debug!("empty document");
            return Ok(String::new());
        };

        let suppressed = OverlaySuppressor::new(viewport)
            .with_rule(self.options.overlay)
            .suppress(root);
        if !suppressed.is_empty() {
            query.suppress(&suppressed)?;
        }

        let query: &dyn OcclusionQuery = query;
        let resolver = VisibilityResolver::new(viewport, query)
            .with_overflow_buffer(self.options.overflow_buffer);
        ReferenceTagger::new(&resolver).tag(root)?;

        let index = DocumentIndex::build(root);
        let layout = LayoutEngine::new(&resolver, self.options.metrics).layout(&index)?;
        let rows = splice_labels(layout.grid, &layout.anchors);
        Ok(serialize_rows(rows))
    }
}

/// Render with default overlay and overflow settings.
pub fn render_wireframe(
    snapshot: &mut Snapshot,
    viewport: Viewport,
    metrics: CharMetrics,
    query: &mut dyn OcclusionQuery,
) -> Result<String, WireframeError> {
    WireframeRenderer::new(RenderOptions {
        metrics,
        ..Default::default()
    })
    .render(snapshot, viewport, query)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
