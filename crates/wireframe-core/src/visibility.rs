//! Visibility and occlusion resolution.
//!
//! A node (or one line rect of its text) counts as visible when it has a real
//! size, is painted, overlaps the capture band, and is not covered by an
//! unrelated node at its center. Points in the overflow band below the real
//! viewport cannot be point-queried and are accepted on geometry alone.

use tracing::trace;

use crate::collaborator::OcclusionQuery;
use crate::error::WireframeError;
use crate::snapshot::{DocumentIndex, Rect, Viewport, OVERFLOW_BUFFER};

/// Decides whether nodes and text rects are actually visible to a user.
pub struct VisibilityResolver<'q> {
    viewport: Viewport,
    overflow_buffer: f64,
    query: &'q dyn OcclusionQuery,
}

impl<'q> VisibilityResolver<'q> {
    pub fn new(viewport: Viewport, query: &'q dyn OcclusionQuery) -> Self {
        Self {
            viewport,
            overflow_buffer: OVERFLOW_BUFFER,
            query,
        }
    }

    pub fn with_overflow_buffer(mut self, overflow_buffer: f64) -> Self {
        self.overflow_buffer = overflow_buffer;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn capture_height(&self) -> f64 {
        self.viewport.capture_height(self.overflow_buffer)
    }

    /// Painted, sized and inside the capture band. No point query.
    pub fn is_displayed(&self, index: &DocumentIndex<'_>, position: usize, rect: &Rect) -> bool {
        !index.entry(position).hidden
            && rect.is_renderable()
            && rect.overlaps_capture_band(&self.viewport, self.capture_height())
    }

    /// Visibility of the node at `position`, sampled at its own center.
    pub fn is_node_visible(
        &self,
        index: &DocumentIndex<'_>,
        position: usize,
    ) -> Result<bool, WireframeError> {
        let bounds = index.entry(position).node.bounds;
        self.is_rect_visible(index, position, &bounds)
    }

    /// Visibility of `rect` owned by the node at `position`, sampled at the
    /// rect's center.
    pub fn is_rect_visible(
        &self,
        index: &DocumentIndex<'_>,
        position: usize,
        rect: &Rect,
    ) -> Result<bool, WireframeError> {
        if !self.is_displayed(index, position, rect) {
            return Ok(false);
        }

        let (cx, cy) = rect.center();
        if cy >= self.viewport.height {
            return Ok(true);
        }
        if cx < 0.0 || cy < 0.0 || cx >= self.viewport.width {
            return Ok(false);
        }

        let Some(hit) = self.query.topmost_at(cx, cy)? else {
            return Ok(false);
        };
        let visible = index
            .position_of(&hit)
            .is_some_and(|hit_position| index.are_related(position, hit_position));
        if !visible {
            trace!(
                node = %index.entry(position).node.id,
                covered_by = %hit,
                "occluded"
            );
        }
        Ok(visible)
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
