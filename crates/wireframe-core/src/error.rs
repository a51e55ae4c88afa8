//! Wireframe errors.

use thiserror::Error;

/// Errors surfaced by the wireframe core and its session facade.
///
/// Rendering itself only fails with `CollaboratorUnavailable`; malformed
/// geometry, empty documents and label collisions degrade to absence.
#[derive(Debug, Error)]
pub enum WireframeError {
    /// The render-tree capture or occlusion query could not be invoked.
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// The collaborator failed to execute a primitive action.
    #[error("Action failed: {0}")]
    ActionFailed(String),

    /// No element carries this reference id in the current wireframe.
    #[error("Unknown ref id: {0}")]
    UnknownRef(u32),
}
