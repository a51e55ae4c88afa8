//! Snapshot backend errors.

use thiserror::Error;
use wireframe_core::WireframeError;

/// Snapshot backend errors.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Snapshot file could not be read.
    #[error("Snapshot read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON did not match the render-tree model.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),

    /// Action target is not in the document.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Action is not applicable to the target.
    #[error("Action failed: {0}")]
    ActionFailed(String),

    /// Backend was closed.
    #[error("Backend closed")]
    Closed,
}

impl From<BackendError> for WireframeError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::ElementNotFound(_) | BackendError::ActionFailed(_) => {
                WireframeError::ActionFailed(e.to_string())
            }
            BackendError::Io(_)
            | BackendError::InvalidSnapshot(_)
            | BackendError::Closed => WireframeError::CollaboratorUnavailable(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_is_unavailable() {
        let err: WireframeError = BackendError::Closed.into();
        assert!(matches!(err, WireframeError::CollaboratorUnavailable(_)));
    }

    #[test]
    fn test_element_not_found_is_action_failure() {
        let err: WireframeError = BackendError::ElementNotFound("n42".to_string()).into();
        assert!(matches!(err, WireframeError::ActionFailed(ref m) if m.contains("n42")));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = BackendError::from(json_err);
        assert!(err.to_string().starts_with("Invalid snapshot"));
    }
}
