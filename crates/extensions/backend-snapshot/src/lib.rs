//! File-backed document backend.
//!
//! Serves a render tree recorded as JSON, answers point queries from the
//! recorded geometry and applies actions to the in-memory document, so the
//! whole wireframe pipeline runs without a browser.

mod backend;
mod error;

pub use backend::SnapshotBackend;
pub use error::BackendError;
