//! Error types for the editor crate.

use thiserror::Error;
use vd_core::ShapeId;

/// Errors returned by path editing operations.
///
/// Routine misses (no connection point under the cursor, removing a segment
/// of the wrong kind) are not errors; they surface as `None` or a no-op.
#[derive(Error, Debug)]
pub enum EditorError {
    /// An internal invariant of the editing state machine was broken.
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// A shape id was referenced that the scene does not contain.
    #[error("unknown shape {0}")]
    UnknownShape(ShapeId),

    /// Editor settings could not be parsed.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl EditorError {
    pub(crate) fn invariant(what: &'static str) -> Self {
        log::warn!("invariant violated: {what}");
        EditorError::InvariantViolation(what)
    }
}
