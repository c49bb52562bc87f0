//! The diagnostic value carried across the core boundary.

use thiserror::Error;

/// A position-tagged message: the only error-carrying value the core hands
/// to its host. Compile errors, runtime errors, timeouts, and goal
/// mismatches all surface as this one type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Diagnostic {
    /// Byte offset into the source text, starting at 1. Zero when no
    /// source location applies.
    pub position: usize,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}
