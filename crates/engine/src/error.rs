// ABOUTME: Error types for the shading engine.
// ABOUTME: Provides FrameError for frame-access denials caught at the recursion boundary.

use thiserror::Error;

/// Errors raised by a [`PageWindow`](crate::window::PageWindow) when a child
/// frame cannot be entered.
///
/// The shading recursion catches these, logs them, and continues with sibling
/// frames; they never abort a pass.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame's content is not reachable (cross-origin or equivalent
    /// access restriction in the backing page model).
    #[error("frame content is not accessible: {0}")]
    Inaccessible(String),
}

impl FrameError {
    /// Creates an Inaccessible error with a custom reason.
    pub fn inaccessible(reason: impl Into<String>) -> Self {
        FrameError::Inaccessible(reason.into())
    }
}
