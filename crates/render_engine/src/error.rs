//! Render errors

use thiserror::Error;

/// Errors that can occur while setting up a render
///
/// Layout operations themselves never fail: overflow paginates and
/// unrenderable legacy lines are skipped.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Page geometry cannot hold any content
    #[error("Invalid page geometry: {0}")]
    InvalidPageSpec(String),
}
