//! Error types for the engine facade

use roadmap_graph::LayoutError;

use crate::config::ConfigError;

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Layout engine failed; nothing was rendered
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Roadmap or request JSON is malformed
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Layout(err) => err.is_retryable(),
            Self::Config(_) | Self::Json(_) | Self::Io(_) => false,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
