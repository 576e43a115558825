//! Error types for canvas-input.
//!
//! Dispatching input never fails; these errors only surface from the
//! fallible producer and configuration entry points.

/// Result type alias for canvas-input operations.
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur when feeding or configuring the input pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The listener behind a producer has been dropped.
    #[error("input listener has been dropped; raw input discarded")]
    ListenerDropped,

    /// A bounded raw-input channel is full.
    #[error("raw input queue is full (capacity {capacity}); raw input discarded")]
    QueueFull { capacity: usize },

    /// A configuration value was rejected.
    #[error("invalid listener configuration: {0}")]
    InvalidConfig(String),
}

impl InputError {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
