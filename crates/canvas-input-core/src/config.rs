//! Listener configuration.

use crate::error::{InputError, Result};
use crate::event::PointerMatching;
use crate::listener::InputListener;

/// Default name for listeners, used in log output.
pub const DEFAULT_LISTENER_NAME: &str = "canvas-input";

/// Configuration for creating an [`InputListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Name of the listener, attached to its log output.
    pub name: String,
    /// How pointer and motion patterns are compared against queued events.
    pub pointer_matching: PointerMatching,
    /// Capacity of the raw-input channel. `None` means unbounded.
    pub channel_capacity: Option<usize>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LISTENER_NAME.to_string(),
            pointer_matching: PointerMatching::default(),
            channel_capacity: None,
        }
    }
}

impl ListenerConfig {
    /// Create a new configuration with the given listener name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check the configuration for values the listener cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == Some(0) {
            return Err(InputError::invalid_config(
                "channel capacity must be at least 1; use None for an unbounded channel",
            ));
        }
        Ok(())
    }
}

/// Builder for creating listeners with custom configuration.
#[derive(Debug, Default)]
pub struct ListenerBuilder {
    config: ListenerConfig,
}

impl ListenerBuilder {
    /// Create a new ListenerBuilder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listener name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set how pointer and motion events are matched.
    pub fn pointer_matching(mut self, matching: PointerMatching) -> Self {
        self.config.pointer_matching = matching;
        self
    }

    /// Bound the raw-input channel to `capacity` pending inputs.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = Some(capacity);
        self
    }

    /// Use an unbounded raw-input channel.
    pub fn unbounded(mut self) -> Self {
        self.config.channel_capacity = None;
        self
    }

    /// Validate the configuration and build the listener.
    pub fn build(self) -> Result<InputListener> {
        InputListener::with_config(self.config)
    }
}
