//! Annotator configuration.
//!
//! The context window size is explicit configuration threaded into display
//! calls rather than ambient global state, so it can be validated at the
//! point of change.

use serde::{Deserialize, Serialize};

use crate::error::{EntlinkError, Result};

/// Default width of the left/right context windows, in characters.
pub const DEFAULT_CONTEXT_SIZE: usize = 40;

/// Runtime configuration for the annotator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Width of the context window shown around each mention.
    pub context_size: usize,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            context_size: DEFAULT_CONTEXT_SIZE,
        }
    }
}

impl AnnotatorConfig {
    /// Create a configuration with the default context size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context size.
    pub fn with_context_size(mut self, size: usize) -> Self {
        self.context_size = size;
        self
    }

    /// Update the context size from raw user input.
    ///
    /// Accepts any non-negative integer; zero yields empty context windows.
    /// Negative or non-numeric input is rejected and leaves the current
    /// value unchanged.
    pub fn set_context_size(&mut self, raw: &str) -> Result<usize> {
        let size: usize = raw.trim().parse().map_err(|_| {
            EntlinkError::Config(format!(
                "context size must be a non-negative integer, got '{}'",
                raw.trim()
            ))
        })?;
        self.context_size = size;
        Ok(size)
    }
}
