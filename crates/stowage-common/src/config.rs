//! Configuration model for stacks and cranes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LIFT_TIME_MS, DEFAULT_LOWER_TIME_MS, DEFAULT_MAX_HEIGHT};
use crate::error::{Result, StowageError};

/// Root configuration for a yard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StowageConfig {
    /// Settings applied to every new stack.
    pub stack: StackConfig,
    /// Settings applied to every new crane.
    pub crane: CraneConfig,
}

impl StowageConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a value is out of
    /// range.
    pub fn from_json(document: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::Config`] if a stack could hold no layers.
    pub fn validate(&self) -> Result<()> {
        if self.stack.max_height == 0 {
            return Err(StowageError::Config {
                message: "stack.max_height must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Stack settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Maximum number of real layers in a stack.
    pub max_height: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

/// Per-crane timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraneConfig {
    /// Time to hoist a container, in milliseconds.
    pub lift_time_ms: u64,
    /// Time to lower the spreader, in milliseconds.
    pub lower_time_ms: u64,
}

impl CraneConfig {
    /// Returns the hoisting time.
    #[must_use]
    pub const fn lift_time(&self) -> Duration {
        Duration::from_millis(self.lift_time_ms)
    }

    /// Returns the lowering time.
    #[must_use]
    pub const fn lower_time(&self) -> Duration {
        Duration::from_millis(self.lower_time_ms)
    }
}

impl Default for CraneConfig {
    fn default() -> Self {
        Self {
            lift_time_ms: DEFAULT_LIFT_TIME_MS,
            lower_time_ms: DEFAULT_LOWER_TIME_MS,
        }
    }
}
