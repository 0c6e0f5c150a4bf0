use serde::{Deserialize, Serialize};

use crate::{error::BlurError, filter::EdgeMode, parallel::ExecutionStrategy};

/// The number of taps on each side of the kernel center used when none is configured.
pub const DEFAULT_TAP_COUNT: usize = 5;

/// Settings for [`crate::ParallelGaussianBlur`].
///
/// # Examples
///
/// ```
/// use postblur_imgproc::{config::DEFAULT_TAP_COUNT, BlurConfig};
/// use postblur_imgproc::filter::EdgeMode;
///
/// let config = BlurConfig::from_json(r#"{ "edge_mode": "replicate" }"#).unwrap();
/// assert_eq!(config.tap_count, DEFAULT_TAP_COUNT);
/// assert_eq!(config.edge_mode, EdgeMode::Replicate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Taps on each side of the kernel center; the kernel has `tap_count + 1` weights.
    pub tap_count: usize,
    /// How taps outside the image are handled.
    pub edge_mode: EdgeMode,
    /// How the per-channel tasks are dispatched.
    pub strategy: ExecutionStrategy,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            tap_count: DEFAULT_TAP_COUNT,
            edge_mode: EdgeMode::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl BlurConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result does not validate.
    pub fn from_json(json: &str) -> Result<Self, BlurError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number of taps on each side of the center.
    pub fn with_tap_count(mut self, tap_count: usize) -> Self {
        self.tap_count = tap_count;
        self
    }

    /// Set the edge handling mode.
    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the settings without building anything.
    ///
    /// # Errors
    ///
    /// Returns an error for a fixed pool of zero threads.
    pub fn validate(&self) -> Result<(), BlurError> {
        if let ExecutionStrategy::Fixed(0) = self.strategy {
            return Err(crate::parallel::ParallelError::InvalidThreadCount(0).into());
        }
        Ok(())
    }
}
