//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest power-up settle the panel tolerates (ms)
pub const MIN_SETTLE_MS: u32 = 10;

/// Shortest wait after all-clear the panel tolerates (ms)
pub const MIN_CLEAR_MS: u32 = 50;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Power-up settle shorter than [`MIN_SETTLE_MS`]
    SettleTooShort,
    /// All-clear wait shorter than [`MIN_CLEAR_MS`]
    ClearTooShort,
}

/// What a full-frame refresh does when one line fails to transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailurePolicy {
    /// Log the failed line, keep going, report success
    #[default]
    BestEffort,
    /// Stop at the first failed line and return its error
    FailFast,
}

/// Panel timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timing {
    /// Wait after pulling display-enable low at power-up (ms)
    pub settle_ms: u32,
    /// Wait after the all-clear command (ms)
    pub clear_ms: u32,
    /// Pause between scan lines during a refresh (us)
    pub line_delay_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_ms: MIN_SETTLE_MS,
            clear_ms: MIN_CLEAR_MS,
            line_delay_us: 50,
        }
    }
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Power-up and refresh timing
    pub timing: Timing,
    /// Refresh behaviour on line transfer errors
    pub failure_policy: FailurePolicy,
}

impl PanelConfig {
    /// Default configuration with a different failure policy
    pub fn with_failure_policy(failure_policy: FailurePolicy) -> Self {
        Self {
            failure_policy,
            ..Self::default()
        }
    }

    /// Check timing against the panel's minimums
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.settle_ms < MIN_SETTLE_MS {
            return Err(ConfigError::SettleTooShort);
        }
        if self.timing.clear_ms < MIN_CLEAR_MS {
            return Err(ConfigError::ClearTooShort);
        }
        Ok(())
    }
}
