//! Settings for the simulated assistant.
//!
//! The assistant answers every message after a fixed delay. The delay is
//! configurable so the panel can feel snappier or slower, but it is bounded
//! to keep replies from arriving instantly or never.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay before the assistant replies (1.2 seconds).
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1200;

/// Minimum allowed reply delay (100 milliseconds).
pub const MIN_REPLY_DELAY_MS: u64 = 100;

/// Maximum allowed reply delay (1 minute).
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// Configuration for the assistant chat panel.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskflow_config::AssistantConfig;
///
/// let config = AssistantConfig::default();
/// assert_eq!(config.reply_delay(), Duration::from_millis(1200));
///
/// let config = AssistantConfig::with_delay(300);
/// assert_eq!(config.reply_delay_ms, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Delay between sending a message and receiving the reply, in
    /// milliseconds.
    #[serde(default = "default_reply_delay")]
    pub reply_delay_ms: u64,
}

fn default_reply_delay() -> u64 {
    DEFAULT_REPLY_DELAY_MS
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
        }
    }
}

impl AssistantConfig {
    /// Creates a configuration with the given reply delay.
    #[must_use]
    pub const fn with_delay(reply_delay_ms: u64) -> Self {
        Self { reply_delay_ms }
    }

    /// Returns the reply delay as a [`Duration`].
    #[must_use]
    pub const fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Validates the assistant configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the delay is outside the allowed range.
    pub fn validate(&self) -> crate::Result<()> {
        if self.reply_delay_ms < MIN_REPLY_DELAY_MS {
            return Err(crate::ConfigError::InvalidReplyDelay {
                reason: format!(
                    "delay {} is below minimum of {} ms",
                    self.reply_delay_ms, MIN_REPLY_DELAY_MS
                ),
            });
        }

        if self.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(crate::ConfigError::InvalidReplyDelay {
                reason: format!(
                    "delay {} exceeds maximum of {} ms",
                    self.reply_delay_ms, MAX_REPLY_DELAY_MS
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.reply_delay_ms, DEFAULT_REPLY_DELAY_MS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_below_minimum() {
        let err = AssistantConfig::with_delay(50).validate().unwrap_err();
        assert!(err.to_string().contains("below minimum"));
    }

    #[test]
    fn validate_above_maximum() {
        let err = AssistantConfig::with_delay(60_001).validate().unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn validate_at_boundaries() {
        assert!(AssistantConfig::with_delay(MIN_REPLY_DELAY_MS).validate().is_ok());
        assert!(AssistantConfig::with_delay(MAX_REPLY_DELAY_MS).validate().is_ok());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: AssistantConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AssistantConfig::default());
    }
}
