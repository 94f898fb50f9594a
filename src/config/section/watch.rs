//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! debounce_ms = 300   # Quiet period before a batch of changes is processed
//! cooldown_ms = 800   # Minimum gap between two batches
//! ```

use crate::config::{ConfigDiagnostics, ConfigField};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub debounce_ms: u64,
    pub cooldown_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            cooldown_ms: 800,
        }
    }
}

impl WatchConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.debounce_ms == 0 {
            diag.reject(ConfigField::Debounce, "must be greater than 0")
                .hint("default is 300");
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_watch_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.watch.debounce(), Duration::from_millis(300));
        assert_eq!(config.watch.cooldown(), Duration::from_millis(800));
    }

    #[test]
    fn test_watch_override() {
        let config = test_parse_config("[watch]\ndebounce_ms = 50\ncooldown_ms = 0");
        assert_eq!(config.watch.debounce_ms, 50);
        assert_eq!(config.watch.cooldown_ms, 0);
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let config = test_parse_config("[watch]\ndebounce_ms = 0");
        let mut diag = ConfigDiagnostics::new();
        config.watch.validate(&mut diag);
        assert_eq!(diag.problems().len(), 1);
        assert_eq!(diag.problems()[0].field, ConfigField::Debounce);
    }
}
