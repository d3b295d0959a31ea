//! Application configuration

use serde::{Deserialize, Serialize};

/// Default bound on user-visible error strings
pub const DEFAULT_MAX_ERROR_LEN: usize = 64;

/// Display settings applied when errors are copied into view state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum characters kept from an error message before truncation
    pub max_error_len: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_error_len: DEFAULT_MAX_ERROR_LEN,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Display settings
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Config with a custom error display bound
    #[must_use]
    pub fn with_max_error_len(mut self, max_error_len: usize) -> Self {
        self.display.max_error_len = max_error_len;
        self
    }
}
