//! CLI configuration file
//!
//! ```toml
//! [app.display]
//! max_error_len = 64
//!
//! [demo]
//! address = "0xA11CE"
//! entries = [{ name = "Bob", number = "555-0000" }]
//! fail_next_signature = "User rejected signature"
//! ```

use anyhow::{Context, Result};
use reclaim_app::{AppConfig, LedgerEntry};
use reclaim_testkit::MockChain;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Contents of `reclaim.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Core settings
    pub app: AppConfig,
    /// In-memory chain setup
    pub demo: DemoConfig,
}

/// Initial state of the demo chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Address connected at startup
    pub address: Option<String>,
    /// Entries already stored for `address`
    pub entries: Vec<DemoEntry>,
    /// Reject the first signature request with this message
    pub fail_next_signature: Option<String>,
    /// Fail the first read with this message
    pub fail_next_read: Option<String>,
    /// Reject the first write with this message
    pub fail_next_write: Option<String>,
    /// Revert the first mined transaction with this reason
    pub revert_next_receipt: Option<String>,
}

/// Seeded ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoEntry {
    /// Entry name
    pub name: String,
    /// Entry number
    pub number: String,
}

impl DemoConfig {
    /// Build the demo chain; `address` overrides the configured one
    pub fn build_chain(&self, address: Option<&str>) -> Arc<MockChain> {
        let chain = MockChain::new();
        if let Some(address) = address.or(self.address.as_deref()) {
            chain.connect(address);
            chain.seed(
                address,
                self.entries
                    .iter()
                    .map(|e| LedgerEntry::new(&e.name, &e.number)),
            );
        }

        if let Some(message) = &self.fail_next_signature {
            chain.fail_next_signature(message);
        }
        if let Some(message) = &self.fail_next_read {
            chain.fail_next_read(message);
        }
        if let Some(message) = &self.fail_next_write {
            chain.fail_next_write(message);
        }
        if let Some(reason) = &self.revert_next_receipt {
            chain.revert_next_receipt(Some(reason.as_str()));
        }
        chain
    }
}

/// Load configuration; a missing file yields defaults
pub fn load_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file; using defaults");
        return Ok(CliConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
