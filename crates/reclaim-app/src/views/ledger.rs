//! # Ledger View State

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single `(name, number)` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Display name
    pub name: String,
    /// Phone number or other value, kept as entered
    pub value: String,
}

impl LedgerEntry {
    /// Create an entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Columns returned by the read collaborator had different lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Numbers list is malformed: {names} names but {values} numbers")]
pub struct MisalignedLedger {
    /// Length of the names column
    pub names: usize,
    /// Length of the numbers column
    pub values: usize,
}

/// The ledger as fetched at one point in time.
///
/// Invariants:
/// - `names` and `values` have equal length and are index-aligned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    names: Vec<String>,
    values: Vec<String>,
}

impl LedgerSnapshot {
    /// Build a snapshot from the two contract columns
    pub fn from_columns(
        names: Vec<String>,
        values: Vec<String>,
    ) -> Result<Self, MisalignedLedger> {
        if names.len() != values.len() {
            return Err(MisalignedLedger {
                names: names.len(),
                values: values.len(),
            });
        }
        Ok(Self { names, values })
    }

    /// Build a snapshot from entries
    pub fn from_entries(entries: impl IntoIterator<Item = LedgerEntry>) -> Self {
        let (names, values) = entries.into_iter().map(|e| (e.name, e.value)).unzip();
        Self { names, values }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names column
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Numbers column
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterate `(name, value)` pairs in ledger order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .zip(self.values.iter())
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Render as `name: value` lines
    pub fn render(&self) -> String {
        self.entries()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
