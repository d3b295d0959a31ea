//! # Entry Form State

use super::ledger::LedgerEntry;
use crate::ids::AuthToken;
use serde::{Deserialize, Serialize};

/// Draft entry being edited by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryForm {
    /// Name field
    pub name: String,
    /// Number field
    pub value: String,
}

impl EntryForm {
    /// Entry built from the current field contents
    pub fn to_entry(&self) -> LedgerEntry {
        LedgerEntry::new(self.name.clone(), self.value.clone())
    }

    /// Clear both fields
    pub fn clear(&mut self) {
        self.name.clear();
        self.value.clear();
    }

    /// Whether both fields are empty
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }
}

/// Validated write, ready for the write collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    /// Entry to append
    pub entry: LedgerEntry,
    /// Token proving the caller may write
    pub auth_token: AuthToken,
}
