//! # Transaction Lifecycle
//!
//! Submit-to-confirm status of the current write. Only one lifecycle is
//! tracked at a time; a new submission replaces a terminal one.

use crate::ids::TxHash;
use serde::Serialize;

/// Status of the current write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum TransactionLifecycle {
    /// No write submitted this session
    #[default]
    Idle,
    /// Handed to the write collaborator, not yet accepted
    Submitting,
    /// Accepted; waiting for the receipt
    AwaitingConfirmation {
        /// Accepted transaction
        tx_hash: TxHash,
    },
    /// Mined successfully
    Confirmed {
        /// Confirmed transaction
        tx_hash: TxHash,
    },
    /// Submission or execution failed
    Failed {
        /// Failure message as reported
        message: String,
    },
}

impl TransactionLifecycle {
    /// `Submitting` or `AwaitingConfirmation`
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting | Self::AwaitingConfirmation { .. })
    }

    /// `Idle`, `Confirmed` or `Failed`
    pub fn is_terminal(&self) -> bool {
        !self.is_busy()
    }

    /// Transaction hash once accepted
    pub fn tx_hash(&self) -> Option<&TxHash> {
        match self {
            Self::AwaitingConfirmation { tx_hash } | Self::Confirmed { tx_hash } => Some(tx_hash),
            _ => None,
        }
    }

    /// Name used in logs and transition errors
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::AwaitingConfirmation { .. } => "awaiting confirmation",
            Self::Confirmed { .. } => "confirmed",
            Self::Failed { .. } => "failed",
        }
    }
}
