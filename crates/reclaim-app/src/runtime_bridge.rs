//! # Runtime Bridge: Collaborator Contracts
//!
//! The core never talks to a wallet or a chain node directly. Everything that
//! touches the outside world goes through the traits below, which a frontend
//! implements (or obtains from a chain client) and hands to [`AppCore`] as a
//! [`ChainBridge`].
//!
//! ```text
//! reclaim-app (pure)             frontend / chain client
//! ┌──────────────────┐           ┌──────────────────────┐
//! │ AppCore          │           │ wallet + contract    │
//! │   ┌────────────┐ │           │   implements         │
//! │   │ChainBridge │◄├───────────┤   AccountConnector,  │
//! │   └────────────┘ │           │   AuthProvider, ...  │
//! └──────────────────┘           └──────────────────────┘
//! ```
//!
//! [`AppCore`]: crate::core::AppCore

use crate::ids::{Address, AuthToken, TxHash};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by any collaborator.
///
/// Carries the collaborator's own message; the core decides which section
/// of the UI it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BridgeError {
    /// Human-readable failure message
    pub message: String,
}

impl BridgeError {
    /// Create a bridge error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raw ledger columns as returned by `getNumbersList`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerColumns {
    /// Entry names
    pub names: Vec<String>,
    /// Entry numbers, index-aligned with `names`
    pub numbers: Vec<String>,
}

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Whether the transaction executed successfully
    pub success: bool,
    /// Revert reason or other failure detail
    pub error: Option<String>,
}

impl Receipt {
    /// Successful receipt
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed receipt with a reason
    pub fn reverted(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

/// Wallet connection state
pub trait AccountConnector: Send + Sync {
    /// Currently connected address, if any
    fn current_address(&self) -> Option<Address>;
}

/// Signature-based authentication
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Prompt the user to sign a challenge and return a fresh token
    async fn fetch_auth_info(&self) -> Result<AuthToken, BridgeError>;

    /// Token the provider currently holds for the connected account
    fn auth_info(&self) -> Option<AuthToken>;
}

/// Authenticated contract read
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// `getNumbersList(authToken)`
    async fn get_numbers_list(&self, auth: &AuthToken) -> Result<LedgerColumns, BridgeError>;
}

/// Authenticated contract write
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    /// `addToNumbersList(name, number, authToken)`; resolves once the
    /// transaction is accepted by the node
    async fn add_to_numbers_list(
        &self,
        name: &str,
        number: &str,
        auth: &AuthToken,
    ) -> Result<TxHash, BridgeError>;
}

/// Transaction confirmation
#[async_trait]
pub trait ReceiptWaiter: Send + Sync {
    /// Wait until the transaction is mined
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt, BridgeError>;
}

/// Bundle of collaborator handles consumed by the core
#[derive(Clone)]
pub struct ChainBridge {
    /// Wallet connection
    pub account: Arc<dyn AccountConnector>,
    /// Signer
    pub auth: Arc<dyn AuthProvider>,
    /// Contract reads
    pub reader: Arc<dyn LedgerReader>,
    /// Contract writes
    pub writer: Arc<dyn LedgerWriter>,
    /// Receipt waiting
    pub receipts: Arc<dyn ReceiptWaiter>,
}

impl ChainBridge {
    /// Build a bridge from one backend implementing every collaborator
    pub fn from_backend<T>(backend: Arc<T>) -> Self
    where
        T: AccountConnector + AuthProvider + LedgerReader + LedgerWriter + ReceiptWaiter + 'static,
    {
        Self {
            account: backend.clone(),
            auth: backend.clone(),
            reader: backend.clone(),
            writer: backend.clone(),
            receipts: backend,
        }
    }
}

impl std::fmt::Debug for ChainBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainBridge").finish_non_exhaustive()
    }
}
