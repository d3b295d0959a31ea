//! # Reclaim App: Portable Application Core
//!
//! Headless coordination logic for a private, chain-stored numbers list.
//! The user signs a challenge to reveal the list and appends `(name, number)`
//! entries through write transactions that are tracked to confirmation.
//!
//! ## Architecture
//!
//! ```text
//! user action ─► workflows ─► reduce(state, action) ─► effects
//!                   ▲                                     │
//!                   └──── next action ◄── collaborators ◄─┘
//! ```
//!
//! - [`core`]: the authoritative [`AppState`], the transition function and
//!   the [`AppCore`] that owns both
//! - [`workflows`]: AuthBroker, RevealGate, WriteCoordinator and
//!   StateReconciler, plus the effect loop that drives them
//! - [`runtime_bridge`]: collaborator traits implemented by wallets and chain clients
//! - [`views`]: reveal, ledger, form and transaction state types
//!
//! ## Usage
//!
//! ```rust,ignore
//! let app = AppCore::new(AppConfig::default(), ChainBridge::from_backend(chain)).shared();
//! workflows::session::sync_account(&app).await?;
//! workflows::reveal::RevealGate::request_reveal(&app).await?;
//! let tx = workflows::write::WriteCoordinator::submit(&app, LedgerEntry::new("Alice", "555-1234")).await?;
//! ```

pub mod config;
pub mod core;
pub mod errors;
pub mod ids;
pub mod runtime_bridge;
pub mod views;
pub mod workflows;

pub use crate::config::{AppConfig, DisplayConfig};
pub use crate::core::{Action, AppCore, AppState, Effect, SessionFlags, SharedApp, StateSnapshot};
pub use crate::errors::{AppError, BusyError, ErrorCategory, ValidationError};
pub use crate::ids::{Address, AuthToken, TxHash};
pub use crate::runtime_bridge::{
    AccountConnector, AuthProvider, BridgeError, ChainBridge, LedgerColumns, LedgerReader,
    LedgerWriter, Receipt, ReceiptWaiter,
};
pub use crate::views::{
    EntryForm, LedgerEntry, LedgerSnapshot, RevealState, TransactionLifecycle, WriteRequest,
};
