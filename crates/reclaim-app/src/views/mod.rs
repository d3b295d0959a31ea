//! # View State Types
//!
//! Tagged state for the reveal section, the entry form and the write
//! lifecycle. Each replaces a set of loose flags so that invalid combinations
//! (pending *and* revealed, confirmed *and* failed) cannot be represented.

pub mod display;
pub mod form;
pub mod ledger;
pub mod reveal;
pub mod transaction;

pub use display::truncate;
pub use form::{EntryForm, WriteRequest};
pub use ledger::{LedgerEntry, LedgerSnapshot, MisalignedLedger};
pub use reveal::{RevealPhase, RevealState};
pub use transaction::TransactionLifecycle;
