//! # Workflows
//!
//! The four coordination components and the loop that drives them:
//!
//! - [`auth::AuthBroker`]: fresh tokens from the signer
//! - [`reveal::RevealGate`]: sign, then read, then show the ledger
//! - [`write::WriteCoordinator`]: validate, submit, wait for the receipt
//! - [`reconcile::StateReconciler`]: post-lifecycle cleanup and refresh
//! - [`session`]: account changes and session resets
//!
//! Each component module holds both its async entry point and the pure
//! transition rules the reducer routes to it.
//!
//! ## Error Handling
//!
//! Entry points return `Result<T, AppError>`. Collaborator failures have
//! already been written into view state by the time the error is returned;
//! frontends only need the `Err` for toasts or exit codes.

pub mod auth;
pub(crate) mod effects;
pub mod reconcile;
pub mod reveal;
pub mod session;
pub mod write;

pub use auth::AuthBroker;
pub use reconcile::StateReconciler;
pub use reveal::RevealGate;
pub use write::WriteCoordinator;
