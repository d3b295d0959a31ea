//! # Transition Function
//!
//! Every state change goes through [`reduce`]:
//!
//! ```text
//! Action ─► reduce(state) ─► Vec<Effect> ─► collaborators ─► Action ─► ...
//! ```
//!
//! `reduce` never awaits and never touches a collaborator. Side effects are
//! returned as [`Effect`]s and run by the workflow effect loop, which feeds
//! each result back in as the next [`Action`]. The per-component transition
//! rules live next to their async entry points in [`crate::workflows`].

use super::state::AppState;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::ids::{Address, AuthToken, TxHash};
use crate::views::{LedgerEntry, LedgerSnapshot, WriteRequest};
use crate::workflows::{reconcile::StateReconciler, reveal, session, write};

/// Input to the transition function: user intents and collaborator results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // =========================================================================
    // Session
    // =========================================================================
    /// Account connector reported a (possibly unchanged) address
    AccountChanged {
        /// Connected address
        address: Option<Address>,
        /// Token the auth provider already holds for that address
        held_token: Option<AuthToken>,
    },

    // =========================================================================
    // User intents
    // =========================================================================
    /// Name field edited
    NameEdited(String),
    /// Number field edited
    ValueEdited(String),
    /// User tapped reveal (or a refresh was requested)
    RevealRequested,
    /// User submitted an entry
    SubmitRequested(LedgerEntry),

    // =========================================================================
    // Collaborator results
    // =========================================================================
    /// Signer returned a token
    TokenObtained {
        /// Fresh token
        token: AuthToken,
        /// Reveal attempt that asked for it
        generation: u64,
    },
    /// Signer rejected or failed
    TokenRejected {
        /// Signer's message
        message: String,
        /// Reveal attempt that asked for it
        generation: u64,
    },
    /// Authenticated read succeeded
    SnapshotLoaded {
        /// Fetched ledger
        snapshot: LedgerSnapshot,
        /// Reveal attempt that issued the read
        generation: u64,
    },
    /// Authenticated read failed
    SnapshotFailed {
        /// Reader's message
        message: String,
        /// Reveal attempt that issued the read
        generation: u64,
    },
    /// Writer accepted the transaction
    WriteAccepted(TxHash),
    /// Writer refused the transaction
    WriteRejected(String),
    /// Receipt reported success
    ReceiptConfirmed,
    /// Receipt reported failure, or waiting failed
    ReceiptFailed(String),
}

impl Action {
    /// Stable name for logs and transition errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::AccountChanged { .. } => "AccountChanged",
            Self::NameEdited(_) => "NameEdited",
            Self::ValueEdited(_) => "ValueEdited",
            Self::RevealRequested => "RevealRequested",
            Self::SubmitRequested(_) => "SubmitRequested",
            Self::TokenObtained { .. } => "TokenObtained",
            Self::TokenRejected { .. } => "TokenRejected",
            Self::SnapshotLoaded { .. } => "SnapshotLoaded",
            Self::SnapshotFailed { .. } => "SnapshotFailed",
            Self::WriteAccepted(_) => "WriteAccepted",
            Self::WriteRejected(_) => "WriteRejected",
            Self::ReceiptConfirmed => "ReceiptConfirmed",
            Self::ReceiptFailed(_) => "ReceiptFailed",
        }
    }

    /// The normalized error carried by a failed collaborator result
    pub fn failure(&self) -> Option<AppError> {
        match self {
            Self::TokenRejected { message, .. } => Some(AppError::Auth(message.clone())),
            Self::SnapshotFailed { message, .. } => Some(AppError::Read(message.clone())),
            Self::WriteRejected(message) => Some(AppError::WriteSubmit(message.clone())),
            Self::ReceiptFailed(message) => Some(AppError::Receipt(message.clone())),
            _ => None,
        }
    }

    /// Reveal attempt a collaborator result belongs to, if it is a reveal result
    pub fn reveal_generation(&self) -> Option<u64> {
        match self {
            Self::TokenObtained { generation, .. }
            | Self::TokenRejected { generation, .. }
            | Self::SnapshotLoaded { generation, .. }
            | Self::SnapshotFailed { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the signer for a fresh token
    ObtainToken {
        /// Reveal attempt the token is for
        generation: u64,
    },
    /// Read the ledger with a token
    FetchSnapshot {
        /// Token obtained for this attempt
        token: AuthToken,
        /// Reveal attempt the read is for
        generation: u64,
    },
    /// Submit a validated write
    SubmitWrite(WriteRequest),
    /// Wait for an accepted transaction to be mined
    AwaitReceipt(TxHash),
}

impl Effect {
    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ObtainToken { .. } => "ObtainToken",
            Self::FetchSnapshot { .. } => "FetchSnapshot",
            Self::SubmitWrite(_) => "SubmitWrite",
            Self::AwaitReceipt(_) => "AwaitReceipt",
        }
    }
}

/// Apply one action to the state and return the effects it requests.
///
/// On `Err` the state is left untouched, except for submit validation
/// failures, which record their message as the form error. Reveal results
/// from a superseded attempt are dropped without effect.
pub fn reduce(
    state: &mut AppState,
    action: Action,
    config: &AppConfig,
) -> Result<Vec<Effect>, AppError> {
    tracing::debug!(
        action = action.name(),
        reveal = state.reveal.phase().as_str(),
        lifecycle = state.lifecycle.as_str(),
        epoch = state.epoch,
        "Reducing action"
    );

    if state.is_superseded(&action) {
        tracing::debug!(
            action = action.name(),
            current = state.reveal_generation,
            "Dropping result of superseded reveal"
        );
        return Ok(Vec::new());
    }

    match action {
        Action::AccountChanged {
            address,
            held_token,
        } => {
            session::on_account_changed(state, address, held_token);
            Ok(Vec::new())
        }

        Action::NameEdited(name) => write::on_name_edited(state, name).map(|()| Vec::new()),
        Action::ValueEdited(value) => write::on_value_edited(state, value).map(|()| Vec::new()),

        Action::RevealRequested => reveal::begin(state),
        Action::TokenObtained { token, .. } => reveal::on_token(state, token),
        Action::SnapshotLoaded { snapshot, .. } => reveal::on_snapshot(state, snapshot),
        Action::TokenRejected { message, .. } => reveal::on_sign_failure(state, &message, config),
        Action::SnapshotFailed { message, .. } => reveal::on_read_failure(state, &message, config),

        Action::SubmitRequested(entry) => write::begin(state, entry),
        Action::WriteAccepted(tx_hash) => write::on_accepted(state, tx_hash),
        Action::WriteRejected(message) => {
            write::on_rejected(state, message)?;
            Ok(StateReconciler::react(state, config))
        }
        Action::ReceiptConfirmed => {
            write::on_confirmed(state)?;
            Ok(StateReconciler::react(state, config))
        }
        Action::ReceiptFailed(message) => {
            write::on_receipt_failed(state, message)?;
            Ok(StateReconciler::react(state, config))
        }
    }
}
