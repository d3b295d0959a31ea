//! # RevealGate
//!
//! Decides when the private ledger may be fetched and shown.
//!
//! ```text
//! Hidden ──request──► Pending ──token──► (fetch) ──ok──► Revealed
//!   ▲                    │                  │
//!   └──── failure ───────┴──────────────────┘
//! ```
//!
//! A reveal always signs first and reads second, with the token it just
//! obtained. Requesting a reveal while already revealed re-runs the whole
//! sequence; the reconciler relies on this to refresh after a write.
//!
//! Each attempt carries a generation. The reconciler may restart or cancel
//! an attempt that is still in flight; results tagged with the old
//! generation are then dropped by the reducer.

use super::effects::drive;
use crate::config::AppConfig;
use crate::core::{Action, AppState, Effect, SharedApp};
use crate::errors::{AppError, BusyError};
use crate::ids::AuthToken;
use crate::runtime_bridge::LedgerReader;
use crate::views::reveal::{FAILED_LABEL, TAP_TO_REVEAL_LABEL};
use crate::views::{truncate, LedgerSnapshot, RevealState};

/// Entry point for reveal requests
pub struct RevealGate;

impl RevealGate {
    /// Sign, fetch and reveal the ledger.
    ///
    /// Rejected without any state change when a write is in flight, a reveal
    /// is already pending, or no wallet is connected. Signing and read
    /// failures are recorded in the reveal section and returned. Fails with
    /// [`AppError::RevealSuperseded`] when a confirmed write restarted or
    /// cancelled this attempt before it finished.
    pub async fn request_reveal(app: &SharedApp) -> Result<(), AppError> {
        let outcome = drive(app, Action::RevealRequested).await?;
        if outcome.stale {
            return Err(AppError::SessionEnded);
        }
        if outcome.superseded {
            tracing::debug!("Reveal superseded before completion");
            return Err(AppError::RevealSuperseded);
        }
        match outcome.failures.into_iter().next() {
            Some(err) => Err(err),
            None => {
                tracing::info!("Numbers list revealed");
                Ok(())
            }
        }
    }
}

// ============================================================================
// Transitions
// ============================================================================

pub(crate) fn begin(state: &mut AppState) -> Result<Vec<Effect>, AppError> {
    state.require_connected()?;
    if state.is_busy() {
        return Err(BusyError::TransactionInFlight.into());
    }
    if state.reveal.is_pending() {
        return Err(BusyError::RevealInFlight.into());
    }

    state.set_reveal(RevealState::pending(), "RevealRequested")?;
    state.reveal_error = None;
    let generation = state.next_reveal_generation();
    Ok(vec![Effect::ObtainToken { generation }])
}

/// Abandon the in-flight attempt and start over from signing; the state
/// stays `Pending`
pub(crate) fn restart(state: &mut AppState) -> Result<Vec<Effect>, AppError> {
    expect_pending(state, "ReceiptConfirmed")?;
    state.reveal_error = None;
    let generation = state.next_reveal_generation();
    Ok(vec![Effect::ObtainToken { generation }])
}

/// Hide behind the tap-to-reveal prompt, abandoning any in-flight attempt
pub(crate) fn conceal(state: &mut AppState) -> Result<(), AppError> {
    state.set_reveal(
        RevealState::hidden_with(TAP_TO_REVEAL_LABEL),
        "ReceiptConfirmed",
    )?;
    state.next_reveal_generation();
    Ok(())
}

pub(crate) fn on_token(state: &mut AppState, token: AuthToken) -> Result<Vec<Effect>, AppError> {
    expect_pending(state, "TokenObtained")?;
    state.auth_token = Some(token.clone());
    Ok(vec![Effect::FetchSnapshot {
        token,
        generation: state.reveal_generation,
    }])
}

pub(crate) fn on_snapshot(
    state: &mut AppState,
    snapshot: LedgerSnapshot,
) -> Result<Vec<Effect>, AppError> {
    expect_pending(state, "SnapshotLoaded")?;
    if state.auth_token.is_none() {
        return Err(AppError::InvalidTransition {
            action: "SnapshotLoaded",
            state: "unauthenticated",
        });
    }

    state.set_reveal(RevealState::Revealed { snapshot }, "SnapshotLoaded")?;
    state.reveal_error = None;
    state.flags.revealed_before = true;
    Ok(Vec::new())
}

/// Signing failed; a token already held for the session is kept
pub(crate) fn on_sign_failure(
    state: &mut AppState,
    message: &str,
    config: &AppConfig,
) -> Result<Vec<Effect>, AppError> {
    fail(state, message, config, "TokenRejected")
}

/// The read failed with the token just obtained; that token is discarded
pub(crate) fn on_read_failure(
    state: &mut AppState,
    message: &str,
    config: &AppConfig,
) -> Result<Vec<Effect>, AppError> {
    fail(state, message, config, "SnapshotFailed")?;
    state.auth_token = None;
    Ok(Vec::new())
}

fn fail(
    state: &mut AppState,
    message: &str,
    config: &AppConfig,
    action: &'static str,
) -> Result<Vec<Effect>, AppError> {
    expect_pending(state, action)?;
    state.set_reveal(RevealState::hidden_with(FAILED_LABEL), action)?;
    state.reveal_error = Some(truncate(message, config.display.max_error_len));
    Ok(Vec::new())
}

fn expect_pending(state: &AppState, action: &'static str) -> Result<(), AppError> {
    if state.reveal.is_pending() {
        Ok(())
    } else {
        Err(AppError::InvalidTransition {
            action,
            state: state.reveal.phase().as_str(),
        })
    }
}

// ============================================================================
// Effects
// ============================================================================

pub(crate) async fn fetch(reader: &dyn LedgerReader, token: &AuthToken, generation: u64) -> Action {
    let columns = match reader.get_numbers_list(token).await {
        Ok(columns) => columns,
        Err(err) => {
            tracing::warn!(error = %err, "Numbers list read failed");
            return Action::SnapshotFailed {
                message: err.message,
                generation,
            };
        }
    };

    match LedgerSnapshot::from_columns(columns.names, columns.numbers) {
        Ok(snapshot) => {
            tracing::debug!(entries = snapshot.len(), generation, "Numbers list fetched");
            Action::SnapshotLoaded {
                snapshot,
                generation,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Numbers list columns misaligned");
            Action::SnapshotFailed {
                message: err.to_string(),
                generation,
            }
        }
    }
}
