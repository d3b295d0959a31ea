//! # WriteCoordinator
//!
//! Validates and submits new entries, then follows the transaction to its
//! receipt:
//!
//! ```text
//! Idle ─► Submitting ─► AwaitingConfirmation(tx) ─► Confirmed(tx)
//!              │                  │
//!              └──────────────────┴──────────────► Failed(message)
//! ```
//!
//! While `Submitting` or `AwaitingConfirmation` the busy guard is set: new
//! submissions, form edits and reveal requests are rejected.

use super::effects::drive;
use crate::core::{Action, AppState, Effect, SharedApp};
use crate::errors::{AppError, BusyError, ValidationError};
use crate::ids::{AuthToken, TxHash};
use crate::runtime_bridge::{LedgerWriter, ReceiptWaiter};
use crate::views::{LedgerEntry, TransactionLifecycle, WriteRequest};

/// Message used when a receipt reports failure without a reason
pub const REVERTED_MESSAGE: &str = "Transaction reverted";

/// Entry point for ledger writes
pub struct WriteCoordinator;

impl WriteCoordinator {
    /// Submit `entry` and wait for its receipt.
    ///
    /// Returns the confirmed transaction hash. The post-confirmation refresh
    /// (if any) runs before this returns; its failures land in the reveal
    /// section and are only logged here.
    pub async fn submit(app: &SharedApp, entry: LedgerEntry) -> Result<TxHash, AppError> {
        let outcome = drive(app, Action::SubmitRequested(entry)).await?;

        for failure in outcome.failures.iter().filter(|f| f.is_reveal_failure()) {
            tracing::warn!(error = %failure, "Refresh after confirmed write failed");
        }
        if let Some(err) = outcome.failures.into_iter().find(AppError::is_write_failure) {
            return Err(err);
        }
        if outcome.stale {
            return Err(AppError::SessionEnded);
        }

        let tx_hash = outcome.accepted.ok_or(AppError::InvalidTransition {
            action: "SubmitRequested",
            state: "no transaction accepted",
        })?;
        tracing::info!(tx_hash = %tx_hash, "Entry confirmed");
        Ok(tx_hash)
    }

    /// Submit the current form contents
    pub async fn submit_form(app: &SharedApp) -> Result<TxHash, AppError> {
        let entry = app.read().await.state().form().to_entry();
        Self::submit(app, entry).await
    }

    /// Edit the name field; rejected while busy
    pub async fn set_name(app: &SharedApp, name: impl Into<String>) -> Result<(), AppError> {
        app.write()
            .await
            .dispatch(Action::NameEdited(name.into()))
            .map(|_| ())
    }

    /// Edit the number field; rejected while busy
    pub async fn set_value(app: &SharedApp, value: impl Into<String>) -> Result<(), AppError> {
        app.write()
            .await
            .dispatch(Action::ValueEdited(value.into()))
            .map(|_| ())
    }

    /// The shared busy guard
    pub async fn is_busy(app: &SharedApp) -> bool {
        app.read().await.is_busy()
    }
}

/// Local pre-submission checks; the first failing check wins.
pub fn validate(
    entry: &LedgerEntry,
    auth_token: Option<&AuthToken>,
) -> Result<WriteRequest, ValidationError> {
    if entry.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if entry.value.is_empty() {
        return Err(ValidationError::NumberRequired);
    }
    let auth_token = auth_token.ok_or(ValidationError::AuthenticationRequired)?;

    Ok(WriteRequest {
        entry: entry.clone(),
        auth_token: auth_token.clone(),
    })
}

// ============================================================================
// Transitions
// ============================================================================

pub(crate) fn begin(state: &mut AppState, entry: LedgerEntry) -> Result<Vec<Effect>, AppError> {
    state.require_connected()?;
    if state.is_busy() {
        return Err(BusyError::TransactionInFlight.into());
    }

    state.entry_error = None;
    let request = match validate(&entry, state.auth_token.as_ref()) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "Entry rejected by validation");
            state.entry_error = Some(err.to_string());
            return Err(err.into());
        }
    };

    state.lifecycle = TransactionLifecycle::Submitting;
    Ok(vec![Effect::SubmitWrite(request)])
}

pub(crate) fn on_accepted(state: &mut AppState, tx_hash: TxHash) -> Result<Vec<Effect>, AppError> {
    expect(state, "WriteAccepted", |l| matches!(l, TransactionLifecycle::Submitting))?;
    state.lifecycle = TransactionLifecycle::AwaitingConfirmation {
        tx_hash: tx_hash.clone(),
    };
    Ok(vec![Effect::AwaitReceipt(tx_hash)])
}

pub(crate) fn on_rejected(state: &mut AppState, message: String) -> Result<(), AppError> {
    expect(state, "WriteRejected", |l| matches!(l, TransactionLifecycle::Submitting))?;
    state.lifecycle = TransactionLifecycle::Failed { message };
    Ok(())
}

pub(crate) fn on_confirmed(state: &mut AppState) -> Result<(), AppError> {
    let tx_hash = match &state.lifecycle {
        TransactionLifecycle::AwaitingConfirmation { tx_hash } => tx_hash.clone(),
        other => {
            return Err(AppError::InvalidTransition {
                action: "ReceiptConfirmed",
                state: other.as_str(),
            })
        }
    };
    state.lifecycle = TransactionLifecycle::Confirmed { tx_hash };
    Ok(())
}

pub(crate) fn on_receipt_failed(state: &mut AppState, message: String) -> Result<(), AppError> {
    expect(state, "ReceiptFailed", |l| {
        matches!(l, TransactionLifecycle::AwaitingConfirmation { .. })
    })?;
    state.lifecycle = TransactionLifecycle::Failed { message };
    Ok(())
}

pub(crate) fn on_name_edited(state: &mut AppState, name: String) -> Result<(), AppError> {
    if state.is_busy() {
        return Err(BusyError::TransactionInFlight.into());
    }
    state.form.name = name;
    Ok(())
}

pub(crate) fn on_value_edited(state: &mut AppState, value: String) -> Result<(), AppError> {
    if state.is_busy() {
        return Err(BusyError::TransactionInFlight.into());
    }
    state.form.value = value;
    Ok(())
}

fn expect(
    state: &AppState,
    action: &'static str,
    accepts: impl Fn(&TransactionLifecycle) -> bool,
) -> Result<(), AppError> {
    if accepts(&state.lifecycle) {
        Ok(())
    } else {
        Err(AppError::InvalidTransition {
            action,
            state: state.lifecycle.as_str(),
        })
    }
}

// ============================================================================
// Effects
// ============================================================================

pub(crate) async fn send(writer: &dyn LedgerWriter, request: &WriteRequest) -> Action {
    let entry = &request.entry;
    match writer
        .add_to_numbers_list(&entry.name, &entry.value, &request.auth_token)
        .await
    {
        Ok(tx_hash) => {
            tracing::debug!(tx_hash = %tx_hash, "Write accepted");
            Action::WriteAccepted(tx_hash)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Write submission failed");
            Action::WriteRejected(err.message)
        }
    }
}

pub(crate) async fn confirm(receipts: &dyn ReceiptWaiter, tx_hash: &TxHash) -> Action {
    match receipts.wait_for_receipt(tx_hash).await {
        Ok(receipt) if receipt.success => Action::ReceiptConfirmed,
        Ok(receipt) => {
            let message = receipt
                .error
                .unwrap_or_else(|| REVERTED_MESSAGE.to_string());
            tracing::warn!(tx_hash = %tx_hash, error = %message, "Transaction failed");
            Action::ReceiptFailed(message)
        }
        Err(err) => {
            tracing::warn!(tx_hash = %tx_hash, error = %err, "Waiting for receipt failed");
            Action::ReceiptFailed(err.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn token() -> AuthToken {
        AuthToken::new("tokA")
    }

    #[test]
    fn valid_entry_builds_request() {
        let entry = LedgerEntry::new("Alice", "555-1234");
        let request = validate(&entry, Some(&token())).unwrap();
        assert_eq!(request.entry, entry);
        assert_eq!(request.auth_token, token());
    }

    proptest! {
        #[test]
        fn first_failing_check_wins(
            name in prop::option::of("[a-z]{1,8}"),
            value in prop::option::of("[0-9-]{1,8}"),
            authed in any::<bool>(),
        ) {
            let entry = LedgerEntry::new(name.clone().unwrap_or_default(), value.clone().unwrap_or_default());
            let token = token();
            let result = validate(&entry, authed.then_some(&token));

            let expected = if name.is_none() {
                Some(ValidationError::NameRequired)
            } else if value.is_none() {
                Some(ValidationError::NumberRequired)
            } else if !authed {
                Some(ValidationError::AuthenticationRequired)
            } else {
                None
            };
            prop_assert_eq!(result.err(), expected);
        }
    }
}
