//! # StateReconciler
//!
//! Reacts to a write lifecycle reaching a terminal state. The reducer calls
//! [`StateReconciler::react`] exactly once per transition, right after the
//! lifecycle moves, so the reaction is keyed on the transition and never on
//! polled state.
//!
//! | Transition | Form | Reveal |
//! |------------|------|--------|
//! | `Confirmed`, never revealed | cleared | `Hidden("Tap to reveal")`, snapshot dropped |
//! | `Confirmed`, revealed before | cleared | fresh reveal (sign + read) |
//! | `Failed(message)` | error set, fields kept | untouched |
//!
//! A reveal still pending at confirmation may carry a read taken before the
//! write landed. It is superseded: hidden when the list was never revealed,
//! restarted from signing otherwise.

use super::reveal;
use crate::config::AppConfig;
use crate::core::{AppState, Effect};
use crate::views::{truncate, TransactionLifecycle};

/// Post-lifecycle reconciliation
pub struct StateReconciler;

impl StateReconciler {
    /// Apply the reaction for the lifecycle the state just entered and
    /// return any effects it requests.
    pub(crate) fn react(state: &mut AppState, config: &AppConfig) -> Vec<Effect> {
        match &state.lifecycle {
            TransactionLifecycle::Confirmed { .. } => Self::on_confirmed(state),
            TransactionLifecycle::Failed { message } => {
                state.entry_error = Some(truncate(message, config.display.max_error_len));
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_confirmed(state: &mut AppState) -> Vec<Effect> {
        state.form.clear();

        if !state.flags.revealed_before {
            if let Err(err) = reveal::conceal(state) {
                tracing::warn!(error = %err, "Could not reset reveal state");
            }
            return Vec::new();
        }

        let refresh = if state.reveal.is_pending() {
            tracing::debug!("Restarting in-flight reveal after write");
            reveal::restart(state)
        } else {
            reveal::begin(state)
        };
        match refresh {
            Ok(effects) => {
                tracing::debug!("Refreshing numbers list after write");
                effects
            }
            Err(err) => {
                tracing::debug!(error = %err, "Skipping refresh after write");
                Vec::new()
            }
        }
    }
}
