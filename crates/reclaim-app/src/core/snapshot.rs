//! Display-ready state snapshot.

use super::state::AppState;
use crate::views::display::submit_label;
use crate::views::{RevealPhase, TransactionLifecycle};
use serde::Serialize;

/// Copy of [`AppState`] shaped for rendering.
///
/// Published to subscribers after every transition. Never contains the
/// auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// Connected address; the workflow is only shown when present
    pub address: Option<String>,
    /// Reveal phase
    pub reveal: RevealPhase,
    /// Label over the hidden/pending field
    pub reveal_label: Option<String>,
    /// Rendered ledger (`name: value` lines), empty unless revealed
    pub ledger_text: String,
    /// Reveal section error
    pub reveal_error: Option<String>,
    /// Name field
    pub name: String,
    /// Number field
    pub value: String,
    /// Entry form error
    pub entry_error: Option<String>,
    /// Current write lifecycle
    pub lifecycle: TransactionLifecycle,
    /// Busy guard; inputs and submit are disabled while set
    pub is_busy: bool,
    /// Submit button label
    pub submit_label: &'static str,
}

impl StateSnapshot {
    /// Capture the current state
    pub fn from_state(state: &AppState) -> Self {
        let is_busy = state.is_busy();
        Self {
            address: state.address().map(ToString::to_string),
            reveal: state.reveal().phase(),
            reveal_label: state.reveal().label().map(str::to_string),
            ledger_text: state
                .reveal()
                .snapshot()
                .map(|s| s.render())
                .unwrap_or_default(),
            reveal_error: state.reveal_error().map(str::to_string),
            name: state.form().name.clone(),
            value: state.form().value.clone(),
            entry_error: state.entry_error().map(str::to_string),
            lifecycle: state.lifecycle().clone(),
            is_busy,
            submit_label: submit_label(is_busy),
        }
    }
}
