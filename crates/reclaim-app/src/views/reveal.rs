//! # Reveal View State
//!
//! Tri-state visibility of the private ledger. A snapshot only exists inside
//! [`RevealState::Revealed`], so hiding the list always discards its data.

use super::ledger::LedgerSnapshot;
use serde::Serialize;

/// Label shown while waiting for the signature and read
pub const PENDING_LABEL: &str = "Please sign message and wait...";

/// Label shown after a failed reveal
pub const FAILED_LABEL: &str = "Something went wrong! Please try again...";

/// Label shown after a write when the list was never revealed
pub const TAP_TO_REVEAL_LABEL: &str = "Tap to reveal";

/// Reveal section state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RevealState {
    /// Ledger not shown; optional prompt or failure label
    Hidden {
        /// Label rendered over the hidden field
        label: Option<String>,
    },
    /// Waiting for signature and fetch
    Pending {
        /// Progress label
        label: String,
    },
    /// Ledger fetched with a token obtained for this reveal
    Revealed {
        /// Data to display
        snapshot: LedgerSnapshot,
    },
}

impl Default for RevealState {
    fn default() -> Self {
        Self::Hidden { label: None }
    }
}

/// Discriminant of [`RevealState`], used for transition checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RevealPhase {
    /// Hidden
    Hidden,
    /// Pending
    Pending,
    /// Revealed
    Revealed,
}

impl RevealPhase {
    /// Whether `self -> next` is an allowed transition.
    ///
    /// `Pending -> Pending` and `Hidden -> Revealed` are never allowed.
    pub fn can_transition_to(self, next: RevealPhase) -> bool {
        use RevealPhase::*;
        matches!(
            (self, next),
            (Hidden, Hidden)
                | (Hidden, Pending)
                | (Pending, Revealed)
                | (Pending, Hidden)
                | (Revealed, Pending)
                | (Revealed, Hidden)
        )
    }

    /// Name used in logs and transition errors
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Pending => "pending",
            Self::Revealed => "revealed",
        }
    }
}

impl RevealState {
    /// Hidden with a label
    pub fn hidden_with(label: impl Into<String>) -> Self {
        Self::Hidden {
            label: Some(label.into()),
        }
    }

    /// Pending with the standard signing prompt
    pub fn pending() -> Self {
        Self::Pending {
            label: PENDING_LABEL.to_string(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> RevealPhase {
        match self {
            Self::Hidden { .. } => RevealPhase::Hidden,
            Self::Pending { .. } => RevealPhase::Pending,
            Self::Revealed { .. } => RevealPhase::Revealed,
        }
    }

    /// Whether a reveal is waiting on signature or read
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Whether the ledger is shown
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed { .. })
    }

    /// Revealed snapshot, if any
    pub fn snapshot(&self) -> Option<&LedgerSnapshot> {
        match self {
            Self::Revealed { snapshot } => Some(snapshot),
            _ => None,
        }
    }

    /// Label to render; revealed data is never covered by a label
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Hidden { label } => label.as_deref(),
            Self::Pending { label } => Some(label),
            Self::Revealed { .. } => None,
        }
    }
}
