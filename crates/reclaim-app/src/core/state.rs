//! Authoritative application state.

use super::reducer::Action;
use crate::errors::AppError;
use crate::ids::{Address, AuthToken};
use crate::views::{EntryForm, RevealState, TransactionLifecycle};

/// Session-scoped flags, reset whenever the connected address changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    /// Set by the first successful reveal of the session
    pub revealed_before: bool,
}

/// Everything the core knows about the current session.
///
/// Mutated only by [`reduce`](super::reduce).
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(crate) address: Option<Address>,
    pub(crate) auth_token: Option<AuthToken>,
    pub(crate) reveal: RevealState,
    pub(crate) reveal_error: Option<String>,
    pub(crate) form: EntryForm,
    pub(crate) entry_error: Option<String>,
    pub(crate) lifecycle: TransactionLifecycle,
    pub(crate) flags: SessionFlags,
    pub(crate) epoch: u64,
    /// Current reveal attempt; results tagged with an older one are dropped
    pub(crate) reveal_generation: u64,
}

impl AppState {
    /// Connected address
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Whether a token is held for this session
    pub fn has_auth_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Reveal section state
    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    /// Truncated error from the last failed reveal
    pub fn reveal_error(&self) -> Option<&str> {
        self.reveal_error.as_deref()
    }

    /// Entry form contents
    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// Form-level error
    pub fn entry_error(&self) -> Option<&str> {
        self.entry_error.as_deref()
    }

    /// Current write lifecycle
    pub fn lifecycle(&self) -> &TransactionLifecycle {
        &self.lifecycle
    }

    /// Session flags
    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// Session epoch; bumped on every session reset
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The shared busy guard
    pub fn is_busy(&self) -> bool {
        self.lifecycle.is_busy()
    }

    /// Whether `action` is the result of a reveal attempt that has since
    /// been restarted or cancelled
    pub fn is_superseded(&self, action: &Action) -> bool {
        action
            .reveal_generation()
            .is_some_and(|generation| generation != self.reveal_generation)
    }

    /// Start a new reveal attempt, orphaning any in flight
    pub(crate) fn next_reveal_generation(&mut self) -> u64 {
        self.reveal_generation = self.reveal_generation.wrapping_add(1);
        self.reveal_generation
    }

    pub(crate) fn require_connected(&self) -> Result<&Address, AppError> {
        self.address.as_ref().ok_or(AppError::NotConnected)
    }

    /// Move the reveal state, refusing transitions the phase graph forbids
    pub(crate) fn set_reveal(
        &mut self,
        next: RevealState,
        action: &'static str,
    ) -> Result<(), AppError> {
        let from = self.reveal.phase();
        if !from.can_transition_to(next.phase()) {
            return Err(AppError::InvalidTransition {
                action,
                state: from.as_str(),
            });
        }
        self.reveal = next;
        Ok(())
    }

    /// Drop everything tied to the previous account and start a new epoch
    pub(crate) fn reset_session(&mut self, address: Option<Address>, held: Option<AuthToken>) {
        let epoch = self.epoch.wrapping_add(1);
        let reveal_generation = self.reveal_generation.wrapping_add(1);
        *self = Self {
            auth_token: address.as_ref().and(held),
            address,
            epoch,
            reveal_generation,
            ..Self::default()
        };
    }
}
