//! Categorized application errors
//!
//! Every collaborator failure is caught at the boundary of the action that
//! issued it and normalized into one of these variants before it reaches
//! view state.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Categories
// ============================================================================

/// High-level error categories for frontend error handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User input validation errors (correctable by user)
    Input,
    /// Wallet connection or signature errors (user can reconnect or sign)
    Wallet,
    /// Chain read/write/receipt failures (often transient)
    Network,
    /// Rejected because of current state (busy, session ended)
    Operation,
}

impl ErrorCategory {
    /// Check if this error category is user-correctable.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Input | Self::Wallet)
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Wallet => "Wallet",
            Self::Network => "Network",
            Self::Operation => "Operation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Local errors
// ============================================================================

/// Entry form validation failures, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name field is empty
    #[error("Name is required!")]
    NameRequired,
    /// Number field is empty
    #[error("Number is required!")]
    NumberRequired,
    /// No auth token is held for the session
    #[error("Authentication required!")]
    AuthenticationRequired,
}

/// Operation rejected by the busy guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusyError {
    /// A write is submitting or awaiting confirmation
    #[error("A transaction is still in flight")]
    TransactionInFlight,
    /// A reveal is already waiting on signature or read
    #[error("A reveal is already in progress")]
    RevealInFlight,
}

// ============================================================================
// Application errors
// ============================================================================

/// Workflow-level error returned to frontends
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Local validation failed; the writer was never called
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Rejected by the busy guard; no state changed
    #[error(transparent)]
    Busy(#[from] BusyError),

    /// No wallet address is connected
    #[error("No wallet connected")]
    NotConnected,

    /// Signing was rejected or the signer failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Authenticated read of the ledger failed
    #[error("Failed to read numbers list: {0}")]
    Read(String),

    /// The write collaborator refused the submission
    #[error("Failed to submit entry: {0}")]
    WriteSubmit(String),

    /// The transaction was mined unsuccessfully or the wait failed
    #[error("Transaction failed: {0}")]
    Receipt(String),

    /// The session was reset while the operation was outstanding
    #[error("Session ended before the operation completed")]
    SessionEnded,

    /// A confirmed write restarted or cancelled the reveal before it finished
    #[error("Reveal superseded by a newer request")]
    RevealSuperseded,

    /// An action arrived that the current state cannot accept
    #[error("Invalid transition: {action} while {state}")]
    InvalidTransition {
        /// Action that was rejected
        action: &'static str,
        /// Description of the state it was applied to
        state: &'static str,
    },
}

impl AppError {
    /// Get the category of this error
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Input,
            Self::NotConnected | Self::Auth(_) => ErrorCategory::Wallet,
            Self::Read(_) | Self::WriteSubmit(_) | Self::Receipt(_) => ErrorCategory::Network,
            Self::Busy(_)
            | Self::SessionEnded
            | Self::RevealSuperseded
            | Self::InvalidTransition { .. } => ErrorCategory::Operation,
        }
    }

    /// The collaborator's own message for external failures, else the
    /// rendered error
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Auth(message)
            | Self::Read(message)
            | Self::WriteSubmit(message)
            | Self::Receipt(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this failure belongs to the reveal section (vs. the entry form)
    #[must_use]
    pub fn is_reveal_failure(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Read(_))
    }

    /// Whether this failure ended a write lifecycle
    #[must_use]
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::WriteSubmit(_) | Self::Receipt(_))
    }

    /// Check if the user can act to resolve this error
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        self.category().is_user_correctable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_form_copy() {
        assert_eq!(ValidationError::NameRequired.to_string(), "Name is required!");
        assert_eq!(ValidationError::NumberRequired.to_string(), "Number is required!");
        assert_eq!(
            ValidationError::AuthenticationRequired.to_string(),
            "Authentication required!"
        );
    }

    #[test]
    fn categories() {
        assert_eq!(
            AppError::from(ValidationError::NameRequired).category(),
            ErrorCategory::Input
        );
        assert_eq!(AppError::Auth("x".into()).category(), ErrorCategory::Wallet);
        assert_eq!(AppError::Receipt("x".into()).category(), ErrorCategory::Network);
        assert_eq!(
            AppError::from(BusyError::TransactionInFlight).category(),
            ErrorCategory::Operation
        );
        assert!(AppError::NotConnected.is_user_correctable());
        assert!(!AppError::SessionEnded.is_user_correctable());
        assert!(!AppError::RevealSuperseded.is_user_correctable());
    }

    #[test]
    fn wallet_category_is_correctable_unlike_network() {
        assert_eq!(AppError::NotConnected.category().label(), "Wallet");
        assert!(ErrorCategory::Wallet.is_user_correctable());
        assert!(!ErrorCategory::Network.is_user_correctable());
        assert!(!AppError::Read("x".into()).is_user_correctable());
    }

    #[test]
    fn failure_sections() {
        assert!(AppError::Read("x".into()).is_reveal_failure());
        assert!(!AppError::Read("x".into()).is_write_failure());
        assert!(AppError::WriteSubmit("x".into()).is_write_failure());
    }
}
