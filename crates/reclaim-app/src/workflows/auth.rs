//! # AuthBroker
//!
//! Thin wrapper over the signing collaborator. Every call prompts the user;
//! the broker keeps nothing, callers store the token they get back.

use crate::errors::AppError;
use crate::ids::AuthToken;
use crate::runtime_bridge::AuthProvider;
use std::sync::Arc;

/// Obtains authentication tokens from the signer
#[derive(Clone)]
pub struct AuthBroker {
    provider: Arc<dyn AuthProvider>,
}

impl AuthBroker {
    /// Create a broker over a signer
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Prompt for a signature and return a fresh token.
    ///
    /// Fails with [`AppError::Auth`] when the user rejects or the signer errors.
    pub async fn obtain_token(&self) -> Result<AuthToken, AppError> {
        tracing::debug!("Requesting signature for auth token");
        match self.provider.fetch_auth_info().await {
            Ok(token) => {
                tracing::debug!("Auth token obtained");
                Ok(token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Signing failed");
                Err(AppError::Auth(err.message))
            }
        }
    }

    /// Token the signer currently holds, without prompting
    pub fn held_token(&self) -> Option<AuthToken> {
        self.provider.auth_info()
    }
}
