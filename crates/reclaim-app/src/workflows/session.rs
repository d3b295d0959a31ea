//! # Session
//!
//! A session is one connected address. Switching or disconnecting the
//! account resets everything scoped to it and starts a new epoch; results of
//! collaborator calls issued under the old epoch are discarded when they
//! arrive.

use super::auth::AuthBroker;
use crate::core::{Action, AppState, SharedApp};
use crate::errors::AppError;
use crate::ids::{Address, AuthToken};

/// Read the connector's address and reset the session if it changed.
///
/// A token the signer already holds for the new address is adopted so the
/// user can write without revealing first.
pub async fn sync_account(app: &SharedApp) -> Result<Option<Address>, AppError> {
    let mut core = app.write().await;
    let bridge = core.bridge().clone();
    let address = bridge.account.current_address();

    if core.state().address() == address.as_ref() {
        return Ok(address);
    }

    let held_token = match &address {
        Some(_) => AuthBroker::new(bridge.auth.clone()).held_token(),
        None => None,
    };
    tracing::info!(
        address = address.as_ref().map(Address::as_str).unwrap_or("<none>"),
        held_token = held_token.is_some(),
        "Account changed; resetting session"
    );

    core.dispatch(Action::AccountChanged {
        address: address.clone(),
        held_token,
    })?;
    Ok(address)
}

pub(crate) fn on_account_changed(
    state: &mut AppState,
    address: Option<Address>,
    held_token: Option<AuthToken>,
) {
    if state.address == address {
        return;
    }
    state.reset_session(address, held_token);
}
