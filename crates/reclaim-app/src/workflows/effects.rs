//! Effect loop.
//!
//! Reduces an action, runs the effects it returns, and feeds every result
//! back through the reducer until no effects remain. The app lock is taken
//! per reduction and released before each collaborator call.

use super::{auth::AuthBroker, reveal, write};
use crate::core::{Action, Effect, SharedApp};
use crate::errors::AppError;
use crate::ids::TxHash;
use crate::runtime_bridge::ChainBridge;
use std::collections::VecDeque;

/// What happened while driving one user action to quiescence
#[derive(Debug, Default)]
pub(crate) struct Outcome {
    /// Collaborator failures, in the order they arrived
    pub failures: Vec<AppError>,
    /// Transaction accepted by the writer, if any
    pub accepted: Option<TxHash>,
    /// The session was reset before the loop finished
    pub stale: bool,
    /// A reveal result arrived after its attempt was restarted or cancelled
    pub superseded: bool,
}

pub(crate) async fn drive(app: &SharedApp, action: Action) -> Result<Outcome, AppError> {
    let (epoch, bridge, mut queue) = {
        let mut core = app.write().await;
        let effects = core.dispatch(action)?;
        (core.epoch(), core.bridge().clone(), VecDeque::from(effects))
    };

    let mut outcome = Outcome::default();
    while let Some(effect) = queue.pop_front() {
        let next = execute(&bridge, effect).await;

        let mut core = app.write().await;
        if core.epoch() != epoch {
            tracing::debug!(
                action = next.name(),
                started = epoch,
                current = core.epoch(),
                "Discarding result from ended session"
            );
            outcome.stale = true;
            break;
        }
        if core.state().is_superseded(&next) {
            tracing::debug!(action = next.name(), "Discarding result from superseded reveal");
            outcome.superseded = true;
            continue;
        }

        if let Action::WriteAccepted(tx_hash) = &next {
            outcome.accepted = Some(tx_hash.clone());
        }
        if let Some(failure) = next.failure() {
            outcome.failures.push(failure);
        }
        queue.extend(core.dispatch(next)?);
    }

    Ok(outcome)
}

async fn execute(bridge: &ChainBridge, effect: Effect) -> Action {
    tracing::debug!(effect = effect.name(), "Running effect");
    match effect {
        Effect::ObtainToken { generation } => {
            match AuthBroker::new(bridge.auth.clone()).obtain_token().await {
                Ok(token) => Action::TokenObtained { token, generation },
                Err(err) => Action::TokenRejected {
                    message: err.message(),
                    generation,
                },
            }
        }
        Effect::FetchSnapshot { token, generation } => {
            reveal::fetch(bridge.reader.as_ref(), &token, generation).await
        }
        Effect::SubmitWrite(request) => write::send(bridge.writer.as_ref(), &request).await,
        Effect::AwaitReceipt(tx_hash) => write::confirm(bridge.receipts.as_ref(), &tx_hash).await,
    }
}
