//! # AppCore
//!
//! Owns the state, the configuration and the collaborator bridge. Frontends
//! share it as [`SharedApp`] and drive it through [`crate::workflows`].

use super::reducer::{reduce, Action, Effect};
use super::snapshot::StateSnapshot;
use super::state::AppState;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::runtime_bridge::ChainBridge;
use async_lock::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle used by every workflow.
///
/// The lock is held only while reducing a single action, never across a
/// collaborator call.
pub type SharedApp = Arc<RwLock<AppCore>>;

/// Headless application core
pub struct AppCore {
    config: AppConfig,
    bridge: ChainBridge,
    state: AppState,
    publisher: watch::Sender<StateSnapshot>,
}

impl AppCore {
    /// Create a core with a disconnected, empty session
    pub fn new(config: AppConfig, bridge: ChainBridge) -> Self {
        let state = AppState::default();
        let (publisher, _) = watch::channel(StateSnapshot::from_state(&state));
        Self {
            config,
            bridge,
            state,
            publisher,
        }
    }

    /// Wrap in the shared handle workflows expect
    pub fn shared(self) -> SharedApp {
        Arc::new(RwLock::new(self))
    }

    /// Configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Collaborator bridge
    pub fn bridge(&self) -> &ChainBridge {
        &self.bridge
    }

    /// Current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Display-ready copy of the current state
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from_state(&self.state)
    }

    /// Receive a snapshot after every transition
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.publisher.subscribe()
    }

    /// The shared busy guard
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Current session epoch
    pub fn epoch(&self) -> u64 {
        self.state.epoch()
    }

    /// Reduce one action and publish the resulting snapshot.
    ///
    /// Publishes on failure too: a rejected submit still records its
    /// validation message.
    pub(crate) fn dispatch(&mut self, action: Action) -> Result<Vec<Effect>, AppError> {
        let result = reduce(&mut self.state, action, &self.config);
        self.publisher
            .send_replace(StateSnapshot::from_state(&self.state));
        result
    }
}

impl std::fmt::Debug for AppCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCore")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
