//! # Core Application Module
//!
//! - [`AppState`]: the single authoritative state
//! - [`reduce`]: the transition function; returns the effects to run next
//! - [`AppCore`]: owns state, config and collaborators; publishes snapshots
//! - [`StateSnapshot`]: display-ready copy of the state

mod app;
mod reducer;
mod snapshot;
mod state;

pub use app::{AppCore, SharedApp};
pub use reducer::{reduce, Action, Effect};
pub use snapshot::StateSnapshot;
pub use state::{AppState, SessionFlags};
