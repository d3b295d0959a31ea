//! Numbers Reclaim Testing Infrastructure
//!
//! In-memory collaborators with deterministic hashes, scriptable failures
//! and gates for holding a call mid-flight.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```rust,ignore
//! use reclaim_testkit::*;
//!
//! #[tokio::test]
//! async fn reveal_works() {
//!     let chain = MockChain::connected("0xA11CE");
//!     let app = connected_app(&chain).await;
//!     RevealGate::request_reveal(&app).await.unwrap();
//! }
//! ```

pub mod chain;
pub mod fixtures;
pub mod gate;

pub use chain::{CallCounts, MockChain};
pub use fixtures::*;
pub use gate::Gate;
