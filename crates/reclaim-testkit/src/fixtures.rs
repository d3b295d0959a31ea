//! Common app fixtures.

use crate::chain::MockChain;
use reclaim_app::workflows::session::sync_account;
use reclaim_app::{AppConfig, AppCore, ChainBridge, LedgerEntry, SharedApp};
use std::sync::Arc;

/// Address used by most tests
pub const ALICE_ADDRESS: &str = "0xA11CE";

/// App wired to `chain`, not yet synced with the connector
pub fn app_with(chain: &Arc<MockChain>) -> SharedApp {
    AppCore::new(AppConfig::default(), ChainBridge::from_backend(chain.clone())).shared()
}

/// App wired to `chain` with the connector's address already synced
pub async fn connected_app(chain: &Arc<MockChain>) -> SharedApp {
    let app = app_with(chain);
    sync_account(&app).await.expect("sync account");
    app
}

/// The entry from the reference scenario
pub fn alice_entry() -> LedgerEntry {
    LedgerEntry::new("Alice", "555-1234")
}

/// Install a test-writer subscriber once; honors `RUST_LOG`
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
