//! RevealGate integration tests against the in-memory chain.

#![allow(clippy::unwrap_used)]

use assert_matches::assert_matches;
use async_trait::async_trait;
use reclaim_app::views::reveal::{FAILED_LABEL, PENDING_LABEL};
use reclaim_app::views::{truncate, RevealPhase};
use reclaim_app::workflows::session::sync_account;
use reclaim_app::workflows::{RevealGate, WriteCoordinator};
use reclaim_app::{
    AppConfig, AppCore, AppError, AuthToken, BridgeError, BusyError, ChainBridge, LedgerColumns,
    LedgerEntry, LedgerReader, RevealState, ValidationError,
};
use reclaim_testkit::*;
use std::sync::Arc;

#[tokio::test]
async fn reveal_shows_seeded_entries() {
    init_test_tracing();
    let chain = MockChain::connected(ALICE_ADDRESS);
    chain.seed(
        ALICE_ADDRESS,
        [
            LedgerEntry::new("Bob", "555-0000"),
            LedgerEntry::new("Carol", "555-1111"),
        ],
    );
    let app = connected_app(&chain).await;

    RevealGate::request_reveal(&app).await.unwrap();

    let core = app.read().await;
    let snapshot = core.snapshot();
    assert_eq!(snapshot.reveal, RevealPhase::Revealed);
    assert_eq!(snapshot.ledger_text, "Bob: 555-0000\nCarol: 555-1111");
    assert_eq!(snapshot.reveal_label, None);
    assert_eq!(snapshot.reveal_error, None);
    assert!(core.state().flags().revealed_before);
    assert_eq!(chain.calls().signatures, 1);
    assert_eq!(chain.calls().reads, 1);
}

#[tokio::test]
async fn rejected_signature_hides_with_error() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    chain.fail_next_signature("User rejected signature");
    let app = connected_app(&chain).await;

    let err = RevealGate::request_reveal(&app).await.unwrap_err();
    assert_eq!(err, AppError::Auth("User rejected signature".into()));

    let core = app.read().await;
    assert_eq!(core.state().reveal(), &RevealState::hidden_with(FAILED_LABEL));
    assert_eq!(
        core.state().reveal_error(),
        Some(truncate("User rejected signature", 64).as_str())
    );
    assert!(!core.state().flags().revealed_before);
    // authentication completes (here: fails) before any read
    assert_eq!(chain.calls().reads, 0);
}

#[tokio::test]
async fn read_failure_discards_token() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    chain.fail_next_read("execution reverted");
    let app = connected_app(&chain).await;

    let err = RevealGate::request_reveal(&app).await.unwrap_err();
    assert_eq!(err, AppError::Read("execution reverted".into()));
    assert_eq!(
        app.read().await.state().reveal().label(),
        Some(FAILED_LABEL)
    );

    let err = WriteCoordinator::submit(&app, alice_entry())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::Validation(ValidationError::AuthenticationRequired)
    );
    assert_eq!(chain.calls().writes, 0);
}

#[tokio::test]
async fn failed_reveal_can_be_retried() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    chain.fail_next_signature("User rejected signature");
    let app = connected_app(&chain).await;

    assert!(RevealGate::request_reveal(&app).await.is_err());
    RevealGate::request_reveal(&app).await.unwrap();

    let core = app.read().await;
    assert!(core.state().reveal().is_revealed());
    assert_eq!(core.state().reveal_error(), None);
}

#[tokio::test]
async fn reveal_while_revealed_refetches() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();

    chain.seed(ALICE_ADDRESS, [LedgerEntry::new("Dave", "555-2222")]);
    RevealGate::request_reveal(&app).await.unwrap();

    assert_eq!(chain.calls().signatures, 2);
    assert_eq!(chain.calls().reads, 2);
    assert_eq!(app.read().await.snapshot().ledger_text, "Dave: 555-2222");
}

#[tokio::test]
async fn second_reveal_rejected_while_pending() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    chain.signature_gate().hold();

    let first = RevealGate::request_reveal(&app);
    let second = async {
        chain.signature_gate().entered().await;
        assert_eq!(
            app.read().await.state().reveal().label(),
            Some(PENDING_LABEL)
        );
        let err = RevealGate::request_reveal(&app).await.unwrap_err();
        assert_eq!(err, AppError::Busy(BusyError::RevealInFlight));
        assert!(app.read().await.state().reveal().is_pending());
        chain.signature_gate().release();
    };

    let (result, ()) = tokio::join!(first, second);
    result.unwrap();
    assert_eq!(chain.calls().signatures, 1);
}

#[tokio::test]
async fn reveal_requires_connected_wallet() {
    let chain = MockChain::new();
    let app = connected_app(&chain).await;

    let err = RevealGate::request_reveal(&app).await.unwrap_err();
    assert_eq!(err, AppError::NotConnected);
    assert_eq!(chain.calls().signatures, 0);
}

#[tokio::test]
async fn subscribers_see_each_transition() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    let mut updates = app.read().await.subscribe();
    updates.borrow_and_update();

    RevealGate::request_reveal(&app).await.unwrap();

    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().reveal, RevealPhase::Revealed);
}

/// Reader that returns columns of different lengths
struct MisalignedReader;

#[async_trait]
impl LedgerReader for MisalignedReader {
    async fn get_numbers_list(&self, _auth: &AuthToken) -> Result<LedgerColumns, BridgeError> {
        Ok(LedgerColumns {
            names: vec!["Bob".into(), "Carol".into()],
            numbers: vec!["555-0000".into()],
        })
    }
}

#[tokio::test]
async fn misaligned_columns_are_a_read_error() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let bridge = ChainBridge {
        reader: Arc::new(MisalignedReader),
        ..ChainBridge::from_backend(chain.clone())
    };
    let app = AppCore::new(AppConfig::default(), bridge).shared();
    sync_account(&app).await.unwrap();

    let err = RevealGate::request_reveal(&app).await.unwrap_err();
    assert_matches!(err, AppError::Read(message) if message.contains("2 names but 1 numbers"));
    assert!(!app.read().await.state().has_auth_token());
}
