//! WriteCoordinator and StateReconciler integration tests.

#![allow(clippy::unwrap_used)]

use reclaim_app::views::display::{BUSY_BUTTON_LABEL, IDLE_BUTTON_LABEL};
use reclaim_app::views::reveal::{FAILED_LABEL, TAP_TO_REVEAL_LABEL};
use reclaim_app::views::RevealPhase;
use reclaim_app::workflows::session::sync_account;
use reclaim_app::workflows::write::REVERTED_MESSAGE;
use reclaim_app::workflows::{RevealGate, WriteCoordinator};
use reclaim_app::{
    AppConfig, AppCore, AppError, AuthProvider, AuthToken, BusyError, ChainBridge, LedgerEntry,
    RevealState, TransactionLifecycle, ValidationError,
};
use reclaim_testkit::*;

#[tokio::test]
async fn first_write_without_reveal_offers_tap_to_reveal() {
    init_test_tracing();
    let chain = MockChain::connected(ALICE_ADDRESS);
    // Wallet already signed before the page loaded
    chain.issue_next_token("tokA");
    chain.fetch_auth_info().await.unwrap();
    let app = connected_app(&chain).await;

    WriteCoordinator::set_name(&app, "Alice").await.unwrap();
    WriteCoordinator::set_value(&app, "555-1234").await.unwrap();
    let tx_hash = WriteCoordinator::submit_form(&app).await.unwrap();

    assert_eq!(
        chain.last_write(),
        Some((alice_entry(), AuthToken::new("tokA")))
    );
    assert_eq!(chain.entries(ALICE_ADDRESS), vec![alice_entry()]);

    let core = app.read().await;
    let state = core.state();
    assert!(state.form().is_empty());
    assert_eq!(state.reveal(), &RevealState::hidden_with(TAP_TO_REVEAL_LABEL));
    assert_eq!(state.entry_error(), None);
    assert_eq!(
        state.lifecycle(),
        &TransactionLifecycle::Confirmed { tx_hash }
    );
    assert!(!core.is_busy());
    // no refresh: the user has not revealed in this session
    assert_eq!(chain.calls().signatures, 1);
    assert_eq!(chain.calls().reads, 0);
}

#[tokio::test]
async fn write_after_reveal_refreshes_once() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    chain.seed(ALICE_ADDRESS, [LedgerEntry::new("Bob", "555-0000")]);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();

    WriteCoordinator::submit(&app, alice_entry()).await.unwrap();

    assert_eq!(chain.calls().signatures, 2);
    assert_eq!(chain.calls().reads, 2);
    let snapshot = app.read().await.snapshot();
    assert_eq!(snapshot.reveal, RevealPhase::Revealed);
    assert_eq!(snapshot.ledger_text, "Bob: 555-0000\nAlice: 555-1234");
}

#[tokio::test]
async fn validation_never_reaches_the_writer() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;

    let cases = [
        (LedgerEntry::new("", "555-1234"), ValidationError::NameRequired),
        (LedgerEntry::new("Alice", ""), ValidationError::NumberRequired),
        (alice_entry(), ValidationError::AuthenticationRequired),
    ];
    for (entry, expected) in cases {
        let err = WriteCoordinator::submit(&app, entry).await.unwrap_err();
        assert_eq!(err, AppError::Validation(expected));
        let core = app.read().await;
        assert_eq!(core.state().entry_error(), Some(expected.to_string().as_str()));
        assert_eq!(core.state().lifecycle(), &TransactionLifecycle::Idle);
    }
    assert_eq!(chain.calls().writes, 0);
}

#[tokio::test]
async fn entry_error_clears_on_next_submit() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();

    assert!(WriteCoordinator::submit(&app, LedgerEntry::new("", "1"))
        .await
        .is_err());
    WriteCoordinator::submit(&app, alice_entry()).await.unwrap();

    assert_eq!(app.read().await.state().entry_error(), None);
}

#[tokio::test]
async fn rejected_write_keeps_the_form() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();
    WriteCoordinator::set_name(&app, "Alice").await.unwrap();
    WriteCoordinator::set_value(&app, "555-1234").await.unwrap();
    chain.fail_next_write("User denied transaction signature");

    let err = WriteCoordinator::submit_form(&app).await.unwrap_err();
    assert_eq!(
        err,
        AppError::WriteSubmit("User denied transaction signature".into())
    );

    let core = app.read().await;
    let state = core.state();
    assert_eq!(state.form().to_entry(), alice_entry());
    assert_eq!(
        state.entry_error(),
        Some("User denied transaction signature")
    );
    assert!(state.reveal().is_revealed());
    assert!(!core.is_busy());
    assert!(chain.entries(ALICE_ADDRESS).is_empty());
}

#[tokio::test]
async fn reverted_receipt_is_a_write_failure() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();
    chain.revert_next_receipt(Some("execution reverted: list full"));

    let err = WriteCoordinator::submit(&app, alice_entry())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::Receipt("execution reverted: list full".into())
    );
    assert!(chain.entries(ALICE_ADDRESS).is_empty());
    assert_eq!(chain.calls().reads, 1);
    assert!(matches!(
        app.read().await.state().lifecycle(),
        TransactionLifecycle::Failed { .. }
    ));
}

#[tokio::test]
async fn revert_without_reason_uses_generic_message() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();
    chain.revert_next_receipt(None);

    let err = WriteCoordinator::submit(&app, alice_entry())
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Receipt(REVERTED_MESSAGE.into()));
    assert_eq!(
        app.read().await.state().entry_error(),
        Some(REVERTED_MESSAGE)
    );
}

#[tokio::test]
async fn long_errors_are_truncated_for_display() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let config = AppConfig::default().with_max_error_len(16);
    let app = AppCore::new(config, ChainBridge::from_backend(chain.clone())).shared();
    sync_account(&app).await.unwrap();
    RevealGate::request_reveal(&app).await.unwrap();
    chain.fail_next_write("insufficient funds for gas * price + value");

    let err = WriteCoordinator::submit(&app, alice_entry())
        .await
        .unwrap_err();
    // the returned error keeps the full message
    assert_eq!(err.message(), "insufficient funds for gas * price + value");
    assert_eq!(
        app.read().await.state().entry_error(),
        Some("insufficient fun...")
    );
}

#[tokio::test]
async fn busy_guard_holds_until_receipt() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();
    chain.receipt_gate().hold();

    let submit = WriteCoordinator::submit(&app, alice_entry());
    let while_pending = async {
        chain.receipt_gate().entered().await;
        assert!(WriteCoordinator::is_busy(&app).await);
        assert_eq!(app.read().await.snapshot().submit_label, BUSY_BUTTON_LABEL);

        let reveal_before = app.read().await.state().reveal().clone();
        let err = RevealGate::request_reveal(&app).await.unwrap_err();
        assert_eq!(err, AppError::Busy(BusyError::TransactionInFlight));
        assert_eq!(app.read().await.state().reveal(), &reveal_before);

        let err = WriteCoordinator::submit(&app, LedgerEntry::new("Eve", "1"))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Busy(BusyError::TransactionInFlight));

        let err = WriteCoordinator::set_name(&app, "Mallory")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Busy(BusyError::TransactionInFlight));

        chain.receipt_gate().release();
    };

    let (result, ()) = tokio::join!(submit, while_pending);
    result.unwrap();
    assert_eq!(chain.calls().writes, 1);
    assert_eq!(chain.entries(ALICE_ADDRESS), vec![alice_entry()]);
    assert_eq!(app.read().await.snapshot().submit_label, IDLE_BUTTON_LABEL);
}

#[tokio::test]
async fn refresh_failure_does_not_fail_the_write() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();
    chain.fail_next_signature("User rejected signature");

    let tx_hash = WriteCoordinator::submit(&app, alice_entry()).await.unwrap();

    let core = app.read().await;
    let state = core.state();
    assert_eq!(
        state.lifecycle(),
        &TransactionLifecycle::Confirmed { tx_hash }
    );
    assert_eq!(state.entry_error(), None);
    assert_eq!(state.reveal().label(), Some(FAILED_LABEL));
    assert_eq!(state.reveal_error(), Some("User rejected signature"));
    // The token from the first reveal survives a declined signature
    assert!(state.has_auth_token());
    drop(core);

    WriteCoordinator::submit(&app, LedgerEntry::new("Bob", "555-0000"))
        .await
        .unwrap();
    assert_eq!(chain.calls().writes, 2);
    assert_eq!(
        app.read().await.snapshot().ledger_text,
        "Alice: 555-1234\nBob: 555-0000"
    );
}

#[tokio::test]
async fn write_during_reveal_restarts_it_with_fresh_data() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    chain.seed(ALICE_ADDRESS, [LedgerEntry::new("Bob", "555-0000")]);
    let app = connected_app(&chain).await;
    RevealGate::request_reveal(&app).await.unwrap();
    chain.read_gate().hold();

    let reveal = RevealGate::request_reveal(&app);
    let write = async {
        // This read observed the ledger before Alice was added
        chain.read_gate().entered().await;
        let submit = WriteCoordinator::submit(&app, alice_entry());
        let release = async {
            chain.read_gate().entered().await;
            chain.read_gate().release();
        };
        let (result, ()) = tokio::join!(submit, release);
        result.unwrap();
    };

    let (result, ()) = tokio::join!(reveal, write);
    assert_eq!(result.unwrap_err(), AppError::RevealSuperseded);

    let snapshot = app.read().await.snapshot();
    assert_eq!(snapshot.reveal, RevealPhase::Revealed);
    assert_eq!(snapshot.ledger_text, "Bob: 555-0000\nAlice: 555-1234");
    assert_eq!(snapshot.reveal_error, None);
    let calls = chain.calls();
    assert_eq!(calls.signatures, 3);
    assert_eq!(calls.reads, 3);
    assert_eq!(calls.writes, 1);
    assert_eq!(calls.receipts, 1);
}

#[tokio::test]
async fn write_during_first_reveal_hides_it() {
    let chain = MockChain::connected(ALICE_ADDRESS);
    chain.seed(ALICE_ADDRESS, [LedgerEntry::new("Bob", "555-0000")]);
    chain.fetch_auth_info().await.unwrap();
    let app = connected_app(&chain).await;
    chain.read_gate().hold();

    let reveal = RevealGate::request_reveal(&app);
    let write = async {
        chain.read_gate().entered().await;
        WriteCoordinator::submit(&app, alice_entry()).await.unwrap();
        assert_eq!(
            app.read().await.state().reveal(),
            &RevealState::hidden_with(TAP_TO_REVEAL_LABEL)
        );
        chain.read_gate().release();
    };

    let (result, ()) = tokio::join!(reveal, write);
    assert_eq!(result.unwrap_err(), AppError::RevealSuperseded);

    let core = app.read().await;
    let state = core.state();
    assert_eq!(state.reveal(), &RevealState::hidden_with(TAP_TO_REVEAL_LABEL));
    assert_eq!(state.reveal_error(), None);
    assert!(!state.flags().revealed_before);
    assert!(state.form().is_empty());
    assert_eq!(chain.entries(ALICE_ADDRESS).len(), 2);
    let calls = chain.calls();
    assert_eq!(calls.signatures, 2);
    assert_eq!(calls.reads, 1);
    assert_eq!(calls.writes, 1);
}
