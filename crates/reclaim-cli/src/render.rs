//! Plain-text rendering of [`StateSnapshot`].

use reclaim_app::views::RevealPhase;
use reclaim_app::{StateSnapshot, TransactionLifecycle};
use std::fmt::Write;

/// Render the page the way a browser frontend would lay it out
pub fn render(snapshot: &StateSnapshot) -> String {
    let mut out = String::new();

    let Some(address) = &snapshot.address else {
        out.push_str("Wallet not connected. Use `connect <addr>`.\n");
        return out;
    };
    let _ = writeln!(out, "Account: {address}");

    out.push_str("--- Numbers list ---\n");
    match snapshot.reveal {
        RevealPhase::Revealed if snapshot.ledger_text.is_empty() => {
            out.push_str("(empty)\n");
        }
        RevealPhase::Revealed => {
            let _ = writeln!(out, "{}", snapshot.ledger_text);
        }
        RevealPhase::Hidden | RevealPhase::Pending => {
            let label = snapshot.reveal_label.as_deref().unwrap_or("(hidden)");
            let _ = writeln!(out, "[{label}]");
        }
    }
    if let Some(error) = &snapshot.reveal_error {
        let _ = writeln!(out, "! {error}");
    }

    out.push_str("--- New entry ---\n");
    let _ = writeln!(out, "name:   {}", snapshot.name);
    let _ = writeln!(out, "number: {}", snapshot.value);
    let _ = writeln!(out, "[{}]", snapshot.submit_label);
    if let Some(error) = &snapshot.entry_error {
        let _ = writeln!(out, "! {error}");
    }
    match &snapshot.lifecycle {
        TransactionLifecycle::Idle => {}
        TransactionLifecycle::Submitting => out.push_str("tx: submitting\n"),
        TransactionLifecycle::AwaitingConfirmation { tx_hash } => {
            let _ = writeln!(out, "tx: {tx_hash} pending");
        }
        TransactionLifecycle::Confirmed { tx_hash } => {
            let _ = writeln!(out, "tx: {tx_hash} confirmed");
        }
        TransactionLifecycle::Failed { .. } => out.push_str("tx: failed\n"),
    }
    out
}
