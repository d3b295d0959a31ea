//! In-memory numbers-list contract and wallet
//!
//! [`MockChain`] implements every collaborator trait with behavior close to
//! the real contract:
//!
//! - tokens are issued per connected address and checked on every read/write
//! - writes are queued as pending transactions and applied when their
//!   receipt is awaited
//! - each collaborator can be scripted to fail once or held at a [`Gate`]
//!
//! # Blocking Lock Usage
//!
//! Uses `std::sync::Mutex` because this is test infrastructure: the lock is
//! never held across an await and contention is not a concern.

#![allow(clippy::disallowed_types)]

use crate::gate::Gate;
use async_trait::async_trait;
use reclaim_app::{
    AccountConnector, Address, AuthProvider, AuthToken, BridgeError, LedgerColumns, LedgerEntry,
    LedgerReader, LedgerWriter, Receipt, ReceiptWaiter, TxHash,
};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Number of calls each collaborator has received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `fetch_auth_info` calls
    pub signatures: usize,
    /// `get_numbers_list` calls
    pub reads: usize,
    /// `add_to_numbers_list` calls
    pub writes: usize,
    /// `wait_for_receipt` calls
    pub receipts: usize,
}

#[derive(Debug, Clone)]
struct PendingTx {
    owner: Address,
    entry: LedgerEntry,
}

#[derive(Debug, Default)]
struct ChainState {
    address: Option<Address>,
    nonce: u64,
    /// Issued token -> address it authenticates
    issued: HashMap<String, Address>,
    held: Option<AuthToken>,
    next_token: Option<String>,
    ledgers: HashMap<Address, Vec<LedgerEntry>>,
    pending: HashMap<TxHash, PendingTx>,
    last_write: Option<(LedgerEntry, AuthToken)>,
    fail_signature: Option<String>,
    fail_read: Option<String>,
    fail_write: Option<String>,
    fail_receipt_wait: Option<String>,
    revert_receipt: Option<Option<String>>,
    calls: CallCounts,
}

impl ChainState {
    fn next_nonce(&mut self) -> u64 {
        self.nonce += 1;
        self.nonce
    }

    fn owner_of(&self, auth: &AuthToken) -> Result<Address, BridgeError> {
        self.issued
            .get(auth.expose())
            .cloned()
            .ok_or_else(|| BridgeError::new("Invalid auth token"))
    }
}

fn digest_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

/// Deterministic in-memory wallet + contract
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    state: Arc<Mutex<ChainState>>,
    signatures: Arc<Gate>,
    reads: Arc<Gate>,
    writes: Arc<Gate>,
    receipts: Arc<Gate>,
}

impl MockChain {
    /// Chain with no connected account
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Chain with `address` already connected
    pub fn connected(address: &str) -> Arc<Self> {
        let chain = Self::new();
        chain.connect(address);
        chain
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Switch the connected account; drops the held token
    pub fn connect(&self, address: &str) {
        let mut state = self.state.lock().unwrap();
        state.address = Some(Address::new(address));
        state.held = None;
    }

    /// Disconnect the wallet
    pub fn disconnect(&self) {
        let mut state = self.state.lock().unwrap();
        state.address = None;
        state.held = None;
    }

    // =========================================================================
    // Contract data
    // =========================================================================

    /// Pre-populate an account's list
    pub fn seed(&self, address: &str, entries: impl IntoIterator<Item = LedgerEntry>) {
        let mut state = self.state.lock().unwrap();
        state
            .ledgers
            .entry(Address::new(address))
            .or_default()
            .extend(entries);
    }

    /// Entries stored on chain for an account
    pub fn entries(&self, address: &str) -> Vec<LedgerEntry> {
        let state = self.state.lock().unwrap();
        state
            .ledgers
            .get(&Address::new(address))
            .cloned()
            .unwrap_or_default()
    }

    /// Most recent write request as received by the contract
    pub fn last_write(&self) -> Option<(LedgerEntry, AuthToken)> {
        self.state.lock().unwrap().last_write.clone()
    }

    /// Call counters
    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls
    }

    // =========================================================================
    // Scripting
    // =========================================================================

    /// Issue `token` verbatim on the next successful signature
    pub fn issue_next_token(&self, token: &str) {
        self.state.lock().unwrap().next_token = Some(token.to_string());
    }

    /// Fail the next signature request with `message`
    pub fn fail_next_signature(&self, message: &str) {
        self.state.lock().unwrap().fail_signature = Some(message.to_string());
    }

    /// Fail the next read with `message`
    pub fn fail_next_read(&self, message: &str) {
        self.state.lock().unwrap().fail_read = Some(message.to_string());
    }

    /// Fail the next write submission with `message`
    pub fn fail_next_write(&self, message: &str) {
        self.state.lock().unwrap().fail_write = Some(message.to_string());
    }

    /// Fail the next receipt wait itself (RPC error) with `message`
    pub fn fail_next_receipt_wait(&self, message: &str) {
        self.state.lock().unwrap().fail_receipt_wait = Some(message.to_string());
    }

    /// Mine the next awaited transaction as reverted
    pub fn revert_next_receipt(&self, reason: Option<&str>) {
        self.state.lock().unwrap().revert_receipt = Some(reason.map(str::to_string));
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Gate in front of `fetch_auth_info`
    pub fn signature_gate(&self) -> &Gate {
        &self.signatures
    }

    /// Gate in front of `get_numbers_list`
    pub fn read_gate(&self) -> &Gate {
        &self.reads
    }

    /// Gate in front of `add_to_numbers_list`
    pub fn write_gate(&self) -> &Gate {
        &self.writes
    }

    /// Gate in front of `wait_for_receipt`
    pub fn receipt_gate(&self) -> &Gate {
        &self.receipts
    }
}

impl AccountConnector for MockChain {
    fn current_address(&self) -> Option<Address> {
        self.state.lock().unwrap().address.clone()
    }
}

#[async_trait]
impl AuthProvider for MockChain {
    async fn fetch_auth_info(&self) -> Result<AuthToken, BridgeError> {
        self.state.lock().unwrap().calls.signatures += 1;
        self.signatures.pass().await;

        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_signature.take() {
            return Err(BridgeError::new(message));
        }
        let address = state
            .address
            .clone()
            .ok_or_else(|| BridgeError::new("No account connected"))?;

        let nonce = state.next_nonce();
        let token = match state.next_token.take() {
            Some(token) => token,
            None => digest_hex(&[address.as_str().as_bytes(), &nonce.to_be_bytes()]),
        };
        state.issued.insert(token.clone(), address);
        let token = AuthToken::new(token);
        state.held = Some(token.clone());
        tracing::debug!(nonce, "Mock signer issued token");
        Ok(token)
    }

    fn auth_info(&self) -> Option<AuthToken> {
        self.state.lock().unwrap().held.clone()
    }
}

#[async_trait]
impl LedgerReader for MockChain {
    /// The ledger is observed when the call starts; a read parked at the
    /// gate returns what was stored before it parked.
    async fn get_numbers_list(&self, auth: &AuthToken) -> Result<LedgerColumns, BridgeError> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.calls.reads += 1;
            match state.fail_read.take() {
                Some(message) => Err(BridgeError::new(message)),
                None => state.owner_of(auth).map(|owner| {
                    let (names, numbers): (Vec<String>, Vec<String>) = state
                        .ledgers
                        .get(&owner)
                        .map(|entries| {
                            entries
                                .iter()
                                .map(|e| (e.name.clone(), e.value.clone()))
                                .unzip()
                        })
                        .unwrap_or_default();
                    LedgerColumns { names, numbers }
                }),
            }
        };
        self.reads.pass().await;
        result
    }
}

#[async_trait]
impl LedgerWriter for MockChain {
    async fn add_to_numbers_list(
        &self,
        name: &str,
        number: &str,
        auth: &AuthToken,
    ) -> Result<TxHash, BridgeError> {
        let entry = LedgerEntry::new(name, number);
        {
            let mut state = self.state.lock().unwrap();
            state.calls.writes += 1;
            state.last_write = Some((entry.clone(), auth.clone()));
        }
        self.writes.pass().await;

        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_write.take() {
            return Err(BridgeError::new(message));
        }
        let owner = state.owner_of(auth)?;
        let nonce = state.next_nonce();
        let tx_hash = TxHash::new(format!(
            "0x{}",
            digest_hex(&[
                owner.as_str().as_bytes(),
                name.as_bytes(),
                number.as_bytes(),
                &nonce.to_be_bytes(),
            ])
        ));
        state
            .pending
            .insert(tx_hash.clone(), PendingTx { owner, entry });
        tracing::debug!(tx_hash = %tx_hash, "Mock chain accepted write");
        Ok(tx_hash)
    }
}

#[async_trait]
impl ReceiptWaiter for MockChain {
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt, BridgeError> {
        self.state.lock().unwrap().calls.receipts += 1;
        self.receipts.pass().await;

        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_receipt_wait.take() {
            return Err(BridgeError::new(message));
        }
        let tx = state
            .pending
            .remove(tx_hash)
            .ok_or_else(|| BridgeError::new(format!("Unknown transaction {tx_hash}")))?;
        if let Some(reason) = state.revert_receipt.take() {
            return Ok(Receipt {
                success: false,
                error: reason,
            });
        }
        state.ledgers.entry(tx.owner).or_default().push(tx.entry);
        Ok(Receipt::succeeded())
    }
}
