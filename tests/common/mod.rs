//! Shared mocks for provider integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use rewards_tracker::config::RewardsConfig;
use rewards_tracker::notifications::Notification;
use rewards_tracker::storage::MemoryStore;
use rewards_tracker::token::{TokenContract, TokenError, TokenResult};
use rewards_tracker::wallet::{ChainId, WalletError, WalletProvider, WalletResult};
use rewards_tracker::{Notifier, RewardsProvider};

pub const ALICE: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const BOB: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
pub const TOKEN: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");
pub const SEPOLIA: u64 = 11_155_111;

/// Wallet whose answers are set by the test.
pub struct MockWallet {
    accounts: Mutex<Vec<Address>>,
    chain_id: Mutex<ChainId>,
    allow_switch: AtomicBool,
    reject_accounts: AtomicBool,
    pub switch_requests: Mutex<Vec<ChainId>>,
}

impl MockWallet {
    pub fn new(account: Address) -> Self {
        Self {
            accounts: Mutex::new(vec![account]),
            chain_id: Mutex::new(ChainId(SEPOLIA)),
            allow_switch: AtomicBool::new(true),
            reject_accounts: AtomicBool::new(false),
            switch_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn on_chain(self, chain_id: u64) -> Self {
        *self.chain_id.lock().unwrap() = ChainId(chain_id);
        self
    }

    pub fn refusing_switch(self) -> Self {
        self.allow_switch.store(false, Ordering::SeqCst);
        self
    }

    pub fn rejecting(self) -> Self {
        self.reject_accounts.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    pub fn current_chain(&self) -> ChainId {
        *self.chain_id.lock().unwrap()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        if self.reject_accounts.load(Ordering::SeqCst) {
            return Err(WalletError::Rejected("User rejected the request.".into()));
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn chain_id(&self) -> WalletResult<ChainId> {
        Ok(self.current_chain())
    }

    async fn switch_chain(&self, chain_id: ChainId) -> WalletResult<()> {
        self.switch_requests.lock().unwrap().push(chain_id);
        if !self.allow_switch.load(Ordering::SeqCst) {
            return Err(WalletError::Rejected("User rejected the switch.".into()));
        }
        *self.chain_id.lock().unwrap() = chain_id;
        Ok(())
    }
}

/// Token that records mints and keeps balances in memory.
pub struct MockToken {
    symbol: Option<String>,
    decimals: Option<u8>,
    fail_mint: AtomicBool,
    revert_mint: AtomicBool,
    gated: AtomicBool,
    confirm_gate: Notify,
    next_tx: AtomicU64,
    pub mints: Mutex<Vec<(Address, U256)>>,
    balances: Mutex<Vec<(Address, U256)>>,
}

impl MockToken {
    pub fn new() -> Self {
        Self {
            symbol: Some("RWD".to_string()),
            decimals: Some(18),
            fail_mint: AtomicBool::new(false),
            revert_mint: AtomicBool::new(false),
            gated: AtomicBool::new(false),
            confirm_gate: Notify::new(),
            next_tx: AtomicU64::new(1),
            mints: Mutex::new(Vec::new()),
            balances: Mutex::new(Vec::new()),
        }
    }

    /// `symbol()` and `decimals()` calls fail.
    pub fn without_metadata(mut self) -> Self {
        self.symbol = None;
        self.decimals = None;
        self
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn failing_mints(self) -> Self {
        self.fail_mint.store(true, Ordering::SeqCst);
        self
    }

    pub fn reverting_mints(self) -> Self {
        self.revert_mint.store(true, Ordering::SeqCst);
        self
    }

    /// Hold confirmations until [`MockToken::confirm`] is called.
    pub fn gated(self) -> Self {
        self.gated.store(true, Ordering::SeqCst);
        self
    }

    pub fn confirm(&self) {
        self.confirm_gate.notify_one();
    }

    pub fn mint_count(&self) -> usize {
        self.mints.lock().unwrap().len()
    }

    pub fn balance(&self, owner: Address) -> U256 {
        self.balances
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, _)| *a == owner)
            .fold(U256::ZERO, |acc, (_, v)| acc + *v)
    }
}

#[async_trait]
impl TokenContract for MockToken {
    fn address(&self) -> Address {
        TOKEN
    }

    async fn symbol(&self) -> TokenResult<String> {
        self.symbol
            .clone()
            .ok_or_else(|| TokenError::Call("symbol() reverted".into()))
    }

    async fn decimals(&self) -> TokenResult<u8> {
        self.decimals
            .ok_or_else(|| TokenError::Call("decimals() reverted".into()))
    }

    async fn balance_of(&self, owner: Address) -> TokenResult<U256> {
        Ok(self.balance(owner))
    }

    async fn mint(&self, to: Address, amount: U256) -> TokenResult<TxHash> {
        if self.fail_mint.load(Ordering::SeqCst) {
            return Err(TokenError::Call("caller is not a minter".into()));
        }
        self.mints.lock().unwrap().push((to, amount));
        if !self.revert_mint.load(Ordering::SeqCst) {
            self.balances.lock().unwrap().push((to, amount));
        }
        let n = self.next_tx.fetch_add(1, Ordering::SeqCst);
        Ok(TxHash::with_last_byte(n as u8))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> TokenResult<()> {
        if self.gated.load(Ordering::SeqCst) {
            self.confirm_gate.notified().await;
        }
        if self.revert_mint.load(Ordering::SeqCst) {
            return Err(TokenError::Reverted(tx_hash));
        }
        Ok(())
    }
}

/// Provider wired to an in-memory store, plus its notification receiver.
pub fn provider(
    config: &RewardsConfig,
    store: &MemoryStore,
) -> (RewardsProvider, mpsc::UnboundedReceiver<Notification>) {
    let (notifier, rx) = Notifier::channel();
    (RewardsProvider::new(config, Arc::new(store.clone()), notifier), rx)
}

/// Drain every notification delivered so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        out.push(notification);
    }
    out
}

pub fn titles(notifications: &[Notification]) -> Vec<String> {
    notifications.iter().map(|n| n.title.clone()).collect()
}
