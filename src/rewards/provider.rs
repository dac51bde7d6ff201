//! The rewards provider.
//!
//! Owns the session, credits points through the ledger and mints reward
//! tokens when the mint policy says so. Collaborators are injected:
//!
//! - [`WalletProvider`]: optional, absent means "no wallet installed"
//! - [`KeyValueStore`] (through [`PointsLedger`]): required
//! - [`TokenContract`]: optional, absent disables minting
//!
//! Session states:
//!
//! ```text
//!   Disconnected ──(connect)──→ Connected
//!        ↑                          │
//!        └───────(disconnect)───────┘
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{Address, TxHash};
use tokio::sync::watch;

use crate::config::RewardsConfig;
use crate::notifications::Notifier;
use crate::observability::metrics;
use crate::rewards::error::RewardsResult;
use crate::rewards::handle::RewardsHandle;
use crate::rewards::policy::MintPolicy;
use crate::rewards::state::RewardsState;
use crate::storage::{KeyValueStore, PointsLedger};
use crate::token::{TokenContract, TokenResult};
use crate::wallet::{ChainId, WalletProvider};

/// Result of [`RewardsProvider::grant_points`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    /// No session; nothing was credited.
    NotConnected,
    /// Points were credited and persisted.
    Granted { total: u64, mint: MintOutcome },
}

/// What happened to the mint policy after a grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// The total is not a positive multiple of the threshold.
    NotDue,
    /// A mint was due but no token contract is configured.
    Disabled,
    /// The mint was mined and the balance refreshed.
    Minted { tx_hash: TxHash },
    /// The mint failed; the grant stands.
    Failed(String),
}

/// Session, points and reward minting for one user.
pub struct RewardsProvider {
    wallet: Option<Arc<dyn WalletProvider>>,
    token: Option<Arc<dyn TokenContract>>,
    ledger: PointsLedger,
    policy: MintPolicy,
    target_chain: ChainId,
    default_decimals: u8,
    notifier: Notifier,
    state: watch::Sender<RewardsState>,
    mints_in_flight: AtomicUsize,
}

impl RewardsProvider {
    /// Create a provider with no wallet and no token.
    pub fn new(config: &RewardsConfig, store: Arc<dyn KeyValueStore>, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(RewardsState::new(
            config.token.default_symbol.clone(),
            config.token.default_decimals,
        ));

        Self {
            wallet: None,
            token: None,
            ledger: PointsLedger::new(store, config.storage.key.clone()),
            policy: MintPolicy::from_config(&config.token),
            target_chain: ChainId(config.chain.chain_id),
            default_decimals: config.token.default_decimals,
            notifier,
            state,
            mints_in_flight: AtomicUsize::new(0),
        }
    }

    /// Attach the wallet.
    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    /// Attach the reward token; enables minting.
    pub fn with_token(mut self, token: Arc<dyn TokenContract>) -> Self {
        self.token = Some(token);
        self
    }

    /// A weak handle for components that must not keep the provider alive.
    pub fn handle(self: &Arc<Self>) -> RewardsHandle {
        RewardsHandle::new(self)
    }

    /// Connect to the wallet and load the account's points.
    ///
    /// Returns the connected address, or `None` when no wallet is present,
    /// the request was refused, or the wallet has no accounts. Those cases
    /// are reported through notifications.
    pub async fn connect(&self) -> RewardsResult<Option<Address>> {
        let Some(wallet) = self.wallet.as_ref() else {
            metrics::record_connect("no_wallet");
            self.notifier.warn(
                "MetaMask not found",
                "Install the MetaMask extension to continue.",
            );
            return Ok(None);
        };

        let accounts = match wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "Wallet refused account request");
                metrics::record_connect("rejected");
                self.notifier.error("Connection failed", e.to_string());
                return Ok(None);
            }
        };

        let Some(account) = accounts.first().copied() else {
            metrics::record_connect("no_accounts");
            self.notifier
                .warn("No accounts", "The wallet did not return any accounts.");
            return Ok(None);
        };

        self.ensure_chain(wallet.as_ref()).await;

        let points = self.ledger.points(account)?;
        self.state.send_modify(|state| {
            state.address = Some(account);
            state.points = points;
        });

        metrics::record_connect("connected");
        tracing::info!(address = %account, points, "Wallet connected");

        self.refresh_token_info().await;
        Ok(Some(account))
    }

    /// Forget the session locally. Wallet permissions are left untouched.
    pub fn disconnect(&self) {
        let previous = self.state.borrow().address;
        self.state.send_modify(|state| {
            state.address = None;
            state.points = 0;
        });

        if let Some(address) = previous {
            tracing::info!(address = %address, "Wallet disconnected");
        }
    }

    /// Credit `amount` points to the connected account, then apply the mint
    /// policy. A failed mint does not undo the credit.
    pub async fn grant_points(&self, amount: u64) -> RewardsResult<GrantOutcome> {
        let Some(address) = self.address() else {
            self.notifier
                .warn("Connect wallet", "Please connect MetaMask first.");
            return Ok(GrantOutcome::NotConnected);
        };

        let total = self.ledger.credit(address, amount)?;
        // Totals only grow per address; a concurrent grant may already have
        // published a later one.
        self.state.send_if_modified(|state| {
            if state.address == Some(address) && state.points < total {
                state.points = total;
                true
            } else {
                false
            }
        });

        metrics::record_points_granted(amount);
        tracing::info!(address = %address, amount, total, "Points granted");
        self.notifier.info(
            format!("+{} points", amount),
            format!("You now have {} points.", total),
        );

        let mint = self.maybe_mint(address, total).await;
        Ok(GrantOutcome::Granted { total, mint })
    }

    /// Re-read the token symbol, decimals and the connected account's balance.
    ///
    /// Each value is kept as-is if its call fails.
    pub async fn refresh_token_info(&self) {
        let (Some(token), Some(address)) = (self.token.as_ref(), self.address()) else {
            return;
        };

        match token.symbol().await {
            Ok(symbol) => self.update_for(address, |state| state.token_symbol = symbol),
            Err(e) => tracing::debug!(token = %token.address(), error = %e, "Token symbol unavailable"),
        }

        match token.decimals().await {
            Ok(decimals) => self.update_for(address, |state| state.token_decimals = decimals),
            Err(e) => tracing::debug!(token = %token.address(), error = %e, "Token decimals unavailable"),
        }

        match token.balance_of(address).await {
            Ok(balance) => self.update_for(address, |state| state.token_balance = balance),
            Err(e) => tracing::debug!(token = %token.address(), error = %e, "Token balance unavailable"),
        }
    }

    async fn ensure_chain(&self, wallet: &dyn WalletProvider) {
        match wallet.chain_id().await {
            Ok(current) if current == self.target_chain => return,
            Ok(current) => tracing::info!(
                current = %current,
                target = %self.target_chain,
                "Wallet on a different chain, requesting switch"
            ),
            Err(e) => tracing::warn!(error = %e, "Could not read wallet chain ID, requesting switch"),
        }

        if let Err(e) = wallet.switch_chain(self.target_chain).await {
            tracing::warn!(target = %self.target_chain.to_hex(), error = %e, "Chain switch failed");
            self.notifier.warn(
                "Wrong network",
                "Please switch to the configured network in MetaMask.",
            );
        }
    }

    async fn maybe_mint(&self, address: Address, total: u64) -> MintOutcome {
        if !self.policy.is_due(total) {
            return MintOutcome::NotDue;
        }

        let Some(token) = self.token.as_ref() else {
            tracing::debug!(total, "Mint due but no token configured");
            return MintOutcome::Disabled;
        };

        let _minting = MintingGuard::enter(self);
        match self.mint_reward(token.as_ref(), address).await {
            Ok(tx_hash) => {
                metrics::record_mint("success");
                MintOutcome::Minted { tx_hash }
            }
            Err(e) => {
                tracing::error!(address = %address, total, error = %e, "Mint failed");
                metrics::record_mint("failure");
                self.notifier.error("Mint failed", e.to_string());
                MintOutcome::Failed(e.to_string())
            }
        }
    }

    async fn mint_reward(&self, token: &dyn TokenContract, to: Address) -> TokenResult<TxHash> {
        let decimals = match token.decimals().await {
            Ok(decimals) => decimals,
            Err(e) => {
                tracing::debug!(error = %e, fallback = self.default_decimals, "Token decimals unavailable");
                self.default_decimals
            }
        };

        let amount = self.policy.amount(decimals)?;
        let tx_hash = token.mint(to, amount).await?;
        self.notifier
            .info("Mint submitted", format!("Transaction: {}", tx_hash));

        token.wait_for_confirmation(tx_hash).await?;

        let balance = token.balance_of(to).await?;
        self.update_for(to, |state| state.token_balance = balance);

        let symbol = self.state.borrow().token_symbol.clone();
        self.notifier.info(
            "Reward minted",
            format!("You received {} {}!", self.policy.reward_tokens(), symbol),
        );
        Ok(tx_hash)
    }

    /// Apply `f` only while `address` is still the session address.
    fn update_for(&self, address: Address, f: impl FnOnce(&mut RewardsState)) {
        self.state.send_if_modified(|state| {
            if state.address == Some(address) {
                f(state);
                true
            } else {
                false
            }
        });
    }

    /// Publish the in-flight count. Read under the watch lock so the last
    /// writer always sees the latest count.
    fn sync_minting(&self) {
        self.state.send_if_modified(|state| {
            let in_flight = self.mints_in_flight.load(Ordering::SeqCst);
            metrics::record_minting(in_flight);
            let minting = in_flight > 0;
            let changed = state.is_minting != minting;
            state.is_minting = minting;
            changed
        });
    }

    /// Snapshot of the whole state.
    pub fn state(&self) -> RewardsState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RewardsState> {
        self.state.subscribe()
    }

    pub fn address(&self) -> Option<Address> {
        self.state.borrow().address
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected()
    }

    pub fn points(&self) -> u64 {
        self.state.borrow().points
    }

    pub fn token_symbol(&self) -> String {
        self.state.borrow().token_symbol.clone()
    }

    /// Raw balance as a decimal string of base units.
    pub fn token_balance(&self) -> String {
        self.state.borrow().token_balance.to_string()
    }

    pub fn is_minting(&self) -> bool {
        self.state.borrow().is_minting
    }

    /// Whether a token contract is attached.
    pub fn minting_enabled(&self) -> bool {
        self.token.is_some()
    }

    pub fn ledger(&self) -> &PointsLedger {
        &self.ledger
    }
}

impl std::fmt::Debug for RewardsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardsProvider")
            .field("wallet", &self.wallet.is_some())
            .field("token", &self.token.as_ref().map(|t| t.address()))
            .field("target_chain", &self.target_chain)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

/// Tracks one in-flight mint; `is_minting` drops back once the last one ends.
struct MintingGuard<'a> {
    provider: &'a RewardsProvider,
}

impl<'a> MintingGuard<'a> {
    fn enter(provider: &'a RewardsProvider) -> Self {
        provider.mints_in_flight.fetch_add(1, Ordering::SeqCst);
        provider.sync_minting();
        Self { provider }
    }
}

impl Drop for MintingGuard<'_> {
    fn drop(&mut self) {
        self.provider.mints_in_flight.fetch_sub(1, Ordering::SeqCst);
        self.provider.sync_minting();
    }
}
