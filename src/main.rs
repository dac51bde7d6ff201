//! Rewards tracker CLI.
//!
//! ```text
//!   REWARDS_PRIVATE_KEY ──▶ LocalWallet ──┐
//!                                         ▼
//!   rewards.toml / REWARDS_* ──▶ RewardsProvider ──▶ stdout (notifications, state)
//!                                 │        │
//!                                 ▼        ▼
//!                           FileStore   Erc20Token (optional)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use rewards_tracker::config::{self, RewardsConfig};
use rewards_tracker::notifications::Notification;
use rewards_tracker::observability::logging;
use rewards_tracker::storage::{FileStore, KeyValueStore, PointsLedger};
use rewards_tracker::token::{format_units, Erc20Token};
use rewards_tracker::wallet::LocalWallet;
use rewards_tracker::{GrantOutcome, MintOutcome, Notifier, RewardsProvider};

#[derive(Parser)]
#[command(name = "rewards-tracker")]
#[command(about = "Track wallet loyalty points and mint reward tokens", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus REWARDS_* variables if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect the wallet and show points and token balance
    Status,
    /// Connect the wallet and grant points
    Grant {
        /// Points to add
        amount: u64,
    },
    /// Show stored points for an address without a wallet
    Points {
        address: Address,
    },
    /// Rewrite a legacy points document in the current format
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_from_env()?,
    };

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::debug!(
        chain_id = config.chain.chain_id,
        token = %config.token.address,
        store = %config.storage.path,
        "Configuration loaded"
    );

    let file_store = FileStore::open(&config.storage.path)?;
    tracing::debug!(path = %file_store.path().display(), "Store opened");
    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);

    match cli.command {
        Commands::Points { address } => {
            let ledger = PointsLedger::new(store, config.storage.key.clone());
            println!("{}: {} points", address, ledger.points(address)?);
        }
        Commands::Migrate => {
            let ledger = PointsLedger::new(store, config.storage.key.clone());
            if ledger.migrate()? {
                println!("Migrated '{}' to the current format", ledger.key());
            } else {
                println!("Nothing to migrate");
            }
        }
        Commands::Status => {
            run_session(&config, store, |_| async { Ok(()) }).await?;
        }
        Commands::Grant { amount } => {
            run_session(&config, store, |provider| async move {
                match provider.grant_points(amount).await? {
                    GrantOutcome::NotConnected => println!("Not connected, no points granted"),
                    GrantOutcome::Granted { total, mint } => {
                        println!("Granted {} points (total {})", amount, total);
                        match mint {
                            MintOutcome::Minted { tx_hash } => println!("Reward minted in {}", tx_hash),
                            MintOutcome::Failed(reason) => println!("Reward mint failed: {}", reason),
                            MintOutcome::Disabled => println!("Reward due, but no token is configured"),
                            MintOutcome::NotDue => {}
                        }
                    }
                }
                Ok(())
            })
            .await?;
        }
    }

    Ok(())
}

/// Build a provider, connect, run `action`, print the final state.
async fn run_session<F, Fut>(
    config: &RewardsConfig,
    store: Arc<dyn KeyValueStore>,
    action: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Arc<RewardsProvider>) -> Fut,
    Fut: std::future::Future<Output = Result<(), Box<dyn std::error::Error>>>,
{
    let (notifier, notifications) = Notifier::channel();
    let printer = tokio::spawn(print_notifications(notifications));

    let mut provider = RewardsProvider::new(config, store, notifier);

    if let Some(wallet) = LocalWallet::from_env(&config.chain)? {
        if config.token.is_enabled() {
            let address: Address = config.token.address.trim().parse()?;
            let token = Erc20Token::new(
                address,
                wallet.provider().clone(),
                config.chain.rpc_timeout_secs,
                config.token.confirmation_timeout_secs,
            );
            provider = provider.with_token(Arc::new(token));
        }
        provider = provider.with_wallet(Arc::new(wallet));
    }

    let provider = Arc::new(provider);
    let result = async {
        if provider.connect().await?.is_some() {
            action(provider.clone()).await?;
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .await;

    let state = provider.state();
    provider.disconnect();
    drop(provider);
    printer.await?;

    result?;

    if let Some(address) = state.address {
        println!("Address: {}", address);
        println!("Points:  {}", state.points);
        println!(
            "Balance: {} {} ({} base units)",
            format_units(state.token_balance, state.token_decimals),
            state.token_symbol,
            state.token_balance
        );
    }
    Ok(())
}

async fn print_notifications(mut rx: mpsc::UnboundedReceiver<Notification>) {
    while let Some(notification) = rx.recv().await {
        println!(
            "[{}] {}: {}",
            notification.level, notification.title, notification.description
        );
    }
}
