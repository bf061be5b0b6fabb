//! Gauge cleaner migration
//!
//! One-shot operator tool: deploys a GaugeCleaner, lends it voter
//! governance, moves the gauge stake to the vault and hands governance back.
//! Run against a mainnet fork; governance is impersonated.

use anyhow::{Context, Result};
use vaultops::config::{Config, CONFIG_ENV};
use vaultops::{keystore, migration};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting gauge cleaner migration");

    // Load configuration
    let config = Config::load_or_default()
        .with_context(|| format!("Failed to load config (set {} to choose a file)", CONFIG_ENV))?;
    config.validate().context("Invalid configuration")?;

    log::info!("Connected to RPC: {}", config.rpc_url);

    // Pick and unlock the operator account
    let keystore_dir = config.keystore_path();
    let accounts = keystore::list_accounts(&keystore_dir)
        .with_context(|| format!("Failed to list keystores in {}", keystore_dir.display()))?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let name = keystore::select_account(&accounts, &mut input, &mut output)?;
    let password = keystore::read_password(&mut input, &mut output)?;
    let operator = keystore::load_signer(&keystore_dir, &name, &password)
        .with_context(|| format!("Failed to unlock account {}", name))?;

    let report = migration::run(&config, operator)
        .await
        .context("Migration failed")?;

    log::info!(
        "Migration complete: cleaner {}, strategy {}, gauge {}",
        report.cleaner,
        report.strategy,
        report.gauge
    );

    Ok(())
}
