//! Gauge-cleaner migration
//!
//! Moves the voter's gauge stake for one token into the vault:
//! 1. deploy a GaugeCleaner from the operator account
//! 2. resolve strategy (via controller) and gauge (via strategy)
//! 3. hand voter governance to the cleaner
//! 4. `clear(token)` as governance
//! 5. check the voter holds nothing in the gauge or the token
//! 6. hand voter governance back
//!
//! Governance calls are signed by the operator when it is governance, or sent
//! from an impersonated governance account when the config allows it.
//! There is no rollback: a failure leaves the chain wherever it stopped.

use crate::chain::DevChain;
use crate::config::{Config, MigrationConfig};
use crate::contracts::{
    load_creation_code, CleanerApi, Controller, ControllerApi, Gauge, GaugeApi, GaugeCleaner,
    Strategy, StrategyApi, Token, TokenApi, Voter, VoterApi,
};
use crate::error::{check_eq, Error, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use std::path::Path;

/// Contracts and accounts the migration acts on, already resolved
pub struct MigrationHandles<'a> {
    /// Current voter governance; sends every governance call
    pub governance: Address,
    pub token: &'a dyn TokenApi,
    pub voter: &'a dyn VoterApi,
    pub gauge: &'a dyn GaugeApi,
    pub cleaner: &'a dyn CleanerApi,
    pub strategy: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub cleaner: Address,
    pub strategy: Address,
    pub gauge: Address,
    /// Voter's gauge balance after `clear`
    pub gauge_balance: U256,
    /// Voter's token balance after `clear`
    pub token_balance: U256,
    pub governance_before_restore: Address,
    pub governance_after_restore: Address,
}

/// Strategy the controller runs for `token`
pub async fn resolve_strategy(
    controller: &dyn ControllerApi,
    token: Address,
) -> Result<Address> {
    let strategy = controller.strategies(token).await?;
    if strategy == Address::ZERO {
        return Err(Error::Config(format!(
            "controller {} has no strategy for {}",
            controller.address(),
            token
        )));
    }
    Ok(strategy)
}

/// Swap governance, clear, check, restore
pub async fn execute(h: &MigrationHandles<'_>) -> Result<MigrationReport> {
    let voter = h.voter.address();
    let cleaner = h.cleaner.address();

    log::info!("Switching voter {} governance to cleaner {}", voter, cleaner);
    h.voter.set_governance(cleaner, h.governance).await?;

    log::info!("Migrating {} from gauge {} to vault", h.token.address(), h.gauge.address());
    h.cleaner.clear(h.token.address(), h.governance).await?;

    let gauge_balance = h.gauge.balance_of(voter).await?;
    check_eq("gauge balance of voter", gauge_balance, U256::ZERO)?;
    println!("gauge balance of voter: {gauge_balance}");

    let token_balance = h.token.balance_of(voter).await?;
    check_eq("token balance on voter", token_balance, U256::ZERO)?;
    println!("token balance on voter: {token_balance}");

    let governance_before_restore = h.voter.governance().await?;
    println!("voter gov: {governance_before_restore}");
    h.cleaner.set_voter_governance(h.governance).await?;
    let governance_after_restore = h.voter.governance().await?;
    println!("voter gov: {governance_after_restore}");

    check_eq("restored voter governance", governance_after_restore, h.governance)?;

    Ok(MigrationReport {
        cleaner,
        strategy: h.strategy,
        gauge: h.gauge.address(),
        gauge_balance,
        token_balance,
        governance_before_restore,
        governance_after_restore,
    })
}

/// How governance calls reach the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernanceSender {
    /// Unsigned, from an impersonated governance account (dev chains only)
    Impersonated,
    /// Signed by the operator, who is governance
    Operator,
}

/// Pick the governance sender for `operator`.
///
/// Impersonation is used only when the config asks for it; otherwise the
/// operator has to be the governance account itself.
pub fn governance_sender(m: &MigrationConfig, operator: Address) -> Result<GovernanceSender> {
    if m.impersonate_governance {
        Ok(GovernanceSender::Impersonated)
    } else if operator == m.governance {
        Ok(GovernanceSender::Operator)
    } else {
        Err(Error::Config(format!(
            "operator {} is not governance {}; set migration.impersonate_governance on a fork",
            operator, m.governance
        )))
    }
}

/// Run the whole migration against `config.rpc_url`, deploying the cleaner
/// from `operator`. Governance calls are signed by the operator, or sent
/// from an impersonated governance account when
/// `migration.impersonate_governance` is set.
pub async fn run(config: &Config, operator: PrivateKeySigner) -> Result<MigrationReport> {
    let url: Url = config
        .rpc_url
        .parse()
        .map_err(|e| Error::Config(format!("invalid rpc_url {}: {e}", config.rpc_url)))?;

    let m = &config.migration;
    let operator_address = operator.address();
    let sender = governance_sender(m, operator_address)?;
    log::info!("Operator account: {} (governance {:?})", operator_address, sender);

    let signing: DynProvider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(operator))
        .connect_http(url.clone())
        .erased();

    let code = load_creation_code(Path::new(&config.cleaner_artifact))?;
    let cleaner_address = GaugeCleaner::deploy(&signing, operator_address, code).await?;

    let (provider, chain) = match sender {
        GovernanceSender::Operator => (signing, None),
        GovernanceSender::Impersonated => {
            let provider: DynProvider = ProviderBuilder::new().connect_http(url).erased();
            let chain = DevChain::new(provider.clone());
            chain.impersonate(m.governance).await?;
            (provider, Some(chain))
        }
    };

    let report = migrate(m, cleaner_address, &provider).await;

    if let Some(chain) = chain {
        let stopped = chain.stop_impersonating(m.governance).await;
        let report = report?;
        stopped?;
        return Ok(report);
    }
    report
}

async fn migrate(
    m: &MigrationConfig,
    cleaner_address: Address,
    provider: &DynProvider,
) -> Result<MigrationReport> {
    let controller = Controller::new(m.controller, provider.clone());
    let token = Token::new(m.token, provider.clone());
    let voter = Voter::new(m.voter, provider.clone());
    let strategy_address = resolve_strategy(&controller, m.token).await?;
    let strategy = Strategy::new(strategy_address, provider.clone());
    let gauge = Gauge::new(strategy.gauge().await?, provider.clone());
    let cleaner = GaugeCleaner::new(cleaner_address, provider.clone());
    log::info!("Strategy {} stakes in gauge {}", strategy_address, gauge.address());

    execute(&MigrationHandles {
        governance: m.governance,
        token: &token,
        voter: &voter,
        gauge: &gauge,
        cleaner: &cleaner,
        strategy: strategy_address,
    })
    .await
}
