//! Read-only state snapshots of a strategy and its vault
//!
//! Monetary values are kept in base units and scaled by the want token's
//! decimals only when rendered.

use crate::contracts::{StrategyApi, StrategyParams, TokenApi, VaultApi, HYPOTHETICAL_CALL_COST};
use crate::error::Result;
use alloy::primitives::utils::format_units;
use alloy::primitives::U256;
use std::fmt;

/// Render `value / 10^decimals` with trailing zeros trimmed (`1000.0`, `0.25`)
pub fn scaled(value: U256, decimals: u8) -> Result<String> {
    let s = format_units(value, decimals)?;
    Ok(match s.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            format!("{int}.{}", if frac.is_empty() { "0" } else { frac })
        }
        None => format!("{s}.0"),
    })
}

fn fmt_scaled(value: U256, decimals: u8) -> std::result::Result<String, fmt::Error> {
    scaled(value, decimals).map_err(|_| fmt::Error)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyState {
    pub name: String,
    pub decimals: u8,
    /// Loose want held by the strategy
    pub want: U256,
    pub estimated_total_assets: U256,
    pub params: StrategyParams,
    /// Want staked in the gauge
    pub balance_of_pool: U256,
    pub harvest_trigger: bool,
    pub tend_trigger: bool,
    pub emergency_exit: bool,
}

impl fmt::Display for StrategyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.decimals;
        writeln!(f, "--- state of {} ---", self.name)?;
        writeln!(f, "Want: {}", fmt_scaled(self.want, d)?)?;
        writeln!(f, "Total assets estimate: {}", fmt_scaled(self.estimated_total_assets, d)?)?;
        writeln!(f, "Total Strategy Debt: {}", fmt_scaled(self.params.total_debt, d)?)?;
        writeln!(f, "Strategy Debt Ratio: {}", self.params.debt_ratio)?;
        writeln!(f, "Total Strategy Gain: {}", fmt_scaled(self.params.total_gain, d)?)?;
        writeln!(f, "Total Strategy Loss: {}", fmt_scaled(self.params.total_loss, d)?)?;
        writeln!(f, "Balance in gauge: {}", fmt_scaled(self.balance_of_pool, d)?)?;
        writeln!(f, "Harvest Trigger: {}", self.harvest_trigger)?;
        writeln!(f, "Tend Trigger: {}", self.tend_trigger)?;
        write!(f, "Emergency Exit: {}", self.emergency_exit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VaultState {
    pub name: String,
    pub decimals: u8,
    pub total_assets: U256,
    /// Want sitting in the vault, not lent to strategies
    pub loose: U256,
    pub total_debt: U256,
    pub price_per_share: U256,
    pub total_supply: U256,
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.decimals;
        writeln!(f, "--- state of {} vault ---", self.name)?;
        writeln!(f, "Total Assets: {}", fmt_scaled(self.total_assets, d)?)?;
        writeln!(f, "Loose balance in vault: {}", fmt_scaled(self.loose, d)?)?;
        writeln!(f, "Total Debt: {}", fmt_scaled(self.total_debt, d)?)?;
        writeln!(f, "Price per share: {}", fmt_scaled(self.price_per_share, d)?)?;
        write!(f, "Vault share totalSupply: {}", fmt_scaled(self.total_supply, d)?)
    }
}

/// Read and print the strategy's balances, vault record and triggers
pub async fn state_of_strategy(
    strategy: &dyn StrategyApi,
    currency: &dyn TokenApi,
    vault: &dyn VaultApi,
) -> Result<StrategyState> {
    let state = StrategyState {
        name: strategy.name().await?,
        decimals: currency.decimals().await?,
        want: currency.balance_of(strategy.address()).await?,
        estimated_total_assets: strategy.estimated_total_assets().await?,
        params: vault.strategies(strategy.address()).await?,
        balance_of_pool: strategy.balance_of_pool().await?,
        harvest_trigger: strategy.harvest_trigger(HYPOTHETICAL_CALL_COST).await?,
        tend_trigger: strategy.tend_trigger(HYPOTHETICAL_CALL_COST).await?,
        emergency_exit: strategy.emergency_exit().await?,
    };

    log::debug!("{:?}", state);
    println!("\n{state}");
    Ok(state)
}

/// Read and print the vault's assets, debt and share price
pub async fn state_of_vault(vault: &dyn VaultApi, currency: &dyn TokenApi) -> Result<VaultState> {
    let state = VaultState {
        name: vault.name().await?,
        decimals: currency.decimals().await?,
        total_assets: vault.total_assets().await?,
        loose: currency.balance_of(vault.address()).await?,
        total_debt: vault.total_debt().await?,
        price_per_share: vault.price_per_share().await?,
        total_supply: vault.total_supply().await?,
    };

    log::debug!("{:?}", state);
    println!("\n{state}");
    Ok(state)
}
