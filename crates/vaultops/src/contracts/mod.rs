//! Typed clients for the external contracts
//!
//! Each contract kind has a trait describing the methods the scenarios and
//! the migration use, and an alloy-backed client bound to one address.
//! State-changing methods take the sending account explicitly; on a dev
//! chain that account must be impersonated (see [`crate::chain::DevChain`]).

mod bindings;
mod governance;
mod strategy;
mod token;
mod vault;

pub use bindings::*;
pub use governance::{load_creation_code, Controller, Gauge, GaugeCleaner, Voter};
pub use strategy::Strategy;
pub use token::Token;
pub use vault::{uses_debt_limits, Vault};

use crate::error::{Error, Result};
use alloy::network::Ethereum;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::PendingTransactionBuilder;
use async_trait::async_trait;

/// Gas cost handed to `harvestTrigger`/`tendTrigger`: 1M gas at 30 gwei
pub const HYPOTHETICAL_CALL_COST: U256 = U256::from_limbs([30_000_000_000_000_000, 0, 0, 0]);

/// Vault's record for one strategy, independent of the vault API version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyParams {
    pub performance_fee: U256,
    pub activation: U256,
    /// Basis points of vault assets the strategy may borrow
    pub debt_ratio: U256,
    pub last_report: U256,
    pub total_debt: U256,
    pub total_gain: U256,
    pub total_loss: U256,
}

#[async_trait]
pub trait TokenApi: Send + Sync {
    fn address(&self) -> Address;
    async fn decimals(&self) -> Result<u8>;
    async fn balance_of(&self, owner: Address) -> Result<U256>;
    async fn approve(&self, spender: Address, amount: U256, from: Address) -> Result<()>;
    async fn transfer(&self, to: Address, amount: U256, from: Address) -> Result<()>;
}

#[async_trait]
pub trait VaultApi: Send + Sync {
    fn address(&self) -> Address;
    async fn name(&self) -> Result<String>;
    async fn governance(&self) -> Result<Address>;
    async fn rewards(&self) -> Result<Address>;
    async fn deposit(&self, amount: U256, from: Address) -> Result<()>;
    /// Redeem all of `from`'s shares
    async fn withdraw(&self, from: Address) -> Result<()>;
    async fn total_assets(&self) -> Result<U256>;
    async fn total_debt(&self) -> Result<U256>;
    async fn total_supply(&self) -> Result<U256>;
    async fn price_per_share(&self) -> Result<U256>;
    async fn revoke_strategy(&self, strategy: Address, from: Address) -> Result<()>;
    async fn strategies(&self, strategy: Address) -> Result<StrategyParams>;
    async fn balance_of(&self, owner: Address) -> Result<U256>;
    async fn transfer(&self, to: Address, amount: U256, from: Address) -> Result<()>;
}

#[async_trait]
pub trait StrategyApi: Send + Sync {
    fn address(&self) -> Address;
    async fn name(&self) -> Result<String>;
    async fn want(&self) -> Result<Address>;
    async fn strategist(&self) -> Result<Address>;
    async fn gauge(&self) -> Result<Address>;
    async fn harvest(&self, from: Address) -> Result<()>;
    async fn tend(&self, from: Address) -> Result<()>;
    async fn harvest_trigger(&self, call_cost: U256) -> Result<bool>;
    async fn tend_trigger(&self, call_cost: U256) -> Result<bool>;
    async fn set_emergency_exit(&self, from: Address) -> Result<()>;
    async fn emergency_exit(&self) -> Result<bool>;
    async fn estimated_total_assets(&self) -> Result<U256>;
    async fn balance_of_pool(&self) -> Result<U256>;
}

#[async_trait]
pub trait GaugeApi: Send + Sync {
    fn address(&self) -> Address;
    async fn balance_of(&self, owner: Address) -> Result<U256>;
}

#[async_trait]
pub trait VoterApi: Send + Sync {
    fn address(&self) -> Address;
    async fn governance(&self) -> Result<Address>;
    async fn set_governance(&self, governance: Address, from: Address) -> Result<()>;
}

#[async_trait]
pub trait ControllerApi: Send + Sync {
    fn address(&self) -> Address;
    /// Strategy currently registered for `token`
    async fn strategies(&self, token: Address) -> Result<Address>;
}

#[async_trait]
pub trait CleanerApi: Send + Sync {
    fn address(&self) -> Address;
    async fn clear(&self, token: Address, from: Address) -> Result<()>;
    async fn set_voter_governance(&self, from: Address) -> Result<()>;
}

/// Wait for a sent transaction and fail if it reverted
pub(crate) async fn confirm(
    call: &'static str,
    pending: PendingTransactionBuilder<Ethereum>,
) -> Result<TxHash> {
    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        return Err(Error::Reverted {
            call,
            tx_hash: receipt.transaction_hash,
        });
    }

    log::debug!("{} mined in {}", call, receipt.transaction_hash);
    Ok(receipt.transaction_hash)
}
