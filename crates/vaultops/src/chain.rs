//! Dev-chain control: time travel, impersonation, snapshots
//!
//! Only meaningful against Anvil (or another node exposing the `anvil_*` /
//! `evm_*` namespaces). Production networks reject every call here.

use crate::error::Result;
use alloy::primitives::{Address, U256};
use alloy::providers::ext::AnvilApi;
use alloy::providers::DynProvider;
use async_trait::async_trait;

/// Seconds in one day
pub const ONE_DAY: u64 = 86_400;

/// Chain-state mutations the scenarios need besides contract calls
#[async_trait]
pub trait ChainControl: Send + Sync {
    /// Move the next block's timestamp forward by `seconds`
    async fn sleep(&self, seconds: u64) -> Result<()>;

    /// Mine `blocks` empty blocks
    async fn mine(&self, blocks: u64) -> Result<()>;

    /// Sleep then mine one block so the new timestamp is observable
    async fn advance(&self, seconds: u64) -> Result<()> {
        self.sleep(seconds).await?;
        self.mine(1).await
    }
}

/// Anvil node behind a provider
#[derive(Clone)]
pub struct DevChain {
    provider: DynProvider,
}

impl DevChain {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    /// Accept unsigned transactions from `account`
    pub async fn impersonate(&self, account: Address) -> Result<()> {
        self.provider.anvil_impersonate_account(account).await?;
        log::debug!("impersonating {}", account);
        Ok(())
    }

    pub async fn stop_impersonating(&self, account: Address) -> Result<()> {
        self.provider.anvil_stop_impersonating_account(account).await?;
        Ok(())
    }

    /// Set the ether balance of `account` so it can pay for gas
    pub async fn set_balance(&self, account: Address, wei: U256) -> Result<()> {
        self.provider.anvil_set_balance(account, wei).await?;
        Ok(())
    }

    /// Impersonate `account` and give it `wei` for gas
    pub async fn impersonate_funded(&self, account: Address, wei: U256) -> Result<()> {
        self.impersonate(account).await?;
        self.set_balance(account, wei).await
    }

    pub async fn snapshot(&self) -> Result<U256> {
        let id = self.provider.anvil_snapshot().await?;
        log::debug!("snapshot {}", id);
        Ok(id)
    }

    /// Restore the state captured by `snapshot`; the id is consumed
    pub async fn revert(&self, id: U256) -> Result<bool> {
        Ok(self.provider.anvil_revert(id).await?)
    }
}

#[async_trait]
impl ChainControl for DevChain {
    async fn sleep(&self, seconds: u64) -> Result<()> {
        self.provider.anvil_increase_time(seconds).await?;
        log::debug!("chain time +{}s", seconds);
        Ok(())
    }

    async fn mine(&self, blocks: u64) -> Result<()> {
        self.provider.anvil_mine(Some(blocks), None).await?;
        Ok(())
    }
}
