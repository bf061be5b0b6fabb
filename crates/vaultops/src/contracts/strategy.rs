use super::{confirm, IStrategy, StrategyApi};
use crate::error::Result;
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;

/// Vault strategy (gauge-staking flavour)
#[derive(Clone)]
pub struct Strategy {
    inner: IStrategy::IStrategyInstance<DynProvider>,
}

impl Strategy {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            inner: IStrategy::new(address, provider),
        }
    }
}

#[async_trait]
impl StrategyApi for Strategy {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn name(&self) -> Result<String> {
        Ok(self.inner.name().call().await?)
    }

    async fn want(&self) -> Result<Address> {
        Ok(self.inner.want().call().await?)
    }

    async fn strategist(&self) -> Result<Address> {
        Ok(self.inner.strategist().call().await?)
    }

    async fn gauge(&self) -> Result<Address> {
        Ok(self.inner.gauge().call().await?)
    }

    async fn harvest(&self, from: Address) -> Result<()> {
        let pending = self.inner.harvest().from(from).send().await?;
        confirm("strategy.harvest", pending).await?;
        Ok(())
    }

    async fn tend(&self, from: Address) -> Result<()> {
        let pending = self.inner.tend().from(from).send().await?;
        confirm("strategy.tend", pending).await?;
        Ok(())
    }

    async fn harvest_trigger(&self, call_cost: U256) -> Result<bool> {
        Ok(self.inner.harvestTrigger(call_cost).call().await?)
    }

    async fn tend_trigger(&self, call_cost: U256) -> Result<bool> {
        Ok(self.inner.tendTrigger(call_cost).call().await?)
    }

    async fn set_emergency_exit(&self, from: Address) -> Result<()> {
        let pending = self.inner.setEmergencyExit().from(from).send().await?;
        confirm("strategy.setEmergencyExit", pending).await?;
        Ok(())
    }

    async fn emergency_exit(&self) -> Result<bool> {
        Ok(self.inner.emergencyExit().call().await?)
    }

    async fn estimated_total_assets(&self) -> Result<U256> {
        Ok(self.inner.estimatedTotalAssets().call().await?)
    }

    async fn balance_of_pool(&self) -> Result<U256> {
        Ok(self.inner.balanceOfPool().call().await?)
    }
}
