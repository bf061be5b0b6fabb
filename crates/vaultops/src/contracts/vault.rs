use super::{confirm, IVault, IVaultDebtLimited, IVaultRateLimited, StrategyParams, VaultApi};
use crate::error::Result;
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;

/// Yearn-style vault
#[derive(Clone)]
pub struct Vault {
    inner: IVault::IVaultInstance<DynProvider>,
    provider: DynProvider,
}

impl Vault {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            inner: IVault::new(address, provider.clone()),
            provider,
        }
    }

    pub async fn api_version(&self) -> Result<String> {
        Ok(self.inner.apiVersion().call().await?)
    }
}

/// Whether a vault at `api_version` stores min/max debt per harvest in
/// place of a single rate limit (0.3.2 and later). Only the leading digits
/// of each part count, so `0.3.2-rc1` is 0.3.2.
pub fn uses_debt_limits(api_version: &str) -> bool {
    let mut parts = api_version.trim().split('.').map(leading_number);
    let version = (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    );
    version >= (0, 3, 2)
}

fn leading_number(part: &str) -> u32 {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().unwrap_or(0)
}

#[async_trait]
impl VaultApi for Vault {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn name(&self) -> Result<String> {
        Ok(self.inner.name().call().await?)
    }

    async fn governance(&self) -> Result<Address> {
        Ok(self.inner.governance().call().await?)
    }

    async fn rewards(&self) -> Result<Address> {
        Ok(self.inner.rewards().call().await?)
    }

    async fn deposit(&self, amount: U256, from: Address) -> Result<()> {
        let pending = self.inner.deposit(amount).from(from).send().await?;
        confirm("vault.deposit", pending).await?;
        Ok(())
    }

    async fn withdraw(&self, from: Address) -> Result<()> {
        let pending = self.inner.withdraw().from(from).send().await?;
        confirm("vault.withdraw", pending).await?;
        Ok(())
    }

    async fn total_assets(&self) -> Result<U256> {
        Ok(self.inner.totalAssets().call().await?)
    }

    async fn total_debt(&self) -> Result<U256> {
        Ok(self.inner.totalDebt().call().await?)
    }

    async fn total_supply(&self) -> Result<U256> {
        Ok(self.inner.totalSupply().call().await?)
    }

    async fn price_per_share(&self) -> Result<U256> {
        Ok(self.inner.pricePerShare().call().await?)
    }

    async fn revoke_strategy(&self, strategy: Address, from: Address) -> Result<()> {
        let pending = self.inner.revokeStrategy(strategy).from(from).send().await?;
        confirm("vault.revokeStrategy", pending).await?;
        Ok(())
    }

    async fn strategies(&self, strategy: Address) -> Result<StrategyParams> {
        let address = self.address();
        let version = self.api_version().await?;
        log::debug!("vault {} api version {}", address, version);

        let params = if uses_debt_limits(&version) {
            let vault = IVaultDebtLimited::new(address, self.provider.clone());
            let r = vault.strategies(strategy).call().await?;
            StrategyParams {
                performance_fee: r.performanceFee,
                activation: r.activation,
                debt_ratio: r.debtRatio,
                last_report: r.lastReport,
                total_debt: r.totalDebt,
                total_gain: r.totalGain,
                total_loss: r.totalLoss,
            }
        } else {
            let vault = IVaultRateLimited::new(address, self.provider.clone());
            let r = vault.strategies(strategy).call().await?;
            StrategyParams {
                performance_fee: r.performanceFee,
                activation: r.activation,
                debt_ratio: r.debtRatio,
                last_report: r.lastReport,
                total_debt: r.totalDebt,
                total_gain: r.totalGain,
                total_loss: r.totalLoss,
            }
        };

        Ok(params)
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self.inner.balanceOf(owner).call().await?)
    }

    async fn transfer(&self, to: Address, amount: U256, from: Address) -> Result<()> {
        let pending = self.inner.transfer(to, amount).from(from).send().await?;
        confirm("vault.transfer", pending).await?;
        Ok(())
    }
}
