use super::{confirm, IERC20, TokenApi};
use crate::error::Result;
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;

/// ERC20 want token
#[derive(Clone)]
pub struct Token {
    inner: IERC20::IERC20Instance<DynProvider>,
}

impl Token {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            inner: IERC20::new(address, provider),
        }
    }
}

#[async_trait]
impl TokenApi for Token {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn decimals(&self) -> Result<u8> {
        Ok(self.inner.decimals().call().await?)
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self.inner.balanceOf(owner).call().await?)
    }

    async fn approve(&self, spender: Address, amount: U256, from: Address) -> Result<()> {
        let pending = self.inner.approve(spender, amount).from(from).send().await?;
        confirm("token.approve", pending).await?;
        Ok(())
    }

    async fn transfer(&self, to: Address, amount: U256, from: Address) -> Result<()> {
        let pending = self.inner.transfer(to, amount).from(from).send().await?;
        confirm("token.transfer", pending).await?;
        Ok(())
    }
}
