//! Deposit / harvest / revoke scenarios against one vault-strategy pair
//!
//! Each scenario is a fixed linear sequence of contract calls and time
//! advances. The first failed check or reverted call ends the scenario with
//! an error; nothing is retried.

use crate::chain::{ChainControl, ONE_DAY};
use crate::contracts::{StrategyApi, TokenApi, VaultApi};
use crate::error::{check, check_eq, Result};
use crate::reporter::{scaled, state_of_strategy, state_of_vault};
use alloy::primitives::{Address, U256};
use std::fmt;

/// Accounts and contracts a scenario runs against
pub struct Fixtures {
    pub token: Box<dyn TokenApi>,
    pub vault: Box<dyn VaultApi>,
    pub strategy: Box<dyn StrategyApi>,
    /// Vault governance; also sends harvest, tend and emergency exit
    pub gov: Address,
    /// Depositor
    pub whale: Address,
    pub strategist: Address,
    /// Vault fee recipient
    pub rewards: Address,
    /// Deposit size in base units
    pub amount: U256,
}

impl Fixtures {
    async fn report(&self) -> Result<()> {
        state_of_strategy(self.strategy.as_ref(), self.token.as_ref(), self.vault.as_ref()).await?;
        state_of_vault(self.vault.as_ref(), self.token.as_ref()).await?;
        Ok(())
    }

    async fn print_shares(&self, owner: Address, decimals: u8) -> Result<()> {
        let shares = self.vault.balance_of(owner).await?;
        println!("shares amount: {}", scaled(shares, decimals)?);
        Ok(())
    }

    /// Approve and deposit `amount` from the whale, then check that the
    /// vault holds exactly that much want
    async fn deposit_from_whale(&self) -> Result<()> {
        let vault = self.vault.address();
        self.token.approve(vault, U256::MAX, self.whale).await?;
        self.vault.deposit(self.amount, self.whale).await?;
        log::info!("Deposited {} from whale {}", self.amount, self.whale);

        check_eq(
            "vault want balance after deposit",
            self.token.balance_of(vault).await?,
            self.amount,
        )
    }

    async fn harvest(&self) -> Result<()> {
        log::info!(">>> call harvest");
        self.strategy.harvest(self.gov).await
    }

    /// No outstanding debt and every asset held loose by the vault
    async fn check_debt_repaid(&self) -> Result<()> {
        check_eq("vault total debt", self.vault.total_debt().await?, U256::ZERO)?;
        check_eq(
            "vault total assets vs loose want",
            self.vault.total_assets().await?,
            self.token.balance_of(self.vault.address()).await?,
        )
    }
}

async fn wait_one_day(chain: &dyn ChainControl) -> Result<()> {
    log::info!(">>> wait 1 day");
    chain.advance(ONE_DAY).await
}

/// Full lifecycle: deposit, two harvests a day apart, withdraw everyone,
/// then tend.
pub async fn operation(fx: &Fixtures, chain: &dyn ChainControl) -> Result<()> {
    let decimals = fx.token.decimals().await?;

    fx.print_shares(fx.whale, decimals).await?;
    fx.deposit_from_whale().await?;
    println!("deposit amount: {}", scaled(fx.amount, decimals)?);
    fx.print_shares(fx.whale, decimals).await?;

    let on_strategy = fx.token.balance_of(fx.strategy.address()).await?;
    println!("token on strategy: {}", scaled(on_strategy, decimals)?);

    println!("\n****** Initial Status ******");
    fx.report().await?;

    fx.harvest().await?;
    fx.report().await?;

    wait_one_day(chain).await?;

    log::info!(">>> harvest to realize profit");
    fx.harvest().await?;
    fx.report().await?;

    log::info!(">>> wait 1 day to get the share price back");
    chain.advance(ONE_DAY).await?;
    state_of_vault(fx.vault.as_ref(), fx.token.as_ref()).await?;

    println!();
    fx.print_shares(fx.whale, decimals).await?;
    let before = fx.token.balance_of(fx.whale).await?;
    fx.vault.withdraw(fx.whale).await?;
    let after = fx.token.balance_of(fx.whale).await?;
    println!("withdraw amount: {}", scaled(after.saturating_sub(before), decimals)?);
    fx.print_shares(fx.whale, decimals).await?;
    check("whale want balance is non-zero after withdraw", !after.is_zero())?;

    println!("\nrewards+strategist withdraw");
    fx.vault.withdraw(fx.rewards).await?;
    let strategy = fx.strategy.address();
    let fee_shares = fx.vault.balance_of(strategy).await?;
    fx.vault.transfer(fx.strategist, fee_shares, strategy).await?;
    fx.vault.withdraw(fx.strategist).await?;

    fx.report().await?;

    log::info!(">>> call tend");
    fx.strategy.tend(fx.gov).await
}

/// Deposit, harvest, wait a day, flag emergency exit and harvest again;
/// all debt must come back to the vault.
pub async fn emergency_exit(fx: &Fixtures, chain: &dyn ChainControl) -> Result<()> {
    fx.deposit_from_whale().await?;
    fx.harvest().await?;

    wait_one_day(chain).await?;

    log::info!(">>> set emergency exit");
    fx.strategy.set_emergency_exit(fx.gov).await?;
    fx.harvest().await?;

    fx.check_debt_repaid().await
}

/// Revoke without any prior deposit
pub async fn revoke_bare(fx: &Fixtures, _chain: &dyn ChainControl) -> Result<()> {
    revoke_and_harvest(fx).await
}

/// Deposit and harvest before revoking
pub async fn revoke_after_deposit(fx: &Fixtures, _chain: &dyn ChainControl) -> Result<()> {
    fx.deposit_from_whale().await?;
    fx.harvest().await?;
    revoke_and_harvest(fx).await
}

/// Deposit, harvest and let a day pass before revoking
pub async fn revoke_after_deposit_and_wait(fx: &Fixtures, chain: &dyn ChainControl) -> Result<()> {
    fx.deposit_from_whale().await?;
    fx.harvest().await?;
    wait_one_day(chain).await?;
    revoke_and_harvest(fx).await
}

async fn revoke_and_harvest(fx: &Fixtures) -> Result<()> {
    log::info!(">>> revoke strategy {}", fx.strategy.address());
    fx.vault.revoke_strategy(fx.strategy.address(), fx.gov).await?;
    fx.harvest().await?;
    fx.check_debt_repaid().await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Operation,
    EmergencyExit,
    RevokeBare,
    RevokeAfterDeposit,
    RevokeAfterDepositAndWait,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Operation,
        Scenario::EmergencyExit,
        Scenario::RevokeBare,
        Scenario::RevokeAfterDeposit,
        Scenario::RevokeAfterDepositAndWait,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Operation => "operation",
            Scenario::EmergencyExit => "emergency_exit",
            Scenario::RevokeBare => "revoke_bare",
            Scenario::RevokeAfterDeposit => "revoke_after_deposit",
            Scenario::RevokeAfterDepositAndWait => "revoke_after_deposit_and_wait",
        }
    }

    pub async fn run(self, fx: &Fixtures, chain: &dyn ChainControl) -> Result<()> {
        log::info!("Running scenario {}", self);
        match self {
            Scenario::Operation => operation(fx, chain).await,
            Scenario::EmergencyExit => emergency_exit(fx, chain).await,
            Scenario::RevokeBare => revoke_bare(fx, chain).await,
            Scenario::RevokeAfterDeposit => revoke_after_deposit(fx, chain).await,
            Scenario::RevokeAfterDepositAndWait => revoke_after_deposit_and_wait(fx, chain).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
