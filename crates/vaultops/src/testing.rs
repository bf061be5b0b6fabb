//! In-memory fakes of the contract clients
//!
//! A deliberately crude ledger: shares are minted pro rata, harvest lends
//! everything the debt ratio allows, yield accrues linearly while time is
//! advanced, and a revoked or exited strategy returns all funds on its next
//! harvest. It exists to exercise call sequencing and failure paths, not to
//! model vault accounting.

use crate::chain::{ChainControl, ONE_DAY};
use crate::contracts::{
    CleanerApi, ControllerApi, GaugeApi, StrategyApi, StrategyParams, TokenApi, VaultApi, VoterApi,
};
use crate::error::{Error, Result};
use crate::scenarios::Fixtures;
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const GOV: Address = Address::repeat_byte(0x01);
pub const WHALE: Address = Address::repeat_byte(0x02);
pub const STRATEGIST: Address = Address::repeat_byte(0x03);
pub const REWARDS: Address = Address::repeat_byte(0x04);
pub const TOKEN: Address = Address::repeat_byte(0x10);
pub const VAULT: Address = Address::repeat_byte(0x11);
pub const STRATEGY: Address = Address::repeat_byte(0x12);
pub const GAUGE: Address = Address::repeat_byte(0x13);
pub const VOTER: Address = Address::repeat_byte(0x14);
pub const CONTROLLER: Address = Address::repeat_byte(0x15);
pub const CLEANER: Address = Address::repeat_byte(0x16);

const MAX_BPS: u64 = 10_000;

#[derive(Debug)]
pub struct FakeState {
    pub decimals: u8,
    /// Every call made through a fake handle, in order
    pub calls: Vec<&'static str>,
    pub balances: HashMap<Address, U256>,
    pub allowances: HashMap<(Address, Address), U256>,
    pub shares: HashMap<Address, U256>,
    /// Want the strategy has staked in the gauge
    pub pool: U256,
    pub total_debt: U256,
    pub total_gain: U256,
    pub debt_ratio: U256,
    pub revoked: bool,
    pub emergency_exit: bool,
    /// Want accrued to the pool per day of advanced time
    pub yield_per_day: U256,
    /// Want skimmed from each deposit
    pub deposit_fee: U256,
    /// Harvest ignores revocation and emergency exit
    pub sticky_debt: bool,
    /// Make the named call revert
    pub revert_on: Option<&'static str>,
    pub elapsed: u64,
    pub blocks: u64,
    pub gauge_balances: HashMap<Address, U256>,
    pub voter_governance: Address,
    /// `setVoterGovernance` hands the voter to this account instead of gov
    pub restore_to: Address,
    /// Want `clear` leaves behind on the voter
    pub stranded: U256,
    /// What the controller returns for the want token
    pub controller_strategy: Address,
}

impl FakeState {
    fn unit(&self) -> U256 {
        U256::from(10u64).pow(U256::from(self.decimals))
    }

    fn enter(&mut self, call: &'static str) -> Result<()> {
        self.calls.push(call);
        if self.revert_on == Some(call) {
            return self.revert(call);
        }
        Ok(())
    }

    fn revert<T>(&self, call: &'static str) -> Result<T> {
        Err(Error::Reverted {
            call,
            tx_hash: TxHash::ZERO,
        })
    }

    fn balance(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    fn share_balance(&self, owner: Address) -> U256 {
        self.shares.get(&owner).copied().unwrap_or_default()
    }

    fn move_want(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let have = self.balance(from);
        if have < amount {
            return false;
        }
        self.balances.insert(from, have - amount);
        *self.balances.entry(to).or_default() += amount;
        true
    }

    fn total_assets(&self) -> U256 {
        self.balance(VAULT) + self.total_debt
    }

    fn total_supply(&self) -> U256 {
        self.shares.values().copied().fold(U256::ZERO, |a, b| a + b)
    }

    fn mint_for_value(&mut self, to: Address, value: U256) {
        let supply = self.total_supply();
        let assets = self.total_assets();
        let minted = if supply.is_zero() || assets.is_zero() {
            value
        } else {
            value * supply / assets
        };
        *self.shares.entry(to).or_default() += minted;
    }

    fn harvest(&mut self) {
        // Realize yield sitting in the pool above the debt
        if self.pool > self.total_debt {
            let profit = self.pool - self.total_debt;
            self.pool -= profit;
            self.total_gain += profit;
            *self.balances.entry(VAULT).or_default() += profit;

            let fee = profit / U256::from(20u64);
            self.mint_for_value(REWARDS, fee);
            self.mint_for_value(STRATEGY, fee);
        }

        if (self.revoked || self.emergency_exit) && !self.sticky_debt {
            *self.balances.entry(VAULT).or_default() += self.pool;
            self.pool = U256::ZERO;
            self.total_debt = U256::ZERO;
            return;
        }

        let target = self.total_assets() * self.debt_ratio / U256::from(MAX_BPS);
        if target > self.total_debt {
            let loose = self.balance(VAULT);
            let credit = (target - self.total_debt).min(loose);
            self.balances.insert(VAULT, loose - credit);
            self.pool += credit;
            self.total_debt += credit;
        }
    }

    fn withdraw(&mut self, from: Address) -> Result<()> {
        let shares = self.share_balance(from);
        if shares.is_zero() {
            return self.revert("vault.withdraw");
        }

        let value = shares * self.total_assets() / self.total_supply();
        self.shares.insert(from, U256::ZERO);

        let loose = self.balance(VAULT);
        if value > loose {
            let shortfall = value - loose;
            self.pool -= shortfall.min(self.pool);
            self.total_debt -= shortfall.min(self.total_debt);
            *self.balances.entry(VAULT).or_default() += shortfall;
        }
        self.move_want(VAULT, from, value);
        Ok(())
    }
}

/// Shared ledger behind all fake handles
#[derive(Clone)]
pub struct FakeSystem {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSystem {
    /// Fresh system whose whale holds one million tokens and whose voter has
    /// gauge and loose balances waiting to be cleared
    pub fn new(decimals: u8) -> Self {
        let unit = U256::from(10u64).pow(U256::from(decimals));

        let mut balances = HashMap::new();
        balances.insert(WHALE, U256::from(1_000_000u64) * unit);
        balances.insert(VOTER, U256::from(3u64) * unit);

        let mut gauge_balances = HashMap::new();
        gauge_balances.insert(VOTER, U256::from(500u64) * unit);

        let state = FakeState {
            decimals,
            calls: Vec::new(),
            balances,
            allowances: HashMap::new(),
            shares: HashMap::new(),
            pool: U256::ZERO,
            total_debt: U256::ZERO,
            total_gain: U256::ZERO,
            debt_ratio: U256::from(MAX_BPS),
            revoked: false,
            emergency_exit: false,
            yield_per_day: U256::from(10u64) * unit,
            deposit_fee: U256::ZERO,
            sticky_debt: false,
            revert_on: None,
            elapsed: 0,
            blocks: 0,
            gauge_balances,
            voter_governance: GOV,
            restore_to: GOV,
            stranded: U256::ZERO,
            controller_strategy: STRATEGY,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Run `f` against the ledger, e.g. to inject a failure
    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().expect("fake ledger poisoned");
        f(&mut state)
    }

    fn transact(
        &self,
        call: &'static str,
        f: impl FnOnce(&mut FakeState) -> Result<()>,
    ) -> Result<()> {
        let mut state = self.state.lock().expect("fake ledger poisoned");
        state.enter(call)?;
        f(&mut state)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.with(|s| s.calls.clone())
    }

    pub fn fixtures(&self, amount: U256) -> Fixtures {
        Fixtures {
            token: Box::new(self.token()),
            vault: Box::new(self.vault()),
            strategy: Box::new(self.strategy()),
            gov: GOV,
            whale: WHALE,
            strategist: STRATEGIST,
            rewards: REWARDS,
            amount,
        }
    }

    pub fn token(&self) -> FakeToken {
        FakeToken(self.clone())
    }

    pub fn vault(&self) -> FakeVault {
        FakeVault(self.clone())
    }

    pub fn strategy(&self) -> FakeStrategy {
        FakeStrategy(self.clone())
    }

    pub fn chain(&self) -> FakeChain {
        FakeChain(self.clone())
    }

    pub fn gauge(&self) -> FakeGauge {
        FakeGauge(self.clone())
    }

    pub fn voter(&self) -> FakeVoter {
        FakeVoter(self.clone())
    }

    pub fn controller(&self) -> FakeController {
        FakeController(self.clone())
    }

    pub fn cleaner(&self) -> FakeCleaner {
        FakeCleaner(self.clone())
    }
}

pub struct FakeToken(FakeSystem);
pub struct FakeVault(FakeSystem);
pub struct FakeStrategy(FakeSystem);
pub struct FakeChain(FakeSystem);
pub struct FakeGauge(FakeSystem);
pub struct FakeVoter(FakeSystem);
pub struct FakeController(FakeSystem);
pub struct FakeCleaner(FakeSystem);

#[async_trait]
impl TokenApi for FakeToken {
    fn address(&self) -> Address {
        TOKEN
    }

    async fn decimals(&self) -> Result<u8> {
        Ok(self.0.with(|s| s.decimals))
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self.0.with(|s| s.balance(owner)))
    }

    async fn approve(&self, spender: Address, amount: U256, from: Address) -> Result<()> {
        self.0.transact("token.approve", |s| {
            s.allowances.insert((from, spender), amount);
            Ok(())
        })
    }

    async fn transfer(&self, to: Address, amount: U256, from: Address) -> Result<()> {
        self.0.transact("token.transfer", |s| {
            if !s.move_want(from, to, amount) {
                return s.revert("token.transfer");
            }
            Ok(())
        })
    }
}

#[async_trait]
impl VaultApi for FakeVault {
    fn address(&self) -> Address {
        VAULT
    }

    async fn name(&self) -> Result<String> {
        Ok("yvFake".to_string())
    }

    async fn governance(&self) -> Result<Address> {
        Ok(GOV)
    }

    async fn rewards(&self) -> Result<Address> {
        Ok(REWARDS)
    }

    async fn deposit(&self, amount: U256, from: Address) -> Result<()> {
        self.0.transact("vault.deposit", |s| {
            let allowance = s.allowances.get(&(from, VAULT)).copied().unwrap_or_default();
            if allowance < amount || s.balance(from) < amount {
                return s.revert("vault.deposit");
            }

            let fee = s.deposit_fee.min(amount);
            let credited = amount - fee;
            s.mint_for_value(from, credited);
            s.move_want(from, VAULT, credited);
            let remaining = s.balance(from) - fee;
            s.balances.insert(from, remaining);
            Ok(())
        })
    }

    async fn withdraw(&self, from: Address) -> Result<()> {
        self.0.transact("vault.withdraw", |s| {
            s.withdraw(from)
        })
    }

    async fn total_assets(&self) -> Result<U256> {
        Ok(self.0.with(|s| s.total_assets()))
    }

    async fn total_debt(&self) -> Result<U256> {
        Ok(self.0.with(|s| s.total_debt))
    }

    async fn total_supply(&self) -> Result<U256> {
        Ok(self.0.with(|s| s.total_supply()))
    }

    async fn price_per_share(&self) -> Result<U256> {
        Ok(self.0.with(|s| {
            let supply = s.total_supply();
            if supply.is_zero() {
                s.unit()
            } else {
                s.total_assets() * s.unit() / supply
            }
        }))
    }

    async fn revoke_strategy(&self, strategy: Address, from: Address) -> Result<()> {
        self.0.transact("vault.revokeStrategy", |s| {
            if from != GOV || strategy != STRATEGY {
                return s.revert("vault.revokeStrategy");
            }
            s.revoked = true;
            s.debt_ratio = U256::ZERO;
            Ok(())
        })
    }

    async fn strategies(&self, _strategy: Address) -> Result<StrategyParams> {
        Ok(self.0.with(|s| StrategyParams {
            debt_ratio: s.debt_ratio,
            total_debt: s.total_debt,
            total_gain: s.total_gain,
            ..Default::default()
        }))
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self.0.with(|s| s.share_balance(owner)))
    }

    async fn transfer(&self, to: Address, amount: U256, from: Address) -> Result<()> {
        self.0.transact("vault.transfer", |s| {
            let have = s.share_balance(from);
            if have < amount {
                return s.revert("vault.transfer");
            }
            s.shares.insert(from, have - amount);
            *s.shares.entry(to).or_default() += amount;
            Ok(())
        })
    }
}

#[async_trait]
impl StrategyApi for FakeStrategy {
    fn address(&self) -> Address {
        STRATEGY
    }

    async fn name(&self) -> Result<String> {
        Ok("StrategyFake".to_string())
    }

    async fn want(&self) -> Result<Address> {
        Ok(TOKEN)
    }

    async fn strategist(&self) -> Result<Address> {
        Ok(STRATEGIST)
    }

    async fn gauge(&self) -> Result<Address> {
        Ok(GAUGE)
    }

    async fn harvest(&self, from: Address) -> Result<()> {
        self.0.transact("strategy.harvest", |s| {
            if from != GOV {
                return s.revert("strategy.harvest");
            }
            s.harvest();
            Ok(())
        })
    }

    async fn tend(&self, from: Address) -> Result<()> {
        self.0.transact("strategy.tend", |s| {
            if from != GOV {
                return s.revert("strategy.tend");
            }
            Ok(())
        })
    }

    async fn harvest_trigger(&self, _call_cost: U256) -> Result<bool> {
        Ok(self.0.with(|s| s.pool > s.total_debt))
    }

    async fn tend_trigger(&self, _call_cost: U256) -> Result<bool> {
        Ok(false)
    }

    async fn set_emergency_exit(&self, from: Address) -> Result<()> {
        self.0.transact("strategy.setEmergencyExit", |s| {
            if from != GOV {
                return s.revert("strategy.setEmergencyExit");
            }
            s.emergency_exit = true;
            Ok(())
        })
    }

    async fn emergency_exit(&self) -> Result<bool> {
        Ok(self.0.with(|s| s.emergency_exit))
    }

    async fn estimated_total_assets(&self) -> Result<U256> {
        Ok(self.0.with(|s| s.pool + s.balance(STRATEGY)))
    }

    async fn balance_of_pool(&self) -> Result<U256> {
        Ok(self.0.with(|s| s.pool))
    }
}

#[async_trait]
impl ChainControl for FakeChain {
    async fn sleep(&self, seconds: u64) -> Result<()> {
        self.0.with(|s| {
            s.calls.push("chain.sleep");
            s.elapsed += seconds;
            if !s.pool.is_zero() {
                s.pool += s.yield_per_day * U256::from(seconds) / U256::from(ONE_DAY);
            }
        });
        Ok(())
    }

    async fn mine(&self, blocks: u64) -> Result<()> {
        self.0.with(|s| {
            s.calls.push("chain.mine");
            s.blocks += blocks;
        });
        Ok(())
    }
}

#[async_trait]
impl GaugeApi for FakeGauge {
    fn address(&self) -> Address {
        GAUGE
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self
            .0
            .with(|s| s.gauge_balances.get(&owner).copied().unwrap_or_default()))
    }
}

#[async_trait]
impl VoterApi for FakeVoter {
    fn address(&self) -> Address {
        VOTER
    }

    async fn governance(&self) -> Result<Address> {
        Ok(self.0.with(|s| s.voter_governance))
    }

    async fn set_governance(&self, governance: Address, from: Address) -> Result<()> {
        self.0.transact("voter.setGovernance", |s| {
            if from != s.voter_governance {
                return s.revert("voter.setGovernance");
            }
            s.voter_governance = governance;
            Ok(())
        })
    }
}

#[async_trait]
impl ControllerApi for FakeController {
    fn address(&self) -> Address {
        CONTROLLER
    }

    async fn strategies(&self, token: Address) -> Result<Address> {
        Ok(if token == TOKEN {
            self.0.with(|s| s.controller_strategy)
        } else {
            Address::ZERO
        })
    }
}

#[async_trait]
impl CleanerApi for FakeCleaner {
    fn address(&self) -> Address {
        CLEANER
    }

    async fn clear(&self, token: Address, from: Address) -> Result<()> {
        self.0.transact("cleaner.clear", |s| {
            if from != GOV || token != TOKEN || s.voter_governance != CLEANER {
                return s.revert("cleaner.clear");
            }
            let staked = s.gauge_balances.remove(&VOTER).unwrap_or_default();
            let loose = s.balances.remove(&VOTER).unwrap_or_default();
            let stranded = s.stranded.min(staked + loose);
            *s.balances.entry(VAULT).or_default() += staked + loose - stranded;
            if !stranded.is_zero() {
                s.balances.insert(VOTER, stranded);
            }
            Ok(())
        })
    }

    async fn set_voter_governance(&self, from: Address) -> Result<()> {
        self.0.transact("cleaner.setVoterGovernance", |s| {
            if from != GOV || s.voter_governance != CLEANER {
                return s.revert("cleaner.setVoterGovernance");
            }
            s.voter_governance = s.restore_to;
            Ok(())
        })
    }
}
