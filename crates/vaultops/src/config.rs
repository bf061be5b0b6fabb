//! Configuration for the migration tool and the E2E harness

use crate::error::{Error, Result};
use alloy::primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "VAULTOPS_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "vaultops.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint of the node the tools talk to
    pub rpc_url: String,

    /// Upstream node to fork from in the E2E harness (`ETH_RPC_URL` wins)
    #[serde(default)]
    pub fork_url: Option<String>,

    /// Directory holding encrypted JSON keystores
    pub keystore_dir: String,

    /// Compiled GaugeCleaner artifact (brownie or forge JSON)
    pub cleaner_artifact: String,

    pub migration: MigrationConfig,

    /// Vault/strategy pair exercised by the scenarios
    #[serde(default)]
    pub fixtures: Option<FixtureConfig>,
}

/// Fixed addresses used by the gauge-cleaner migration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Current governance of the voter and the controller
    pub governance: Address,
    pub controller: Address,
    /// Gauge LP token whose strategy is cleaned
    pub token: Address,
    pub voter: Address,
    /// Send governance calls by impersonating `governance` (dev chains
    /// only). When off, the operator account must be governance.
    #[serde(default)]
    pub impersonate_governance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub vault: Address,
    pub strategy: Address,
    /// Account with a large want-token balance used as depositor
    pub whale: Address,
    /// Want token; read from `strategy.want()` when absent
    #[serde(default)]
    pub token: Option<Address>,
    /// Deposit size in whole tokens
    #[serde(default = "default_amount_units")]
    pub amount_units: u64,
}

fn default_amount_units() -> u64 {
    1_000
}

impl FixtureConfig {
    /// Deposit amount in base units for a token with `decimals`
    pub fn amount(&self, decimals: u8) -> U256 {
        U256::from(self.amount_units) * U256::from(10u64).pow(U256::from(decimals))
    }
}

impl Config {
    /// Load configuration from the TOML file named by [`CONFIG_ENV`]
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    /// Like [`Config::load`], but a missing file yields
    /// [`Config::default_mainnet_fork`]. A file that exists must parse.
    pub fn load_or_default() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_or_default_from(&config_path)
    }

    pub fn load_or_default_from(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            log::warn!("{} not found, using mainnet fork defaults", path);
            return Ok(Self::default_mainnet_fork());
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {path}: {e}")))?;

        toml::from_str(&config_str)
            .map_err(|e| Error::Config(format!("failed to parse {path}: {e}")))
    }

    /// Mainnet addresses against a local fork on the default Anvil port
    pub fn default_mainnet_fork() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            fork_url: None,
            keystore_dir: "~/.brownie/accounts".to_string(),
            cleaner_artifact: "build/contracts/GaugeCleaner.json".to_string(),
            migration: MigrationConfig {
                governance: address!("FEB4acf3df3cDEA7399794D0869ef76A6EfAff52"),
                controller: address!("9E65Ad11b299CA0Abefc2799dDB6314Ef2d91080"),
                token: address!("b19059ebb43466C323583928285a49f558E572Fd"),
                voter: address!("F147b8125d2ef93FB6965Db97D6746952a133934"),
                impersonate_governance: true,
            },
            fixtures: None,
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_mainnet_fork();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;

        std::fs::write(path, toml_str)?;

        log::info!("Created default config at {}", path);
        Ok(())
    }

    /// Keystore directory with `~` expanded
    pub fn keystore_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.keystore_dir).as_ref())
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.migration;
        for (name, addr) in [
            ("migration.governance", m.governance),
            ("migration.controller", m.controller),
            ("migration.token", m.token),
            ("migration.voter", m.voter),
        ] {
            if addr == Address::ZERO {
                return Err(Error::Config(format!("{name} is the zero address")));
            }
        }

        if let Some(fx) = &self.fixtures {
            for (name, addr) in [
                ("fixtures.vault", fx.vault),
                ("fixtures.strategy", fx.strategy),
                ("fixtures.whale", fx.whale),
            ] {
                if addr == Address::ZERO {
                    return Err(Error::Config(format!("{name} is the zero address")));
                }
            }
            if fx.amount_units == 0 {
                return Err(Error::Config("fixtures.amount_units must be positive".into()));
            }
        }

        Ok(())
    }
}
