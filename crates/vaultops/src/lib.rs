//! Vault/strategy operations against deployed EVM contracts
//!
//! Typed clients for the vault, strategy, token and governance contracts,
//! dev-chain control (time travel, impersonation), read-only state reports,
//! the deposit/harvest/revoke scenarios and the gauge-cleaner migration.

pub mod chain;
pub mod config;
pub mod contracts;
pub mod error;
pub mod keystore;
pub mod migration;
pub mod reporter;
pub mod scenarios;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types
pub use chain::{ChainControl, DevChain, ONE_DAY};
pub use config::Config;
pub use error::{Error, Result};
pub use scenarios::{Fixtures, Scenario};
