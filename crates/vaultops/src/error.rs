//! Error types

use alloy::primitives::TxHash;
use std::fmt::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A post-condition on contract state did not hold
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// Contract call or transaction submission failed (includes reverts
    /// surfaced during gas estimation)
    #[error("contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    /// Transaction was mined but reverted
    #[error("{call} reverted in {tx_hash}")]
    Reverted { call: &'static str, tx_hash: TxHash },

    /// Raw RPC request failed
    #[error("rpc error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("pending transaction failed: {0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),

    #[error("deployment failed: {0}")]
    Deploy(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid artifact: {0}")]
    Artifact(String),

    #[error("keystore error: {0}")]
    Keystore(#[from] alloy::signers::local::LocalSignerError),

    #[error("no account selected")]
    NoAccountSelected,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Units(#[from] alloy::primitives::utils::UnitsError),
}

/// Fail with [`Error::Assertion`] unless `left == right`.
pub fn check_eq<T>(label: &str, left: T, right: T) -> Result<()>
where
    T: PartialEq + Display,
{
    if left == right {
        Ok(())
    } else {
        Err(Error::Assertion(format!("{label}: {left} != {right}")))
    }
}

/// Fail with [`Error::Assertion`] unless `cond` holds.
pub fn check(label: &str, cond: bool) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::Assertion(label.to_string()))
    }
}
