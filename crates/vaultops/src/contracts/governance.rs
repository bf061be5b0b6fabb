//! Gauge, voter, controller and the one-off gauge cleaner

use super::{
    confirm, CleanerApi, ControllerApi, GaugeApi, IController, IGauge, IGaugeCleaner, IVoter,
    VoterApi,
};
use crate::error::{Error, Result};
use alloy::primitives::{Address, Bytes, TxKind, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use async_trait::async_trait;
use std::path::Path;

#[derive(Clone)]
pub struct Gauge {
    inner: IGauge::IGaugeInstance<DynProvider>,
}

impl Gauge {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            inner: IGauge::new(address, provider),
        }
    }
}

#[async_trait]
impl GaugeApi for Gauge {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self.inner.balanceOf(owner).call().await?)
    }
}

/// Voter proxy holding gauge deposits on behalf of strategies
#[derive(Clone)]
pub struct Voter {
    inner: IVoter::IVoterInstance<DynProvider>,
}

impl Voter {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            inner: IVoter::new(address, provider),
        }
    }
}

#[async_trait]
impl VoterApi for Voter {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn governance(&self) -> Result<Address> {
        Ok(self.inner.governance().call().await?)
    }

    async fn set_governance(&self, governance: Address, from: Address) -> Result<()> {
        let pending = self.inner.setGovernance(governance).from(from).send().await?;
        confirm("voter.setGovernance", pending).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct Controller {
    inner: IController::IControllerInstance<DynProvider>,
}

impl Controller {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            inner: IController::new(address, provider),
        }
    }
}

#[async_trait]
impl ControllerApi for Controller {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn strategies(&self, token: Address) -> Result<Address> {
        Ok(self.inner.strategies(token).call().await?)
    }
}

#[derive(Clone)]
pub struct GaugeCleaner {
    inner: IGaugeCleaner::IGaugeCleanerInstance<DynProvider>,
}

impl GaugeCleaner {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            inner: IGaugeCleaner::new(address, provider),
        }
    }

    /// Deploy the cleaner from `from` and return its address
    pub async fn deploy(provider: &DynProvider, from: Address, code: Bytes) -> Result<Address> {
        let mut tx = TransactionRequest::default()
            .from(from)
            .input(TransactionInput::both(code));
        tx.to = Some(TxKind::Create);

        let pending = provider.send_transaction(tx).await?;
        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            return Err(Error::Reverted {
                call: "GaugeCleaner.deploy",
                tx_hash: receipt.transaction_hash,
            });
        }

        let address = receipt
            .contract_address
            .ok_or_else(|| Error::Deploy("no contract address in receipt".to_string()))?;
        log::info!("GaugeCleaner deployed at {}", address);
        Ok(address)
    }
}

#[async_trait]
impl CleanerApi for GaugeCleaner {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn clear(&self, token: Address, from: Address) -> Result<()> {
        let pending = self.inner.clear(token).from(from).send().await?;
        confirm("cleaner.clear", pending).await?;
        Ok(())
    }

    async fn set_voter_governance(&self, from: Address) -> Result<()> {
        let pending = self.inner.setVoterGovernance().from(from).send().await?;
        confirm("cleaner.setVoterGovernance", pending).await?;
        Ok(())
    }
}

/// Read creation bytecode from a compiled artifact.
///
/// Accepts brownie build artifacts (`"bytecode": "6080..."`) and forge
/// output (`"bytecode": {"object": "0x6080..."}`).
pub fn load_creation_code(path: &Path) -> Result<Bytes> {
    let raw = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| Error::Artifact(format!("{}: {e}", path.display())))?;

    let bytecode = match &json["bytecode"] {
        serde_json::Value::String(s) => s.as_str(),
        serde_json::Value::Object(obj) => obj
            .get("object")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Artifact("bytecode.object missing".to_string()))?,
        _ => return Err(Error::Artifact("bytecode missing".to_string())),
    };

    let hex_str = bytecode.strip_prefix("0x").unwrap_or(bytecode);
    if hex_str.is_empty() {
        return Err(Error::Artifact("empty bytecode".to_string()));
    }

    let code = hex::decode(hex_str)
        .map_err(|e| Error::Artifact(format!("invalid bytecode hex: {e}")))?;
    Ok(Bytes::from(code))
}
