// Copyright 2021-2022 Semantic Network Ltd.
// This file is part of nonfiat-collateral.

// nonfiat-collateral is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// nonfiat-collateral is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with nonfiat-collateral.  If not, see <http://www.gnu.org/licenses/>.

use crate::{
  abi,
  artifact::Artifact,
  config::{self, Config},
  error::Error,
  params::CollateralParams,
  Result,
};
use async_trait::async_trait;
use ethcontract::{
  transaction::{TransactionBuilder, TransactionResult},
  transport::DynTransport,
  web3::types::{Bytes, TransactionReceipt, U64},
  Account, Address, PrivateKey, Web3, H256, U256,
};
use std::str::FromStr;

/// A confirmed contract deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
  pub address: Address,
  pub transaction_hash: H256,
  pub gas_used: Option<U256>,
}

/// The network side of a deployment: who signs, which chain, and how a
/// contract creation is submitted and confirmed.
#[async_trait(?Send)]
pub trait Deployer {
  /// Name of the network the deployer talks to, as given on the command line.
  fn network(&self) -> &str;

  async fn signer(&self) -> Result<Address>;

  async fn chain_id(&self) -> Result<u64>;

  /// Deploys `factory` configured with `params` and waits for the receipt.
  async fn deploy(&self, factory: &Artifact, params: &CollateralParams) -> Result<Deployment>;
}

pub struct Web3Deployer {
  web3: Web3<DynTransport>,
  network: String,
  conf: Config,
}

impl Web3Deployer {
  pub fn new(network: &str, conf: Config) -> Result<Self> {
    Ok(Self {
      web3: config::init_web3(&conf)?,
      network: network.to_string(),
      conf,
    })
  }

  /// The configured private key, else the node's first unlocked account.
  async fn account(&self) -> Result<Account> {
    if let Some(key) = &self.conf.private_key {
      let key = PrivateKey::from_str(key.trim_start_matches("0x"))
        .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
      let chain_id = self.chain_id().await?;
      return Ok(Account::Offline(key, Some(chain_id)));
    }
    let accounts = self.web3.eth().accounts().await?;
    let first = accounts.first().ok_or(Error::NoSigner)?;
    Ok(Account::Local(*first, None))
  }

  async fn receipt(&self, result: TransactionResult) -> Result<TransactionReceipt> {
    match result {
      TransactionResult::Receipt(r) => Ok(r),
      TransactionResult::Hash(h) => self
        .web3
        .eth()
        .transaction_receipt(h)
        .await?
        .ok_or(Error::MissingReceipt(h)),
    }
  }
}

#[async_trait(?Send)]
impl Deployer for Web3Deployer {
  fn network(&self) -> &str {
    &self.network
  }

  async fn signer(&self) -> Result<Address> {
    Ok(self.account().await?.address())
  }

  async fn chain_id(&self) -> Result<u64> {
    let actual = self.web3.eth().chain_id().await?.as_u64();
    match self.conf.chain_id {
      Some(expected) if expected != actual => Err(Error::ChainIdMismatch { expected, actual }),
      _ => Ok(actual),
    }
  }

  async fn deploy(&self, factory: &Artifact, params: &CollateralParams) -> Result<Deployment> {
    let data = abi::deploy_data(factory, params)?;
    let account = self.account().await?;
    let nonce = self
      .web3
      .eth()
      .transaction_count(account.address(), None)
      .await?;
    log::debug!(
      "deploying {} from {:?} with nonce {}",
      factory.name(),
      account.address(),
      nonce
    );

    let mut tx = TransactionBuilder::new(self.web3.clone())
      .from(account)
      .nonce(nonce)
      .data(Bytes(data))
      .confirmations(self.conf.confirmations);
    if let Some(g) = self.conf.gas {
      tx = tx.gas(g.into());
    }
    let result = tx.send().await?;
    let receipt = self.receipt(result).await?;
    log::info!(
      "deployment transaction {:?} mined in block {:?}",
      receipt.transaction_hash,
      receipt.block_number
    );

    if receipt.status == Some(U64::zero()) {
      return Err(Error::Reverted(receipt.transaction_hash));
    }
    let address = receipt
      .contract_address
      .ok_or(Error::NoContractAddress(receipt.transaction_hash))?;
    Ok(Deployment {
      address,
      transaction_hash: receipt.transaction_hash,
      gas_used: receipt.gas_used,
    })
  }
}
