#![allow(dead_code)]

use async_trait::async_trait;
use ethcontract::{Address, H256, U256};
use nonfiat_collateral::{
  abi,
  artifact::Artifact,
  deployer::{Deployer, Deployment},
  error::Error,
  params::CollateralParams,
  Result,
};
use std::{cell::RefCell, fs, path::Path, str::FromStr};

pub const ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "BalancerLPPlugin",
  "sourceName": "contracts/plugins/BalancerLPPlugin.sol",
  "abi": [
    { "type": "constructor", "stateMutability": "nonpayable", "inputs": [
      { "name": "config", "type": "tuple", "internalType": "struct BalancerCollateralConfig", "components": [
        { "name": "BalancerPool", "type": "address" },
        { "name": "priceTimeout", "type": "uint48" },
        { "name": "referenceUnitFeed", "type": "address" },
        { "name": "targetUnitFeed", "type": "address" },
        { "name": "combinedOracleError", "type": "uint192" },
        { "name": "tokenAddress", "type": "address" },
        { "name": "maxTradeVolume", "type": "uint192" },
        { "name": "oracleTimeout", "type": "uint48" },
        { "name": "targetUnitOracleTimeout", "type": "uint48" },
        { "name": "targetName", "type": "bytes32" },
        { "name": "defaultThreshold", "type": "uint192" },
        { "name": "delayUntilDefault", "type": "uint256" }
      ] }
    ] }
  ],
  "bytecode": "0x608060405234801561001057600080fd5b50",
  "deployedBytecode": "0x6080604052600080fd",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

pub fn write_artifacts(root: &Path) {
  let dir = root.join("contracts/plugins/BalancerLPPlugin.sol");
  fs::create_dir_all(&dir).unwrap();
  fs::write(dir.join("BalancerLPPlugin.json"), ARTIFACT).unwrap();
  fs::write(dir.join("BalancerLPPlugin.dbg.json"), r#"{"buildInfo":"x"}"#).unwrap();
}

/// Writes `body` as the `BalancerLPPlugin` artifact of `source` under `root`.
pub fn write_artifact_at(root: &Path, source: &str, body: &str) {
  let dir = root.join(source);
  fs::create_dir_all(&dir).unwrap();
  fs::write(dir.join("BalancerLPPlugin.json"), body).unwrap();
}

pub fn artifact() -> Artifact {
  Artifact::from_json(ARTIFACT).unwrap()
}

pub fn params(token: &str) -> CollateralParams {
  CollateralParams {
    balancer_pool: "0x5c6Ee304399DBdB9C8Ef030aB642B10820DB8F56".to_string(),
    price_timeout: "604800".to_string(),
    reference_unit_feed: "0x8fFfFfd4AfB6115b954Bd326cbe7B4BA576818f6".to_string(),
    target_unit_feed: "0x5f4eC3Df9cbd43714FE2740f5E3616155c5b8419".to_string(),
    combined_oracle_error: "15000000000000000".to_string(),
    token_address: token.to_string(),
    max_trade_volume: "1000000000000000000000000".to_string(),
    oracle_timeout: "86400".to_string(),
    target_unit_oracle_timeout: "3600".to_string(),
    target_name: "USD".to_string(),
    default_threshold: "50000000000000000".to_string(),
    delay_until_default: "86400".to_string(),
  }
}

pub fn address(s: &str) -> Address {
  Address::from_str(s.trim_start_matches("0x")).unwrap()
}

#[derive(Clone, Debug)]
pub struct DeployCall {
  pub contract: String,
  pub params: CollateralParams,
  pub data: Vec<u8>,
}

/// Records every deployment and hands out `addresses` in order.
pub struct StubDeployer {
  pub network: String,
  pub chain_id: u64,
  pub addresses: Vec<Address>,
  pub fail_with: Option<String>,
  pub calls: RefCell<Vec<DeployCall>>,
}

impl StubDeployer {
  pub fn new(addresses: Vec<Address>) -> Self {
    Self {
      network: "hardhat".to_string(),
      chain_id: 31337,
      addresses,
      fail_with: None,
      calls: RefCell::new(vec![]),
    }
  }

  pub fn failing(reason: &str) -> Self {
    Self {
      fail_with: Some(reason.to_string()),
      ..Self::new(vec![])
    }
  }
}

#[async_trait(?Send)]
impl Deployer for StubDeployer {
  fn network(&self) -> &str {
    &self.network
  }

  async fn signer(&self) -> Result<Address> {
    Ok(address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))
  }

  async fn chain_id(&self) -> Result<u64> {
    Ok(self.chain_id)
  }

  async fn deploy(&self, factory: &Artifact, params: &CollateralParams) -> Result<Deployment> {
    if let Some(reason) = &self.fail_with {
      return Err(Error::Other(reason.clone()));
    }
    let data = abi::deploy_data(factory, params)?;
    let mut calls = self.calls.borrow_mut();
    calls.push(DeployCall {
      contract: factory.name().to_string(),
      params: params.clone(),
      data,
    });
    let address = self.addresses[calls.len() - 1];
    Ok(Deployment {
      address,
      transaction_hash: H256::from_low_u64_be(calls.len() as u64),
      gas_used: Some(U256::from(1_500_000u64)),
    })
  }
}
