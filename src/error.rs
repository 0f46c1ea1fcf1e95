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

use ethcontract::H256;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("web3 error: {0}")]
  Web3Error(#[from] ethcontract::web3::Error),
  #[error("execution error: {0}")]
  ExecutionError(#[from] ethcontract::errors::ExecutionError),
  #[error("hex error: {0}")]
  HexError(#[from] hex::FromHexError),
  #[error("json error: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("config error: {0}")]
  ConfigError(#[from] config::ConfigError),
  #[error("io error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("no artifact for contract {name} under {root}")]
  ArtifactNotFound { name: String, root: String },
  #[error("abi error: {0}")]
  AbiError(#[from] ethcontract_common::abi::Error),
  #[error("{name} matches several artifacts, use a fully qualified name (source.sol:{name}): {paths:?}")]
  AmbiguousArtifact { name: String, paths: Vec<String> },
  #[error("invalid artifact {0}: {1}")]
  InvalidArtifact(String, String),
  #[error("missing parameter `{0}` required by the constructor")]
  MissingParam(String),
  #[error("parameter `{name}` ({kind}) has invalid value {value:?}: {reason}")]
  InvalidParam {
    name: String,
    kind: String,
    value: String,
    reason: String,
  },
  #[error("parameters not taken by the constructor: {}", .0.join(", "))]
  UnusedParams(Vec<String>),
  #[error("unsupported constructor input type: {0}")]
  UnsupportedType(String),
  #[error("no signer available: set a private key or unlock an account on the node")]
  NoSigner,
  #[error("invalid private key: {0}")]
  InvalidPrivateKey(String),
  #[error("connected to chain {actual} but the network config expects {expected}")]
  ChainIdMismatch { expected: u64, actual: u64 },
  #[error("deployment transaction {0:?} reverted")]
  Reverted(H256),
  #[error("no receipt for deployment transaction {0:?}")]
  MissingReceipt(H256),
  #[error("receipt for {0:?} carries no contract address")]
  NoContractAddress(H256),
  #[error("error: {0}")]
  Other(String),
}

impl From<&str> for Error {
  fn from(err: &str) -> Self {
    Error::Other(err.to_string())
  }
}
impl From<String> for Error {
  fn from(err: String) -> Self {
    Error::Other(err)
  }
}
