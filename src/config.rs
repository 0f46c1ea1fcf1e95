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

use crate::Result;
use ethcontract::{transport::DynTransport, Http, Web3};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ETH_URL: &str = "http://localhost:8545";

/// Per-network settings, read from `config.<network>.json` and overridden
/// by `DEPLOY_*` environment variables.
#[derive(Clone, Deserialize, Serialize, Default)]
pub struct Config {
  pub eth_url: String,
  pub private_key: Option<String>,
  /// Chain id the network is expected to report; checked when set.
  pub chain_id: Option<u64>,
  pub confirmations: usize,
  pub gas: Option<u64>,
}

impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("eth_url", &self.eth_url)
      .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
      .field("chain_id", &self.chain_id)
      .field("confirmations", &self.confirmations)
      .field("gas", &self.gas)
      .finish()
  }
}

pub fn load_config(dir: &Path, network: &str) -> Result<Config> {
  let fp = dir.join(format!("config.{}.json", network));
  let mut settings = config::Config::default();
  settings.set_default("eth_url", DEFAULT_ETH_URL)?;
  settings.set_default("confirmations", 0_i64)?;
  settings.merge(config::File::from(fp.as_path()).required(false))?;
  settings.merge(config::Environment::with_prefix("DEPLOY"))?;
  let conf = settings.try_into::<Config>()?;
  log::debug!("{} network config: {:?}", network, conf);
  Ok(conf)
}

pub fn init_web3(conf: &Config) -> Result<Web3<DynTransport>> {
  let http = Http::new(conf.eth_url.as_str())?;
  Ok(Web3::new(DynTransport::new(http)))
}
