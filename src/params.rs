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

use clap::Args;
use serde::{Deserialize, Serialize};

/// Constructor configuration of the non-fiat collateral plugin.
///
/// Every field is taken verbatim from the command line and handed to the
/// deployment untouched; typing happens only when the record is bound to
/// the constructor ABI.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralParams {
  /// Address of the Balancer pool
  #[arg(long, env = "BALANCER_POOL")]
  #[serde(rename = "BalancerPool")]
  pub balancer_pool: String,
  /// The amount of time before a price decays to 0
  #[arg(long, env = "PRICE_TIMEOUT")]
  pub price_timeout: String,
  /// Reference Price Feed address
  #[arg(long, env = "REFERENCE_UNIT_FEED")]
  pub reference_unit_feed: String,
  /// Target Unit Price Feed address
  #[arg(long, env = "TARGET_UNIT_FEED")]
  pub target_unit_feed: String,
  /// The combined % error from both oracle sources
  #[arg(long, env = "COMBINED_ORACLE_ERROR")]
  pub combined_oracle_error: String,
  /// ERC20 token address
  #[arg(long, env = "TOKEN_ADDRESS")]
  pub token_address: String,
  /// Max Trade Volume (in UoA)
  #[arg(long, env = "MAX_TRADE_VOLUME")]
  pub max_trade_volume: String,
  /// Max oracle timeout for the reference unit feed
  #[arg(long, env = "ORACLE_TIMEOUT")]
  pub oracle_timeout: String,
  /// Max oracle timeout for the target unit feed
  #[arg(long, env = "TARGET_UNIT_ORACLE_TIMEOUT")]
  pub target_unit_oracle_timeout: String,
  /// Target Name
  #[arg(long, env = "TARGET_NAME")]
  pub target_name: String,
  /// Default Threshold
  #[arg(long, env = "DEFAULT_THRESHOLD")]
  pub default_threshold: String,
  /// Delay until default
  #[arg(long, env = "DELAY_UNTIL_DEFAULT")]
  pub delay_until_default: String,
}

impl CollateralParams {
  /// The record as `(key, value)` pairs, keyed the way the plugin's
  /// configuration struct names its members.
  pub fn fields(&self) -> [(&'static str, &str); 12] {
    [
      ("BalancerPool", self.balancer_pool.as_str()),
      ("priceTimeout", self.price_timeout.as_str()),
      ("referenceUnitFeed", self.reference_unit_feed.as_str()),
      ("targetUnitFeed", self.target_unit_feed.as_str()),
      ("combinedOracleError", self.combined_oracle_error.as_str()),
      ("tokenAddress", self.token_address.as_str()),
      ("maxTradeVolume", self.max_trade_volume.as_str()),
      ("oracleTimeout", self.oracle_timeout.as_str()),
      ("targetUnitOracleTimeout", self.target_unit_oracle_timeout.as_str()),
      ("targetName", self.target_name.as_str()),
      ("defaultThreshold", self.default_threshold.as_str()),
      ("delayUntilDefault", self.delay_until_default.as_str()),
    ]
  }

  /// Case-insensitive lookup. A leading underscore, as solidity argument
  /// names often carry, is ignored.
  pub fn get(&self, key: &str) -> Option<&str> {
    let key = key.trim_start_matches('_');
    self
      .fields()
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(key))
      .map(|(_, v)| *v)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> CollateralParams {
    CollateralParams {
      balancer_pool: "0x5c6Ee304399DBdB9C8Ef030aB642B10820DB8F56".to_string(),
      price_timeout: "604800".to_string(),
      token_address: "0xba100000625a3754423978a60c9317c58a424e3D".to_string(),
      delay_until_default: "86400".to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn get_ignores_key_casing() {
    let p = sample();
    assert_eq!(p.get("balancerPool"), Some(p.balancer_pool.as_str()));
    assert_eq!(p.get("BalancerPool"), Some(p.balancer_pool.as_str()));
    assert_eq!(p.get("_delayUntilDefault"), Some("86400"));
    assert_eq!(p.get("TOKENADDRESS"), Some(p.token_address.as_str()));
    assert_eq!(p.get("chainlinkFeed"), None);
  }

  #[test]
  fn fields_keep_pool_and_token_apart() {
    let p = sample();
    let fields = p.fields();
    assert_eq!(fields.len(), 12);
    assert_eq!(fields[0], ("BalancerPool", p.balancer_pool.as_str()));
    assert_eq!(fields[5], ("tokenAddress", p.token_address.as_str()));
  }

  #[test]
  fn serializes_with_contract_keys() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["BalancerPool"], "0x5c6Ee304399DBdB9C8Ef030aB642B10820DB8F56");
    assert_eq!(json["priceTimeout"], "604800");
    assert_eq!(json.as_object().unwrap().len(), 12);
  }
}
