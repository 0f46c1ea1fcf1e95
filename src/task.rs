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
  artifact::{Artifact, COLLATERAL_CONTRACT},
  deployer::Deployer,
  error::Error,
  params::CollateralParams,
  utils, Result,
};
use clap::Args;
use ethcontract::Address;
use serde::Serialize;
use std::{io::Write, path::Path};

/// `deploy-nonfiat-collateral` options.
#[derive(Args, Clone, Debug)]
pub struct DeployArgs {
  #[command(flatten)]
  pub params: CollateralParams,
  /// Suppress the success line
  #[arg(long)]
  pub no_output: bool,
  /// Source file of the plugin (e.g. contracts/plugins/BalancerLPPlugin.sol)
  /// when several artifacts share its name
  #[arg(long)]
  pub source: Option<String>,
  /// Also print the result as JSON
  #[arg(long)]
  pub json: bool,
}

/// What the task hands back on success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeployedCollateral {
  pub collateral: Address,
}

/// Deploys the non-fiat collateral plugin and, unless `no_output` is set,
/// writes one line naming the network, chain id and new address to `out`.
pub async fn deploy_nonfiat_collateral<D, W>(
  deployer: &D,
  factory: &Artifact,
  params: &CollateralParams,
  no_output: bool,
  out: &mut W,
) -> Result<DeployedCollateral>
where
  D: Deployer + ?Sized,
  W: Write,
{
  let signer = deployer.signer().await?;
  log::info!("deployer account {:?}", signer);
  let chain_id = deployer.chain_id().await?;
  log::info!(
    "deploying {} to {} ({})",
    factory.name(),
    deployer.network(),
    chain_id
  );

  let deployment = deployer.deploy(factory, params).await?;
  log::debug!(
    "deployment tx {:?}, gas used {:?}",
    deployment.transaction_hash,
    deployment.gas_used
  );

  if !no_output {
    writeln!(
      out,
      "Deployed Non-Fiat Collateral to {} ({}): {}",
      deployer.network(),
      chain_id,
      utils::to_checksum(&deployment.address)
    )?;
  }

  Ok(DeployedCollateral {
    collateral: deployment.address,
  })
}

/// Resolves the plugin's factory from `artifacts` and runs the task. Any
/// failure is reported on `err` and turned into exit status 1.
pub async fn run<D, W, E>(
  deployer: &D,
  artifacts: &Path,
  args: &DeployArgs,
  out: &mut W,
  err: &mut E,
) -> i32
where
  D: Deployer + ?Sized,
  W: Write,
  E: Write,
{
  let result = async {
    let name = match &args.source {
      Some(source) => format!("{}:{}", source, COLLATERAL_CONTRACT),
      None => COLLATERAL_CONTRACT.to_string(),
    };
    let factory = Artifact::find(artifacts, &name)?;
    let deployed =
      deploy_nonfiat_collateral(deployer, &factory, &args.params, args.no_output, out).await?;
    if args.json {
      writeln!(out, "{}", serde_json::to_string(&deployed)?)?;
    }
    Ok::<_, Error>(deployed)
  }
  .await;
  exit_code(result, err)
}

/// 0 on success; otherwise prints the error and its causes and returns 1.
pub fn exit_code<T, E: Write>(result: Result<T>, err: &mut E) -> i32 {
  match result {
    Ok(_) => 0,
    Err(e) => {
      let _ = writeln!(err, "Error: {}", e);
      let mut source = std::error::Error::source(&e);
      while let Some(cause) = source {
        let _ = writeln!(err, "  caused by: {}", cause);
        source = std::error::Error::source(cause);
      }
      1
    }
  }
}
