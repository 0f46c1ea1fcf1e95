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

use crate::task::DeployArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nonfiat-collateral", version, about = "Collateral plugin deployment tasks")]
pub struct Cli {
  /// Network to deploy to; selects config/config.<network>.json
  #[arg(long, env = "NETWORK", default_value = "localhost", global = true)]
  pub network: String,
  /// Directory holding the per-network config files
  #[arg(long, default_value = "config", global = true)]
  pub config_dir: PathBuf,
  /// Hardhat artifacts directory
  #[arg(long, default_value = "artifacts", global = true)]
  pub artifacts: PathBuf,
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Deploys a non-fiat Collateral
  #[command(name = "deploy-nonfiat-collateral")]
  DeployNonfiatCollateral(DeployArgs),
}
