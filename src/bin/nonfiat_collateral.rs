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

use clap::Parser;
use dotenv::dotenv;
use nonfiat_collateral::{
  cli::{Cli, Command},
  config,
  deployer::Web3Deployer,
  task,
};
use std::io;

#[tokio::main]
async fn main() {
  dotenv().ok();
  env_logger::init();
  let cli = Cli::parse();

  let code = match cli.command {
    Command::DeployNonfiatCollateral(args) => {
      let deployer = config::load_config(&cli.config_dir, &cli.network)
        .and_then(|conf| Web3Deployer::new(&cli.network, conf));
      match deployer {
        Ok(d) => {
          task::run(
            &d,
            &cli.artifacts,
            &args,
            &mut io::stdout(),
            &mut io::stderr(),
          )
          .await
        }
        Err(e) => task::exit_code::<(), _>(Err(e), &mut io::stderr()),
      }
    }
  };
  std::process::exit(code);
}
