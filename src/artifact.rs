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

use crate::{error::Error, Result};
use ethcontract_common::{
  abi::{Constructor, Param},
  Contract,
};
use serde::Deserialize;
use std::{
  fs,
  path::{Path, PathBuf},
};

/// Name of the contract the collateral task deploys.
pub const COLLATERAL_CONTRACT: &str = "BalancerLPPlugin";

/// Member names of one ABI input. ethabi keeps tuple members as bare
/// `ParamType`s, so their names are read from the artifact separately.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct InputNames {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub components: Vec<InputNames>,
}

#[derive(Deserialize)]
struct AbiNames {
  #[serde(rename = "type")]
  kind: String,
  #[serde(default)]
  inputs: Vec<InputNames>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
  #[serde(default)]
  source_name: Option<String>,
  #[serde(default)]
  abi: Vec<AbiNames>,
}

/// A Hardhat compilation artifact; the contract factory of a deployment.
#[derive(Clone, Debug)]
pub struct Artifact {
  pub contract: Contract,
  pub source_name: Option<String>,
  constructor_names: Vec<InputNames>,
}

impl Artifact {
  pub fn from_json(json: &str) -> Result<Self> {
    let contract: Contract = serde_json::from_str(json)?;
    let meta: Metadata = serde_json::from_str(json)?;
    let constructor_names = meta
      .abi
      .into_iter()
      .find(|e| e.kind == "constructor")
      .map(|e| e.inputs)
      .unwrap_or_default();
    Ok(Self {
      contract,
      source_name: meta.source_name,
      constructor_names,
    })
  }

  pub fn load(path: &Path) -> Result<Self> {
    let json = fs::read_to_string(path)?;
    Self::from_json(&json)
      .map_err(|e| Error::InvalidArtifact(path.display().to_string(), e.to_string()))
  }

  /// Resolves a factory the way Hardhat does: a bare contract name must be
  /// unique under `root`, a fully qualified `path/File.sol:Name` picks one
  /// artifact directly.
  pub fn find(root: &Path, name: &str) -> Result<Self> {
    let not_found = || Error::ArtifactNotFound {
      name: name.to_string(),
      root: root.display().to_string(),
    };
    let path = match name.rsplit_once(':') {
      Some((source, contract)) => {
        let path = root.join(source).join(format!("{}.json", contract));
        if !path.is_file() {
          return Err(not_found());
        }
        path
      }
      None => {
        let mut found = vec![];
        collect_artifact_paths(root, name, &mut found)?;
        match found.len() {
          0 => return Err(not_found()),
          1 => found.remove(0),
          _ => {
            return Err(Error::AmbiguousArtifact {
              name: name.to_string(),
              paths: found.iter().map(|p| p.display().to_string()).collect(),
            })
          }
        }
      }
    };
    log::debug!("loading {} from {}", name, path.display());
    Self::load(&path)
  }

  pub fn name(&self) -> &str {
    &self.contract.name
  }

  pub fn constructor(&self) -> Option<&Constructor> {
    self.contract.interface.abi.constructor()
  }

  /// Constructor inputs paired with their member names; empty when the
  /// contract declares no constructor.
  pub fn constructor_inputs(&self) -> Vec<(&Param, InputNames)> {
    self
      .constructor()
      .map(|c| {
        c.inputs
          .iter()
          .enumerate()
          .map(|(i, p)| {
            let names = self.constructor_names.get(i).cloned().unwrap_or_else(|| InputNames {
              name: p.name.clone(),
              components: vec![],
            });
            (p, names)
          })
          .collect()
      })
      .unwrap_or_default()
  }

  /// Creation bytecode, decoded.
  pub fn creation_code(&self) -> Result<Vec<u8>> {
    let bytecode = &self.contract.bytecode;
    if bytecode.is_empty() {
      return Err(Error::InvalidArtifact(
        self.name().to_string(),
        "empty bytecode, the contract is abstract or an interface".to_string(),
      ));
    }
    if bytecode.requires_linking() {
      return Err(Error::InvalidArtifact(
        self.name().to_string(),
        "bytecode has unlinked library references".to_string(),
      ));
    }
    let code = bytecode
      .to_bytes()
      .map_err(|e| Error::InvalidArtifact(self.name().to_string(), e.to_string()))?;
    Ok(code.0)
  }
}

fn collect_artifact_paths(dir: &Path, name: &str, found: &mut Vec<PathBuf>) -> Result<()> {
  if !dir.is_dir() {
    return Ok(());
  }
  let file_name = format!("{}.json", name);
  let mut entries = fs::read_dir(dir)?
    .map(|e| e.map(|e| e.path()))
    .collect::<std::io::Result<Vec<_>>>()?;
  entries.sort();
  for path in entries {
    if path.is_dir() {
      // build-info holds the raw compiler input/output, never artifacts
      if path.file_name().map_or(false, |n| n == "build-info") {
        continue;
      }
      collect_artifact_paths(&path, name, found)?;
    } else if path.file_name().map_or(false, |n| n == file_name.as_str()) {
      found.push(path);
    }
  }
  Ok(())
}
