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
  artifact::{Artifact, InputNames},
  error::Error,
  params::CollateralParams,
  Result,
};
use ethcontract::U256;
use ethcontract_common::abi::{
  token::{LenientTokenizer, Tokenizer},
  Param, ParamType, Token,
};

/// Binds the parameter record to the constructor inputs of `artifact` and
/// returns the creation calldata (bytecode followed by the encoded
/// arguments).
pub fn deploy_data(artifact: &Artifact, params: &CollateralParams) -> Result<Vec<u8>> {
  let code = artifact.creation_code()?;
  let inputs = artifact.constructor_inputs();
  let tokens = constructor_tokens(&inputs, params)?;
  match artifact.constructor() {
    Some(constructor) => Ok(constructor.encode_input(code, &tokens)?),
    None => Ok(code),
  }
}

/// Tokens for the constructor inputs. Leaf inputs are looked up in the
/// record by name, tuples recurse into their members. Every field of the
/// record has to land in the constructor.
pub fn constructor_tokens(
  inputs: &[(&Param, InputNames)],
  params: &CollateralParams,
) -> Result<Vec<Token>> {
  let tokens = inputs
    .iter()
    .map(|(param, names)| bind(&param.kind, names, params))
    .collect::<Result<Vec<_>>>()?;
  let unused: Vec<String> = params
    .fields()
    .iter()
    .filter(|(key, _)| !inputs.iter().any(|(_, names)| is_bound(names, key)))
    .map(|(key, _)| key.to_string())
    .collect();
  if !unused.is_empty() {
    return Err(Error::UnusedParams(unused));
  }
  Ok(tokens)
}

fn bind(kind: &ParamType, names: &InputNames, params: &CollateralParams) -> Result<Token> {
  if let ParamType::Tuple(members) = kind {
    if members.len() != names.components.len() {
      return Err(Error::UnsupportedType(format!("tuple {}", names.name)));
    }
    let tokens = members
      .iter()
      .zip(&names.components)
      .map(|(k, n)| bind(k, n, params))
      .collect::<Result<Vec<_>>>()?;
    return Ok(Token::Tuple(tokens));
  }
  let value = params
    .get(&names.name)
    .ok_or_else(|| Error::MissingParam(names.name.clone()))?;
  tokenize(&names.name, kind, value)
}

fn is_bound(names: &InputNames, key: &str) -> bool {
  if names.components.is_empty() {
    names.name.trim_start_matches('_').eq_ignore_ascii_case(key)
  } else {
    names.components.iter().any(|c| is_bound(c, key))
  }
}

/// Converts a raw string into the token of type `kind`. Values are used
/// exactly as given; hex may carry a `0x` or `0X` prefix.
pub fn tokenize(name: &str, kind: &ParamType, value: &str) -> Result<Token> {
  let invalid = |reason: String| Error::InvalidParam {
    name: name.to_string(),
    kind: kind.to_string(),
    value: value.to_string(),
    reason,
  };
  let hex = strip_hex_prefix(value);

  let token = match kind {
    ParamType::Array(_) | ParamType::FixedArray(..) | ParamType::Tuple(_) => {
      return Err(Error::UnsupportedType(kind.to_string()))
    }
    ParamType::Address | ParamType::Bytes => LenientTokenizer::tokenize(kind, hex.unwrap_or(value))
      .map_err(|e| invalid(e.to_string()))?,
    // ethers' formatBytes32String: the last byte stays zero
    ParamType::FixedBytes(32) if hex.is_none() => {
      if value.len() > 31 {
        return Err(invalid("string longer than 31 bytes".to_string()));
      }
      let mut bytes = value.as_bytes().to_vec();
      bytes.resize(32, 0);
      Token::FixedBytes(bytes)
    }
    ParamType::FixedBytes(_) => match hex {
      Some(h) => LenientTokenizer::tokenize(kind, h).map_err(|e| invalid(e.to_string()))?,
      None => return Err(invalid("expected 0x-prefixed hex".to_string())),
    },
    ParamType::Uint(_) | ParamType::Int(_) => {
      // the tokenizer reads hex integers only as a full 32-byte word
      let padded = hex.filter(|h| h.len() <= 64).map(|h| format!("{:0>64}", h));
      LenientTokenizer::tokenize(kind, padded.as_deref().unwrap_or(value))
        .map_err(|e| invalid(e.to_string()))?
    }
    ParamType::Bool | ParamType::String => {
      LenientTokenizer::tokenize(kind, value).map_err(|e| invalid(e.to_string()))?
    }
  };
  check_width(kind, &token).map_err(invalid)?;
  Ok(token)
}

fn strip_hex_prefix(value: &str) -> Option<&str> {
  value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

/// ethabi encodes any 256-bit word; narrower integer types are checked here.
fn check_width(kind: &ParamType, token: &Token) -> std::result::Result<(), String> {
  let too_wide = |bits: usize| Err(format!("does not fit in {} bits", bits));
  match (kind, token) {
    (ParamType::Uint(bits), Token::Uint(n)) if n.bits() > *bits => too_wide(*bits),
    (ParamType::Int(bits), Token::Int(n)) => {
      // two's complement range of intN is [-2^(N-1), 2^(N-1) - 1]
      let negative = n.bit(255);
      let abs = if negative {
        U256::zero().overflowing_sub(*n).0
      } else {
        *n
      };
      let limit = U256::one() << (*bits - 1);
      if (negative && abs > limit) || (!negative && abs >= limit) {
        too_wide(*bits)
      } else {
        Ok(())
      }
    }
    _ => Ok(()),
  }
}
