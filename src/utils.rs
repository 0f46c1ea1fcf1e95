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

use ethcontract::prelude::Address;

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
  use tiny_keccak::{Hasher, Keccak};
  let mut output = [0u8; 32];
  let mut hasher = Keccak::v256();
  hasher.update(bytes);
  hasher.finalize(&mut output);
  output
}

/// EIP-55 mixed-case rendering of an address.
pub fn to_checksum(address: &Address) -> String {
  let lower = hex::encode(address.as_bytes());
  let hash = keccak256(lower.as_bytes());
  let mut out = String::with_capacity(42);
  out.push_str("0x");
  for (i, c) in lower.chars().enumerate() {
    let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
    if nibble >= 8 {
      out.push(c.to_ascii_uppercase());
    } else {
      out.push(c);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn checksums_known_addresses() {
    for expected in [
      "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
      "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
      "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
      "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ] {
      let address = Address::from_str(&expected[2..]).unwrap();
      assert_eq!(to_checksum(&address), expected);
    }
  }
}
