// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./inspect_test.rs"]
mod tests;

use anyhow::{Result, bail};
use bd_wire::{
  MAX_FIELD_NUMBER,
  WireType,
  decode_varint64,
  encode_varint64,
  make_tag,
  zigzag_decode64,
  zigzag_encode64,
};
use std::fmt;

/// Encodes `value` as a varint. Without `zigzag`, negative values take the full 10 bytes, the
/// same as an `int64` field.
pub fn encode_varint(value: i64, zigzag: bool) -> Result<Vec<u8>> {
  #[allow(clippy::cast_sign_loss)]
  let raw = if zigzag {
    zigzag_encode64(value)
  } else {
    value as u64
  };

  let mut out = Vec::new();
  encode_varint64(&mut out, raw)?;
  Ok(out)
}

/// The interpretations of a single decoded varint.
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedVarint {
  pub unsigned: u64,
  pub signed: i64,
  pub zigzag: i64,
  pub len: usize,
}

impl fmt::Display for DecodedVarint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "unsigned: {}", self.unsigned)?;
    writeln!(f, "signed: {}", self.signed)?;
    writeln!(f, "zigzag: {}", self.zigzag)?;
    write!(f, "bytes: {}", self.len)
  }
}

/// Decodes the varint at the start of `bytes`. Trailing bytes are an error so that a typo in the
/// input is not silently ignored.
pub fn decode_varint(bytes: &[u8]) -> Result<DecodedVarint> {
  let (unsigned, len) = decode_varint64(bytes, 0)?;
  if len != bytes.len() {
    bail!("{} trailing bytes after varint", bytes.len() - len);
  }

  #[allow(clippy::cast_possible_wrap)]
  let signed = unsigned as i64;
  Ok(DecodedVarint {
    unsigned,
    signed,
    zigzag: zigzag_decode64(unsigned),
    len,
  })
}

/// Returns the tag for `field_number` and its varint encoding.
pub fn tag(field_number: u32, wire_type: WireType) -> Result<(u32, Vec<u8>)> {
  if field_number == 0 || field_number > MAX_FIELD_NUMBER {
    bail!("field number {field_number} is outside 1..={MAX_FIELD_NUMBER}");
  }

  let tag = make_tag(field_number, wire_type);
  let mut out = Vec::new();
  encode_varint64(&mut out, tag.into())?;
  Ok((tag, out))
}

/// Parses hex input, ignoring whitespace between bytes.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
  let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
  Ok(hex::decode(digits)?)
}

/// Formats bytes as space separated lowercase hex pairs.
#[must_use]
pub fn format_hex(bytes: &[u8]) -> String {
  bytes
    .iter()
    .map(|b| format!("{b:02x}"))
    .collect::<Vec<_>>()
    .join(" ")
}
