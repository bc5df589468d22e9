// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./tag_test.rs"]
mod tests;

use crate::{Error, Result};
use std::fmt;

const TAG_TYPE_BITS: u32 = 3;
const TAG_TYPE_MASK: u32 = (1 << TAG_TYPE_BITS) - 1;

/// Field numbers share a 32-bit tag with the 3 wire type bits.
pub const MAX_FIELD_NUMBER: u32 = (1 << (32 - TAG_TYPE_BITS)) - 1;

/// The 3-bit suffix of a tag that says how the value following it is framed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
  Varint = 0,
  Fixed64 = 1,
  LengthDelimited = 2,
  // Groups are deprecated. They are recognised only so that they can be skipped.
  StartGroup = 3,
  EndGroup = 4,
  Fixed32 = 5,
}

impl WireType {
  #[must_use]
  pub const fn bits(self) -> u32 {
    self as u32
  }

  pub const fn from_bits(value: u32) -> Result<Self> {
    match value {
      0 => Ok(Self::Varint),
      1 => Ok(Self::Fixed64),
      2 => Ok(Self::LengthDelimited),
      3 => Ok(Self::StartGroup),
      4 => Ok(Self::EndGroup),
      5 => Ok(Self::Fixed32),
      _ => Err(Error::InvalidWireType { value }),
    }
  }
}

impl fmt::Display for WireType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Varint => "varint",
      Self::Fixed64 => "fixed64",
      Self::LengthDelimited => "length-delimited",
      Self::StartGroup => "start-group",
      Self::EndGroup => "end-group",
      Self::Fixed32 => "fixed32",
    };
    f.write_str(name)
  }
}

/// Builds the tag `(field_number << 3) | wire_type`. Field numbers above [`MAX_FIELD_NUMBER`] do
/// not fit and must be rejected before this is called.
#[must_use]
pub const fn make_tag(field_number: u32, wire_type: WireType) -> u32 {
  (field_number << TAG_TYPE_BITS) | wire_type.bits()
}

/// Splits a decoded tag into its field number and wire type.
pub const fn split_tag(tag: u32) -> Result<(u32, WireType)> {
  let field_number = tag >> TAG_TYPE_BITS;
  if field_number == 0 {
    return Err(Error::InvalidTag { tag });
  }
  match WireType::from_bits(tag & TAG_TYPE_MASK) {
    Ok(wire_type) => Ok((field_number, wire_type)),
    Err(e) => Err(e),
  }
}
