// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Encoded length computation. Every function here agrees byte for byte with what
//! [`crate::CodedOutput`] writes for the same input.

use crate::format::WireFormat;
use crate::tag::{WireType, make_tag};

#[must_use]
pub const fn varint64_size(value: u64) -> usize {
  // `| 1` so that zero still counts as one significant bit.
  let bits = 64 - (value | 1).leading_zeros() as usize;
  bits.div_ceil(7)
}

#[must_use]
pub const fn varint32_size(value: u32) -> usize {
  varint64_size(value as u64)
}

#[must_use]
pub const fn int32_size(value: i32) -> usize {
  if value < 0 {
    crate::MAX_VARINT_LEN
  } else {
    varint32_size(value.unsigned_abs())
  }
}

#[must_use]
pub const fn tag_size(field_number: u32) -> usize {
  varint32_size(make_tag(field_number, WireType::Varint))
}

/// Size of a length prefix plus `len` payload bytes.
#[must_use]
pub const fn length_delimited_size(len: usize) -> usize {
  varint64_size(len as u64) + len
}

#[must_use]
pub fn field_size<F: WireFormat>(field_number: u32, value: &F::Value) -> usize {
  tag_size(field_number) + F::encoded_len(value)
}

/// Size of the concatenated element encodings of a packed block, excluding tag and length.
#[must_use]
pub fn packed_data_size<F: WireFormat>(values: &[F::Value]) -> usize {
  values.iter().map(F::encoded_len).sum()
}

/// Size of a complete packed field. Empty lists are never written and have size 0.
#[must_use]
pub fn packed_field_size<F: WireFormat>(field_number: u32, values: &[F::Value]) -> usize {
  if values.is_empty() {
    return 0;
  }
  tag_size(field_number) + length_delimited_size(packed_data_size::<F>(values))
}

#[must_use]
pub const fn bytes_size(field_number: u32, len: usize) -> usize {
  tag_size(field_number) + length_delimited_size(len)
}
