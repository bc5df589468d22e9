// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./varint_test.rs"]
mod tests;

use crate::size::varint64_size;
use crate::{Error, Result};
use bytes::BufMut;

/// A 64-bit value never needs more than 10 groups of 7 bits.
pub const MAX_VARINT_LEN: usize = 10;

fn require_capacity<B: BufMut>(dst: &B, needed: usize) -> Result<()> {
  let remaining = dst.remaining_mut();
  if remaining < needed {
    Err(Error::BufferFull { needed, remaining })
  } else {
    Ok(())
  }
}

// Assumption: dst has room for `varint64_size(value)` bytes.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn put_varint64<B: BufMut>(dst: &mut B, mut value: u64) -> usize {
  let mut written = 1;
  while value >= 0x80 {
    dst.put_u8((value as u8) | 0x80);
    value >>= 7;
    written += 1;
  }
  dst.put_u8(value as u8);
  written
}

/// Encodes `value` as an unsigned varint. Returns the number of bytes written.
pub fn encode_varint64<B: BufMut>(dst: &mut B, value: u64) -> Result<usize> {
  require_capacity(dst, varint64_size(value))?;
  Ok(put_varint64(dst, value))
}

/// Encodes `value` as an unsigned varint. Returns the number of bytes written.
pub fn encode_varint32<B: BufMut>(dst: &mut B, value: u32) -> Result<usize> {
  encode_varint64(dst, u64::from(value))
}

/// Encodes an `int32` the way the wire format requires: negative values are sign extended to 64
/// bits first and therefore always take 10 bytes.
#[allow(clippy::cast_sign_loss)]
pub fn encode_int32<B: BufMut>(dst: &mut B, value: i32) -> Result<usize> {
  encode_varint64(dst, i64::from(value) as u64)
}

/// Decodes an unsigned varint starting at `pos`. Returns the value and the position just past the
/// last byte consumed.
pub fn decode_varint64(src: &[u8], pos: usize) -> Result<(u64, usize)> {
  let mut result = 0u64;
  for i in 0 .. MAX_VARINT_LEN {
    let Some(&byte) = src.get(pos + i) else {
      return Err(Error::Truncated {
        needed: i + 1,
        remaining: src.len().saturating_sub(pos),
      });
    };

    // Bits beyond the 64th in the final byte are discarded.
    result |= u64::from(byte & 0x7f) << (7 * i);
    if byte & 0x80 == 0 {
      return Ok((result, pos + i + 1));
    }
  }

  Err(Error::MalformedVarint { offset: pos })
}

/// Decodes a varint and keeps the low 32 bits. Encodings up to 10 bytes are accepted so that
/// sign-extended negative `int32` values can be read back.
#[allow(clippy::cast_possible_truncation)]
pub fn decode_varint32(src: &[u8], pos: usize) -> Result<(u32, usize)> {
  let (value, pos) = decode_varint64(src, pos)?;
  Ok((value as u32, pos))
}

/// Maps a signed integer onto an unsigned one so that values of small magnitude stay small:
/// 0 → 0, -1 → 1, 1 → 2, -2 → 3 and so on.
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub const fn zigzag_encode32(n: i32) -> u32 {
  ((n << 1) ^ (n >> 31)) as u32
}

#[allow(clippy::cast_sign_loss)]
#[must_use]
pub const fn zigzag_encode64(n: i64) -> u64 {
  ((n << 1) ^ (n >> 63)) as u64
}

#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub const fn zigzag_decode32(n: u32) -> i32 {
  ((n >> 1) as i32) ^ -((n & 1) as i32)
}

#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub const fn zigzag_decode64(n: u64) -> i64 {
  ((n >> 1) as i64) ^ -((n & 1) as i64)
}
