// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./input_test.rs"]
mod tests;

use crate::format::{WireFormat, decode_fixed32, decode_fixed64};
use crate::tag::{WireType, split_tag};
use crate::varint::{decode_varint32, decode_varint64};
use crate::{Error, Result};

//
// CodedInput
//

/// A protobuf decoder over an in-memory buffer.
///
/// Reads never go past the current limit. The limit starts at the end of the buffer and is
/// narrowed with [`CodedInput::push_limit`] while decoding a length-delimited value (an embedded
/// message or a packed block), then restored with [`CodedInput::pop_limit`].
#[derive(Debug)]
pub struct CodedInput<'a> {
  buf: &'a [u8],
  pos: usize,
  limit: usize,
}

impl<'a> CodedInput<'a> {
  #[must_use]
  pub const fn new(buf: &'a [u8]) -> Self {
    Self {
      buf,
      pos: 0,
      limit: buf.len(),
    }
  }

  /// Offset of the next byte to be read from the start of the buffer.
  #[must_use]
  pub const fn position(&self) -> usize {
    self.pos
  }

  /// Bytes left before the current limit.
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.limit - self.pos
  }

  #[must_use]
  pub const fn is_at_end(&self) -> bool {
    self.pos >= self.limit
  }

  /// Restricts reads to the next `len` bytes. Returns the previous limit, to be passed back to
  /// [`CodedInput::pop_limit`].
  pub fn push_limit(&mut self, len: usize) -> Result<usize> {
    self.require(len)?;
    let old_limit = self.limit;
    self.limit = self.pos + len;
    Ok(old_limit)
  }

  pub fn pop_limit(&mut self, old_limit: usize) {
    debug_assert!(old_limit >= self.limit);
    self.limit = old_limit;
  }

  fn window(&self) -> &'a [u8] {
    &self.buf[.. self.limit]
  }

  fn require(&self, needed: usize) -> Result<()> {
    let remaining = self.remaining();
    if needed > remaining {
      Err(Error::Truncated { needed, remaining })
    } else {
      Ok(())
    }
  }

  pub fn read_raw_varint32(&mut self) -> Result<u32> {
    let (value, pos) = decode_varint32(self.window(), self.pos)?;
    self.pos = pos;
    Ok(value)
  }

  pub fn read_raw_varint64(&mut self) -> Result<u64> {
    let (value, pos) = decode_varint64(self.window(), self.pos)?;
    self.pos = pos;
    Ok(value)
  }

  pub fn read_raw_fixed32(&mut self) -> Result<u32> {
    let (value, pos) = decode_fixed32(self.window(), self.pos)?;
    self.pos = pos;
    Ok(value)
  }

  pub fn read_raw_fixed64(&mut self) -> Result<u64> {
    let (value, pos) = decode_fixed64(self.window(), self.pos)?;
    self.pos = pos;
    Ok(value)
  }

  /// Returns the next `len` bytes, borrowed from the input buffer.
  pub fn read_raw_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
    self.require(len)?;
    let bytes = &self.buf[self.pos .. self.pos + len];
    self.pos += len;
    Ok(bytes)
  }

  /// Reads the next tag, or returns `None` once the current limit is reached.
  pub fn read_tag(&mut self) -> Result<Option<(u32, WireType)>> {
    if self.is_at_end() {
      return Ok(None);
    }
    let tag = self.read_raw_varint32()?;
    split_tag(tag).map(Some)
  }

  /// Reads one value in format `F` (the tag has already been consumed).
  pub fn read<F: WireFormat>(&mut self) -> Result<F::Value> {
    let (value, pos) = F::get(self.window(), self.pos)?;
    self.pos = pos;
    Ok(value)
  }

  /// Reads a varint length prefix and checks it fits before the current limit.
  pub fn read_length(&mut self) -> Result<usize> {
    let len = self.read_raw_varint64()?;
    let remaining = self.remaining();
    match usize::try_from(len) {
      Ok(len) if len <= remaining => Ok(len),
      _ => Err(Error::Truncated {
        needed: usize::try_from(len).unwrap_or(usize::MAX),
        remaining,
      }),
    }
  }

  /// Reads the payload of a length-delimited value (string, bytes or embedded message).
  pub fn read_length_delimited(&mut self) -> Result<&'a [u8]> {
    let len = self.read_length()?;
    self.read_raw_bytes(len)
  }

  /// Reads a packed block of `F` values and appends them to `values`.
  pub fn read_packed_into<F: WireFormat>(&mut self, values: &mut Vec<F::Value>) -> Result<()> {
    let len = self.read_length()?;
    let old_limit = self.push_limit(len)?;
    while !self.is_at_end() {
      values.push(self.read::<F>()?);
    }
    self.pop_limit(old_limit);
    Ok(())
  }

  /// Skips the value of a field whose tag has just been read.
  ///
  /// Groups are skipped by scanning forward to the matching end-group tag, including nested
  /// groups. The nesting is tracked on the heap so hostile input cannot exhaust the stack.
  pub fn skip_field(&mut self, field_number: u32, wire_type: WireType) -> Result<()> {
    match wire_type {
      WireType::Varint => {
        self.read_raw_varint64()?;
      },
      WireType::Fixed64 => {
        self.read_raw_bytes(8)?;
      },
      WireType::Fixed32 => {
        self.read_raw_bytes(4)?;
      },
      WireType::LengthDelimited => {
        self.read_length_delimited()?;
      },
      WireType::StartGroup => self.skip_group(field_number)?,
      WireType::EndGroup => return Err(Error::UnexpectedEndGroup { field_number }),
    }
    Ok(())
  }

  fn skip_group(&mut self, field_number: u32) -> Result<()> {
    let mut open_groups = vec![field_number];
    while let Some(&innermost) = open_groups.last() {
      let Some((number, wire_type)) = self.read_tag()? else {
        return Err(Error::UnmatchedGroup {
          field_number: innermost,
        });
      };

      match wire_type {
        WireType::StartGroup => open_groups.push(number),
        WireType::EndGroup if number == innermost => {
          open_groups.pop();
        },
        WireType::EndGroup => {
          return Err(Error::UnexpectedEndGroup {
            field_number: number,
          });
        },
        _ => self.skip_field(number, wire_type)?,
      }
    }
    log::trace!("skipped group for field {field_number}");
    Ok(())
  }
}
