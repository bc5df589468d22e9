// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./binary_writer_test.rs"]
mod tests;

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::size_writer::SizeWriter;
use crate::writer::{MessageWrite, Writer};
use bd_byte_string::ByteString;
use bd_wire::CodedOutput;
use bd_wire::format::{
  Bool,
  Double,
  Enum,
  Fixed32,
  Fixed64,
  Float,
  Int32,
  Int64,
  Sfixed32,
  Sfixed64,
  Sint32,
  Sint64,
  Uint32,
  Uint64,
};
use bytes::Bytes;

/// Writes the protobuf binary encoding into a growable buffer.
///
/// Embedded messages are length prefixed, so each one is measured with a [`SizeWriter`] before
/// it is written.
#[derive(Debug)]
pub struct BinaryWriter {
  output: CodedOutput,
  depth: u32,
  recursion_limit: u32,
}

impl Default for BinaryWriter {
  fn default() -> Self {
    Self::new()
  }
}

macro_rules! write_scalars {
  ($($method:ident, $list_method:ident, $format:ty, $value:ty;)*) => {
    $(
      fn $method(&mut self, field_number: u32, value: $value) -> Result<()> {
        self.output.write::<$format>(field_number, value);
        Ok(())
      }

      fn $list_method(&mut self, field_number: u32, values: &[$value], packed: bool) -> Result<()> {
        if packed {
          self.output.write_packed::<$format>(field_number, values);
        } else {
          self.output.write_unpacked::<$format>(field_number, values);
        }
        Ok(())
      }
    )*
  };
}

impl BinaryWriter {
  #[must_use]
  pub fn new() -> Self {
    Self::with_capacity(&CodecConfig::default(), 0)
  }

  #[must_use]
  pub fn with_capacity(config: &CodecConfig, capacity: usize) -> Self {
    Self {
      output: CodedOutput::with_capacity(capacity),
      depth: 0,
      recursion_limit: config.recursion_limit,
    }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.output.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.output.is_empty()
  }

  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    self.output.as_slice()
  }

  #[must_use]
  pub fn finish(self) -> Bytes {
    self.output.finish()
  }
}

impl Writer for BinaryWriter {
  write_scalars! {
    write_double, write_double_list, Double, f64;
    write_float, write_float_list, Float, f32;
    write_int32, write_int32_list, Int32, i32;
    write_int64, write_int64_list, Int64, i64;
    write_uint32, write_uint32_list, Uint32, u32;
    write_uint64, write_uint64_list, Uint64, u64;
    write_sint32, write_sint32_list, Sint32, i32;
    write_sint64, write_sint64_list, Sint64, i64;
    write_fixed32, write_fixed32_list, Fixed32, u32;
    write_fixed64, write_fixed64_list, Fixed64, u64;
    write_sfixed32, write_sfixed32_list, Sfixed32, i32;
    write_sfixed64, write_sfixed64_list, Sfixed64, i64;
    write_bool, write_bool_list, Bool, bool;
    write_enum, write_enum_list, Enum, i32;
  }

  fn write_string(&mut self, field_number: u32, value: &str) -> Result<()> {
    self.output.write_string(field_number, value);
    Ok(())
  }

  fn write_bytes(&mut self, field_number: u32, value: &ByteString) -> Result<()> {
    self.output.write_bytes(field_number, value.as_slice());
    Ok(())
  }

  fn write_message(&mut self, field_number: u32, message: &dyn MessageWrite) -> Result<()> {
    if self.depth >= self.recursion_limit {
      return Err(Error::RecursionLimitExceeded {
        limit: self.recursion_limit,
      });
    }

    let mut size = SizeWriter::new();
    message.write_fields(&mut size)?;
    self
      .output
      .write_length_delimited_header(field_number, size.len());

    self.depth += 1;
    let result = message.write_fields(self);
    self.depth -= 1;
    result
  }

  fn write_string_list(&mut self, field_number: u32, values: &[String]) -> Result<()> {
    for value in values {
      self.output.write_string(field_number, value);
    }
    Ok(())
  }

  fn write_bytes_list(&mut self, field_number: u32, values: &[ByteString]) -> Result<()> {
    for value in values {
      self.output.write_bytes(field_number, value.as_slice());
    }
    Ok(())
  }
}
