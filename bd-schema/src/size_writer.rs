// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::error::Result;
use crate::writer::{MessageWrite, Writer};
use bd_byte_string::ByteString;
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
use bd_wire::size::{bytes_size, field_size, packed_field_size};

/// A [`Writer`] that only counts the bytes the binary encoding would take.
#[derive(Debug, Default)]
pub struct SizeWriter {
  len: usize,
}

macro_rules! size_scalars {
  ($($method:ident, $list_method:ident, $format:ty, $value:ty;)*) => {
    $(
      fn $method(&mut self, field_number: u32, value: $value) -> Result<()> {
        self.len += field_size::<$format>(field_number, &value);
        Ok(())
      }

      fn $list_method(&mut self, field_number: u32, values: &[$value], packed: bool) -> Result<()> {
        self.len += if packed {
          packed_field_size::<$format>(field_number, values)
        } else {
          values
            .iter()
            .map(|value| field_size::<$format>(field_number, value))
            .sum::<usize>()
        };
        Ok(())
      }
    )*
  };
}

impl SizeWriter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }
}

impl Writer for SizeWriter {
  size_scalars! {
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
    self.len += bytes_size(field_number, value.len());
    Ok(())
  }

  fn write_bytes(&mut self, field_number: u32, value: &ByteString) -> Result<()> {
    self.len += bytes_size(field_number, value.size());
    Ok(())
  }

  fn write_message(&mut self, field_number: u32, message: &dyn MessageWrite) -> Result<()> {
    let mut nested = Self::new();
    message.write_fields(&mut nested)?;
    self.len += bytes_size(field_number, nested.len);
    Ok(())
  }

  fn write_string_list(&mut self, field_number: u32, values: &[String]) -> Result<()> {
    self.len += values
      .iter()
      .map(|value| bytes_size(field_number, value.len()))
      .sum::<usize>();
    Ok(())
  }

  fn write_bytes_list(&mut self, field_number: u32, values: &[ByteString]) -> Result<()> {
    self.len += values
      .iter()
      .map(|value| bytes_size(field_number, value.size()))
      .sum::<usize>();
    Ok(())
  }
}
