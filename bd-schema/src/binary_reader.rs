// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./binary_reader_test.rs"]
mod tests;

use crate::config::{CodecConfig, Utf8Policy};
use crate::error::{Error, Result};
use crate::reader::{MessageMerge, Reader};
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
  WireFormat,
};
use bd_wire::{CodedInput, WireType};

/// Reads the protobuf binary encoding from a byte slice.
///
/// The tag of the next field is decoded by [`Reader::field_number`] and held until a read or a
/// skip consumes the field.
#[derive(Debug)]
pub struct BinaryReader<'a> {
  input: CodedInput<'a>,
  current: Option<(u32, WireType)>,
  depth: u32,
  recursion_limit: u32,
  utf8_policy: Utf8Policy,
}

macro_rules! read_scalars {
  ($($method:ident, $list_method:ident, $format:ty, $value:ty;)*) => {
    $(
      fn $method(&mut self) -> Result<$value> {
        self.read_scalar::<$format>()
      }

      fn $list_method(&mut self, values: &mut Vec<$value>) -> Result<()> {
        self.read_list::<$format>(values)
      }
    )*
  };
}

impl<'a> BinaryReader<'a> {
  #[must_use]
  pub fn new(bytes: &'a [u8]) -> Self {
    Self::with_config(bytes, &CodecConfig::default())
  }

  #[must_use]
  pub fn with_config(bytes: &'a [u8], config: &CodecConfig) -> Self {
    Self {
      input: CodedInput::new(bytes),
      current: None,
      depth: 0,
      recursion_limit: config.recursion_limit,
      utf8_policy: config.utf8_policy,
    }
  }

  #[must_use]
  pub const fn position(&self) -> usize {
    self.input.position()
  }

  // Consumes the pending tag, decoding one if `field_number` has not been called.
  fn take_tag(&mut self) -> Result<(u32, WireType)> {
    if let Some(tag) = self.current.take() {
      return Ok(tag);
    }
    self.input.read_tag()?.ok_or(Error::Wire(bd_wire::Error::Truncated {
      needed: 1,
      remaining: 0,
    }))
  }

  fn expect_wire_type(&mut self, expected: WireType) -> Result<u32> {
    let (field_number, actual) = self.take_tag()?;
    if actual != expected {
      return Err(Error::WireTypeMismatch {
        field_number,
        expected,
        actual,
      });
    }
    Ok(field_number)
  }

  fn read_scalar<F: WireFormat>(&mut self) -> Result<F::Value> {
    self.expect_wire_type(F::WIRE_TYPE)?;
    Ok(self.input.read::<F>()?)
  }

  // An occurrence of a repeated scalar field is either one element with the element's wire type
  // or a packed block.
  fn read_list<F: WireFormat>(&mut self, values: &mut Vec<F::Value>) -> Result<()> {
    let (field_number, actual) = self.take_tag()?;
    if actual == F::WIRE_TYPE {
      values.push(self.input.read::<F>()?);
    } else if actual == WireType::LengthDelimited {
      self.input.read_packed_into::<F>(values)?;
    } else {
      return Err(Error::WireTypeMismatch {
        field_number,
        expected: F::WIRE_TYPE,
        actual,
      });
    }
    Ok(())
  }

  fn read_length_delimited(&mut self) -> Result<(u32, &'a [u8])> {
    let field_number = self.expect_wire_type(WireType::LengthDelimited)?;
    Ok((field_number, self.input.read_length_delimited()?))
  }

  fn decode_string(&self, field_number: u32, bytes: &[u8]) -> Result<String> {
    match self.utf8_policy {
      Utf8Policy::Strict => std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| Error::InvalidUtf8 { field_number }),
      Utf8Policy::Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
  }
}

impl Reader for BinaryReader<'_> {
  fn field_number(&mut self) -> Result<Option<u32>> {
    if self.current.is_none() {
      self.current = self.input.read_tag()?;
    }
    Ok(self.current.map(|(field_number, _)| field_number))
  }

  fn skip_field(&mut self) -> Result<bool> {
    if self.field_number()?.is_none() {
      return Ok(false);
    }
    let (field_number, wire_type) = self.take_tag()?;
    self.input.skip_field(field_number, wire_type)?;
    Ok(!self.input.is_at_end())
  }

  read_scalars! {
    read_double, read_double_list, Double, f64;
    read_float, read_float_list, Float, f32;
    read_int32, read_int32_list, Int32, i32;
    read_int64, read_int64_list, Int64, i64;
    read_uint32, read_uint32_list, Uint32, u32;
    read_uint64, read_uint64_list, Uint64, u64;
    read_sint32, read_sint32_list, Sint32, i32;
    read_sint64, read_sint64_list, Sint64, i64;
    read_fixed32, read_fixed32_list, Fixed32, u32;
    read_fixed64, read_fixed64_list, Fixed64, u64;
    read_sfixed32, read_sfixed32_list, Sfixed32, i32;
    read_sfixed64, read_sfixed64_list, Sfixed64, i64;
    read_bool, read_bool_list, Bool, bool;
    read_enum, read_enum_list, Enum, i32;
  }

  fn read_string(&mut self) -> Result<String> {
    let (field_number, bytes) = self.read_length_delimited()?;
    self.decode_string(field_number, bytes)
  }

  fn read_bytes(&mut self) -> Result<ByteString> {
    let (_, bytes) = self.read_length_delimited()?;
    Ok(ByteString::copy_from(bytes))
  }

  fn read_message(&mut self, message: &mut dyn MessageMerge) -> Result<()> {
    self.expect_wire_type(WireType::LengthDelimited)?;
    if self.depth >= self.recursion_limit {
      return Err(Error::RecursionLimitExceeded {
        limit: self.recursion_limit,
      });
    }

    let len = self.input.read_length()?;
    let old_limit = self.input.push_limit(len)?;
    self.depth += 1;
    let result = message.merge_fields(self);
    self.depth -= 1;
    result?;

    // Whatever the merge left unread still belongs to the embedded message.
    self.current = None;
    self.input.read_raw_bytes(self.input.remaining())?;
    self.input.pop_limit(old_limit);
    Ok(())
  }

  fn read_string_list(&mut self, values: &mut Vec<String>) -> Result<()> {
    values.push(self.read_string()?);
    Ok(())
  }

  fn read_bytes_list(&mut self, values: &mut Vec<ByteString>) -> Result<()> {
    values.push(self.read_bytes()?);
    Ok(())
  }
}
