// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::error::{Error, Result};
use crate::field_kind::{FieldKind, ScalarType};
use bd_byte_string::ByteString;

/// A message whose fields can be emitted to a [`Writer`]. Writers use this to recurse into
/// embedded messages without knowing their type.
pub trait MessageWrite {
  fn write_fields(&self, writer: &mut dyn Writer) -> Result<()>;
}

fn unsupported<T>(kind: FieldKind) -> Result<T> {
  Err(Error::UnsupportedKind(kind))
}

fn unsupported_list<T>(scalar: ScalarType, packed: bool) -> Result<T> {
  unsupported(FieldKind::repeated(scalar, packed))
}

/// The sink side of the schema dispatcher. There is one method per scalar type and one per
/// repeated scalar type; list methods receive the field's packed flag. Every method defaults to
/// [`Error::UnsupportedKind`] so that writers for restricted outputs implement only what they
/// handle.
///
/// The dispatcher only calls these for values that are not at their default, and never with an
/// empty list.
#[allow(unused_variables)]
pub trait Writer {
  fn write_double(&mut self, field_number: u32, value: f64) -> Result<()> {
    unsupported(FieldKind::DOUBLE)
  }

  fn write_float(&mut self, field_number: u32, value: f32) -> Result<()> {
    unsupported(FieldKind::FLOAT)
  }

  fn write_int32(&mut self, field_number: u32, value: i32) -> Result<()> {
    unsupported(FieldKind::INT32)
  }

  fn write_int64(&mut self, field_number: u32, value: i64) -> Result<()> {
    unsupported(FieldKind::INT64)
  }

  fn write_uint32(&mut self, field_number: u32, value: u32) -> Result<()> {
    unsupported(FieldKind::UINT32)
  }

  fn write_uint64(&mut self, field_number: u32, value: u64) -> Result<()> {
    unsupported(FieldKind::UINT64)
  }

  fn write_sint32(&mut self, field_number: u32, value: i32) -> Result<()> {
    unsupported(FieldKind::SINT32)
  }

  fn write_sint64(&mut self, field_number: u32, value: i64) -> Result<()> {
    unsupported(FieldKind::SINT64)
  }

  fn write_fixed32(&mut self, field_number: u32, value: u32) -> Result<()> {
    unsupported(FieldKind::FIXED32)
  }

  fn write_fixed64(&mut self, field_number: u32, value: u64) -> Result<()> {
    unsupported(FieldKind::FIXED64)
  }

  fn write_sfixed32(&mut self, field_number: u32, value: i32) -> Result<()> {
    unsupported(FieldKind::SFIXED32)
  }

  fn write_sfixed64(&mut self, field_number: u32, value: i64) -> Result<()> {
    unsupported(FieldKind::SFIXED64)
  }

  fn write_bool(&mut self, field_number: u32, value: bool) -> Result<()> {
    unsupported(FieldKind::BOOL)
  }

  fn write_enum(&mut self, field_number: u32, value: i32) -> Result<()> {
    unsupported(FieldKind::ENUM)
  }

  fn write_string(&mut self, field_number: u32, value: &str) -> Result<()> {
    unsupported(FieldKind::STRING)
  }

  fn write_bytes(&mut self, field_number: u32, value: &ByteString) -> Result<()> {
    unsupported(FieldKind::BYTES)
  }

  fn write_message(&mut self, field_number: u32, message: &dyn MessageWrite) -> Result<()> {
    unsupported(FieldKind::MESSAGE)
  }

  fn write_double_list(&mut self, field_number: u32, values: &[f64], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Double, packed)
  }

  fn write_float_list(&mut self, field_number: u32, values: &[f32], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Float, packed)
  }

  fn write_int32_list(&mut self, field_number: u32, values: &[i32], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Int32, packed)
  }

  fn write_int64_list(&mut self, field_number: u32, values: &[i64], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Int64, packed)
  }

  fn write_uint32_list(&mut self, field_number: u32, values: &[u32], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Uint32, packed)
  }

  fn write_uint64_list(&mut self, field_number: u32, values: &[u64], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Uint64, packed)
  }

  fn write_sint32_list(&mut self, field_number: u32, values: &[i32], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Sint32, packed)
  }

  fn write_sint64_list(&mut self, field_number: u32, values: &[i64], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Sint64, packed)
  }

  fn write_fixed32_list(&mut self, field_number: u32, values: &[u32], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Fixed32, packed)
  }

  fn write_fixed64_list(&mut self, field_number: u32, values: &[u64], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Fixed64, packed)
  }

  fn write_sfixed32_list(
    &mut self,
    field_number: u32,
    values: &[i32],
    packed: bool,
  ) -> Result<()> {
    unsupported_list(ScalarType::Sfixed32, packed)
  }

  fn write_sfixed64_list(
    &mut self,
    field_number: u32,
    values: &[i64],
    packed: bool,
  ) -> Result<()> {
    unsupported_list(ScalarType::Sfixed64, packed)
  }

  fn write_bool_list(&mut self, field_number: u32, values: &[bool], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Bool, packed)
  }

  fn write_enum_list(&mut self, field_number: u32, values: &[i32], packed: bool) -> Result<()> {
    unsupported_list(ScalarType::Enum, packed)
  }

  fn write_string_list(&mut self, field_number: u32, values: &[String]) -> Result<()> {
    unsupported(FieldKind::STRING_LIST)
  }

  fn write_bytes_list(&mut self, field_number: u32, values: &[ByteString]) -> Result<()> {
    unsupported(FieldKind::BYTES_LIST)
  }
}
