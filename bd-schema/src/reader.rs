// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::error::{Error, Result};
use crate::field_kind::FieldKind;
use bd_byte_string::ByteString;

/// A message that can absorb fields from a [`Reader`]. Readers use this to recurse into
/// embedded messages without knowing their type.
pub trait MessageMerge {
  fn merge_fields(&mut self, reader: &mut dyn Reader) -> Result<()>;
}

fn unsupported<T>(kind: FieldKind) -> Result<T> {
  Err(Error::UnsupportedKind(kind))
}

/// The source side of the schema dispatcher.
///
/// [`Reader::field_number`] previews the number of the next field without consuming it and keeps
/// returning the same number until a `read_*` method or [`Reader::skip_field`] consumes the field.
/// `None` means there are no more fields in the current message.
///
/// The list readers append to `values`: a single element for an unpacked occurrence, or every
/// element of a packed block. Either encoding may appear for the same field, any number of times.
#[allow(unused_variables)]
pub trait Reader {
  fn field_number(&mut self) -> Result<Option<u32>>;

  /// Discards the current field. Returns whether more data remains.
  fn skip_field(&mut self) -> Result<bool>;

  fn read_double(&mut self) -> Result<f64> {
    unsupported(FieldKind::DOUBLE)
  }

  fn read_float(&mut self) -> Result<f32> {
    unsupported(FieldKind::FLOAT)
  }

  fn read_int32(&mut self) -> Result<i32> {
    unsupported(FieldKind::INT32)
  }

  fn read_int64(&mut self) -> Result<i64> {
    unsupported(FieldKind::INT64)
  }

  fn read_uint32(&mut self) -> Result<u32> {
    unsupported(FieldKind::UINT32)
  }

  fn read_uint64(&mut self) -> Result<u64> {
    unsupported(FieldKind::UINT64)
  }

  fn read_sint32(&mut self) -> Result<i32> {
    unsupported(FieldKind::SINT32)
  }

  fn read_sint64(&mut self) -> Result<i64> {
    unsupported(FieldKind::SINT64)
  }

  fn read_fixed32(&mut self) -> Result<u32> {
    unsupported(FieldKind::FIXED32)
  }

  fn read_fixed64(&mut self) -> Result<u64> {
    unsupported(FieldKind::FIXED64)
  }

  fn read_sfixed32(&mut self) -> Result<i32> {
    unsupported(FieldKind::SFIXED32)
  }

  fn read_sfixed64(&mut self) -> Result<i64> {
    unsupported(FieldKind::SFIXED64)
  }

  fn read_bool(&mut self) -> Result<bool> {
    unsupported(FieldKind::BOOL)
  }

  fn read_enum(&mut self) -> Result<i32> {
    unsupported(FieldKind::ENUM)
  }

  fn read_string(&mut self) -> Result<String> {
    unsupported(FieldKind::STRING)
  }

  fn read_bytes(&mut self) -> Result<ByteString> {
    unsupported(FieldKind::BYTES)
  }

  /// Merges an embedded message into `message`.
  fn read_message(&mut self, message: &mut dyn MessageMerge) -> Result<()> {
    unsupported(FieldKind::MESSAGE)
  }

  fn read_double_list(&mut self, values: &mut Vec<f64>) -> Result<()> {
    unsupported(FieldKind::DOUBLE_LIST)
  }

  fn read_float_list(&mut self, values: &mut Vec<f32>) -> Result<()> {
    unsupported(FieldKind::FLOAT_LIST)
  }

  fn read_int32_list(&mut self, values: &mut Vec<i32>) -> Result<()> {
    unsupported(FieldKind::INT32_LIST)
  }

  fn read_int64_list(&mut self, values: &mut Vec<i64>) -> Result<()> {
    unsupported(FieldKind::INT64_LIST)
  }

  fn read_uint32_list(&mut self, values: &mut Vec<u32>) -> Result<()> {
    unsupported(FieldKind::UINT32_LIST)
  }

  fn read_uint64_list(&mut self, values: &mut Vec<u64>) -> Result<()> {
    unsupported(FieldKind::UINT64_LIST)
  }

  fn read_sint32_list(&mut self, values: &mut Vec<i32>) -> Result<()> {
    unsupported(FieldKind::SINT32_LIST)
  }

  fn read_sint64_list(&mut self, values: &mut Vec<i64>) -> Result<()> {
    unsupported(FieldKind::SINT64_LIST)
  }

  fn read_fixed32_list(&mut self, values: &mut Vec<u32>) -> Result<()> {
    unsupported(FieldKind::FIXED32_LIST)
  }

  fn read_fixed64_list(&mut self, values: &mut Vec<u64>) -> Result<()> {
    unsupported(FieldKind::FIXED64_LIST)
  }

  fn read_sfixed32_list(&mut self, values: &mut Vec<i32>) -> Result<()> {
    unsupported(FieldKind::SFIXED32_LIST)
  }

  fn read_sfixed64_list(&mut self, values: &mut Vec<i64>) -> Result<()> {
    unsupported(FieldKind::SFIXED64_LIST)
  }

  fn read_bool_list(&mut self, values: &mut Vec<bool>) -> Result<()> {
    unsupported(FieldKind::BOOL_LIST)
  }

  fn read_enum_list(&mut self, values: &mut Vec<i32>) -> Result<()> {
    unsupported(FieldKind::ENUM_LIST)
  }

  fn read_string_list(&mut self, values: &mut Vec<String>) -> Result<()> {
    unsupported(FieldKind::STRING_LIST)
  }

  fn read_bytes_list(&mut self, values: &mut Vec<ByteString>) -> Result<()> {
    unsupported(FieldKind::BYTES_LIST)
  }
}
