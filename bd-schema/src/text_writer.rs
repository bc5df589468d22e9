// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./text_writer_test.rs"]
mod tests;

use crate::error::Result;
use crate::writer::{MessageWrite, Writer};
use bd_byte_string::ByteString;
use std::fmt::{Display, Write as _};

const INDENT: usize = 2;

/// Renders fields as indented `number: value` lines for debugging. Strings and bytes are quoted
/// and escaped, embedded messages are rendered in braces and repeated fields produce one line per
/// element.
///
/// ```text
/// 1: 300
/// 2: "hello"
/// 3 {
///   1: true
/// }
/// ```
#[derive(Debug, Default)]
pub struct TextWriter {
  out: String,
  depth: usize,
}

macro_rules! text_scalars {
  ($($method:ident, $list_method:ident, $value:ty;)*) => {
    $(
      fn $method(&mut self, field_number: u32, value: $value) -> Result<()> {
        self.line(field_number, value)
      }

      fn $list_method(&mut self, field_number: u32, values: &[$value], _packed: bool) -> Result<()> {
        for value in values {
          self.line(field_number, value)?;
        }
        Ok(())
      }
    )*
  };
}

impl TextWriter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.out
  }

  #[must_use]
  pub fn finish(self) -> String {
    self.out
  }

  fn line(&mut self, field_number: u32, value: impl Display) -> Result<()> {
    writeln!(
      self.out,
      "{:indent$}{field_number}: {value}",
      "",
      indent = self.depth * INDENT
    )?;
    Ok(())
  }

  fn quoted_bytes(&mut self, field_number: u32, value: &[u8]) -> Result<()> {
    self.line(field_number, format_args!("\"{}\"", value.escape_ascii()))
  }

  fn quoted_string(&mut self, field_number: u32, value: &str) -> Result<()> {
    self.line(field_number, format_args!("\"{}\"", value.escape_default()))
  }
}

impl Writer for TextWriter {
  text_scalars! {
    write_double, write_double_list, f64;
    write_float, write_float_list, f32;
    write_int32, write_int32_list, i32;
    write_int64, write_int64_list, i64;
    write_uint32, write_uint32_list, u32;
    write_uint64, write_uint64_list, u64;
    write_sint32, write_sint32_list, i32;
    write_sint64, write_sint64_list, i64;
    write_fixed32, write_fixed32_list, u32;
    write_fixed64, write_fixed64_list, u64;
    write_sfixed32, write_sfixed32_list, i32;
    write_sfixed64, write_sfixed64_list, i64;
    write_bool, write_bool_list, bool;
    write_enum, write_enum_list, i32;
  }

  fn write_string(&mut self, field_number: u32, value: &str) -> Result<()> {
    self.quoted_string(field_number, value)
  }

  fn write_bytes(&mut self, field_number: u32, value: &ByteString) -> Result<()> {
    self.quoted_bytes(field_number, value.as_slice())
  }

  fn write_message(&mut self, field_number: u32, message: &dyn MessageWrite) -> Result<()> {
    let indent = self.depth * INDENT;
    writeln!(self.out, "{:indent$}{field_number} {{", "")?;
    self.depth += 1;
    let result = message.write_fields(self);
    self.depth -= 1;
    result?;
    writeln!(self.out, "{:indent$}}}", "")?;
    Ok(())
  }

  fn write_string_list(&mut self, field_number: u32, values: &[String]) -> Result<()> {
    for value in values {
      self.quoted_string(field_number, value)?;
    }
    Ok(())
  }

  fn write_bytes_list(&mut self, field_number: u32, values: &[ByteString]) -> Result<()> {
    for value in values {
      self.quoted_bytes(field_number, value.as_slice())?;
    }
    Ok(())
  }
}
