// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./dump_test.rs"]
mod tests;

use anyhow::{Result, bail};
use bd_wire::{CodedInput, WireType};
use std::fmt::Write as _;

const INDENT: usize = 2;

pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct DumpOptions {
  /// Try to decode length-delimited payloads as embedded messages.
  pub nested: bool,
  pub max_depth: usize,
}

impl Default for DumpOptions {
  fn default() -> Self {
    Self {
      nested: true,
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}

/// Renders an encoded message without a schema, one field per line.
///
/// Varints print as unsigned integers and fixed width values as hex. A length-delimited payload
/// prints as a string when it is printable UTF-8, as an embedded message when it parses as one,
/// and as hex bytes otherwise. Groups print like embedded messages.
pub fn dump(bytes: &[u8], options: &DumpOptions) -> Result<String> {
  let mut out = String::new();
  let mut input = CodedInput::new(bytes);
  dump_fields(&mut input, options, 0, None, &mut out)?;
  Ok(out)
}

fn dump_fields(
  input: &mut CodedInput<'_>,
  options: &DumpOptions,
  depth: usize,
  group: Option<u32>,
  out: &mut String,
) -> Result<()> {
  let indent = depth * INDENT;
  while let Some((field_number, wire_type)) = input.read_tag()? {
    match wire_type {
      WireType::Varint => {
        let value = input.read_raw_varint64()?;
        writeln!(out, "{:indent$}{field_number}: {value}", "")?;
      },
      WireType::Fixed64 => {
        let value = input.read_raw_fixed64()?;
        writeln!(out, "{:indent$}{field_number}: 0x{value:016x}", "")?;
      },
      WireType::Fixed32 => {
        let value = input.read_raw_fixed32()?;
        writeln!(out, "{:indent$}{field_number}: 0x{value:08x}", "")?;
      },
      WireType::LengthDelimited => {
        let payload = input.read_length_delimited()?;
        dump_length_delimited(field_number, payload, options, depth, out)?;
      },
      WireType::StartGroup => {
        if depth >= options.max_depth {
          bail!("groups nested deeper than {}", options.max_depth);
        }
        writeln!(out, "{:indent$}{field_number} {{", "")?;
        dump_fields(input, options, depth + 1, Some(field_number), out)?;
        writeln!(out, "{:indent$}}}", "")?;
      },
      WireType::EndGroup if group == Some(field_number) => return Ok(()),
      WireType::EndGroup => {
        return Err(bd_wire::Error::UnexpectedEndGroup { field_number }.into());
      },
    }
  }

  if let Some(field_number) = group {
    return Err(bd_wire::Error::UnmatchedGroup { field_number }.into());
  }
  Ok(())
}

fn dump_length_delimited(
  field_number: u32,
  payload: &[u8],
  options: &DumpOptions,
  depth: usize,
  out: &mut String,
) -> Result<()> {
  let indent = depth * INDENT;

  if let Some(text) = printable(payload) {
    writeln!(out, "{:indent$}{field_number}: \"{}\"", "", text.escape_default())?;
    return Ok(());
  }

  if options.nested && depth < options.max_depth {
    let mut nested = String::new();
    match dump_fields(
      &mut CodedInput::new(payload),
      options,
      depth + 1,
      None,
      &mut nested,
    ) {
      Ok(()) => {
        writeln!(out, "{:indent$}{field_number} {{", "")?;
        out.push_str(&nested);
        writeln!(out, "{:indent$}}}", "")?;
        return Ok(());
      },
      Err(e) => log::trace!("field {field_number} is not a message: {e}"),
    }
  }

  writeln!(out, "{:indent$}{field_number}: <{}>", "", hex::encode(payload))?;
  Ok(())
}

// Field tags and lengths are mostly control characters, so a payload without any is far more
// likely to be text than an embedded message.
fn printable(payload: &[u8]) -> Option<&str> {
  std::str::from_utf8(payload)
    .ok()
    .filter(|text| !text.chars().any(char::is_control))
}
