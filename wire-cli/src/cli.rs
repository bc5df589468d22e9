// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use bd_wire::WireType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum CliWireType {
  Varint,
  Fixed64,
  LengthDelimited,
  StartGroup,
  EndGroup,
  Fixed32,
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Options {
  /// Command to run
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Print the fields of an encoded message without a schema
  Dump(DumpCommand),

  /// Encode an integer as a varint
  Varint(VarintCommand),

  /// Decode a single hex encoded varint
  DecodeVarint(DecodeVarintCommand),

  /// Compute the tag for a field number and wire type
  Tag(TagCommand),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct DumpInput {
  /// File holding the encoded message, or - for stdin
  pub path: Option<PathBuf>,

  /// Hex encoded message, whitespace between bytes is ignored
  #[clap(long)]
  pub hex: Option<String>,
}

#[derive(Args, Debug)]
pub struct DumpCommand {
  #[command(flatten)]
  pub input: DumpInput,

  /// Print length-delimited payloads as bytes instead of trying to parse them as messages
  #[clap(long)]
  pub flat: bool,

  /// Deepest nesting to parse before falling back to bytes
  #[clap(long, default_value_t = wire_cli::dump::DEFAULT_MAX_DEPTH)]
  pub max_depth: usize,
}

#[derive(Args, Debug)]
pub struct VarintCommand {
  #[clap(allow_negative_numbers = true)]
  pub value: i64,

  /// ZigZag encode the value first, as for sint32 and sint64 fields
  #[clap(long)]
  pub zigzag: bool,
}

#[derive(Args, Debug)]
pub struct DecodeVarintCommand {
  pub hex: String,
}

#[derive(Args, Debug)]
pub struct TagCommand {
  pub field_number: u32,

  #[clap(value_enum)]
  pub wire_type: CliWireType,
}

impl From<CliWireType> for WireType {
  fn from(value: CliWireType) -> Self {
    match value {
      CliWireType::Varint => Self::Varint,
      CliWireType::Fixed64 => Self::Fixed64,
      CliWireType::LengthDelimited => Self::LengthDelimited,
      CliWireType::StartGroup => Self::StartGroup,
      CliWireType::EndGroup => Self::EndGroup,
      CliWireType::Fixed32 => Self::Fixed32,
    }
  }
}
