// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::cli::{Command, DumpCommand, Options};
use clap::Parser;
use std::io::Read;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};
use wire_cli::dump::{DumpOptions, dump};
use wire_cli::inspect::{decode_varint, encode_varint, format_hex, parse_hex, tag};

mod cli;

fn main() -> anyhow::Result<()> {
  // initialize console logging
  init_tracing();
  let args = Options::parse();

  match args.command {
    Command::Dump(cmd) => {
      let bytes = read_input(&cmd)?;
      log::debug!("dumping {} bytes", bytes.len());
      let options = DumpOptions {
        nested: !cmd.flat,
        max_depth: cmd.max_depth,
      };
      print!("{}", dump(&bytes, &options)?);
    },
    Command::Varint(cmd) => {
      println!("{}", format_hex(&encode_varint(cmd.value, cmd.zigzag)?));
    },
    Command::DecodeVarint(cmd) => {
      println!("{}", decode_varint(&parse_hex(&cmd.hex)?)?);
    },
    Command::Tag(cmd) => {
      let (value, bytes) = tag(cmd.field_number, cmd.wire_type.into())?;
      println!("{value} ({})", format_hex(&bytes));
    },
  }

  Ok(())
}

fn read_input(cmd: &DumpCommand) -> anyhow::Result<Vec<u8>> {
  if let Some(hex) = &cmd.input.hex {
    return parse_hex(hex);
  }

  match cmd.input.path.as_deref() {
    Some(path) if path.as_os_str() != "-" => Ok(std::fs::read(path)?),
    _ => {
      let mut bytes = Vec::new();
      std::io::stdin().read_to_end(&mut bytes)?;
      Ok(bytes)
    },
  }
}

fn init_tracing() {
  let stderr = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_ansi(true)
    .with_line_number(true)
    .compact();

  let filter = EnvFilter::new(std::env::var("RUST_LOG").as_deref().unwrap_or("info"));

  Registry::default().with(filter).with(stderr).init();
}
