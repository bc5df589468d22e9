// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const DEFAULT_TEST_FILTER_RULES: &str = "debug";

// Installs the test logger. Safe to call from every test module's ctor: only the first call has
// any effect.
pub fn test_global_init() {
  static INIT: Once = Once::new();

  INIT.call_once(|| {
    let stderr = tracing_subscriber::fmt::layer()
      .with_test_writer()
      .with_ansi(std::env::var("BD_LOG_ANSI").is_ok())
      .with_line_number(true)
      .compact();

    let filter = EnvFilter::new(
      std::env::var("RUST_LOG")
        .as_deref()
        .unwrap_or(DEFAULT_TEST_FILTER_RULES),
    );

    // Another harness may have installed a global subscriber already; keep theirs.
    if Registry::default()
      .with(filter)
      .with(stderr)
      .try_init()
      .is_err()
    {
      log::debug!("global subscriber already installed");
    }
  });
}

/// Decodes a hex string such as `"08 ac 02"` or `"08ac02"` into bytes. Whitespace is ignored.
/// Panics on malformed input: this is for test fixtures only.
#[must_use]
pub fn bytes_from_hex(hex_str: &str) -> Vec<u8> {
  let compact: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();
  hex::decode(&compact).unwrap()
}

/// Formats bytes as space separated lowercase hex, e.g. `08 ac 02`.
#[must_use]
pub fn hex_string(bytes: &[u8]) -> String {
  bytes
    .chunks(1)
    .map(hex::encode)
    .collect::<Vec<_>>()
    .join(" ")
}
