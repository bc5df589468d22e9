// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./config_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RECURSION_LIMIT: u32 = 100;
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// How `string` fields holding invalid UTF-8 are decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utf8Policy {
  /// Fail the decode with `Error::InvalidUtf8`.
  #[default]
  Strict,
  /// Replace invalid sequences with U+FFFD.
  Lossy,
}

/// Limits and policies applied by the binary reader and writer. Missing keys take their default
/// when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
  /// Maximum depth of nested messages.
  pub recursion_limit: u32,
  pub utf8_policy: Utf8Policy,
  /// Maximum size of a top-level encoded message accepted for decoding.
  pub max_message_size: usize,
}

impl Default for CodecConfig {
  fn default() -> Self {
    Self {
      recursion_limit: DEFAULT_RECURSION_LIMIT,
      utf8_policy: Utf8Policy::default(),
      max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
    }
  }
}
