// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

/// Errors produced by the primitive codec. All of them indicate corrupt or untrusted input (or,
/// for `BufferFull`, an undersized fixed output buffer) and are never recovered from internally.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  #[error("malformed varint at offset {offset}: no terminating byte within 10 bytes")]
  MalformedVarint { offset: usize },
  #[error("invalid tag {tag}: field number must be at least 1")]
  InvalidTag { tag: u32 },
  #[error("invalid wire type {value}")]
  InvalidWireType { value: u32 },
  #[error("truncated input: needed {needed} bytes but only {remaining} remain")]
  Truncated { needed: usize, remaining: usize },
  #[error("end-group tag for field {field_number} without a matching start-group")]
  UnexpectedEndGroup { field_number: u32 },
  #[error("start-group for field {field_number} is never closed")]
  UnmatchedGroup { field_number: u32 },
  #[error("output buffer full: needed {needed} bytes but only {remaining} remain")]
  BufferFull { needed: usize, remaining: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
