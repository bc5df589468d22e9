// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Primitive protobuf wire codec.
//!
//! This crate converts between in-memory scalar values and their protobuf wire encodings. It has
//! no knowledge of messages: framing a message out of fields is the job of `bd-schema`.
//!
//! # Module organization
//!
//! - [`varint`] - base-128 varints and `ZigZag`
//! - [`tag`] - wire types and field tags
//! - [`format`] - one unit struct per protobuf scalar type implementing [`format::WireFormat`]
//! - [`output`] - [`CodedOutput`], a growable encoder
//! - [`input`] - [`CodedInput`], a bounded decoder with a limit stack
//! - [`size`] - encoded length computation

#![deny(
  clippy::expect_used,
  clippy::panic,
  clippy::todo,
  clippy::unimplemented,
  clippy::unreachable,
  clippy::unwrap_used
)]

pub mod error;
pub mod format;
pub mod input;
pub mod output;
pub mod size;
pub mod tag;
pub mod varint;

#[cfg(test)]
#[ctor::ctor]
fn test_global_init() {
  bd_test_helpers::test_global_init();
}

pub use crate::error::{Error, Result};
pub use crate::input::CodedInput;
pub use crate::output::CodedOutput;
pub use crate::tag::{MAX_FIELD_NUMBER, WireType, make_tag, split_tag};
pub use crate::varint::{
  MAX_VARINT_LEN,
  decode_varint32,
  decode_varint64,
  encode_int32,
  encode_varint32,
  encode_varint64,
  zigzag_decode32,
  zigzag_decode64,
  zigzag_encode32,
  zigzag_encode64,
};
