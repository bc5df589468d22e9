// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Schema driven message serialization.
//!
//! A [`Schema`] describes how the fields of a Rust message type map to protobuf field numbers
//! and kinds. It walks a message's fields in ascending field number order and hands non-default
//! values to a [`Writer`], and merges fields coming from a [`Reader`] back into a message. The
//! binary protobuf encoding is one [`Writer`]/[`Reader`] pair; [`SizeWriter`] and [`TextWriter`]
//! are others.
//!
//! ```ignore
//! let schema = Schema::<Point>::builder()
//!   .field(1, FieldKind::SINT32, Accessor::i32(|p| p.x, |p, v| p.x = v))
//!   .field(2, FieldKind::SINT32, Accessor::i32(|p| p.y, |p, v| p.y = v))
//!   .build()?;
//! let bytes = schema.encode(&point)?;
//! let decoded = schema.decode(&bytes)?;
//! ```

#![deny(
  clippy::expect_used,
  clippy::panic,
  clippy::todo,
  clippy::unimplemented,
  clippy::unreachable,
  clippy::unwrap_used
)]

pub mod accessor;
pub mod binary_reader;
pub mod binary_writer;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod field_kind;
pub mod reader;
pub mod registry;
pub mod schema;
pub mod size_writer;
pub mod text_writer;
pub mod writer;


#[cfg(test)]
#[ctor::ctor]
fn test_global_init() {
  bd_test_helpers::test_global_init();
}

pub use crate::accessor::{Accessor, MessageField};
pub use crate::binary_reader::BinaryReader;
pub use crate::binary_writer::BinaryWriter;
pub use crate::config::{CodecConfig, Utf8Policy};
pub use crate::descriptor::{FieldDescriptor, MessageDescriptor};
pub use crate::error::{Error, Result, SchemaError};
pub use crate::field_kind::{Collection, FieldKind, ScalarType, ValueKind};
pub use crate::reader::{MessageMerge, Reader};
pub use crate::registry::SchemaRegistry;
pub use crate::schema::{Bound, BoundMut, Schema, SchemaBuilder};
pub use crate::size_writer::SizeWriter;
pub use crate::text_writer::TextWriter;
pub use crate::writer::{MessageWrite, Writer};
pub use bd_byte_string::ByteString;
