// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Plain Rust mirrors of a few `google.protobuf` well-known types, plus a message exercising every
//! scalar type, with their schemas.

use bd_byte_string::ByteString;
use bd_schema::{Accessor, FieldKind, Schema, SchemaError, SchemaRegistry};

//
// Timestamp
//

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Timestamp {
  pub seconds: i64,
  pub nanos: i32,
}

pub fn timestamp_schema(_: &SchemaRegistry) -> Result<Schema<Timestamp>, SchemaError> {
  Schema::builder()
    .named_field(
      "seconds",
      1,
      FieldKind::INT64,
      Accessor::i64(|m: &Timestamp| m.seconds, |m, v| m.seconds = v),
    )
    .named_field(
      "nanos",
      2,
      FieldKind::INT32,
      Accessor::i32(|m: &Timestamp| m.nanos, |m, v| m.nanos = v),
    )
    .build()
}

//
// FieldMask
//

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldMask {
  pub paths: Vec<String>,
}

pub fn field_mask_schema(_: &SchemaRegistry) -> Result<Schema<FieldMask>, SchemaError> {
  Schema::builder()
    .named_field(
      "paths",
      1,
      FieldKind::STRING_LIST,
      Accessor::string_list(|m: &FieldMask| m.paths.as_slice(), |m| &mut m.paths),
    )
    .build()
}

//
// Api
//

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceContext {
  pub file_name: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Method {
  pub name: String,
  pub request_type_url: String,
  pub request_streaming: bool,
  pub response_type_url: String,
  pub response_streaming: bool,
  pub syntax: i32,
}

/// `google.protobuf.Api` without its options and mixins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Api {
  pub name: String,
  pub methods: Vec<Method>,
  pub version: String,
  pub source_context: Option<SourceContext>,
  pub syntax: i32,
}

pub fn source_context_schema(_: &SchemaRegistry) -> Result<Schema<SourceContext>, SchemaError> {
  Schema::builder()
    .named_field(
      "file_name",
      1,
      FieldKind::STRING,
      Accessor::string(|m: &SourceContext| m.file_name.as_str(), |m, v| m.file_name = v),
    )
    .build()
}

pub fn method_schema(_: &SchemaRegistry) -> Result<Schema<Method>, SchemaError> {
  Schema::builder()
    .named_field(
      "name",
      1,
      FieldKind::STRING,
      Accessor::string(|m: &Method| m.name.as_str(), |m, v| m.name = v),
    )
    .named_field(
      "request_type_url",
      2,
      FieldKind::STRING,
      Accessor::string(
        |m: &Method| m.request_type_url.as_str(),
        |m, v| m.request_type_url = v,
      ),
    )
    .named_field(
      "request_streaming",
      3,
      FieldKind::BOOL,
      Accessor::bool(|m: &Method| m.request_streaming, |m, v| m.request_streaming = v),
    )
    .named_field(
      "response_type_url",
      4,
      FieldKind::STRING,
      Accessor::string(
        |m: &Method| m.response_type_url.as_str(),
        |m, v| m.response_type_url = v,
      ),
    )
    .named_field(
      "response_streaming",
      5,
      FieldKind::BOOL,
      Accessor::bool(|m: &Method| m.response_streaming, |m, v| m.response_streaming = v),
    )
    .named_field(
      "syntax",
      7,
      FieldKind::ENUM,
      Accessor::enumeration(|m: &Method| m.syntax, |m, v| m.syntax = v),
    )
    .build()
}

pub fn api_schema(registry: &SchemaRegistry) -> Result<Schema<Api>, SchemaError> {
  let method = registry.get_or_try_insert_with(method_schema)?;
  let source_context = registry.get_or_try_insert_with(source_context_schema)?;

  Schema::builder()
    .named_field(
      "name",
      1,
      FieldKind::STRING,
      Accessor::string(|m: &Api| m.name.as_str(), |m, v| m.name = v),
    )
    .named_field(
      "methods",
      2,
      FieldKind::MESSAGE_LIST,
      Accessor::message_list(method, |m: &Api| m.methods.as_slice(), |m| &mut m.methods),
    )
    .named_field(
      "version",
      4,
      FieldKind::STRING,
      Accessor::string(|m: &Api| m.version.as_str(), |m, v| m.version = v),
    )
    .named_field(
      "source_context",
      5,
      FieldKind::MESSAGE,
      Accessor::message(
        source_context,
        |m: &Api| m.source_context.as_ref(),
        |m| m.source_context.get_or_insert_with(SourceContext::default),
      ),
    )
    .named_field(
      "syntax",
      7,
      FieldKind::ENUM,
      Accessor::enumeration(|m: &Api| m.syntax, |m, v| m.syntax = v),
    )
    .build()
}

//
// Sample
//

/// One field of every scalar type, followed by a few repeated fields.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sample {
  pub double: f64,
  pub float: f32,
  pub int32: i32,
  pub int64: i64,
  pub uint32: u32,
  pub uint64: u64,
  pub sint32: i32,
  pub sint64: i64,
  pub fixed32: u32,
  pub fixed64: u64,
  pub sfixed32: i32,
  pub sfixed64: i64,
  pub boolean: bool,
  pub string: String,
  pub bytes: ByteString,
  pub packed_sint32: Vec<i32>,
  pub fixed64_list: Vec<u64>,
  pub packed_double: Vec<f64>,
}

pub fn sample_schema(_: &SchemaRegistry) -> Result<Schema<Sample>, SchemaError> {
  Schema::builder()
    .field(
      1,
      FieldKind::DOUBLE,
      Accessor::f64(|m: &Sample| m.double, |m, v| m.double = v),
    )
    .field(
      2,
      FieldKind::FLOAT,
      Accessor::f32(|m: &Sample| m.float, |m, v| m.float = v),
    )
    .field(
      3,
      FieldKind::INT32,
      Accessor::i32(|m: &Sample| m.int32, |m, v| m.int32 = v),
    )
    .field(
      4,
      FieldKind::INT64,
      Accessor::i64(|m: &Sample| m.int64, |m, v| m.int64 = v),
    )
    .field(
      5,
      FieldKind::UINT32,
      Accessor::u32(|m: &Sample| m.uint32, |m, v| m.uint32 = v),
    )
    .field(
      6,
      FieldKind::UINT64,
      Accessor::u64(|m: &Sample| m.uint64, |m, v| m.uint64 = v),
    )
    .field(
      7,
      FieldKind::SINT32,
      Accessor::i32(|m: &Sample| m.sint32, |m, v| m.sint32 = v),
    )
    .field(
      8,
      FieldKind::SINT64,
      Accessor::i64(|m: &Sample| m.sint64, |m, v| m.sint64 = v),
    )
    .field(
      9,
      FieldKind::FIXED32,
      Accessor::u32(|m: &Sample| m.fixed32, |m, v| m.fixed32 = v),
    )
    .field(
      10,
      FieldKind::FIXED64,
      Accessor::u64(|m: &Sample| m.fixed64, |m, v| m.fixed64 = v),
    )
    .field(
      11,
      FieldKind::SFIXED32,
      Accessor::i32(|m: &Sample| m.sfixed32, |m, v| m.sfixed32 = v),
    )
    .field(
      12,
      FieldKind::SFIXED64,
      Accessor::i64(|m: &Sample| m.sfixed64, |m, v| m.sfixed64 = v),
    )
    .field(
      13,
      FieldKind::BOOL,
      Accessor::bool(|m: &Sample| m.boolean, |m, v| m.boolean = v),
    )
    .field(
      14,
      FieldKind::STRING,
      Accessor::string(|m: &Sample| m.string.as_str(), |m, v| m.string = v),
    )
    .field(
      15,
      FieldKind::BYTES,
      Accessor::bytes(|m: &Sample| &m.bytes, |m, v| m.bytes = v),
    )
    .field(
      16,
      FieldKind::SINT32_LIST_PACKED,
      Accessor::i32_list(|m: &Sample| m.packed_sint32.as_slice(), |m| &mut m.packed_sint32),
    )
    .field(
      17,
      FieldKind::FIXED64_LIST,
      Accessor::u64_list(|m: &Sample| m.fixed64_list.as_slice(), |m| &mut m.fixed64_list),
    )
    .field(
      18,
      FieldKind::DOUBLE_LIST_PACKED,
      Accessor::f64_list(|m: &Sample| m.packed_double.as_slice(), |m| &mut m.packed_double),
    )
    .build()
}
