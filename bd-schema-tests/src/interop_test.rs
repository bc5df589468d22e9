// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

// Test code only.
#![allow(clippy::unwrap_used)]

use crate::messages::{
  Api,
  FieldMask,
  Method,
  Sample,
  SourceContext,
  Timestamp,
  api_schema,
  field_mask_schema,
  sample_schema,
  timestamp_schema,
};
use anyhow::Result;
use bd_byte_string::ByteString;
use bd_schema::SchemaRegistry;
use pretty_assertions::assert_eq;
use protobuf::rt::WireType;
use protobuf::well_known_types::{api, field_mask, source_context, timestamp, type_};
use protobuf::{CodedInputStream, CodedOutputStream, EnumOrUnknown, Message, MessageField};
use rstest::rstest;

fn sample() -> Sample {
  Sample {
    double: -2.5,
    float: 1.25,
    int32: -300,
    int64: i64::MIN,
    uint32: 300,
    uint64: u64::MAX,
    sint32: i32::MIN,
    sint64: -1,
    fixed32: 7,
    fixed64: u64::MAX - 1,
    sfixed32: -7,
    sfixed64: i64::MIN + 1,
    boolean: true,
    string: "grüße".to_string(),
    bytes: ByteString::copy_from(&[0, 0x80, 0xff]),
    packed_sint32: vec![0, -1, 1, i32::MAX],
    fixed64_list: vec![1, 0, u64::MAX],
    packed_double: vec![0.5, -0.0],
  }
}

fn write_packed(
  os: &mut CodedOutputStream<'_>,
  field_number: u32,
  write: impl FnOnce(&mut CodedOutputStream<'_>) -> protobuf::Result<()>,
) -> Result<()> {
  let mut payload = Vec::new();
  let mut payload_os = CodedOutputStream::vec(&mut payload);
  write(&mut payload_os)?;
  payload_os.flush()?;
  drop(payload_os);

  os.write_tag(field_number, WireType::LengthDelimited)?;
  os.write_raw_varint32(u32::try_from(payload.len())?)?;
  os.write_raw_bytes(&payload)?;
  Ok(())
}

// Writes `sample()` the way generated protobuf code would: ascending field order, defaults
// omitted, repeated fields packed where declared.
fn write_sample_with_protobuf(message: &Sample) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  let mut os = CodedOutputStream::vec(&mut buf);
  os.write_double(1, message.double)?;
  os.write_float(2, message.float)?;
  os.write_int32(3, message.int32)?;
  os.write_int64(4, message.int64)?;
  os.write_uint32(5, message.uint32)?;
  os.write_uint64(6, message.uint64)?;
  os.write_sint32(7, message.sint32)?;
  os.write_sint64(8, message.sint64)?;
  os.write_fixed32(9, message.fixed32)?;
  os.write_fixed64(10, message.fixed64)?;
  os.write_sfixed32(11, message.sfixed32)?;
  os.write_sfixed64(12, message.sfixed64)?;
  os.write_bool(13, message.boolean)?;
  os.write_string(14, &message.string)?;
  os.write_bytes(15, message.bytes.as_slice())?;
  write_packed(&mut os, 16, |os| {
    for value in &message.packed_sint32 {
      os.write_sint32_no_tag(*value)?;
    }
    Ok(())
  })?;
  for value in &message.fixed64_list {
    os.write_fixed64(17, *value)?;
  }
  write_packed(&mut os, 18, |os| {
    for value in &message.packed_double {
      os.write_double_no_tag(*value)?;
    }
    Ok(())
  })?;
  os.flush()?;
  drop(os);
  Ok(buf)
}

fn read_packed<T>(
  is: &mut CodedInputStream<'_>,
  values: &mut Vec<T>,
  read: impl Fn(&mut CodedInputStream<'_>) -> protobuf::Result<T>,
) -> Result<()> {
  let len = is.read_raw_varint32()?;
  let old_limit = is.push_limit(u64::from(len))?;
  while !is.eof()? {
    values.push(read(is)?);
  }
  is.pop_limit(old_limit);
  Ok(())
}

fn read_sample_with_protobuf(bytes: &[u8]) -> Result<Sample> {
  let mut message = Sample::default();
  let mut is = CodedInputStream::from_bytes(bytes);
  while let Some(tag) = is.read_raw_tag_or_eof()? {
    match tag >> 3 {
      1 => message.double = is.read_double()?,
      2 => message.float = is.read_float()?,
      3 => message.int32 = is.read_int32()?,
      4 => message.int64 = is.read_int64()?,
      5 => message.uint32 = is.read_uint32()?,
      6 => message.uint64 = is.read_uint64()?,
      7 => message.sint32 = is.read_sint32()?,
      8 => message.sint64 = is.read_sint64()?,
      9 => message.fixed32 = is.read_fixed32()?,
      10 => message.fixed64 = is.read_fixed64()?,
      11 => message.sfixed32 = is.read_sfixed32()?,
      12 => message.sfixed64 = is.read_sfixed64()?,
      13 => message.boolean = is.read_bool()?,
      14 => message.string = is.read_string()?,
      15 => message.bytes = ByteString::from(is.read_bytes()?),
      16 => read_packed(&mut is, &mut message.packed_sint32, |is| is.read_sint32())?,
      17 => message.fixed64_list.push(is.read_fixed64()?),
      18 => read_packed(&mut is, &mut message.packed_double, |is| is.read_double())?,
      field_number => anyhow::bail!("unexpected field {field_number}"),
    }
  }
  Ok(message)
}

#[test]
fn sample_encoding_matches_protobuf() -> Result<()> {
  let registry = SchemaRegistry::new();
  let schema = registry.get_or_try_insert_with(sample_schema)?;
  let message = sample();

  let ours = schema.encode(&message)?;
  let theirs = write_sample_with_protobuf(&message)?;
  assert_eq!(theirs, ours.to_vec());
  assert_eq!(ours.len(), schema.compute_size(&message)?);

  assert_eq!(message, read_sample_with_protobuf(&ours)?);
  assert_eq!(message, schema.decode(&theirs)?);
  Ok(())
}

#[rstest]
#[case(0, 0)]
#[case(1_700_000_000, 123_456_789)]
#[case(-62_135_596_800, 0)]
#[case(253_402_300_799, 999_999_999)]
#[case(-1, -1)]
fn timestamp_interop(#[case] seconds: i64, #[case] nanos: i32) -> Result<()> {
  let registry = SchemaRegistry::new();
  let schema = registry.get_or_try_insert_with(timestamp_schema)?;

  let ours = Timestamp { seconds, nanos };
  let theirs = timestamp::Timestamp {
    seconds,
    nanos,
    ..Default::default()
  };

  let bytes = schema.encode(&ours)?;
  assert_eq!(theirs.write_to_bytes()?, bytes.to_vec());
  assert_eq!(theirs, timestamp::Timestamp::parse_from_bytes(&bytes)?);
  assert_eq!(ours, schema.decode(&theirs.write_to_bytes()?)?);
  Ok(())
}

#[test]
fn field_mask_interop() -> Result<()> {
  let registry = SchemaRegistry::new();
  let schema = registry.get_or_try_insert_with(field_mask_schema)?;

  let ours = FieldMask {
    paths: vec!["a.b".to_string(), String::new(), "c".to_string()],
  };
  let bytes = schema.encode(&ours)?;
  let theirs = field_mask::FieldMask::parse_from_bytes(&bytes)?;
  assert_eq!(ours.paths, theirs.paths);
  assert_eq!(ours, schema.decode(&theirs.write_to_bytes()?)?);
  Ok(())
}

fn sample_api() -> Api {
  Api {
    name: "bitdrift.Logger".to_string(),
    methods: vec![
      Method {
        name: "Upload".to_string(),
        request_type_url: "type.googleapis.com/UploadRequest".to_string(),
        request_streaming: true,
        response_type_url: "type.googleapis.com/UploadResponse".to_string(),
        response_streaming: false,
        syntax: 1,
      },
      Method {
        name: "Ping".to_string(),
        ..Method::default()
      },
    ],
    version: "v1".to_string(),
    source_context: Some(SourceContext {
      file_name: "logger.proto".to_string(),
    }),
    syntax: 1,
  }
}

#[test]
fn nested_messages_decode_with_protobuf() -> Result<()> {
  let registry = SchemaRegistry::new();
  let schema = registry.get_or_try_insert_with(api_schema)?;
  assert_eq!(3, registry.len());

  let ours = sample_api();
  let bytes = schema.encode(&ours)?;
  let theirs = api::Api::parse_from_bytes(&bytes)?;

  assert_eq!(ours.name, theirs.name);
  assert_eq!(ours.version, theirs.version);
  assert_eq!(
    "logger.proto",
    theirs.source_context.as_ref().unwrap().file_name
  );
  assert_eq!(1, theirs.syntax.value());
  assert_eq!(2, theirs.methods.len());
  assert_eq!("Upload", theirs.methods[0].name);
  assert!(theirs.methods[0].request_streaming);
  assert!(!theirs.methods[0].response_streaming);
  assert_eq!(
    "type.googleapis.com/UploadResponse",
    theirs.methods[0].response_type_url
  );
  assert_eq!("Ping", theirs.methods[1].name);

  assert_eq!(theirs.write_to_bytes()?, bytes.to_vec());
  Ok(())
}

#[test]
fn nested_messages_encoded_by_protobuf() -> Result<()> {
  let registry = SchemaRegistry::new();
  let schema = registry.get_or_try_insert_with(api_schema)?;

  let mut theirs = api::Api::new();
  theirs.name = "svc".to_string();
  theirs.version = "v2".to_string();
  theirs.source_context = MessageField::some(source_context::SourceContext {
    file_name: "svc.proto".to_string(),
    ..Default::default()
  });
  theirs.syntax = EnumOrUnknown::new(type_::Syntax::SYNTAX_PROTO3);
  theirs.methods.push(api::Method {
    name: "Call".to_string(),
    response_streaming: true,
    ..Default::default()
  });
  // Options are unknown to our schema and skipped.
  theirs.options.push(type_::Option {
    name: "deprecated".to_string(),
    ..Default::default()
  });

  let decoded = schema.decode(&theirs.write_to_bytes()?)?;
  assert_eq!(
    Api {
      name: "svc".to_string(),
      methods: vec![Method {
        name: "Call".to_string(),
        response_streaming: true,
        ..Method::default()
      }],
      version: "v2".to_string(),
      source_context: Some(SourceContext {
        file_name: "svc.proto".to_string(),
      }),
      syntax: 1,
    },
    decoded
  );
  Ok(())
}

#[test]
fn unknown_fields_written_by_protobuf_are_skipped() -> Result<()> {
  let registry = SchemaRegistry::new();
  let schema = registry.get_or_try_insert_with(timestamp_schema)?;

  let mut buf = Vec::new();
  let mut os = CodedOutputStream::vec(&mut buf);
  os.write_string(100, "ignored")?;
  os.write_int64(1, 42)?;
  os.write_fixed32(101, 1)?;
  os.write_tag(102, WireType::StartGroup)?;
  os.write_uint64(1, 5)?;
  os.write_tag(102, WireType::EndGroup)?;
  os.write_int32(2, 7)?;
  os.write_double(103, 1.0)?;
  os.flush()?;
  drop(os);

  assert_eq!(
    Timestamp {
      seconds: 42,
      nanos: 7,
    },
    schema.decode(&buf)?
  );
  Ok(())
}

#[test]
fn wire_primitives_match_protobuf() -> Result<()> {
  use bd_wire::CodedOutput;
  use bd_wire::format::{Int32, Sint64, Uint64};

  let values = [0i64, 1, -1, 63, -64, 64, i64::from(i32::MIN), i64::MAX, i64::MIN];
  for value in values {
    let mut ours = CodedOutput::new();
    ours.write::<Sint64>(1, value);
    #[allow(clippy::cast_sign_loss)]
    let unsigned = value as u64;
    ours.write::<Uint64>(2, unsigned);
    let narrow = i32::try_from(value).unwrap_or_default();
    ours.write::<Int32>(3, narrow);

    let mut theirs = Vec::new();
    let mut os = CodedOutputStream::vec(&mut theirs);
    os.write_sint64(1, value)?;
    os.write_uint64(2, unsigned)?;
    os.write_int32(3, narrow)?;
    os.flush()?;
    drop(os);

    assert_eq!(theirs, ours.as_slice(), "{value}");
  }
  Ok(())
}
