// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use super::*;
use crate::schema::BoundMut;
use crate::test::{Address, address_schema};
use assert_matches::assert_matches;
use bd_test_helpers::bytes_from_hex;
use pretty_assertions::assert_eq;

#[test]
fn field_number_peeks() {
  let bytes = bytes_from_hex("08 ac 02 38 03");
  let mut reader = BinaryReader::new(&bytes);

  assert_eq!(Some(1), reader.field_number().unwrap());
  assert_eq!(Some(1), reader.field_number().unwrap());
  assert_eq!(1, reader.position());
  assert_eq!(300, reader.read_uint32().unwrap());

  assert_eq!(Some(7), reader.field_number().unwrap());
  assert_eq!(-2, reader.read_sint32().unwrap());
  assert_eq!(None, reader.field_number().unwrap());
  assert_eq!(5, reader.position());
}

#[test]
fn read_without_peek() {
  let bytes = bytes_from_hex("0d 01 00 00 00");
  let mut reader = BinaryReader::new(&bytes);
  assert_eq!(1, reader.read_fixed32().unwrap());

  let mut reader = BinaryReader::new(&[]);
  assert_matches!(
    reader.read_int64(),
    Err(Error::Wire(bd_wire::Error::Truncated {
      needed: 1,
      remaining: 0
    }))
  );
}

#[test]
fn wire_type_must_match() {
  let bytes = bytes_from_hex("0a 01 61");
  let mut reader = BinaryReader::new(&bytes);
  assert_matches!(
    reader.read_int32(),
    Err(Error::WireTypeMismatch {
      field_number: 1,
      expected: WireType::Varint,
      actual: WireType::LengthDelimited,
    })
  );

  // A fixed64 occurrence can neither be an element nor a packed block of a varint list.
  let bytes = bytes_from_hex("09 00 00 00 00 00 00 00 00");
  let mut reader = BinaryReader::new(&bytes);
  let mut values = Vec::new();
  assert_matches!(
    reader.read_uint64_list(&mut values),
    Err(Error::WireTypeMismatch {
      expected: WireType::Varint,
      actual: WireType::Fixed64,
      ..
    })
  );
}

#[test]
fn lists() {
  let bytes = bytes_from_hex("08 01 0a 03 02 03 04 08 05");
  let mut reader = BinaryReader::new(&bytes);
  let mut values = Vec::new();
  while reader.field_number().unwrap().is_some() {
    reader.read_int32_list(&mut values).unwrap();
  }
  assert_eq!(vec![1, 2, 3, 4, 5], values);

  // A truncated packed block.
  let bytes = bytes_from_hex("0a 04 01 00 00");
  let mut reader = BinaryReader::new(&bytes);
  assert_matches!(
    reader.read_fixed32_list(&mut Vec::new()),
    Err(Error::Wire(bd_wire::Error::Truncated { .. }))
  );

  let bytes = bytes_from_hex("0a 01 61 0a 00");
  let mut reader = BinaryReader::new(&bytes);
  let mut values = Vec::new();
  reader.read_string_list(&mut values).unwrap();
  reader.read_string_list(&mut values).unwrap();
  assert_eq!(vec!["a".to_string(), String::new()], values);
}

#[test]
fn strings_and_bytes() {
  let bytes = bytes_from_hex("0a 03 e2 82 ac 12 02 ff 00");
  let mut reader = BinaryReader::new(&bytes);
  assert_eq!("€", reader.read_string().unwrap());
  assert_eq!(
    ByteString::copy_from(&[0xff, 0x00]),
    reader.read_bytes().unwrap()
  );

  // Bytes fields carry no UTF-8 requirement, string fields do.
  let bytes = bytes_from_hex("12 01 ff");
  let mut reader = BinaryReader::new(&bytes);
  assert_matches!(
    reader.read_string(),
    Err(Error::InvalidUtf8 { field_number: 2 })
  );

  let config = CodecConfig {
    utf8_policy: Utf8Policy::Lossy,
    ..CodecConfig::default()
  };
  let mut reader = BinaryReader::with_config(&bytes, &config);
  assert_eq!("\u{fffd}", reader.read_string().unwrap());
}

#[test]
fn skip_field() {
  let bytes = bytes_from_hex("09 01 02 03 04 05 06 07 08 10 01");
  let mut reader = BinaryReader::new(&bytes);
  assert!(reader.skip_field().unwrap());
  assert_eq!(Some(2), reader.field_number().unwrap());
  assert!(!reader.skip_field().unwrap());
  assert!(!reader.skip_field().unwrap());

  assert_matches!(
    BinaryReader::new(&bytes_from_hex("0c")).skip_field(),
    Err(Error::Wire(bd_wire::Error::UnexpectedEndGroup { field_number: 1 }))
  );
}

#[test]
fn embedded_message_is_bounded() {
  let schema = address_schema();

  // Field 3 holds a zip code; field 2 follows outside of it.
  let bytes = bytes_from_hex("1a 02 10 07 10 09");
  let mut reader = BinaryReader::new(&bytes);
  let mut address = Address::default();
  reader
    .read_message(&mut BoundMut::new(&schema, &mut address))
    .unwrap();
  assert_eq!(7, address.zip);
  assert_eq!(4, reader.position());
  assert_eq!(Some(2), reader.field_number().unwrap());
  assert_eq!(9, reader.read_uint32().unwrap());
}

#[test]
fn embedded_message_recursion_limit() {
  let schema = address_schema();
  let config = CodecConfig {
    recursion_limit: 0,
    ..CodecConfig::default()
  };
  let bytes = bytes_from_hex("1a 00");
  let mut reader = BinaryReader::with_config(&bytes, &config);
  assert_matches!(
    reader.read_message(&mut BoundMut::new(&schema, &mut Address::default())),
    Err(Error::RecursionLimitExceeded { limit: 0 })
  );
}

#[test]
fn unsupported_wire_type() {
  let mut reader = BinaryReader::new(&[0x0e]);
  assert_matches!(
    reader.field_number(),
    Err(Error::Wire(bd_wire::Error::InvalidWireType { value: 6 }))
  );
}
