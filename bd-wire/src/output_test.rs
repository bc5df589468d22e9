// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use super::*;
use crate::format::{Sint32, Uint32};
use crate::size::{bytes_size, field_size, packed_field_size};

#[test]
fn uint32_field_300() {
  let mut output = CodedOutput::new();
  output.write::<Uint32>(1, 300);
  assert_eq!(&[0x08, 0xAC, 0x02], output.as_slice());
  assert_eq!(3, field_size::<Uint32>(1, &300));
}

#[test]
fn sint32_field_minus_two() {
  let mut output = CodedOutput::new();
  output.write::<Sint32>(1, -2);
  assert_eq!(&[0x08, 0x03], output.as_slice());
}

#[test]
fn string_field() {
  let mut output = CodedOutput::new();
  output.write_string(2, "testing");
  assert_eq!(
    &[0x12, 0x07, b't', b'e', b's', b't', b'i', b'n', b'g'],
    output.as_slice()
  );
  assert_eq!(output.len(), bytes_size(2, 7));
}

#[test]
fn packed_field() {
  let mut output = CodedOutput::new();
  output.write_packed::<Uint32>(4, &[3, 270, 86942]);
  assert_eq!(
    &[0x22, 0x06, 0x03, 0x8E, 0x02, 0x9E, 0xA7, 0x05],
    output.as_slice()
  );
  assert_eq!(output.len(), packed_field_size::<Uint32>(4, &[3, 270, 86942]));
}

#[test]
fn empty_packed_field_writes_nothing() {
  let mut output = CodedOutput::new();
  output.write_packed::<Uint32>(4, &[]);
  assert!(output.is_empty());
  assert_eq!(0, packed_field_size::<Uint32>(4, &[]));
}

#[test]
fn unpacked_field() {
  let mut output = CodedOutput::new();
  output.write_unpacked::<Uint32>(4, &[1, 2]);
  assert_eq!(&[0x20, 0x01, 0x20, 0x02], output.as_slice());
}

#[test]
fn length_delimited_header() {
  let mut output = CodedOutput::with_capacity(16);
  output.write_length_delimited_header(3, 3);
  output.write::<Uint32>(1, 150);
  assert_eq!(&[0x1a, 0x03, 0x08, 0x96, 0x01], output.as_slice());

  let bytes = output.finish();
  assert_eq!(5, bytes.len());
}
