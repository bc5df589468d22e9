// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./output_test.rs"]
mod tests;

use crate::format::WireFormat;
use crate::size::packed_data_size;
use crate::tag::{WireType, make_tag};
use crate::varint::put_varint64;
use bytes::{BufMut, Bytes, BytesMut};

//
// CodedOutput
//

/// A growable protobuf encoder. Writes never fail: the underlying buffer grows as needed.
///
/// Field writers emit the tag followed by the value. The `write_raw_*` family emits bare values
/// and is used for length prefixes and hand-built framing.
#[derive(Debug, Default)]
pub struct CodedOutput {
  buf: BytesMut,
}

impl CodedOutput {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      buf: BytesMut::with_capacity(capacity),
    }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.buf.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.buf.is_empty()
  }

  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    &self.buf
  }

  /// Consumes the encoder and returns the encoded bytes without copying.
  #[must_use]
  pub fn finish(self) -> Bytes {
    self.buf.freeze()
  }

  pub fn write_tag(&mut self, field_number: u32, wire_type: WireType) {
    self.write_raw_varint32(make_tag(field_number, wire_type));
  }

  pub fn write_raw_varint32(&mut self, value: u32) {
    put_varint64(&mut self.buf, u64::from(value));
  }

  pub fn write_raw_varint64(&mut self, value: u64) {
    put_varint64(&mut self.buf, value);
  }

  pub fn write_raw_fixed32(&mut self, value: u32) {
    self.buf.put_u32_le(value);
  }

  pub fn write_raw_fixed64(&mut self, value: u64) {
    self.buf.put_u64_le(value);
  }

  pub fn write_raw_bytes(&mut self, bytes: &[u8]) {
    self.buf.put_slice(bytes);
  }

  /// Writes a singular scalar field: tag, then the value in format `F`.
  pub fn write<F: WireFormat>(&mut self, field_number: u32, value: F::Value) {
    self.write_tag(field_number, F::WIRE_TYPE);
    F::put(&mut self.buf, value);
  }

  /// Writes a value in format `F` with no tag, as used inside packed blocks.
  pub fn write_no_tag<F: WireFormat>(&mut self, value: F::Value) {
    F::put(&mut self.buf, value);
  }

  /// Writes a repeated scalar field as one length-delimited block holding the concatenated
  /// element encodings. An empty list writes nothing.
  pub fn write_packed<F: WireFormat>(&mut self, field_number: u32, values: &[F::Value]) {
    if values.is_empty() {
      return;
    }
    self.write_tag(field_number, WireType::LengthDelimited);
    self.write_length_prefix(packed_data_size::<F>(values));
    self.buf.reserve(values.len());
    for value in values {
      F::put(&mut self.buf, *value);
    }
  }

  /// Writes a repeated scalar field as one tag and value per element.
  pub fn write_unpacked<F: WireFormat>(&mut self, field_number: u32, values: &[F::Value]) {
    for value in values {
      self.write::<F>(field_number, *value);
    }
  }

  pub fn write_bytes(&mut self, field_number: u32, bytes: &[u8]) {
    self.write_tag(field_number, WireType::LengthDelimited);
    self.write_length_prefix(bytes.len());
    self.write_raw_bytes(bytes);
  }

  pub fn write_string(&mut self, field_number: u32, value: &str) {
    self.write_bytes(field_number, value.as_bytes());
  }

  /// Writes the tag and length prefix of a length-delimited field whose `len` payload bytes the
  /// caller writes next (e.g. an embedded message).
  pub fn write_length_delimited_header(&mut self, field_number: u32, len: usize) {
    self.write_tag(field_number, WireType::LengthDelimited);
    self.write_length_prefix(len);
  }

  fn write_length_prefix(&mut self, len: usize) {
    self.write_raw_varint64(len as u64);
  }
}
