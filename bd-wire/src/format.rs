// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

//! Wire formats for the protobuf scalar types.
//!
//! Each protobuf scalar type has a corresponding unit struct (e.g. [`Uint32`], [`Sint64`],
//! [`Double`]) implementing [`WireFormat`], which centralizes the unframed encoding of one value:
//! the wire type, the encoded length, and the encode/decode functions. Tags, length prefixes and
//! packed framing are layered on top by [`crate::CodedOutput`] and [`crate::CodedInput`].

#[cfg(test)]
#[path = "./format_test.rs"]
mod tests;

use crate::size::{int32_size, varint32_size, varint64_size};
use crate::tag::WireType;
use crate::varint::{
  decode_varint32,
  decode_varint64,
  put_varint64,
  zigzag_decode32,
  zigzag_decode64,
  zigzag_encode32,
  zigzag_encode64,
};
use crate::{Error, Result};
use bytes::BufMut;

/// The unframed wire encoding of one protobuf scalar type.
pub trait WireFormat {
  /// The Rust type that this wire format encodes.
  type Value: Copy;

  /// The wire type carried by the tag of a singular field of this type.
  const WIRE_TYPE: WireType;

  /// The protobuf type name, used in diagnostics.
  const NAME: &'static str;

  /// Number of bytes [`WireFormat::put`] writes for `value`.
  fn encoded_len(value: &Self::Value) -> usize;

  /// Appends the encoding of `value`. The destination must be able to grow (or have room for
  /// [`WireFormat::encoded_len`] bytes).
  fn put<B: BufMut>(dst: &mut B, value: Self::Value);

  /// Decodes one value at `pos`, returning it and the position just past it.
  fn get(src: &[u8], pos: usize) -> Result<(Self::Value, usize)>;
}

fn fixed_bytes<const N: usize>(src: &[u8], pos: usize) -> Result<([u8; N], usize)> {
  let end = pos + N;
  let Some(slice) = src.get(pos .. end) else {
    return Err(Error::Truncated {
      needed: N,
      remaining: src.len().saturating_sub(pos),
    });
  };
  let mut bytes = [0u8; N];
  bytes.copy_from_slice(slice);
  Ok((bytes, end))
}

/// Decodes a little-endian 4-byte value at `pos`.
pub fn decode_fixed32(src: &[u8], pos: usize) -> Result<(u32, usize)> {
  let (bytes, pos) = fixed_bytes::<4>(src, pos)?;
  Ok((u32::from_le_bytes(bytes), pos))
}

/// Decodes a little-endian 8-byte value at `pos`.
pub fn decode_fixed64(src: &[u8], pos: usize) -> Result<(u64, usize)> {
  let (bytes, pos) = fixed_bytes::<8>(src, pos)?;
  Ok((u64::from_le_bytes(bytes), pos))
}

//
// Varint types
//

pub struct Int32;

impl WireFormat for Int32 {
  type Value = i32;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "int32";

  fn encoded_len(value: &i32) -> usize {
    int32_size(*value)
  }

  #[allow(clippy::cast_sign_loss)]
  fn put<B: BufMut>(dst: &mut B, value: i32) {
    put_varint64(dst, i64::from(value) as u64);
  }

  #[allow(clippy::cast_possible_wrap)]
  fn get(src: &[u8], pos: usize) -> Result<(i32, usize)> {
    let (value, pos) = decode_varint32(src, pos)?;
    Ok((value as i32, pos))
  }
}

pub struct Int64;

impl WireFormat for Int64 {
  type Value = i64;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "int64";

  #[allow(clippy::cast_sign_loss)]
  fn encoded_len(value: &i64) -> usize {
    varint64_size(*value as u64)
  }

  #[allow(clippy::cast_sign_loss)]
  fn put<B: BufMut>(dst: &mut B, value: i64) {
    put_varint64(dst, value as u64);
  }

  #[allow(clippy::cast_possible_wrap)]
  fn get(src: &[u8], pos: usize) -> Result<(i64, usize)> {
    let (value, pos) = decode_varint64(src, pos)?;
    Ok((value as i64, pos))
  }
}

pub struct Uint32;

impl WireFormat for Uint32 {
  type Value = u32;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "uint32";

  fn encoded_len(value: &u32) -> usize {
    varint32_size(*value)
  }

  fn put<B: BufMut>(dst: &mut B, value: u32) {
    put_varint64(dst, u64::from(value));
  }

  fn get(src: &[u8], pos: usize) -> Result<(u32, usize)> {
    decode_varint32(src, pos)
  }
}

pub struct Uint64;

impl WireFormat for Uint64 {
  type Value = u64;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "uint64";

  fn encoded_len(value: &u64) -> usize {
    varint64_size(*value)
  }

  fn put<B: BufMut>(dst: &mut B, value: u64) {
    put_varint64(dst, value);
  }

  fn get(src: &[u8], pos: usize) -> Result<(u64, usize)> {
    decode_varint64(src, pos)
  }
}

pub struct Sint32;

impl WireFormat for Sint32 {
  type Value = i32;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "sint32";

  fn encoded_len(value: &i32) -> usize {
    varint32_size(zigzag_encode32(*value))
  }

  fn put<B: BufMut>(dst: &mut B, value: i32) {
    put_varint64(dst, u64::from(zigzag_encode32(value)));
  }

  fn get(src: &[u8], pos: usize) -> Result<(i32, usize)> {
    let (value, pos) = decode_varint32(src, pos)?;
    Ok((zigzag_decode32(value), pos))
  }
}

pub struct Sint64;

impl WireFormat for Sint64 {
  type Value = i64;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "sint64";

  fn encoded_len(value: &i64) -> usize {
    varint64_size(zigzag_encode64(*value))
  }

  fn put<B: BufMut>(dst: &mut B, value: i64) {
    put_varint64(dst, zigzag_encode64(value));
  }

  fn get(src: &[u8], pos: usize) -> Result<(i64, usize)> {
    let (value, pos) = decode_varint64(src, pos)?;
    Ok((zigzag_decode64(value), pos))
  }
}

pub struct Bool;

impl WireFormat for Bool {
  type Value = bool;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "bool";

  fn encoded_len(_value: &bool) -> usize {
    1
  }

  fn put<B: BufMut>(dst: &mut B, value: bool) {
    dst.put_u8(u8::from(value));
  }

  // Any non-zero varint reads as true, including over-long encodings.
  fn get(src: &[u8], pos: usize) -> Result<(bool, usize)> {
    let (value, pos) = decode_varint64(src, pos)?;
    Ok((value != 0, pos))
  }
}

/// Enums travel as their `int32` number.
pub struct Enum;

impl WireFormat for Enum {
  type Value = i32;
  const WIRE_TYPE: WireType = WireType::Varint;
  const NAME: &'static str = "enum";

  fn encoded_len(value: &i32) -> usize {
    Int32::encoded_len(value)
  }

  fn put<B: BufMut>(dst: &mut B, value: i32) {
    Int32::put(dst, value);
  }

  fn get(src: &[u8], pos: usize) -> Result<(i32, usize)> {
    Int32::get(src, pos)
  }
}

//
// Fixed width types
//

pub struct Fixed32;

impl WireFormat for Fixed32 {
  type Value = u32;
  const WIRE_TYPE: WireType = WireType::Fixed32;
  const NAME: &'static str = "fixed32";

  fn encoded_len(_value: &u32) -> usize {
    4
  }

  fn put<B: BufMut>(dst: &mut B, value: u32) {
    dst.put_u32_le(value);
  }

  fn get(src: &[u8], pos: usize) -> Result<(u32, usize)> {
    decode_fixed32(src, pos)
  }
}

pub struct Sfixed32;

impl WireFormat for Sfixed32 {
  type Value = i32;
  const WIRE_TYPE: WireType = WireType::Fixed32;
  const NAME: &'static str = "sfixed32";

  fn encoded_len(_value: &i32) -> usize {
    4
  }

  fn put<B: BufMut>(dst: &mut B, value: i32) {
    dst.put_i32_le(value);
  }

  fn get(src: &[u8], pos: usize) -> Result<(i32, usize)> {
    let (bytes, pos) = fixed_bytes::<4>(src, pos)?;
    Ok((i32::from_le_bytes(bytes), pos))
  }
}

pub struct Float;

impl WireFormat for Float {
  type Value = f32;
  const WIRE_TYPE: WireType = WireType::Fixed32;
  const NAME: &'static str = "float";

  fn encoded_len(_value: &f32) -> usize {
    4
  }

  fn put<B: BufMut>(dst: &mut B, value: f32) {
    dst.put_u32_le(value.to_bits());
  }

  fn get(src: &[u8], pos: usize) -> Result<(f32, usize)> {
    let (bits, pos) = decode_fixed32(src, pos)?;
    Ok((f32::from_bits(bits), pos))
  }
}

pub struct Fixed64;

impl WireFormat for Fixed64 {
  type Value = u64;
  const WIRE_TYPE: WireType = WireType::Fixed64;
  const NAME: &'static str = "fixed64";

  fn encoded_len(_value: &u64) -> usize {
    8
  }

  fn put<B: BufMut>(dst: &mut B, value: u64) {
    dst.put_u64_le(value);
  }

  fn get(src: &[u8], pos: usize) -> Result<(u64, usize)> {
    decode_fixed64(src, pos)
  }
}

pub struct Sfixed64;

impl WireFormat for Sfixed64 {
  type Value = i64;
  const WIRE_TYPE: WireType = WireType::Fixed64;
  const NAME: &'static str = "sfixed64";

  fn encoded_len(_value: &i64) -> usize {
    8
  }

  fn put<B: BufMut>(dst: &mut B, value: i64) {
    dst.put_i64_le(value);
  }

  fn get(src: &[u8], pos: usize) -> Result<(i64, usize)> {
    let (bytes, pos) = fixed_bytes::<8>(src, pos)?;
    Ok((i64::from_le_bytes(bytes), pos))
  }
}

pub struct Double;

impl WireFormat for Double {
  type Value = f64;
  const WIRE_TYPE: WireType = WireType::Fixed64;
  const NAME: &'static str = "double";

  fn encoded_len(_value: &f64) -> usize {
    8
  }

  fn put<B: BufMut>(dst: &mut B, value: f64) {
    dst.put_u64_le(value.to_bits());
  }

  fn get(src: &[u8], pos: usize) -> Result<(f64, usize)> {
    let (bits, pos) = decode_fixed64(src, pos)?;
    Ok((f64::from_bits(bits), pos))
  }
}
