// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use super::*;
use crate::size::{int32_size, varint64_size};
use assert_matches::assert_matches;
use rstest::rstest;

#[rstest]
#[case(0, 1)]
#[case((1 << 7) - 1, 1)]
#[case(1 << 7, 2)]
#[case((1 << 14) - 1, 2)]
#[case(1 << 14, 3)]
#[case((1 << 21) - 1, 3)]
#[case(1 << 21, 4)]
#[case((1 << 28) - 1, 4)]
#[case(1 << 28, 5)]
#[case((1 << 35) - 1, 5)]
#[case(1 << 35, 6)]
#[case((1 << 42) - 1, 6)]
#[case(1 << 42, 7)]
#[case((1 << 49) - 1, 7)]
#[case(1 << 49, 8)]
#[case((1 << 56) - 1, 8)]
#[case(1 << 56, 9)]
#[case((1 << 63) - 1, 9)]
#[case(1 << 63, 10)]
#[case(u64::MAX, 10)]
fn varint_boundaries(#[case] value: u64, #[case] expected_len: usize) {
  let mut buf = Vec::new();
  let written = encode_varint64(&mut buf, value).unwrap();

  assert_eq!(expected_len, written);
  assert_eq!(expected_len, buf.len());
  assert_eq!(expected_len, varint64_size(value));

  // Only the last byte may have the continuation bit clear.
  assert!(buf[.. buf.len() - 1].iter().all(|b| b & 0x80 != 0));
  assert_eq!(0, buf[buf.len() - 1] & 0x80);

  assert_eq!((value, expected_len), decode_varint64(&buf, 0).unwrap());
}

#[test]
fn varint_300() {
  let mut buf = Vec::new();
  encode_varint32(&mut buf, 300).unwrap();
  assert_eq!(vec![0xAC, 0x02], buf);
  assert_eq!((300, 2), decode_varint32(&buf, 0).unwrap());
}

#[test]
fn decode_from_offset() {
  let buf = [0xff, 0xff, 0x96, 0x01, 0x05];
  assert_eq!((150, 4), decode_varint64(&buf, 2).unwrap());
  assert_eq!((5, 5), decode_varint64(&buf, 4).unwrap());
}

#[test]
fn negative_int32_is_sign_extended() {
  for value in [-1, -2, i32::MIN] {
    let mut buf = Vec::new();
    assert_eq!(10, encode_int32(&mut buf, value).unwrap());
    assert_eq!(10, int32_size(value));

    #[allow(clippy::cast_possible_wrap)]
    let decoded = decode_varint32(&buf, 0).unwrap().0 as i32;
    assert_eq!(value, decoded);
  }

  let mut buf = Vec::new();
  encode_int32(&mut buf, -1).unwrap();
  assert_eq!(
    vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01],
    buf
  );
}

#[test]
fn positive_int32_is_compact() {
  let mut buf = Vec::new();
  assert_eq!(1, encode_int32(&mut buf, 1).unwrap());
  assert_eq!(5, encode_int32(&mut Vec::new(), i32::MAX).unwrap());
}

#[test]
fn malformed_varint() {
  let buf = [0xff; 11];
  assert_matches!(
    decode_varint64(&buf, 0),
    Err(Error::MalformedVarint { offset: 0 })
  );

  let mut prefixed = vec![0x01];
  prefixed.extend_from_slice(&buf);
  assert_matches!(
    decode_varint32(&prefixed, 1),
    Err(Error::MalformedVarint { offset: 1 })
  );
}

#[test]
fn truncated_varint() {
  assert_matches!(
    decode_varint64(&[0x80, 0x80], 0),
    Err(Error::Truncated {
      needed: 3,
      remaining: 2
    })
  );
  assert_matches!(
    decode_varint64(&[], 0),
    Err(Error::Truncated {
      needed: 1,
      remaining: 0
    })
  );
}

#[test]
fn encode_into_full_buffer() {
  let mut storage = [0u8; 1];
  let mut dst = &mut storage[..];
  assert_matches!(
    encode_varint64(&mut dst, 300),
    Err(Error::BufferFull {
      needed: 2,
      remaining: 1
    })
  );

  let mut storage = [0u8; 2];
  let mut dst = &mut storage[..];
  assert_eq!(2, encode_varint64(&mut dst, 300).unwrap());
  assert_eq!([0xAC, 0x02], storage);
}

#[rstest]
#[case(0, 0)]
#[case(-1, 1)]
#[case(1, 2)]
#[case(-2, 3)]
#[case(2, 4)]
#[case(i32::MAX, u32::MAX - 1)]
#[case(i32::MIN, u32::MAX)]
fn zigzag32_table(#[case] value: i32, #[case] encoded: u32) {
  assert_eq!(encoded, zigzag_encode32(value));
  assert_eq!(value, zigzag_decode32(encoded));
}

#[rstest]
#[case(0, 0)]
#[case(-1, 1)]
#[case(1, 2)]
#[case(-2, 3)]
#[case(i64::MAX, u64::MAX - 1)]
#[case(i64::MIN, u64::MAX)]
fn zigzag64_table(#[case] value: i64, #[case] encoded: u64) {
  assert_eq!(encoded, zigzag_encode64(value));
  assert_eq!(value, zigzag_decode64(encoded));
}

#[test]
fn zigzag_inverse_across_range() {
  // Sample the full 32-bit range with a stride that hits both signs and the extremes.
  let mut value = i64::from(i32::MIN);
  while value <= i64::from(i32::MAX) {
    #[allow(clippy::cast_possible_truncation)]
    let n = value as i32;
    assert_eq!(n, zigzag_decode32(zigzag_encode32(n)));
    value += 65_537;
  }
  for n in [i32::MIN, i32::MIN + 1, -1, 0, 1, i32::MAX - 1, i32::MAX] {
    assert_eq!(n, zigzag_decode32(zigzag_encode32(n)));
  }

  for shift in 0 .. 63 {
    for n in [1i64 << shift, -(1i64 << shift), (1i64 << shift) - 1] {
      assert_eq!(n, zigzag_decode64(zigzag_encode64(n)));
    }
  }
  for n in [i64::MIN, i64::MIN + 1, i64::MAX] {
    assert_eq!(n, zigzag_decode64(zigzag_encode64(n)));
  }
}

#[test]
fn zigzag_keeps_small_magnitudes_small() {
  for n in -64 ..= 63 {
    let mut buf = Vec::new();
    encode_varint32(&mut buf, zigzag_encode32(n)).unwrap();
    assert_eq!(1, buf.len(), "value {n}");
  }
}
