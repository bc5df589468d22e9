// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use super::*;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn copy_is_independent_of_source() {
  let mut source = vec![1u8, 2, 3];
  let copied = ByteString::copy_from(&source);
  source[0] = 9;
  assert_eq!(&[1, 2, 3], copied.as_slice());
  assert_eq!(3, copied.size());
  assert!(!copied.is_empty());
}

#[test]
fn wrap_does_not_copy() {
  let buffer = bytes::Bytes::from_static(b"shared");
  let wrapped = ByteString::wrap(buffer.clone());
  assert_eq!(buffer.as_ptr(), wrapped.as_slice().as_ptr());

  let from_vec = ByteString::from(vec![7u8; 4]);
  assert_eq!(vec![7u8; 4], from_vec.to_vec());
}

#[test]
fn copy_from_range() {
  let source = b"0123456789";
  assert_eq!(
    ByteString::copy_from(b"345"),
    ByteString::copy_from_range(source, 3, 3).unwrap()
  );
  assert!(ByteString::copy_from_range(source, 10, 0).unwrap().is_empty());
  assert_matches!(
    ByteString::copy_from_range(source, 8, 3),
    Err(RangeError {
      begin: 8,
      end: 11,
      size: 10
    })
  );
  assert_matches!(
    ByteString::copy_from_range(source, usize::MAX, 2),
    Err(RangeError { .. })
  );
}

#[test]
fn empty() {
  let empty = ByteString::default();
  assert!(empty.is_empty());
  assert_eq!(0, empty.size());
  assert_eq!(ByteString::empty(), ByteString::copy_from(&[]));
  assert_eq!(None, empty.byte_at(0));
}

#[test]
fn utf8() {
  let text = ByteString::copy_from_utf8("héllo");
  assert_eq!(6, text.size());
  assert!(text.is_valid_utf8());
  assert_eq!("héllo", text.to_string_utf8().unwrap());

  let invalid = ByteString::copy_from(&[b'a', 0xff, b'b']);
  assert!(!invalid.is_valid_utf8());
  assert!(invalid.to_string_utf8().is_err());
  assert_eq!("a\u{fffd}b", invalid.to_string_utf8_lossy());
}

#[test]
fn hash_code_matches_byte_array_hash() {
  // Seeded with the size, then h = h * 31 + signed byte.
  assert_eq!(1, ByteString::empty().hash_code());
  assert_eq!(32, ByteString::copy_from(&[1]).hash_code());
  assert_eq!(30, ByteString::copy_from(&[0xff]).hash_code());
  assert_eq!(
    (2 * 31 + i32::from(b'a')) * 31 + i32::from(b'b'),
    ByteString::copy_from(b"ab").hash_code()
  );

  let long = ByteString::copy_from(&[0x7f; 1000]);
  assert_eq!(long.hash_code(), long.hash_code());
  assert_eq!(long.hash_code(), long.clone().hash_code());
}

#[test]
fn hash_code_concurrent_first_use() {
  let value = Arc::new(ByteString::copy_from(b"computed once, published by anyone"));
  let expected = ByteString::copy_from(value.as_slice()).hash_code();

  let handles: Vec<_> = (0 .. 8)
    .map(|_| {
      let value = value.clone();
      std::thread::spawn(move || value.hash_code())
    })
    .collect();
  for handle in handles {
    assert_eq!(expected, handle.join().unwrap());
  }
}

#[test]
fn equality_and_hash_are_content_based() {
  let a = ByteString::copy_from(b"abc");
  let b = ByteString::wrap(b"abc".to_vec());
  let c = ByteString::copy_from(b"abd");
  assert_eq!(a, b);
  assert_ne!(a, c);
  assert_ne!(a, ByteString::copy_from(b"ab"));

  // Equality still holds once both sides have cached their hash.
  assert_eq!(a.hash_code(), b.hash_code());
  assert_eq!(a, b);
  let _ = c.hash_code();
  assert_ne!(a, c);

  let set: HashSet<ByteString> = [a.clone(), b, c].into_iter().collect();
  assert_eq!(2, set.len());
  assert!(set.contains(&a));
}

#[test]
fn ordering_is_unsigned_lexicographic() {
  let mut values = vec![
    ByteString::copy_from(&[0xff]),
    ByteString::copy_from(&[0x01, 0x00]),
    ByteString::copy_from(&[0x01]),
    ByteString::empty(),
  ];
  values.sort();
  assert_eq!(
    vec![
      ByteString::empty(),
      ByteString::copy_from(&[0x01]),
      ByteString::copy_from(&[0x01, 0x00]),
      ByteString::copy_from(&[0xff]),
    ],
    values
  );
}

#[test]
fn substring_shares_storage() {
  let value = ByteString::copy_from(b"hello world");
  let world = value.substring(6, 11).unwrap();
  assert_eq!(ByteString::from("world"), world);
  assert_eq!(value.as_slice()[6 ..].as_ptr(), world.as_slice().as_ptr());
  assert!(value.substring(3, 3).unwrap().is_empty());
  assert_matches!(value.substring(4, 3), Err(RangeError { .. }));
  assert_matches!(value.substring(0, 12), Err(RangeError { .. }));
}

#[test]
fn concat_and_affixes() {
  let hello = ByteString::from("hello ");
  let world = ByteString::from("world");
  let joined = hello.concat(&world);
  assert_eq!(ByteString::from("hello world"), joined);
  assert!(joined.starts_with(&hello));
  assert!(joined.ends_with(&world));
  assert!(!joined.starts_with(&world));
  assert!(joined.starts_with(&ByteString::empty()));
  assert_eq!(hello, hello.concat(&ByteString::empty()));
  assert_eq!(world, ByteString::empty().concat(&world));
  assert_eq!(Some(b'w'), joined.byte_at(6));
}

#[test]
fn debug_preview() {
  assert_eq!(
    "ByteString(size=4 \"a\\nb\\xff\")",
    format!("{:?}", ByteString::copy_from(b"a\nb\xff"))
  );

  let long = ByteString::copy_from(&[b'x'; 60]);
  assert_eq!(
    format!("ByteString(size=60 \"{}...\")", "x".repeat(50)),
    format!("{long:?}")
  );
}
