// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use arbitrary::Arbitrary;
use bd_byte_string::ByteString;
use bd_schema::{Accessor, FieldKind, Schema};
use std::io::Read;

pub mod schema_decode_fuzz_test;
pub mod schema_round_trip_fuzz_test;

#[cfg(test)]
#[ctor::ctor]
fn test_global_init() {
  bd_test_helpers::test_global_init();
}

//
// FuzzMessage
//

/// A message covering every accessor shape, including self-recursion.
#[derive(Arbitrary, Debug, Default, Clone)]
pub struct FuzzMessage {
  pub int32: i32,
  pub sint64: i64,
  pub fixed64: u64,
  pub double: f64,
  pub float: f32,
  pub flag: bool,
  pub status: i32,
  pub text: String,
  #[arbitrary(with = arbitrary_byte_string)]
  pub blob: ByteString,
  pub packed_uint32: Vec<u32>,
  pub unpacked_sfixed32: Vec<i32>,
  pub names: Vec<String>,
  pub children: Vec<FuzzMessage>,
  pub next: Option<Box<FuzzMessage>>,
}

fn arbitrary_byte_string(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<ByteString> {
  Ok(ByteString::copy_from(u.arbitrary::<&[u8]>()?))
}

#[must_use]
pub fn fuzz_message_schema() -> Schema<FuzzMessage> {
  Schema::builder()
    .field(
      1,
      FieldKind::INT32,
      Accessor::i32(|m: &FuzzMessage| m.int32, |m, v| m.int32 = v),
    )
    .field(
      2,
      FieldKind::SINT64,
      Accessor::i64(|m: &FuzzMessage| m.sint64, |m, v| m.sint64 = v),
    )
    .field(
      3,
      FieldKind::FIXED64,
      Accessor::u64(|m: &FuzzMessage| m.fixed64, |m, v| m.fixed64 = v),
    )
    .field(
      4,
      FieldKind::DOUBLE,
      Accessor::f64(|m: &FuzzMessage| m.double, |m, v| m.double = v),
    )
    .field(
      5,
      FieldKind::FLOAT,
      Accessor::f32(|m: &FuzzMessage| m.float, |m, v| m.float = v),
    )
    .field(
      6,
      FieldKind::BOOL,
      Accessor::bool(|m: &FuzzMessage| m.flag, |m, v| m.flag = v),
    )
    .field(
      7,
      FieldKind::ENUM,
      Accessor::enumeration(|m: &FuzzMessage| m.status, |m, v| m.status = v),
    )
    .field(
      8,
      FieldKind::STRING,
      Accessor::string(|m: &FuzzMessage| m.text.as_str(), |m, v| m.text = v),
    )
    .field(
      9,
      FieldKind::BYTES,
      Accessor::bytes(|m: &FuzzMessage| &m.blob, |m, v| m.blob = v),
    )
    .field(
      10,
      FieldKind::UINT32_LIST_PACKED,
      Accessor::u32_list(
        |m: &FuzzMessage| m.packed_uint32.as_slice(),
        |m| &mut m.packed_uint32,
      ),
    )
    .field(
      11,
      FieldKind::SFIXED32_LIST,
      Accessor::i32_list(
        |m: &FuzzMessage| m.unpacked_sfixed32.as_slice(),
        |m| &mut m.unpacked_sfixed32,
      ),
    )
    .field(
      12,
      FieldKind::STRING_LIST,
      Accessor::string_list(|m: &FuzzMessage| m.names.as_slice(), |m| &mut m.names),
    )
    .field(
      13,
      FieldKind::MESSAGE_LIST,
      Accessor::recursive_message_list(|m: &FuzzMessage| m.children.as_slice(), |m| &mut m.children),
    )
    .field(
      300,
      FieldKind::MESSAGE,
      Accessor::recursive_message(
        |m: &FuzzMessage| m.next.as_deref(),
        |m| &mut **m.next.get_or_insert_with(Box::default),
      ),
    )
    .build()
    .unwrap()
}

/// Runs `fuzzer` over every file in `corpus_path`. A missing corpus directory runs nothing.
pub fn run_all_corpus<T: for<'a> Arbitrary<'a>>(corpus_path: &str, fuzzer: impl Fn(T)) {
  let Ok(entries) = std::fs::read_dir(corpus_path) else {
    log::info!("no corpus at {corpus_path}");
    return;
  };
  for path in entries {
    let path = path.unwrap().path();
    let mut file = std::fs::File::open(path.clone()).unwrap();
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer).unwrap();
    log::info!("running corpus file: {}", path.display());
    let corpus = T::arbitrary(&mut arbitrary::Unstructured::new(&buffer)).unwrap();
    fuzzer(corpus);
  }
}
