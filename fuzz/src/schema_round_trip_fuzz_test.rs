// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::{FuzzMessage, fuzz_message_schema};
use bd_schema::Error;

#[derive(Debug)]
pub struct SchemaRoundTripFuzzTestCase {
  message: FuzzMessage,
}

impl<'a> arbitrary::Arbitrary<'a> for SchemaRoundTripFuzzTestCase {
  fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
    Ok(Self {
      message: u.arbitrary()?,
    })
  }
}

pub struct SchemaRoundTripFuzzTest {
  test_case: SchemaRoundTripFuzzTestCase,
}

impl SchemaRoundTripFuzzTest {
  #[must_use]
  pub const fn new(test_case: SchemaRoundTripFuzzTestCase) -> Self {
    Self { test_case }
  }

  // Floats may be NaN, so round trips are compared through their encodings.
  pub fn run(self) {
    let schema = fuzz_message_schema();
    let message = self.test_case.message;

    let encoded = match schema.encode(&message) {
      Ok(encoded) => encoded,
      Err(Error::RecursionLimitExceeded { .. }) => return,
      Err(err) => panic!("encoding should succeed: {err}"),
    };
    assert_eq!(encoded.len(), schema.compute_size(&message).unwrap());

    let decoded = match schema.decode(&encoded) {
      Ok(decoded) => decoded,
      Err(err) => panic!("decoding should succeed: {err}"),
    };
    assert_eq!(encoded, schema.encode(&decoded).unwrap());
    assert_eq!(message.text, decoded.text);
    assert_eq!(message.blob, decoded.blob);
    assert_eq!(message.packed_uint32, decoded.packed_uint32);
    assert_eq!(message.children.len(), decoded.children.len());
  }
}

#[test]
fn seeded_inputs() {
  let message = FuzzMessage {
    int32: -1,
    double: f64::NAN,
    float: -0.0,
    text: "ünïcode".to_string(),
    packed_uint32: vec![0, u32::MAX],
    unpacked_sfixed32: vec![-1],
    names: vec![String::new()],
    children: vec![FuzzMessage::default()],
    next: Some(Box::new(FuzzMessage {
      flag: true,
      ..FuzzMessage::default()
    })),
    ..FuzzMessage::default()
  };
  SchemaRoundTripFuzzTest::new(SchemaRoundTripFuzzTestCase { message }).run();

  let mut deep = FuzzMessage::default();
  for _ in 0 .. 200 {
    deep = FuzzMessage {
      next: Some(Box::new(deep)),
      ..FuzzMessage::default()
    };
  }
  SchemaRoundTripFuzzTest::new(SchemaRoundTripFuzzTestCase { message: deep }).run();
}

#[test]
fn run_all_corpus() {
  crate::run_all_corpus(
    "corpus/schema_round_trip_fuzz_test",
    |input: SchemaRoundTripFuzzTestCase| {
      SchemaRoundTripFuzzTest::new(input).run();
    },
  );
}
