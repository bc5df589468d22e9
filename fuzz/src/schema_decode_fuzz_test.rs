// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::fuzz_message_schema;
use arbitrary::Arbitrary;
use bd_schema::{CodecConfig, Utf8Policy};

#[derive(Arbitrary, Debug)]
pub struct SchemaDecodeFuzzTestCase {
  data: Vec<u8>,
  lossy: bool,
}

pub struct SchemaDecodeFuzzTest {
  test_case: SchemaDecodeFuzzTestCase,
}

impl SchemaDecodeFuzzTest {
  #[must_use]
  pub const fn new(test_case: SchemaDecodeFuzzTestCase) -> Self {
    Self { test_case }
  }

  // Arbitrary input either fails to decode or decodes to a message whose encoding is stable.
  pub fn run(self) {
    let schema = fuzz_message_schema();
    let config = CodecConfig {
      recursion_limit: 16,
      utf8_policy: if self.test_case.lossy {
        Utf8Policy::Lossy
      } else {
        Utf8Policy::Strict
      },
      ..CodecConfig::default()
    };

    let Ok(message) = schema.decode_with(&self.test_case.data, &config) else {
      return;
    };
    let encoded = schema.encode(&message).unwrap();
    assert_eq!(encoded.len(), schema.compute_size(&message).unwrap());
    let decoded = schema.decode(&encoded).unwrap();
    assert_eq!(encoded, schema.encode(&decoded).unwrap());
  }
}

#[test]
fn seeded_inputs() {
  for data in [
    vec![],
    vec![0x08, 0xff, 0xff, 0xff, 0xff, 0x0f],
    vec![0x42, 0x02, 0xff, 0xfe],
    vec![0x52, 0x03, 0x01, 0x80, 0x01, 0x50, 0x02],
    vec![0x6a, 0x02, 0x08, 0x01, 0x6a, 0x00],
    vec![0xe2, 0x12, 0x02, 0xe2, 0x12, 0x00],
    vec![0x6a, 0x05, 0x08, 0x01],
  ] {
    for lossy in [false, true] {
      SchemaDecodeFuzzTest::new(SchemaDecodeFuzzTestCase {
        data: data.clone(),
        lossy,
      })
      .run();
    }
  }
}

#[test]
fn run_all_corpus() {
  crate::run_all_corpus(
    "corpus/schema_decode_fuzz_test",
    |input: SchemaDecodeFuzzTestCase| {
      SchemaDecodeFuzzTest::new(input).run();
    },
  );
}
