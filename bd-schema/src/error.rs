// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use crate::field_kind::{FieldKind, ScalarType, ValueKind};
use bd_wire::WireType;

/// A message layout that cannot be built. These indicate programming errors and are reported
/// once, when the schema is constructed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaError {
  #[error("a message schema needs at least one field")]
  Empty,

  #[error("field number {field_number} is outside 1..=536870911")]
  InvalidFieldNumber { field_number: u32 },

  #[error("field number {field_number} is declared more than once")]
  DuplicateFieldNumber { field_number: u32 },

  #[error("field {field_number}: {kind} cannot be backed by a {value_kind} accessor (list: {list})")]
  IncompatibleAccessor {
    field_number: u32,
    kind: FieldKind,
    value_kind: ValueKind,
    list: bool,
  },

  #[error("{scalar} fields cannot be packed")]
  UnpackableKind { scalar: ScalarType },

  #[error("no field kind has id {id}")]
  UnknownKindId { id: u32 },
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("wire error: {0}")]
  Wire(#[from] bd_wire::Error),

  #[error("schema error: {0}")]
  Schema(#[from] SchemaError),

  #[error("field kind {0} is not supported by this reader or writer")]
  UnsupportedKind(FieldKind),

  #[error("field {field_number}: expected wire type {expected}, found {actual}")]
  WireTypeMismatch {
    field_number: u32,
    expected: WireType,
    actual: WireType,
  },

  #[error("field {field_number}: string is not valid UTF-8")]
  InvalidUtf8 { field_number: u32 },

  #[error("message nesting exceeds the recursion limit of {limit}")]
  RecursionLimitExceeded { limit: u32 },

  #[error("message of {size} bytes exceeds the maximum of {limit} bytes")]
  MessageTooLarge { size: usize, limit: usize },

  #[error("text formatting failed")]
  Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
