// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./field_kind_test.rs"]
mod tests;

use crate::error::SchemaError;
use bd_wire::WireType;
use std::fmt;

//
// ScalarType
//

/// The declared protobuf type of a field, independent of whether it is repeated. The
/// discriminants are the ids of the singular field kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ScalarType {
  Double   = 0,
  Float    = 1,
  Int64    = 2,
  Uint64   = 3,
  Int32    = 4,
  Fixed64  = 5,
  Fixed32  = 6,
  Bool     = 7,
  String   = 8,
  Message  = 9,
  Bytes    = 10,
  Uint32   = 11,
  Enum     = 12,
  Sfixed32 = 13,
  Sfixed64 = 14,
  Sint32   = 15,
  Sint64   = 16,
}

impl ScalarType {
  pub const ALL: [Self; 17] = [
    Self::Double,
    Self::Float,
    Self::Int64,
    Self::Uint64,
    Self::Int32,
    Self::Fixed64,
    Self::Fixed32,
    Self::Bool,
    Self::String,
    Self::Message,
    Self::Bytes,
    Self::Uint32,
    Self::Enum,
    Self::Sfixed32,
    Self::Sfixed64,
    Self::Sint32,
    Self::Sint64,
  ];

  #[must_use]
  pub const fn wire_type(self) -> WireType {
    match self {
      Self::Int32
      | Self::Int64
      | Self::Uint32
      | Self::Uint64
      | Self::Sint32
      | Self::Sint64
      | Self::Bool
      | Self::Enum => WireType::Varint,
      Self::Fixed64 | Self::Sfixed64 | Self::Double => WireType::Fixed64,
      Self::Fixed32 | Self::Sfixed32 | Self::Float => WireType::Fixed32,
      Self::String | Self::Bytes | Self::Message => WireType::LengthDelimited,
    }
  }

  #[must_use]
  pub const fn value_kind(self) -> ValueKind {
    match self {
      Self::Int32 | Self::Sint32 | Self::Sfixed32 => ValueKind::I32,
      Self::Uint32 | Self::Fixed32 => ValueKind::U32,
      Self::Int64 | Self::Sint64 | Self::Sfixed64 => ValueKind::I64,
      Self::Uint64 | Self::Fixed64 => ValueKind::U64,
      Self::Float => ValueKind::F32,
      Self::Double => ValueKind::F64,
      Self::Bool => ValueKind::Bool,
      Self::String => ValueKind::String,
      Self::Bytes => ValueKind::Bytes,
      Self::Enum => ValueKind::Enum,
      Self::Message => ValueKind::Message,
    }
  }

  /// Whether repeated values of this type may use the packed encoding. Length-delimited types
  /// never can.
  #[must_use]
  pub const fn is_packable(self) -> bool {
    !matches!(self.wire_type(), WireType::LengthDelimited)
  }

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Double => "double",
      Self::Float => "float",
      Self::Int64 => "int64",
      Self::Uint64 => "uint64",
      Self::Int32 => "int32",
      Self::Fixed64 => "fixed64",
      Self::Fixed32 => "fixed32",
      Self::Bool => "bool",
      Self::String => "string",
      Self::Message => "message",
      Self::Bytes => "bytes",
      Self::Uint32 => "uint32",
      Self::Enum => "enum",
      Self::Sfixed32 => "sfixed32",
      Self::Sfixed64 => "sfixed64",
      Self::Sint32 => "sint32",
      Self::Sint64 => "sint64",
    }
  }

  // Position among the packable types, in declaration order. Only meaningful when packable.
  const fn packed_index(self) -> u8 {
    let id = self as u8;
    if id < Self::String as u8 { id } else { id - 3 }
  }
}

impl fmt::Display for ScalarType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

//
// ValueKind
//

/// The in-memory representation an accessor must produce for a field kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
  I32,
  U32,
  I64,
  U64,
  F32,
  F64,
  Bool,
  String,
  Bytes,
  Enum,
  Message,
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::I32 => "i32",
      Self::U32 => "u32",
      Self::I64 => "i64",
      Self::U64 => "u64",
      Self::F32 => "f32",
      Self::F64 => "f64",
      Self::Bool => "bool",
      Self::String => "string",
      Self::Bytes => "bytes",
      Self::Enum => "enum",
      Self::Message => "message",
    })
  }
}

//
// Collection
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
  Scalar,
  List,
  PackedList,
}

//
// FieldKind
//

const LIST_ID_BASE: u8 = 18;
const PACKED_LIST_ID_BASE: u8 = 35;
const ID_TABLE_LEN: usize = 49;

static KINDS_BY_ID: [Option<FieldKind>; ID_TABLE_LEN] = FieldKind::id_table();

/// A field's wire kind: a scalar type combined with singular, repeated or packed repeated
/// cardinality. Packed kinds only exist for packable scalar types, so every `FieldKind` value is
/// valid by construction.
///
/// Ids follow the conventional protobuf numbering: singular kinds are `0..=16`, repeated kinds
/// `18..=34` and packed repeated kinds `35..=48`. Ids 17 and 49 belong to groups, which are not
/// supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldKind {
  scalar: ScalarType,
  collection: Collection,
}

impl FieldKind {
  pub const DOUBLE: Self = Self::singular(ScalarType::Double);
  pub const FLOAT: Self = Self::singular(ScalarType::Float);
  pub const INT64: Self = Self::singular(ScalarType::Int64);
  pub const UINT64: Self = Self::singular(ScalarType::Uint64);
  pub const INT32: Self = Self::singular(ScalarType::Int32);
  pub const FIXED64: Self = Self::singular(ScalarType::Fixed64);
  pub const FIXED32: Self = Self::singular(ScalarType::Fixed32);
  pub const BOOL: Self = Self::singular(ScalarType::Bool);
  pub const STRING: Self = Self::singular(ScalarType::String);
  pub const MESSAGE: Self = Self::singular(ScalarType::Message);
  pub const BYTES: Self = Self::singular(ScalarType::Bytes);
  pub const UINT32: Self = Self::singular(ScalarType::Uint32);
  pub const ENUM: Self = Self::singular(ScalarType::Enum);
  pub const SFIXED32: Self = Self::singular(ScalarType::Sfixed32);
  pub const SFIXED64: Self = Self::singular(ScalarType::Sfixed64);
  pub const SINT32: Self = Self::singular(ScalarType::Sint32);
  pub const SINT64: Self = Self::singular(ScalarType::Sint64);

  pub const DOUBLE_LIST: Self = Self::list(ScalarType::Double);
  pub const FLOAT_LIST: Self = Self::list(ScalarType::Float);
  pub const INT64_LIST: Self = Self::list(ScalarType::Int64);
  pub const UINT64_LIST: Self = Self::list(ScalarType::Uint64);
  pub const INT32_LIST: Self = Self::list(ScalarType::Int32);
  pub const FIXED64_LIST: Self = Self::list(ScalarType::Fixed64);
  pub const FIXED32_LIST: Self = Self::list(ScalarType::Fixed32);
  pub const BOOL_LIST: Self = Self::list(ScalarType::Bool);
  pub const STRING_LIST: Self = Self::list(ScalarType::String);
  pub const MESSAGE_LIST: Self = Self::list(ScalarType::Message);
  pub const BYTES_LIST: Self = Self::list(ScalarType::Bytes);
  pub const UINT32_LIST: Self = Self::list(ScalarType::Uint32);
  pub const ENUM_LIST: Self = Self::list(ScalarType::Enum);
  pub const SFIXED32_LIST: Self = Self::list(ScalarType::Sfixed32);
  pub const SFIXED64_LIST: Self = Self::list(ScalarType::Sfixed64);
  pub const SINT32_LIST: Self = Self::list(ScalarType::Sint32);
  pub const SINT64_LIST: Self = Self::list(ScalarType::Sint64);

  pub const DOUBLE_LIST_PACKED: Self = Self::packed(ScalarType::Double);
  pub const FLOAT_LIST_PACKED: Self = Self::packed(ScalarType::Float);
  pub const INT64_LIST_PACKED: Self = Self::packed(ScalarType::Int64);
  pub const UINT64_LIST_PACKED: Self = Self::packed(ScalarType::Uint64);
  pub const INT32_LIST_PACKED: Self = Self::packed(ScalarType::Int32);
  pub const FIXED64_LIST_PACKED: Self = Self::packed(ScalarType::Fixed64);
  pub const FIXED32_LIST_PACKED: Self = Self::packed(ScalarType::Fixed32);
  pub const BOOL_LIST_PACKED: Self = Self::packed(ScalarType::Bool);
  pub const UINT32_LIST_PACKED: Self = Self::packed(ScalarType::Uint32);
  pub const ENUM_LIST_PACKED: Self = Self::packed(ScalarType::Enum);
  pub const SFIXED32_LIST_PACKED: Self = Self::packed(ScalarType::Sfixed32);
  pub const SFIXED64_LIST_PACKED: Self = Self::packed(ScalarType::Sfixed64);
  pub const SINT32_LIST_PACKED: Self = Self::packed(ScalarType::Sint32);
  pub const SINT64_LIST_PACKED: Self = Self::packed(ScalarType::Sint64);

  #[must_use]
  pub const fn singular(scalar: ScalarType) -> Self {
    Self {
      scalar,
      collection: Collection::Scalar,
    }
  }

  /// A repeated kind with one tag per element.
  #[must_use]
  pub const fn list(scalar: ScalarType) -> Self {
    Self {
      scalar,
      collection: Collection::List,
    }
  }

  /// A repeated kind, packed if `packed` is set and the scalar type allows it.
  #[must_use]
  pub const fn repeated(scalar: ScalarType, packed: bool) -> Self {
    if packed && scalar.is_packable() {
      Self::packed(scalar)
    } else {
      Self::list(scalar)
    }
  }

  // Callers guarantee that `scalar` is packable.
  const fn packed(scalar: ScalarType) -> Self {
    Self {
      scalar,
      collection: Collection::PackedList,
    }
  }

  /// Looks up the kind for a declared field type.
  pub const fn of(scalar: ScalarType, collection: Collection) -> Result<Self, SchemaError> {
    match collection {
      Collection::Scalar => Ok(Self::singular(scalar)),
      Collection::List => Ok(Self::list(scalar)),
      Collection::PackedList if scalar.is_packable() => Ok(Self::packed(scalar)),
      Collection::PackedList => Err(SchemaError::UnpackableKind { scalar }),
    }
  }

  /// Looks up a kind by its stable id. O(1).
  pub fn from_id(id: u32) -> Result<Self, SchemaError> {
    usize::try_from(id)
      .ok()
      .and_then(|index| KINDS_BY_ID.get(index).copied().flatten())
      .ok_or(SchemaError::UnknownKindId { id })
  }

  #[must_use]
  pub const fn id(self) -> u8 {
    match self.collection {
      Collection::Scalar => self.scalar as u8,
      Collection::List => LIST_ID_BASE + self.scalar as u8,
      Collection::PackedList => PACKED_LIST_ID_BASE + self.scalar.packed_index(),
    }
  }

  #[must_use]
  pub const fn scalar_type(self) -> ScalarType {
    self.scalar
  }

  #[must_use]
  pub const fn collection(self) -> Collection {
    self.collection
  }

  /// The wire type carried by each tag of a field of this kind. Packed lists are a single
  /// length-delimited block; unpacked lists tag every element with the element's wire type.
  #[must_use]
  pub const fn wire_type(self) -> WireType {
    match self.collection {
      Collection::Scalar | Collection::List => self.scalar.wire_type(),
      Collection::PackedList => WireType::LengthDelimited,
    }
  }

  #[must_use]
  pub const fn value_kind(self) -> ValueKind {
    self.scalar.value_kind()
  }

  #[must_use]
  pub const fn is_list(self) -> bool {
    !matches!(self.collection, Collection::Scalar)
  }

  #[must_use]
  pub const fn is_packed(self) -> bool {
    matches!(self.collection, Collection::PackedList)
  }

  #[must_use]
  pub const fn is_packable(self) -> bool {
    self.scalar.is_packable()
  }

  /// Verifies that an accessor producing `value_kind` values (as a list if `list` is set) can
  /// back a field of this kind.
  pub fn check_accessor(
    self,
    field_number: u32,
    value_kind: ValueKind,
    list: bool,
  ) -> Result<(), SchemaError> {
    if self.value_kind() == value_kind && self.is_list() == list {
      return Ok(());
    }
    Err(SchemaError::IncompatibleAccessor {
      field_number,
      kind: self,
      value_kind,
      list,
    })
  }

  const fn id_table() -> [Option<Self>; ID_TABLE_LEN] {
    let mut table = [None; ID_TABLE_LEN];
    let mut i = 0;
    while i < ScalarType::ALL.len() {
      let scalar = ScalarType::ALL[i];
      let singular = Self::singular(scalar);
      table[singular.id() as usize] = Some(singular);
      let list = Self::list(scalar);
      table[list.id() as usize] = Some(list);
      if scalar.is_packable() {
        let packed = Self::packed(scalar);
        table[packed.id() as usize] = Some(packed);
      }
      i += 1;
    }
    table
  }
}

impl fmt::Display for FieldKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.collection {
      Collection::Scalar => write!(f, "{}", self.scalar),
      Collection::List => write!(f, "repeated {}", self.scalar),
      Collection::PackedList => write!(f, "repeated {} [packed]", self.scalar),
    }
  }
}
