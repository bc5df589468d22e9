// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./accessor_test.rs"]
mod tests;

use crate::error::Result;
use crate::field_kind::ValueKind;
use crate::reader::Reader;
use crate::schema::{Bound, BoundMut, Schema};
use crate::writer::Writer;
use bd_byte_string::ByteString;
use std::fmt;
use std::sync::Arc;

/// Getter and setter for a singular scalar field.
pub struct Scalar<M, T> {
  pub(crate) get: fn(&M) -> T,
  pub(crate) set: fn(&mut M, T),
}

/// Read access to a repeated field and mutable access to its backing vector.
pub struct List<M, T> {
  pub(crate) get: fn(&M) -> &[T],
  pub(crate) get_mut: fn(&mut M) -> &mut Vec<T>,
}

//
// MessageField
//

/// Type-erased access to an embedded message field (singular or repeated) of `M`. The owning
/// schema is passed in so that a message type can embed itself.
pub trait MessageField<M>: Send + Sync {
  fn is_list(&self) -> bool;

  /// Emits the field. An absent singular message or an empty list emits nothing.
  fn write_field(
    &self,
    owner: &Schema<M>,
    message: &M,
    field_number: u32,
    writer: &mut dyn Writer,
  ) -> Result<()>;

  /// Consumes one occurrence of the field. A singular message merges into the existing value; a
  /// repeated field gains one element.
  fn merge_field(
    &self,
    owner: &Schema<M>,
    message: &mut M,
    reader: &mut dyn Reader,
  ) -> Result<()>;
}

// Where an embedded message's schema comes from: a shared schema for another type, or the
// owning schema for self-referential types.
trait SchemaSource<M, T>: Send + Sync {
  fn resolve<'a>(&'a self, owner: &'a Schema<M>) -> &'a Schema<T>;
}

impl<M, T> SchemaSource<M, T> for Arc<Schema<T>> {
  fn resolve<'a>(&'a self, _owner: &'a Schema<M>) -> &'a Schema<T> {
    self
  }
}

struct Owner;

impl<M> SchemaSource<M, M> for Owner {
  fn resolve<'a>(&'a self, owner: &'a Schema<M>) -> &'a Schema<M> {
    owner
  }
}

struct SingularMessage<M, T, S> {
  schema: S,
  get: fn(&M) -> Option<&T>,
  get_mut: fn(&mut M) -> &mut T,
}

impl<M, T, S: SchemaSource<M, T>> MessageField<M> for SingularMessage<M, T, S> {
  fn is_list(&self) -> bool {
    false
  }

  fn write_field(
    &self,
    owner: &Schema<M>,
    message: &M,
    field_number: u32,
    writer: &mut dyn Writer,
  ) -> Result<()> {
    let Some(child) = (self.get)(message) else {
      return Ok(());
    };
    writer.write_message(field_number, &Bound::new(self.schema.resolve(owner), child))
  }

  fn merge_field(
    &self,
    owner: &Schema<M>,
    message: &mut M,
    reader: &mut dyn Reader,
  ) -> Result<()> {
    let child = (self.get_mut)(message);
    reader.read_message(&mut BoundMut::new(self.schema.resolve(owner), child))
  }
}

struct RepeatedMessage<M, T, S> {
  schema: S,
  get: fn(&M) -> &[T],
  get_mut: fn(&mut M) -> &mut Vec<T>,
}

impl<M, T: Default, S: SchemaSource<M, T>> MessageField<M> for RepeatedMessage<M, T, S> {
  fn is_list(&self) -> bool {
    true
  }

  fn write_field(
    &self,
    owner: &Schema<M>,
    message: &M,
    field_number: u32,
    writer: &mut dyn Writer,
  ) -> Result<()> {
    let schema = self.schema.resolve(owner);
    for child in (self.get)(message) {
      writer.write_message(field_number, &Bound::new(schema, child))?;
    }
    Ok(())
  }

  fn merge_field(
    &self,
    owner: &Schema<M>,
    message: &mut M,
    reader: &mut dyn Reader,
  ) -> Result<()> {
    let mut child = T::default();
    reader.read_message(&mut BoundMut::new(self.schema.resolve(owner), &mut child))?;
    (self.get_mut)(message).push(child);
    Ok(())
  }
}

//
// Accessor
//

/// How the dispatcher reads and writes one field of a message of type `M`. Each variant fixes
/// the in-memory representation, which the field's kind is checked against when the descriptor
/// is built.
pub enum Accessor<M> {
  I32(Scalar<M, i32>),
  U32(Scalar<M, u32>),
  I64(Scalar<M, i64>),
  U64(Scalar<M, u64>),
  F32(Scalar<M, f32>),
  F64(Scalar<M, f64>),
  Bool(Scalar<M, bool>),
  Enum(Scalar<M, i32>),
  String {
    get: fn(&M) -> &str,
    set: fn(&mut M, String),
  },
  Bytes {
    get: fn(&M) -> &ByteString,
    set: fn(&mut M, ByteString),
  },
  Message(Arc<dyn MessageField<M>>),
  I32List(List<M, i32>),
  U32List(List<M, u32>),
  I64List(List<M, i64>),
  U64List(List<M, u64>),
  F32List(List<M, f32>),
  F64List(List<M, f64>),
  BoolList(List<M, bool>),
  EnumList(List<M, i32>),
  StringList(List<M, String>),
  BytesList(List<M, ByteString>),
}

macro_rules! scalar_accessors {
  ($($single:ident, $list:ident, $variant:ident, $list_variant:ident, $ty:ty;)*) => {
    $(
      #[must_use]
      pub fn $single(get: fn(&M) -> $ty, set: fn(&mut M, $ty)) -> Self {
        Self::$variant(Scalar { get, set })
      }

      #[must_use]
      pub fn $list(get: fn(&M) -> &[$ty], get_mut: fn(&mut M) -> &mut Vec<$ty>) -> Self {
        Self::$list_variant(List { get, get_mut })
      }
    )*
  };
}

impl<M: 'static> Accessor<M> {
  scalar_accessors! {
    i32, i32_list, I32, I32List, i32;
    u32, u32_list, U32, U32List, u32;
    i64, i64_list, I64, I64List, i64;
    u64, u64_list, U64, U64List, u64;
    f32, f32_list, F32, F32List, f32;
    f64, f64_list, F64, F64List, f64;
    bool, bool_list, Bool, BoolList, bool;
    enumeration, enumeration_list, Enum, EnumList, i32;
  }

  #[must_use]
  pub fn string(get: fn(&M) -> &str, set: fn(&mut M, String)) -> Self {
    Self::String { get, set }
  }

  #[must_use]
  pub fn string_list(get: fn(&M) -> &[String], get_mut: fn(&mut M) -> &mut Vec<String>) -> Self {
    Self::StringList(List { get, get_mut })
  }

  #[must_use]
  pub fn bytes(get: fn(&M) -> &ByteString, set: fn(&mut M, ByteString)) -> Self {
    Self::Bytes { get, set }
  }

  #[must_use]
  pub fn bytes_list(
    get: fn(&M) -> &[ByteString],
    get_mut: fn(&mut M) -> &mut Vec<ByteString>,
  ) -> Self {
    Self::BytesList(List { get, get_mut })
  }

  /// An embedded message of another type. `get` returns `None` when the field is absent;
  /// `get_mut` returns the value to merge into, creating it if needed.
  #[must_use]
  pub fn message<T: 'static>(
    schema: Arc<Schema<T>>,
    get: fn(&M) -> Option<&T>,
    get_mut: fn(&mut M) -> &mut T,
  ) -> Self {
    Self::Message(Arc::new(SingularMessage {
      schema,
      get,
      get_mut,
    }))
  }

  #[must_use]
  pub fn message_list<T: Default + 'static>(
    schema: Arc<Schema<T>>,
    get: fn(&M) -> &[T],
    get_mut: fn(&mut M) -> &mut Vec<T>,
  ) -> Self {
    Self::Message(Arc::new(RepeatedMessage {
      schema,
      get,
      get_mut,
    }))
  }

  /// An embedded message of the owning type itself, typically held in an `Option<Box<M>>`.
  #[must_use]
  pub fn recursive_message(get: fn(&M) -> Option<&M>, get_mut: fn(&mut M) -> &mut M) -> Self {
    Self::Message(Arc::new(SingularMessage {
      schema: Owner,
      get,
      get_mut,
    }))
  }

  #[must_use]
  pub fn recursive_message_list(get: fn(&M) -> &[M], get_mut: fn(&mut M) -> &mut Vec<M>) -> Self
  where
    M: Default,
  {
    Self::Message(Arc::new(RepeatedMessage {
      schema: Owner,
      get,
      get_mut,
    }))
  }
}

impl<M> Accessor<M> {
  #[must_use]
  pub fn value_kind(&self) -> ValueKind {
    match self {
      Self::I32(_) | Self::I32List(_) => ValueKind::I32,
      Self::U32(_) | Self::U32List(_) => ValueKind::U32,
      Self::I64(_) | Self::I64List(_) => ValueKind::I64,
      Self::U64(_) | Self::U64List(_) => ValueKind::U64,
      Self::F32(_) | Self::F32List(_) => ValueKind::F32,
      Self::F64(_) | Self::F64List(_) => ValueKind::F64,
      Self::Bool(_) | Self::BoolList(_) => ValueKind::Bool,
      Self::Enum(_) | Self::EnumList(_) => ValueKind::Enum,
      Self::String { .. } | Self::StringList(_) => ValueKind::String,
      Self::Bytes { .. } | Self::BytesList(_) => ValueKind::Bytes,
      Self::Message(_) => ValueKind::Message,
    }
  }

  #[must_use]
  pub fn is_list(&self) -> bool {
    match self {
      Self::I32(_)
      | Self::U32(_)
      | Self::I64(_)
      | Self::U64(_)
      | Self::F32(_)
      | Self::F64(_)
      | Self::Bool(_)
      | Self::Enum(_)
      | Self::String { .. }
      | Self::Bytes { .. } => false,
      Self::Message(field) => field.is_list(),
      Self::I32List(_)
      | Self::U32List(_)
      | Self::I64List(_)
      | Self::U64List(_)
      | Self::F32List(_)
      | Self::F64List(_)
      | Self::BoolList(_)
      | Self::EnumList(_)
      | Self::StringList(_)
      | Self::BytesList(_) => true,
    }
  }
}

impl<M> fmt::Debug for Accessor<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_list() {
      write!(f, "Accessor([{}])", self.value_kind())
    } else {
      write!(f, "Accessor({})", self.value_kind())
    }
  }
}
