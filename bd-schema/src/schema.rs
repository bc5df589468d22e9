// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./schema_test.rs"]
mod tests;

use crate::accessor::{Accessor, List, Scalar};
use crate::binary_reader::BinaryReader;
use crate::binary_writer::BinaryWriter;
use crate::config::CodecConfig;
use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::error::{Error, Result, SchemaError};
use crate::field_kind::{FieldKind, ScalarType};
use crate::reader::{MessageMerge, Reader};
use crate::size_writer::SizeWriter;
use crate::text_writer::TextWriter;
use crate::writer::{MessageWrite, Writer};
use bytes::Bytes;
use std::fmt;

//
// Schema
//

/// The serialization behavior of message type `M`: writes a message's fields to a [`Writer`] and
/// merges fields from a [`Reader`], driven by a [`MessageDescriptor`].
///
/// A schema holds no per-call state. Build it once and share it, for example through a
/// [`crate::SchemaRegistry`].
pub struct Schema<M> {
  descriptor: MessageDescriptor<M>,
  type_name: &'static str,
}

impl<M> Schema<M> {
  #[must_use]
  pub fn new(descriptor: MessageDescriptor<M>) -> Self {
    let type_name = std::any::type_name::<M>();
    log::debug!(
      "built schema for {type_name} with fields {:?}",
      descriptor.field_numbers().collect::<Vec<_>>()
    );
    Self {
      descriptor,
      type_name,
    }
  }

  #[must_use]
  pub fn builder() -> SchemaBuilder<M> {
    SchemaBuilder::default()
  }

  #[must_use]
  pub const fn descriptor(&self) -> &MessageDescriptor<M> {
    &self.descriptor
  }

  #[must_use]
  pub const fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Writes every field that is not at its default value, in ascending field number order.
  pub fn write_to(&self, message: &M, writer: &mut dyn Writer) -> Result<()> {
    for field in self.descriptor.fields() {
      self.write_field(field, message, writer)?;
    }
    Ok(())
  }

  /// Reads fields until the reader reports that none remain. Known fields are merged into
  /// `message`: singular fields are overwritten (embedded messages are merged), repeated fields
  /// are appended to. Unknown fields are skipped.
  ///
  /// On error `message` may be partially updated and should be discarded.
  pub fn merge_from(&self, message: &mut M, reader: &mut dyn Reader) -> Result<()> {
    while let Some(field_number) = reader.field_number()? {
      if let Some(field) = self.descriptor.find(field_number) {
        self.merge_field(field, message, reader)?;
      } else {
        log::trace!("{}: skipping unknown field {field_number}", self.type_name);
        if !reader.skip_field()? {
          break;
        }
      }
    }
    Ok(())
  }

  /// Encodes `message` with the default [`CodecConfig`].
  pub fn encode(&self, message: &M) -> Result<Bytes> {
    self.encode_with(message, &CodecConfig::default())
  }

  pub fn encode_with(&self, message: &M, config: &CodecConfig) -> Result<Bytes> {
    let mut writer = BinaryWriter::with_capacity(config, self.compute_size(message)?);
    self.write_to(message, &mut writer)?;
    Ok(writer.finish())
  }

  /// The number of bytes [`Schema::encode`] produces for `message`.
  pub fn compute_size(&self, message: &M) -> Result<usize> {
    let mut writer = SizeWriter::new();
    self.write_to(message, &mut writer)?;
    Ok(writer.len())
  }

  pub fn merge_from_bytes(&self, message: &mut M, bytes: &[u8]) -> Result<()> {
    self.merge_from_bytes_with(message, bytes, &CodecConfig::default())
  }

  pub fn merge_from_bytes_with(
    &self,
    message: &mut M,
    bytes: &[u8],
    config: &CodecConfig,
  ) -> Result<()> {
    if bytes.len() > config.max_message_size {
      return Err(Error::MessageTooLarge {
        size: bytes.len(),
        limit: config.max_message_size,
      });
    }
    let mut reader = BinaryReader::with_config(bytes, config);
    self.merge_from(message, &mut reader).inspect_err(|e| {
      log::debug!("failed to decode {}: {e}", self.type_name);
    })
  }

  /// Decodes a new message with the default [`CodecConfig`].
  pub fn decode(&self, bytes: &[u8]) -> Result<M>
  where
    M: Default,
  {
    self.decode_with(bytes, &CodecConfig::default())
  }

  pub fn decode_with(&self, bytes: &[u8], config: &CodecConfig) -> Result<M>
  where
    M: Default,
  {
    let mut message = M::default();
    self.merge_from_bytes_with(&mut message, bytes, config)?;
    Ok(message)
  }

  /// Renders `message` in the indented text format of [`TextWriter`].
  pub fn to_text(&self, message: &M) -> Result<String> {
    let mut writer = TextWriter::new();
    self.write_to(message, &mut writer)?;
    Ok(writer.finish())
  }

  fn write_field(
    &self,
    field: &FieldDescriptor<M>,
    message: &M,
    writer: &mut dyn Writer,
  ) -> Result<()> {
    let number = field.number();
    let kind = field.kind();
    let packed = kind.is_packed();

    match field.accessor() {
      Accessor::I32(Scalar { get, .. }) => match get(message) {
        0 => Ok(()),
        value => match kind.scalar_type() {
          ScalarType::Int32 => writer.write_int32(number, value),
          ScalarType::Sint32 => writer.write_sint32(number, value),
          ScalarType::Sfixed32 => writer.write_sfixed32(number, value),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      Accessor::U32(Scalar { get, .. }) => match get(message) {
        0 => Ok(()),
        value => match kind.scalar_type() {
          ScalarType::Uint32 => writer.write_uint32(number, value),
          ScalarType::Fixed32 => writer.write_fixed32(number, value),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      Accessor::I64(Scalar { get, .. }) => match get(message) {
        0 => Ok(()),
        value => match kind.scalar_type() {
          ScalarType::Int64 => writer.write_int64(number, value),
          ScalarType::Sint64 => writer.write_sint64(number, value),
          ScalarType::Sfixed64 => writer.write_sfixed64(number, value),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      Accessor::U64(Scalar { get, .. }) => match get(message) {
        0 => Ok(()),
        value => match kind.scalar_type() {
          ScalarType::Uint64 => writer.write_uint64(number, value),
          ScalarType::Fixed64 => writer.write_fixed64(number, value),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      // Only +0.0 is the default: -0.0 and NaN are written.
      Accessor::F32(Scalar { get, .. }) => match get(message) {
        value if value.to_bits() == 0 => Ok(()),
        value => writer.write_float(number, value),
      },
      Accessor::F64(Scalar { get, .. }) => match get(message) {
        value if value.to_bits() == 0 => Ok(()),
        value => writer.write_double(number, value),
      },
      Accessor::Bool(Scalar { get, .. }) => {
        if get(message) {
          writer.write_bool(number, true)
        } else {
          Ok(())
        }
      },
      Accessor::Enum(Scalar { get, .. }) => match get(message) {
        0 => Ok(()),
        value => writer.write_enum(number, value),
      },
      Accessor::String { get, .. } => match get(message) {
        "" => Ok(()),
        value => writer.write_string(number, value),
      },
      Accessor::Bytes { get, .. } => match get(message) {
        value if value.is_empty() => Ok(()),
        value => writer.write_bytes(number, value),
      },
      Accessor::Message(field) => field.write_field(self, message, number, writer),
      Accessor::I32List(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => match kind.scalar_type() {
          ScalarType::Int32 => writer.write_int32_list(number, values, packed),
          ScalarType::Sint32 => writer.write_sint32_list(number, values, packed),
          ScalarType::Sfixed32 => writer.write_sfixed32_list(number, values, packed),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      Accessor::U32List(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => match kind.scalar_type() {
          ScalarType::Uint32 => writer.write_uint32_list(number, values, packed),
          ScalarType::Fixed32 => writer.write_fixed32_list(number, values, packed),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      Accessor::I64List(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => match kind.scalar_type() {
          ScalarType::Int64 => writer.write_int64_list(number, values, packed),
          ScalarType::Sint64 => writer.write_sint64_list(number, values, packed),
          ScalarType::Sfixed64 => writer.write_sfixed64_list(number, values, packed),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      Accessor::U64List(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => match kind.scalar_type() {
          ScalarType::Uint64 => writer.write_uint64_list(number, values, packed),
          ScalarType::Fixed64 => writer.write_fixed64_list(number, values, packed),
          _ => Err(Error::UnsupportedKind(kind)),
        },
      },
      Accessor::F32List(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => writer.write_float_list(number, values, packed),
      },
      Accessor::F64List(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => writer.write_double_list(number, values, packed),
      },
      Accessor::BoolList(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => writer.write_bool_list(number, values, packed),
      },
      Accessor::EnumList(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => writer.write_enum_list(number, values, packed),
      },
      Accessor::StringList(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => writer.write_string_list(number, values),
      },
      Accessor::BytesList(List { get, .. }) => match get(message) {
        [] => Ok(()),
        values => writer.write_bytes_list(number, values),
      },
    }
  }

  fn merge_field(
    &self,
    field: &FieldDescriptor<M>,
    message: &mut M,
    reader: &mut dyn Reader,
  ) -> Result<()> {
    let kind = field.kind();

    match field.accessor() {
      Accessor::I32(Scalar { set, .. }) => {
        let value = match kind.scalar_type() {
          ScalarType::Int32 => reader.read_int32()?,
          ScalarType::Sint32 => reader.read_sint32()?,
          ScalarType::Sfixed32 => reader.read_sfixed32()?,
          _ => return Err(Error::UnsupportedKind(kind)),
        };
        set(message, value);
      },
      Accessor::U32(Scalar { set, .. }) => {
        let value = match kind.scalar_type() {
          ScalarType::Uint32 => reader.read_uint32()?,
          ScalarType::Fixed32 => reader.read_fixed32()?,
          _ => return Err(Error::UnsupportedKind(kind)),
        };
        set(message, value);
      },
      Accessor::I64(Scalar { set, .. }) => {
        let value = match kind.scalar_type() {
          ScalarType::Int64 => reader.read_int64()?,
          ScalarType::Sint64 => reader.read_sint64()?,
          ScalarType::Sfixed64 => reader.read_sfixed64()?,
          _ => return Err(Error::UnsupportedKind(kind)),
        };
        set(message, value);
      },
      Accessor::U64(Scalar { set, .. }) => {
        let value = match kind.scalar_type() {
          ScalarType::Uint64 => reader.read_uint64()?,
          ScalarType::Fixed64 => reader.read_fixed64()?,
          _ => return Err(Error::UnsupportedKind(kind)),
        };
        set(message, value);
      },
      Accessor::F32(Scalar { set, .. }) => set(message, reader.read_float()?),
      Accessor::F64(Scalar { set, .. }) => set(message, reader.read_double()?),
      Accessor::Bool(Scalar { set, .. }) => set(message, reader.read_bool()?),
      Accessor::Enum(Scalar { set, .. }) => set(message, reader.read_enum()?),
      Accessor::String { set, .. } => set(message, reader.read_string()?),
      Accessor::Bytes { set, .. } => set(message, reader.read_bytes()?),
      Accessor::Message(field) => field.merge_field(self, message, reader)?,
      Accessor::I32List(List { get_mut, .. }) => {
        let values = get_mut(message);
        match kind.scalar_type() {
          ScalarType::Int32 => reader.read_int32_list(values)?,
          ScalarType::Sint32 => reader.read_sint32_list(values)?,
          ScalarType::Sfixed32 => reader.read_sfixed32_list(values)?,
          _ => return Err(Error::UnsupportedKind(kind)),
        }
      },
      Accessor::U32List(List { get_mut, .. }) => {
        let values = get_mut(message);
        match kind.scalar_type() {
          ScalarType::Uint32 => reader.read_uint32_list(values)?,
          ScalarType::Fixed32 => reader.read_fixed32_list(values)?,
          _ => return Err(Error::UnsupportedKind(kind)),
        }
      },
      Accessor::I64List(List { get_mut, .. }) => {
        let values = get_mut(message);
        match kind.scalar_type() {
          ScalarType::Int64 => reader.read_int64_list(values)?,
          ScalarType::Sint64 => reader.read_sint64_list(values)?,
          ScalarType::Sfixed64 => reader.read_sfixed64_list(values)?,
          _ => return Err(Error::UnsupportedKind(kind)),
        }
      },
      Accessor::U64List(List { get_mut, .. }) => {
        let values = get_mut(message);
        match kind.scalar_type() {
          ScalarType::Uint64 => reader.read_uint64_list(values)?,
          ScalarType::Fixed64 => reader.read_fixed64_list(values)?,
          _ => return Err(Error::UnsupportedKind(kind)),
        }
      },
      Accessor::F32List(List { get_mut, .. }) => reader.read_float_list(get_mut(message))?,
      Accessor::F64List(List { get_mut, .. }) => reader.read_double_list(get_mut(message))?,
      Accessor::BoolList(List { get_mut, .. }) => reader.read_bool_list(get_mut(message))?,
      Accessor::EnumList(List { get_mut, .. }) => reader.read_enum_list(get_mut(message))?,
      Accessor::StringList(List { get_mut, .. }) => reader.read_string_list(get_mut(message))?,
      Accessor::BytesList(List { get_mut, .. }) => reader.read_bytes_list(get_mut(message))?,
    }
    Ok(())
  }
}

impl<M> fmt::Debug for Schema<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Schema")
      .field("type_name", &self.type_name)
      .field("fields", &self.descriptor)
      .finish()
  }
}

//
// SchemaBuilder
//

/// Declares the fields of a message type and builds its [`Schema`]. Fields may be declared in
/// any order.
pub struct SchemaBuilder<M> {
  fields: Vec<FieldDescriptor<M>>,
}

impl<M> Default for SchemaBuilder<M> {
  fn default() -> Self {
    Self { fields: Vec::new() }
  }
}

impl<M> SchemaBuilder<M> {
  #[must_use]
  pub fn field(mut self, number: u32, kind: FieldKind, accessor: Accessor<M>) -> Self {
    self
      .fields
      .push(FieldDescriptor::new(number, kind, accessor));
    self
  }

  #[must_use]
  pub fn named_field(
    mut self,
    name: &'static str,
    number: u32,
    kind: FieldKind,
    accessor: Accessor<M>,
  ) -> Self {
    self
      .fields
      .push(FieldDescriptor::new(number, kind, accessor).with_name(name));
    self
  }

  pub fn build(self) -> std::result::Result<Schema<M>, SchemaError> {
    MessageDescriptor::build(self.fields)
      .map(Schema::new)
      .inspect_err(|e| log::debug!("invalid schema for {}: {e}", std::any::type_name::<M>()))
  }
}

//
// Bound / BoundMut
//

/// A message paired with its schema, as handed to [`Writer::write_message`].
pub struct Bound<'a, M> {
  schema: &'a Schema<M>,
  message: &'a M,
}

impl<'a, M> Bound<'a, M> {
  #[must_use]
  pub const fn new(schema: &'a Schema<M>, message: &'a M) -> Self {
    Self { schema, message }
  }
}

impl<M> MessageWrite for Bound<'_, M> {
  fn write_fields(&self, writer: &mut dyn Writer) -> Result<()> {
    self.schema.write_to(self.message, writer)
  }
}

/// A mutable message paired with its schema, as handed to [`Reader::read_message`].
pub struct BoundMut<'a, M> {
  schema: &'a Schema<M>,
  message: &'a mut M,
}

impl<'a, M> BoundMut<'a, M> {
  #[must_use]
  pub const fn new(schema: &'a Schema<M>, message: &'a mut M) -> Self {
    Self { schema, message }
  }
}

impl<M> MessageMerge for BoundMut<'_, M> {
  fn merge_fields(&mut self, reader: &mut dyn Reader) -> Result<()> {
    self.schema.merge_from(self.message, reader)
  }
}
