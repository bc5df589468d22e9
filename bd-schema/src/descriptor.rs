// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./descriptor_test.rs"]
mod tests;

use crate::accessor::Accessor;
use crate::error::SchemaError;
use crate::field_kind::FieldKind;
use bd_wire::MAX_FIELD_NUMBER;
use std::fmt;

// Field numbers up to this bound always get a direct lookup table.
const DENSE_INDEX_MIN_SLOTS: u32 = 64;

//
// FieldDescriptor
//

pub struct FieldDescriptor<M> {
  number: u32,
  kind: FieldKind,
  accessor: Accessor<M>,
  name: Option<&'static str>,
}

impl<M> FieldDescriptor<M> {
  #[must_use]
  pub const fn new(number: u32, kind: FieldKind, accessor: Accessor<M>) -> Self {
    Self {
      number,
      kind,
      accessor,
      name: None,
    }
  }

  #[must_use]
  pub fn with_name(mut self, name: &'static str) -> Self {
    self.name = Some(name);
    self
  }

  #[must_use]
  pub const fn number(&self) -> u32 {
    self.number
  }

  #[must_use]
  pub const fn kind(&self) -> FieldKind {
    self.kind
  }

  #[must_use]
  pub const fn accessor(&self) -> &Accessor<M> {
    &self.accessor
  }

  #[must_use]
  pub const fn name(&self) -> Option<&'static str> {
    self.name
  }

  fn validate(&self) -> Result<(), SchemaError> {
    if self.number == 0 || self.number > MAX_FIELD_NUMBER {
      return Err(SchemaError::InvalidFieldNumber {
        field_number: self.number,
      });
    }
    self.kind.check_accessor(
      self.number,
      self.accessor.value_kind(),
      self.accessor.is_list(),
    )
  }
}

impl<M> fmt::Debug for FieldDescriptor<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FieldDescriptor")
      .field("number", &self.number)
      .field("kind", &self.kind)
      .field("name", &self.name)
      .field("accessor", &self.accessor)
      .finish()
  }
}

//
// FieldIndex
//

// Maps a field number to its position in the sorted field list.
#[derive(Debug)]
enum FieldIndex {
  Dense(Box<[Option<u32>]>),
  Sorted,
}

impl FieldIndex {
  fn new<M>(fields: &[FieldDescriptor<M>]) -> Self {
    let Some(max_number) = fields.last().map(FieldDescriptor::number) else {
      return Self::Sorted;
    };
    let len = u32::try_from(fields.len()).unwrap_or(u32::MAX);
    if max_number > DENSE_INDEX_MIN_SLOTS.max(len.saturating_mul(2)) {
      return Self::Sorted;
    }

    let mut slots = vec![None; max_number as usize + 1];
    for (position, field) in (0u32 ..).zip(fields) {
      slots[field.number() as usize] = Some(position);
    }
    Self::Dense(slots.into_boxed_slice())
  }
}

//
// MessageDescriptor
//

/// The validated field layout of a message type: field descriptors in strictly ascending field
/// number order. Immutable once built and safe to share between threads.
pub struct MessageDescriptor<M> {
  fields: Vec<FieldDescriptor<M>>,
  index: FieldIndex,
}

impl<M> MessageDescriptor<M> {
  /// Validates each field, rejects duplicate numbers and sorts the fields by number.
  pub fn build(mut fields: Vec<FieldDescriptor<M>>) -> Result<Self, SchemaError> {
    if fields.is_empty() {
      return Err(SchemaError::Empty);
    }
    for field in &fields {
      field.validate()?;
    }

    fields.sort_by_key(FieldDescriptor::number);
    if let Some(pair) = fields.windows(2).find(|pair| pair[0].number == pair[1].number) {
      return Err(SchemaError::DuplicateFieldNumber {
        field_number: pair[0].number,
      });
    }

    let index = FieldIndex::new(&fields);
    Ok(Self { fields, index })
  }

  #[must_use]
  pub fn fields(&self) -> &[FieldDescriptor<M>] {
    &self.fields
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.fields.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  /// Looks up a field by number.
  #[must_use]
  pub fn find(&self, field_number: u32) -> Option<&FieldDescriptor<M>> {
    match &self.index {
      FieldIndex::Dense(slots) => slots
        .get(field_number as usize)
        .copied()
        .flatten()
        .and_then(|position| self.fields.get(position as usize)),
      FieldIndex::Sorted => self
        .fields
        .binary_search_by_key(&field_number, FieldDescriptor::number)
        .ok()
        .and_then(|position| self.fields.get(position)),
    }
  }

  pub fn field_numbers(&self) -> impl Iterator<Item = u32> + '_ {
    self.fields.iter().map(FieldDescriptor::number)
  }

  #[cfg(test)]
  fn has_dense_index(&self) -> bool {
    matches!(self.index, FieldIndex::Dense(_))
  }
}

impl<M> fmt::Debug for MessageDescriptor<M> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(&self.fields).finish()
  }
}
