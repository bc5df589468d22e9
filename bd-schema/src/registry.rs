// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./registry_test.rs"]
mod tests;

use crate::error::SchemaError;
use crate::schema::Schema;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;

type AnySchema = Arc<dyn Any + Send + Sync>;

/// Caches one [`Schema`] per message type. The application owns the registry and passes it to
/// the code that needs schemas; there is no process wide instance.
///
/// Schemas are built on first request. Concurrent first requests for the same type may each run
/// the builder, but only one result is kept and every caller receives that one.
#[derive(Default)]
pub struct SchemaRegistry {
  schemas: RwLock<AHashMap<TypeId, AnySchema>>,
}

impl SchemaRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn get<M: 'static>(&self) -> Option<Arc<Schema<M>>> {
    self
      .schemas
      .read()
      .get(&TypeId::of::<M>())
      .cloned()
      .and_then(|schema| schema.downcast().ok())
  }

  #[must_use]
  pub fn contains<M: 'static>(&self) -> bool {
    self.schemas.read().contains_key(&TypeId::of::<M>())
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.schemas.read().len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.schemas.read().is_empty()
  }

  /// Returns the schema for `M`, building it with `build` if this is the first request. The
  /// builder runs without the registry lock held and receives the registry, so it can look up
  /// or build the schemas of embedded message types.
  pub fn get_or_try_insert_with<M: 'static>(
    &self,
    build: impl FnOnce(&Self) -> Result<Schema<M>, SchemaError>,
  ) -> Result<Arc<Schema<M>>, SchemaError> {
    if let Some(schema) = self.get::<M>() {
      return Ok(schema);
    }

    let built = Arc::new(build(self)?);
    let mut schemas = self.schemas.write();
    let entry = schemas.entry(TypeId::of::<M>()).or_insert_with(|| {
      log::debug!("registered schema for {}", built.type_name());
      built.clone() as AnySchema
    });
    Ok(entry.clone().downcast().unwrap_or(built))
  }
}

impl std::fmt::Debug for SchemaRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SchemaRegistry")
      .field("len", &self.len())
      .finish()
  }
}
