//! In-memory object store standing in for the control-plane API
//!
//! Objects are held in their JSON form, keyed by kind and identity, and
//! every write keeps the registered secondary indexes up to date. A
//! [`FakeStore`] is a cheap handle: clones share the same state, so the
//! controller under test and the assertions see the same objects.

pub mod builder;
mod index;
pub mod list_options;

pub use builder::{as_indexer, new_fake_store, BuilderIndexer, FakeStoreBuilder, SeedObject};
pub use list_options::{FieldSelector, ListOptions};

use crate::error::{Result, StoreError};
use crate::indexer::FieldName;
use crate::log_messages;
use crate::meta::{NamespacedName, Object, ObjectKind};
use crate::scheme::Scheme;
use index::IndexTables;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Resource version given to objects created through the store
const FIRST_RESOURCE_VERSION: u64 = 1;

#[derive(Clone)]
pub struct FakeStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    scheme: Scheme,
    status_kinds: BTreeSet<ObjectKind>,
    state: RwLock<StoreState>,
}

struct StoreState {
    objects: BTreeMap<ObjectKind, BTreeMap<NamespacedName, Value>>,
    indexes: IndexTables,
}

impl StoreState {
    fn get(&self, kind: ObjectKind, key: &NamespacedName) -> Option<&Value> {
        self.objects.get(&kind).and_then(|objects| objects.get(key))
    }

    /// Store `value` under `key`, refreshing the indexes first
    fn put(&mut self, kind: ObjectKind, key: NamespacedName, value: Value) -> Result<()> {
        self.indexes
            .reindex(kind, &key, Some(&value))
            .map_err(|source| StoreError::Codec { kind, source })?;
        self.objects.entry(kind).or_default().insert(key, value);
        Ok(())
    }

    fn remove(&mut self, kind: ObjectKind, key: &NamespacedName) -> Option<Value> {
        let removed = self.objects.get_mut(&kind)?.remove(key)?;
        // Dropping entries cannot fail: no extraction runs without an object.
        let _ = self.indexes.reindex(kind, key, None);
        Some(removed)
    }
}

impl FakeStore {
    fn empty(
        scheme: Scheme,
        indexes: IndexTables,
        status_kinds: BTreeSet<ObjectKind>,
    ) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                scheme,
                status_kinds,
                state: RwLock::new(StoreState {
                    objects: BTreeMap::new(),
                    indexes,
                }),
            }),
        }
    }

    /// Insert an encoded object that must not exist yet
    fn insert_new(
        &self,
        kind: ObjectKind,
        key: NamespacedName,
        value: Value,
    ) -> Result<()> {
        let mut state = self.inner.state.write();
        if state.get(kind, &key).is_some() {
            return Err(StoreError::AlreadyExists { kind, key });
        }
        state.put(kind, key, value)
    }

    pub fn scheme(&self) -> &Scheme {
        &self.inner.scheme
    }

    pub fn has_status_subresource<T: Object>(&self) -> bool {
        self.inner.status_kinds.contains(&T::kind())
    }

    pub fn get<T: Object>(&self, key: &NamespacedName) -> Result<T> {
        let kind = self.registered_kind::<T>()?;
        let state = self.inner.state.read();
        let value = state
            .get(kind, key)
            .ok_or_else(|| StoreError::NotFound {
                kind,
                key: key.clone(),
            })?;
        decode(kind, value)
    }

    /// Create `object`, stamping the stored resource version back onto it
    pub fn create<T: Object>(&self, object: &mut T) -> Result<()> {
        let kind = self.registered_kind::<T>()?;
        let key = object.key();
        if !object.meta().resource_version.is_empty() {
            return Err(StoreError::ResourceVersionOnCreate { kind, key });
        }

        let mut created = object.clone();
        created.meta_mut().resource_version = FIRST_RESOURCE_VERSION.to_string();
        let value = encode(kind, &created)?;
        self.insert_new(kind, key.clone(), value)?;

        tracing::debug!(%kind, %key, "{}", log_messages::store::CREATED_OBJECT);
        *object = created;
        Ok(())
    }

    /// Replace the stored object with `object`
    ///
    /// A non-empty resource version must match the stored one. For kinds
    /// with a status subresource the stored status is kept and `object`
    /// is refreshed with it.
    pub fn update<T: Object>(&self, object: &mut T) -> Result<()> {
        let kind = self.registered_kind::<T>()?;
        let key = object.key();
        let mut state = self.inner.state.write();
        let stored = state
            .get(kind, &key)
            .ok_or_else(|| StoreError::NotFound {
                kind,
                key: key.clone(),
            })?;
        let next_version = next_resource_version(kind, &key, stored, object)?;

        let mut value = encode(kind, object)?;
        if self.inner.status_kinds.contains(&kind) {
            match stored.get("status") {
                Some(status) => set_field(&mut value, "status", status.clone()),
                None => remove_field(&mut value, "status"),
            }
        }
        set_resource_version(&mut value, next_version);

        let updated = decode(kind, &value)?;
        state.put(kind, key.clone(), value)?;
        tracing::debug!(%kind, %key, resource_version = next_version, "{}", log_messages::store::UPDATED_OBJECT);
        *object = updated;
        Ok(())
    }

    /// Replace only the status of the stored object
    pub fn update_status<T: Object>(&self, object: &mut T) -> Result<()> {
        let kind = self.registered_kind::<T>()?;
        if !self.inner.status_kinds.contains(&kind) {
            return Err(StoreError::NoStatusSubresource { kind });
        }
        let key = object.key();
        let mut state = self.inner.state.write();
        let stored = state
            .get(kind, &key)
            .ok_or_else(|| StoreError::NotFound {
                kind,
                key: key.clone(),
            })?;
        let next_version = next_resource_version(kind, &key, stored, object)?;

        let mut value = stored.clone();
        match encode(kind, object)?.get("status") {
            Some(status) => set_field(&mut value, "status", status.clone()),
            None => remove_field(&mut value, "status"),
        }
        set_resource_version(&mut value, next_version);

        let updated = decode(kind, &value)?;
        state.put(kind, key.clone(), value)?;
        tracing::debug!(%kind, %key, resource_version = next_version, "{}", log_messages::store::UPDATED_STATUS);
        *object = updated;
        Ok(())
    }

    pub fn delete<T: Object>(&self, key: &NamespacedName) -> Result<()> {
        let kind = self.registered_kind::<T>()?;
        let mut state = self.inner.state.write();
        match state.remove(kind, key) {
            Some(_) => {
                tracing::debug!(%kind, %key, "{}", log_messages::store::DELETED_OBJECT);
                Ok(())
            }
            None => Err(StoreError::NotFound {
                kind,
                key: key.clone(),
            }),
        }
    }

    /// Objects of kind `T` passing `options`, ordered by identity
    pub fn list<T: Object>(&self, options: &ListOptions) -> Result<Vec<T>> {
        let kind = self.registered_kind::<T>()?;
        let state = self.inner.state.read();
        let index = match &options.field {
            Some(selector) => {
                let index = FieldName::try_new(selector.field.as_str())
                    .ok()
                    .and_then(|field| state.indexes.get(kind, &field))
                    .ok_or_else(|| StoreError::MissingIndex {
                        kind,
                        field: selector.field.clone(),
                    })?;
                Some((index, selector.value.as_str()))
            }
            None => None,
        };
        let Some(objects) = state.objects.get(&kind) else {
            return Ok(Vec::new());
        };

        let candidates: Vec<&Value> = match index {
            Some((index, value)) => index
                .lookup(value)
                .iter()
                .filter_map(|key| objects.get(key))
                .collect(),
            None => objects.values().collect(),
        };

        let mut matched = Vec::with_capacity(candidates.len());
        for value in candidates {
            let object: T = decode(kind, value)?;
            if options.matches(object.meta()) {
                matched.push(object);
            }
        }
        Ok(matched)
    }

    /// Objects of kind `T` whose `field` index contains `value`
    pub fn list_by_index<T: Object>(&self, field: &str, value: &str) -> Result<Vec<T>> {
        self.list(&ListOptions::default().matching_field(field, value))
    }

    fn registered_kind<T: Object>(&self) -> Result<ObjectKind> {
        let kind = T::kind();
        if self.inner.scheme.recognizes(kind) {
            Ok(kind)
        } else {
            Err(StoreError::UnregisteredKind { kind })
        }
    }
}

impl fmt::Debug for FakeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        let counts: BTreeMap<_, _> = state
            .objects
            .iter()
            .map(|(kind, objects)| (kind.as_str(), objects.len()))
            .collect();
        f.debug_struct("FakeStore")
            .field("objects", &counts)
            .field("status_kinds", &self.inner.status_kinds)
            .finish()
    }
}

pub(crate) fn encode<T: Object>(kind: ObjectKind, object: &T) -> Result<Value> {
    serde_json::to_value(object).map_err(|source| StoreError::Codec { kind, source })
}

fn decode<T: Object>(kind: ObjectKind, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|source| StoreError::Codec { kind, source })
}

pub(crate) fn stored_resource_version(value: &Value) -> &str {
    value
        .get("metadata")
        .and_then(|meta| meta.get("resourceVersion"))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

pub(crate) fn parse_resource_version(
    kind: ObjectKind,
    key: &NamespacedName,
    version: &str,
) -> Result<u64> {
    version
        .parse()
        .map_err(|_| StoreError::InvalidResourceVersion {
            kind,
            key: key.clone(),
            value: version.to_string(),
        })
}

pub(crate) fn set_resource_version(value: &mut Value, version: u64) {
    if let Some(meta) = value.get_mut("metadata").and_then(Value::as_object_mut) {
        meta.insert(
            "resourceVersion".to_string(),
            Value::String(version.to_string()),
        );
    }
}

/// Check optimistic concurrency and compute the version after a write
fn next_resource_version<T: Object>(
    kind: ObjectKind,
    key: &NamespacedName,
    stored: &Value,
    incoming: &T,
) -> Result<u64> {
    let current = stored_resource_version(stored);
    let requested = incoming.meta().resource_version.as_str();
    if !requested.is_empty() && requested != current {
        return Err(StoreError::Conflict {
            kind,
            key: key.clone(),
            expected: requested.to_string(),
            actual: current.to_string(),
        });
    }
    Ok(parse_resource_version(kind, key, current)? + 1)
}

fn set_field(value: &mut Value, field: &str, content: Value) {
    if let Some(object) = value.as_object_mut() {
        object.insert(field.to_string(), content);
    }
}

fn remove_field(value: &mut Value, field: &str) {
    if let Some(object) = value.as_object_mut() {
        object.remove(field);
    }
}
