//! Index registry and the precomputed tables built from it

use crate::indexer::FieldName;
use crate::meta::{NamespacedName, Object, ObjectKind};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Extraction function operating on an object's stored JSON form
pub(crate) type IndexFn =
    Arc<dyn Fn(&Value) -> Result<Vec<String>, serde_json::Error> + Send + Sync>;

/// Wrap a typed extraction function so it can run against stored objects
pub(crate) fn erase<T, F>(extract: F) -> IndexFn
where
    T: Object,
    F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
{
    Arc::new(move |value: &Value| {
        let object: T = serde_json::from_value(value.clone())?;
        Ok(extract(&object))
    })
}

/// Extraction functions registered on a builder, keyed by kind and field
#[derive(Clone, Default)]
pub(crate) struct IndexRegistry {
    extractors: BTreeMap<(ObjectKind, FieldName), IndexFn>,
}

impl IndexRegistry {
    /// Returns true when an earlier registration was replaced
    pub(crate) fn insert(&mut self, kind: ObjectKind, field: FieldName, extract: IndexFn) -> bool {
        self.extractors.insert((kind, field), extract).is_some()
    }

    pub(crate) fn contains(&self, kind: ObjectKind, field: &FieldName) -> bool {
        self.extractors.contains_key(&(kind, field.clone()))
    }

    /// Empty tables for every registered index
    pub(crate) fn instantiate(&self) -> IndexTables {
        let mut tables = IndexTables::default();
        for ((kind, field), extract) in &self.extractors {
            tables
                .by_kind
                .entry(*kind)
                .or_default()
                .insert(field.clone(), Index::new(Arc::clone(extract)));
        }
        tables
    }
}

impl fmt::Debug for IndexRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.extractors
                    .keys()
                    .map(|(kind, field)| format!("{kind}/{field}")),
            )
            .finish()
    }
}

/// One secondary index: value -> identities, plus the reverse mapping
pub(crate) struct Index {
    extract: IndexFn,
    entries: BTreeMap<String, BTreeSet<NamespacedName>>,
    values_by_key: BTreeMap<NamespacedName, Vec<String>>,
}

impl Index {
    fn new(extract: IndexFn) -> Self {
        Self {
            extract,
            entries: BTreeMap::new(),
            values_by_key: BTreeMap::new(),
        }
    }

    pub(crate) fn values_of(&self, value: &Value) -> Result<Vec<String>, serde_json::Error> {
        (self.extract)(value)
    }

    pub(crate) fn lookup(&self, value: &str) -> BTreeSet<NamespacedName> {
        self.entries.get(value).cloned().unwrap_or_default()
    }

    fn remove(&mut self, key: &NamespacedName) {
        let Some(values) = self.values_by_key.remove(key) else {
            return;
        };
        for value in values {
            if let Some(keys) = self.entries.get_mut(&value) {
                keys.remove(key);
                if keys.is_empty() {
                    self.entries.remove(&value);
                }
            }
        }
    }

    fn add(&mut self, key: &NamespacedName, values: Vec<String>) {
        for value in &values {
            self.entries
                .entry(value.clone())
                .or_default()
                .insert(key.clone());
        }
        self.values_by_key.insert(key.clone(), values);
    }
}

/// All index tables of one store
#[derive(Default)]
pub(crate) struct IndexTables {
    by_kind: BTreeMap<ObjectKind, BTreeMap<FieldName, Index>>,
}

impl IndexTables {
    pub(crate) fn get(&self, kind: ObjectKind, field: &FieldName) -> Option<&Index> {
        self.by_kind.get(&kind).and_then(|fields| fields.get(field))
    }

    /// Recompute every index of `kind` for `key`
    ///
    /// Extraction runs for all indexes before any table is touched, so a
    /// failing extractor leaves the tables unchanged.
    pub(crate) fn reindex(
        &mut self,
        kind: ObjectKind,
        key: &NamespacedName,
        object: Option<&Value>,
    ) -> Result<(), serde_json::Error> {
        let Some(fields) = self.by_kind.get_mut(&kind) else {
            return Ok(());
        };

        let mut computed = Vec::with_capacity(fields.len());
        if let Some(object) = object {
            for (field, index) in fields.iter() {
                computed.push((field.clone(), index.values_of(object)?));
            }
        }

        for index in fields.values_mut() {
            index.remove(key);
        }
        for (field, values) in computed {
            if let Some(index) = fields.get_mut(&field) {
                index.add(key, values);
            }
        }
        Ok(())
    }
}
