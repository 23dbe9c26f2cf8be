use crate::meta::ObjectMeta;
use std::collections::BTreeMap;

/// Exact-match field selector, answered from a registered index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    pub field: String,
    pub value: String,
}

/// Filters applied by [`super::FakeStore::list`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub namespace: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub field: Option<FieldSelector>,
}

impl ListOptions {
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn matching_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn matching_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field = Some(FieldSelector {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Namespace and label filters; the field selector is applied by the store
    pub(crate) fn matches(&self, meta: &ObjectMeta) -> bool {
        let namespace_matches = self
            .namespace
            .as_deref()
            .is_none_or(|namespace| namespace == meta.namespace);
        namespace_matches
            && self
                .labels
                .iter()
                .all(|(key, value)| meta.labels.get(key) == Some(value))
    }
}
