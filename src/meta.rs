//! Object identity and metadata shared by every stored kind
//!
//! Objects are addressed by a [`NamespacedName`] within their [`ObjectKind`].
//! Anything that may be handed to an event recorder implements
//! [`EventSubject`]; only stored objects resolve to a real identity.

use derive_more::Display;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of a registered object kind, e.g. `Workload`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct ObjectKind(&'static str);

impl ObjectKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Stable `(namespace, name)` identity of an object
///
/// The default value is the empty identity, used for event subjects that
/// have no identity of their own. Cluster scoped objects have an empty
/// namespace.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{namespace}/{name}")]
pub struct NamespacedName {
    pub namespace: String,
    pub name: String,
}

impl NamespacedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Identity of a cluster scoped object
    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }

    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.name.is_empty()
    }
}

/// Metadata carried by every stored object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    pub name: String,
    /// Opaque version assigned by the store on every write
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn key(&self) -> NamespacedName {
        NamespacedName::new(self.namespace.clone(), self.name.clone())
    }
}

/// A typed object the fake store can hold
///
/// The store keeps objects in their JSON form, so every kind must
/// round-trip through serde without loss.
pub trait Object: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: &'static str;

    fn meta(&self) -> &ObjectMeta;

    fn meta_mut(&mut self) -> &mut ObjectMeta;

    fn kind() -> ObjectKind {
        ObjectKind::new(Self::KIND)
    }

    fn key(&self) -> NamespacedName {
        self.meta().key()
    }
}

/// Capability check used when resolving the subject of an event
///
/// Every [`Object`] resolves to its key. Other subjects, such as
/// aggregates or lists without a stable identity, return `None` and are
/// recorded with the empty identity.
pub trait EventSubject {
    fn object_key(&self) -> Option<NamespacedName>;
}

impl<T: Object> EventSubject for T {
    fn object_key(&self) -> Option<NamespacedName> {
        Some(self.key())
    }
}

/// Resolve an optional subject, falling back to the empty identity
pub fn resolve_identity(subject: Option<&dyn EventSubject>) -> NamespacedName {
    subject
        .and_then(|subject| subject.object_key())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Anonymous;

    impl EventSubject for Anonymous {
        fn object_key(&self) -> Option<NamespacedName> {
            None
        }
    }

    #[test]
    fn namespaced_name_displays_with_slash() {
        let key = NamespacedName::new("team-a", "job-1");
        assert_eq!(key.to_string(), "team-a/job-1");
    }

    #[test]
    fn cluster_scoped_name_has_empty_namespace() {
        let key = NamespacedName::cluster_scoped("cq");
        assert_eq!(key.namespace, "");
        assert_eq!(key.to_string(), "/cq");
        assert!(!key.is_empty());
    }

    #[test]
    fn absent_subject_resolves_to_empty_identity() {
        assert!(resolve_identity(None).is_empty());
    }

    #[test]
    fn subject_without_identity_resolves_to_empty_identity() {
        assert_eq!(resolve_identity(Some(&Anonymous)), NamespacedName::default());
    }

    #[test]
    fn metadata_omits_empty_fields_when_serialized() {
        let meta = ObjectMeta::new("", "cq");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "cq" }));
    }
}
