//! Assembles a [`FakeStore`] with the queue indexes pre-registered
//!
//! Duplicate identities among the initial objects fail the build with
//! [`SetupError::DuplicateObject`]; seeds never silently overwrite each
//! other.

use super::index::{erase, IndexRegistry};
use super::{parse_resource_version, set_resource_version, stored_resource_version, FakeStore};
use crate::api;
use crate::config::{Settings, StoreSettings};
use crate::error::{SetupError, StoreError};
use crate::indexer::{self, FieldIndexer, FieldName};
use crate::log_messages;
use crate::meta::{NamespacedName, Object, ObjectKind};
use crate::scheme::{AddToScheme, Scheme};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

type EncodeFn = Arc<dyn Fn() -> Result<Value, serde_json::Error> + Send + Sync>;

/// An initial object of any registered kind, encoded when the store is built
#[derive(Clone)]
pub struct SeedObject {
    kind: ObjectKind,
    key: NamespacedName,
    check: fn(&Scheme) -> Result<(), SetupError>,
    encode: EncodeFn,
}

impl SeedObject {
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn key(&self) -> &NamespacedName {
        &self.key
    }
}

impl<T: Object> From<T> for SeedObject {
    fn from(object: T) -> Self {
        Self {
            kind: T::kind(),
            key: object.key(),
            check: Scheme::ensure_registered::<T>,
            encode: Arc::new(move || serde_json::to_value(&object)),
        }
    }
}

impl fmt::Debug for SeedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedObject")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FakeStoreBuilder {
    scheme: Scheme,
    indexes: IndexRegistry,
    seeds: Vec<SeedObject>,
    status_kinds: BTreeSet<ObjectKind>,
    settings: StoreSettings,
}

impl FakeStoreBuilder {
    /// Builder knowing the queue API kinds plus whatever `add_to_schemes`
    /// registers, applied in order
    ///
    /// Store settings come from [`Settings::new`], so `KUEUE_TESTKIT__*`
    /// overrides apply. The first failing scheme function aborts
    /// construction. The default queue indexes are registered through
    /// [`indexer::setup_indexes`], exactly as production code registers them.
    pub fn new(add_to_schemes: impl IntoIterator<Item = AddToScheme>) -> Result<Self, SetupError> {
        let settings = Settings::new()?;
        tracing::trace!(
            seed_resource_version = settings.store.seed_resource_version,
            "{}",
            log_messages::builder::LOADED_SETTINGS
        );
        Self::from_settings(add_to_schemes, &settings)
    }

    /// Like [`new`](Self::new), with already loaded settings
    pub fn from_settings(
        add_to_schemes: impl IntoIterator<Item = AddToScheme>,
        settings: &Settings,
    ) -> Result<Self, SetupError> {
        let mut scheme = Scheme::new();
        api::add_to_scheme(&mut scheme)?;
        for add_to_scheme in add_to_schemes {
            add_to_scheme(&mut scheme)?;
        }

        let mut builder = Self {
            scheme,
            indexes: IndexRegistry::default(),
            seeds: Vec::new(),
            status_kinds: BTreeSet::new(),
            settings: settings.store.clone(),
        };
        indexer::setup_indexes(&mut as_indexer(&mut builder))?;
        Ok(builder)
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Install `extract` as the index function for `field` on kind `T`,
    /// replacing any earlier registration for the same pair
    pub fn register_index<T, F>(&mut self, field: &str, extract: F) -> Result<(), SetupError>
    where
        T: Object,
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        self.scheme.ensure_registered::<T>()?;
        let field = FieldName::try_new(field)?;
        let kind = T::kind();
        if self.indexes.insert(kind, field.clone(), erase(extract)) {
            tracing::debug!(%kind, %field, "{}", log_messages::builder::REPLACED_INDEX);
        } else {
            tracing::trace!(%kind, %field, "{}", log_messages::builder::REGISTERED_INDEX);
        }
        Ok(())
    }

    pub fn with_index<T, F>(mut self, field: &str, extract: F) -> Result<Self, SetupError>
    where
        T: Object,
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        self.register_index(field, extract)?;
        Ok(self)
    }

    pub fn has_index<T: Object>(&self, field: &str) -> bool {
        FieldName::try_new(field).is_ok_and(|field| self.indexes.contains(T::kind(), &field))
    }

    pub fn with_object(mut self, object: impl Into<SeedObject>) -> Self {
        self.seeds.push(object.into());
        self
    }

    pub fn with_objects<I>(mut self, objects: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SeedObject>,
    {
        self.seeds.extend(objects.into_iter().map(Into::into));
        self
    }

    /// Route status writes for `T` through [`FakeStore::update_status`]
    pub fn with_status_subresource<T: Object>(mut self) -> Self {
        self.status_kinds.insert(T::kind());
        self
    }

    pub fn with_store_settings(mut self, settings: StoreSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Materialize a store holding exactly the seed objects
    ///
    /// The store gets its own copy of the index registry; registrations
    /// made on this builder afterwards do not reach it.
    pub fn build(&self) -> Result<FakeStore, SetupError> {
        let store = FakeStore::empty(
            self.scheme.clone(),
            self.indexes.instantiate(),
            self.status_kinds.clone(),
        );

        for seed in &self.seeds {
            (seed.check)(&self.scheme)?;
            let mut value = (seed.encode)().map_err(|source| SetupError::Encode {
                kind: seed.kind,
                key: seed.key.clone(),
                source,
            })?;
            self.stamp_seed_version(seed, &mut value)?;

            store
                .insert_new(seed.kind, seed.key.clone(), value)
                .map_err(|source| match source {
                    StoreError::AlreadyExists { kind, key } => {
                        SetupError::DuplicateObject { kind, key }
                    }
                    source => SetupError::Seed {
                        kind: seed.kind,
                        key: seed.key.clone(),
                        source: Box::new(source),
                    },
                })?;
        }

        tracing::debug!(
            objects = self.seeds.len(),
            indexes = ?self.indexes,
            "{}",
            log_messages::builder::BUILT_STORE
        );
        Ok(store)
    }

    fn stamp_seed_version(&self, seed: &SeedObject, value: &mut Value) -> Result<(), SetupError> {
        let version = stored_resource_version(value);
        let version = if version.is_empty() {
            self.settings.seed_resource_version
        } else {
            parse_resource_version(seed.kind, &seed.key, version).map_err(|source| {
                SetupError::Seed {
                    kind: seed.kind,
                    key: seed.key.clone(),
                    source: Box::new(source),
                }
            })?
        };
        set_resource_version(value, version);
        Ok(())
    }
}

/// Store holding `objects`, with a status subresource for each seeded kind
pub fn new_fake_store<I>(objects: I) -> Result<FakeStore, SetupError>
where
    I: IntoIterator,
    I::Item: Into<SeedObject>,
{
    let seeds: Vec<SeedObject> = objects.into_iter().map(Into::into).collect();
    let mut builder = FakeStoreBuilder::new([])?;
    for seed in &seeds {
        builder.status_kinds.insert(seed.kind);
    }
    builder.with_objects(seeds).build()
}

/// Adapter registering indexes on a builder through the [`FieldIndexer`]
/// interface production code is written against
#[derive(Debug)]
pub struct BuilderIndexer<'a> {
    builder: &'a mut FakeStoreBuilder,
}

pub fn as_indexer(builder: &mut FakeStoreBuilder) -> BuilderIndexer<'_> {
    BuilderIndexer { builder }
}

impl FieldIndexer for BuilderIndexer<'_> {
    fn index_field<T, F>(&mut self, field: &str, extract: F) -> Result<(), SetupError>
    where
        T: Object,
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        self.builder.register_index(field, extract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClusterQueue, LocalQueue, Workload};
    use crate::indexer::{QUEUE_CLUSTER_QUEUE_KEY, WORKLOAD_CLUSTER_QUEUE_KEY, WORKLOAD_QUEUE_KEY};
    use crate::meta::ObjectMeta;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Job {
        metadata: ObjectMeta,
        queue: String,
    }

    impl Object for Job {
        const KIND: &'static str = "Job";

        fn meta(&self) -> &ObjectMeta {
            &self.metadata
        }

        fn meta_mut(&mut self) -> &mut ObjectMeta {
            &mut self.metadata
        }
    }

    fn add_job(scheme: &mut Scheme) -> Result<(), SetupError> {
        scheme.register::<Job>()
    }

    fn failing(_: &mut Scheme) -> Result<(), SetupError> {
        Err(SetupError::scheme("broken group"))
    }

    #[test]
    fn default_indexes_are_registered() {
        let builder = FakeStoreBuilder::new([]).unwrap();

        assert!(builder.has_index::<LocalQueue>(QUEUE_CLUSTER_QUEUE_KEY));
        assert!(builder.has_index::<Workload>(WORKLOAD_QUEUE_KEY));
        assert!(builder.has_index::<Workload>(WORKLOAD_CLUSTER_QUEUE_KEY));
        assert!(!builder.has_index::<ClusterQueue>(WORKLOAD_QUEUE_KEY));
    }

    #[test]
    fn scheme_functions_extend_registry() {
        let builder = FakeStoreBuilder::new([add_job as AddToScheme]).unwrap();

        assert!(builder.scheme().recognizes(Job::kind()));
    }

    #[test]
    fn first_failing_scheme_function_aborts() {
        let err = FakeStoreBuilder::new([add_job as AddToScheme, failing, add_job]).unwrap_err();

        assert!(matches!(err, SetupError::Scheme { message } if message == "broken group"));
    }

    #[test]
    fn index_on_unregistered_kind_fails() {
        let mut builder = FakeStoreBuilder::new([]).unwrap();

        let err = builder
            .register_index::<Job, _>("queue", |job: &Job| vec![job.queue.clone()])
            .unwrap_err();
        assert!(matches!(err, SetupError::UnregisteredKind { .. }));
    }

    #[test]
    fn blank_field_name_fails() {
        let mut builder = FakeStoreBuilder::new([]).unwrap();

        let err = builder
            .register_index::<Workload, _>(" ", |_: &Workload| Vec::new())
            .unwrap_err();
        assert!(matches!(err, SetupError::InvalidFieldName(_)));
    }

    #[test]
    fn seeding_unregistered_kind_fails() {
        let job = Job {
            metadata: ObjectMeta::new("ns", "job"),
            queue: "lq".to_string(),
        };

        let err = FakeStoreBuilder::new([])
            .unwrap()
            .with_object(job)
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::UnregisteredKind { .. }));
    }

    #[test]
    fn seeds_get_configured_resource_version() {
        let store = FakeStoreBuilder::new([])
            .unwrap()
            .with_store_settings(StoreSettings {
                seed_resource_version: 42,
            })
            .with_object(Workload::new("ns", "wl"))
            .build()
            .unwrap();

        let wl: Workload = store.get(&NamespacedName::new("ns", "wl")).unwrap();
        assert_eq!(wl.metadata.resource_version, "42");
    }

    #[test]
    fn loaded_settings_drive_seed_resource_version() {
        let settings = Settings {
            store: StoreSettings {
                seed_resource_version: 7,
            },
            ..Settings::default()
        };
        let store = FakeStoreBuilder::from_settings([add_job as AddToScheme], &settings)
            .unwrap()
            .with_object(Workload::new("ns", "wl"))
            .build()
            .unwrap();

        let wl: Workload = store.get(&NamespacedName::new("ns", "wl")).unwrap();
        assert_eq!(wl.metadata.resource_version, "7");
    }

    #[test]
    fn seed_with_garbage_resource_version_fails() {
        let mut wl = Workload::new("ns", "wl");
        wl.metadata.resource_version = "abc".to_string();

        let err = FakeStoreBuilder::new([])
            .unwrap()
            .with_object(wl)
            .build()
            .unwrap_err();
        let SetupError::Seed { source, .. } = err else {
            panic!("expected a seed error, got {err:?}");
        };
        assert!(matches!(*source, StoreError::InvalidResourceVersion { .. }));
    }

    #[test]
    fn same_name_in_different_kinds_is_not_a_duplicate() {
        let store = FakeStoreBuilder::new([])
            .unwrap()
            .with_object(Workload::new("ns", "shared"))
            .with_object(LocalQueue::new("ns", "shared"))
            .build();

        assert!(store.is_ok());
    }

    #[test]
    fn adapter_registers_on_builder() {
        let mut builder = FakeStoreBuilder::new([add_job as AddToScheme]).unwrap();

        as_indexer(&mut builder)
            .index_field::<Job, _>("queue", |job: &Job| vec![job.queue.clone()])
            .unwrap();

        assert!(builder.has_index::<Job>("queue"));
    }

    #[test]
    fn new_fake_store_enables_status_for_seeded_kinds() {
        let store = new_fake_store([Workload::new("ns", "wl")]).unwrap();

        assert!(store.has_status_subresource::<Workload>());
        assert!(!store.has_status_subresource::<LocalQueue>());
    }
}
