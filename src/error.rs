use crate::indexer::FieldNameError;
use crate::meta::{NamespacedName, ObjectKind};
use thiserror::Error;

/// Failures while assembling a fake store
///
/// All of these abort test setup; none is meant to be recovered from.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("kind {kind} is already registered to a different type")]
    ConflictingKind { kind: ObjectKind },

    #[error("no kind {kind} is registered in the scheme")]
    UnregisteredKind { kind: ObjectKind },

    #[error("invalid index field name: {0}")]
    InvalidFieldName(#[from] FieldNameError),

    #[error("duplicate {kind} {key} in initial objects")]
    DuplicateObject {
        kind: ObjectKind,
        key: NamespacedName,
    },

    #[error("failed to encode initial {kind} {key}: {source}")]
    Encode {
        kind: ObjectKind,
        key: NamespacedName,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to seed {kind} {key}: {source}")]
    Seed {
        kind: ObjectKind,
        key: NamespacedName,
        #[source]
        source: Box<StoreError>,
    },

    #[error("scheme registration failed: {message}")]
    Scheme { message: String },

    #[error("failed to load testkit settings: {0}")]
    Config(#[from] config::ConfigError),
}

impl SetupError {
    pub fn scheme(message: impl Into<String>) -> Self {
        Self::Scheme {
            message: message.into(),
        }
    }
}

/// Failures of individual fake store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} {key} not found")]
    NotFound {
        kind: ObjectKind,
        key: NamespacedName,
    },

    #[error("{kind} {key} already exists")]
    AlreadyExists {
        kind: ObjectKind,
        key: NamespacedName,
    },

    #[error("conflict updating {kind} {key}: expected resource version {expected}, stored {actual}")]
    Conflict {
        kind: ObjectKind,
        key: NamespacedName,
        expected: String,
        actual: String,
    },

    #[error("no kind {kind} is registered in the scheme")]
    UnregisteredKind { kind: ObjectKind },

    #[error("list on {kind} selects field {field}, but no index with that name is registered")]
    MissingIndex { kind: ObjectKind, field: String },

    #[error("{kind} has no status subresource")]
    NoStatusSubresource { kind: ObjectKind },

    #[error("resource version can not be set when creating {kind} {key}")]
    ResourceVersionOnCreate {
        kind: ObjectKind,
        key: NamespacedName,
    },

    #[error("invalid resource version {value:?} on {kind} {key}")]
    InvalidResourceVersion {
        kind: ObjectKind,
        key: NamespacedName,
        value: String,
    },

    #[error("failed to (de)serialize {kind}: {source}")]
    Codec {
        kind: ObjectKind,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
