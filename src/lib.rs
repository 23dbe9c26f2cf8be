//! Kueue testkit - test doubles for batch-queueing controllers
//!
//! Two pieces are shared by controller tests:
//!
//! - [`store::FakeStoreBuilder`] builds an in-memory object store with the
//!   secondary indexes the controllers query, registered through the same
//!   [`indexer::setup_indexes`] path production uses.
//! - [`events::RecordingEventRecorder`] captures every event notification a
//!   controller emits so tests can assert on them afterwards.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod indexer;
pub mod log_messages;
pub mod meta;
pub mod scheme;
pub mod store;
pub mod telemetry;

pub use error::{SetupError, StoreError};
pub use events::{EventRecord, EventRecorder, RecordingEventRecorder};
pub use meta::{EventSubject, NamespacedName, Object, ObjectKind, ObjectMeta};
pub use store::{new_fake_store, FakeStore, FakeStoreBuilder};
