//! Queueing API kinds understood by the fake store
//!
//! These mirror the shape of the production resources closely enough for
//! the secondary indexes and controller tests to work against them.

pub mod cluster_queue;
pub mod local_queue;
pub mod workload;

pub use cluster_queue::*;
pub use local_queue::*;
pub use workload::*;

use crate::{error::SetupError, scheme::Scheme};

/// Register every kind in this module with `scheme`
pub fn add_to_scheme(scheme: &mut Scheme) -> Result<(), SetupError> {
    scheme.register::<ClusterQueue>()?;
    scheme.register::<LocalQueue>()?;
    scheme.register::<Workload>()?;
    Ok(())
}
