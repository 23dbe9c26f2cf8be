//! Secondary indexes maintained over queue objects
//!
//! Controllers register these through a [`FieldIndexer`], which in
//! production is the live cache and in tests is the fake store builder
//! (see [`crate::store::as_indexer`]). Query code uses the key constants
//! below in both settings.

use crate::api::{LocalQueue, Workload};
use crate::error::SetupError;
use crate::meta::Object;
use nutype::nutype;

/// Local queues by the cluster queue they point at
pub const QUEUE_CLUSTER_QUEUE_KEY: &str = "spec.clusterQueue";
/// Workloads by the local queue they were submitted to
pub const WORKLOAD_QUEUE_KEY: &str = "spec.queueName";
/// Admitted workloads by the cluster queue that admitted them
pub const WORKLOAD_CLUSTER_QUEUE_KEY: &str = "status.admission.clusterQueue";

/// Name under which an index is registered and queried
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 253),
    derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, AsRef, Display)
)]
pub struct FieldName(String);

/// Something secondary indexes can be registered on
pub trait FieldIndexer {
    /// Register `extract` as the function computing the values of `field`
    /// for objects of kind `T`
    fn index_field<T, F>(&mut self, field: &str, extract: F) -> Result<(), SetupError>
    where
        T: Object,
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static;
}

pub fn index_queue_cluster_queue(queue: &LocalQueue) -> Vec<String> {
    non_empty(&queue.spec.cluster_queue)
}

pub fn index_workload_queue(workload: &Workload) -> Vec<String> {
    non_empty(&workload.spec.queue_name)
}

pub fn index_workload_cluster_queue(workload: &Workload) -> Vec<String> {
    workload
        .status
        .admission
        .as_ref()
        .map(|admission| non_empty(&admission.cluster_queue))
        .unwrap_or_default()
}

/// Register every index the queue controllers query by
pub fn setup_indexes<I: FieldIndexer>(indexer: &mut I) -> Result<(), SetupError> {
    indexer.index_field::<LocalQueue, _>(QUEUE_CLUSTER_QUEUE_KEY, index_queue_cluster_queue)?;
    indexer.index_field::<Workload, _>(WORKLOAD_QUEUE_KEY, index_workload_queue)?;
    indexer.index_field::<Workload, _>(WORKLOAD_CLUSTER_QUEUE_KEY, index_workload_cluster_queue)?;
    Ok(())
}

fn non_empty(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_local_queue_is_not_indexed() {
        assert!(index_queue_cluster_queue(&LocalQueue::new("ns", "lq")).is_empty());
        assert_eq!(
            index_queue_cluster_queue(&LocalQueue::new("ns", "lq").with_cluster_queue("cq")),
            vec!["cq".to_string()]
        );
    }

    #[test]
    fn pending_workload_has_no_cluster_queue() {
        let wl = Workload::new("ns", "wl").with_queue("lq");

        assert_eq!(index_workload_queue(&wl), vec!["lq".to_string()]);
        assert!(index_workload_cluster_queue(&wl).is_empty());
    }

    #[test]
    fn admitted_workload_is_indexed_by_cluster_queue() {
        let wl = Workload::new("ns", "wl").with_queue("lq").admitted_to("cq");

        assert_eq!(index_workload_cluster_queue(&wl), vec!["cq".to_string()]);
    }

    #[test]
    fn field_name_rejects_blank() {
        assert!(FieldName::try_new("   ").is_err());
        assert_eq!(
            FieldName::try_new(" spec.queueName ").unwrap().as_ref(),
            WORKLOAD_QUEUE_KEY
        );
    }
}
