use crate::meta::{Object, ObjectMeta};
use serde::{Deserialize, Serialize};

/// Namespaced queue pointing at the cluster queue that serves it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalQueue {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: LocalQueueSpec,
    #[serde(default)]
    pub status: LocalQueueStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalQueueSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_queue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalQueueStatus {
    #[serde(default)]
    pub pending_workloads: i32,
}

impl LocalQueue {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(namespace, name),
            ..Self::default()
        }
    }

    pub fn with_cluster_queue(mut self, cluster_queue: impl Into<String>) -> Self {
        self.spec.cluster_queue = cluster_queue.into();
        self
    }
}

impl Object for LocalQueue {
    const KIND: &'static str = "LocalQueue";

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
