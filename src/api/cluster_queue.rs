use crate::meta::{Object, ObjectMeta};
use serde::{Deserialize, Serialize};

/// Cluster scoped queue that admits workloads from its local queues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterQueue {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ClusterQueueSpec,
    #[serde(default)]
    pub status: ClusterQueueStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterQueueSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cohort: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterQueueStatus {
    #[serde(default)]
    pub pending_workloads: i32,
    #[serde(default)]
    pub admitted_workloads: i32,
}

impl ClusterQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(String::new(), name),
            ..Self::default()
        }
    }

    pub fn with_cohort(mut self, cohort: impl Into<String>) -> Self {
        self.spec.cohort = cohort.into();
        self
    }
}

impl Object for ClusterQueue {
    const KIND: &'static str = "ClusterQueue";

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
