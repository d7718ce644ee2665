use serde::{Deserialize, Serialize};

use crate::TaskId;

/// Serializable view of a task tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub kind: String,
    pub id: TaskId,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaskSnapshot>,
}

impl TaskSnapshot {
    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TaskSnapshot::node_count).sum::<usize>()
    }
}
