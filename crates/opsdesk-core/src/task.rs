//! Automation task records and request shapes.

use serde::{Deserialize, Serialize};

use crate::serde_ext::null_as_default;
use crate::{CodebookUid, Kind, Paged, TaskId};

/// A task spawned from an order by the workflow engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: TaskId,
    pub order_id: i64,
    pub kind: Kind,
    pub codebook_uid: CodebookUid,
    pub codebook_name: String,
    pub target: String,
    pub handler: String,
    /// Backend status code.
    pub status: i32,
    pub is_timing: bool,
    pub scheduled_time: String,
    pub start_time: String,
    pub end_time: String,
    pub retry_count: u32,
    pub code: String,
    pub language: String,
    /// JSON-encoded arguments.
    pub args: String,
    /// JSON-encoded variables.
    pub variables: String,
    pub result: String,
    pub trigger_position: String,
}

/// Paged task list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tasks {
    #[serde(deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
    pub total: u64,
}

impl From<Tasks> for Paged<Task> {
    fn from(t: Tasks) -> Self {
        Paged::new(t.tasks, t.total)
    }
}

/// A key/value pair submitted when starting an order task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskVariable {
    pub key: String,
    pub value: String,
}

/// Body for `/task/start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartTaskReq {
    pub process_id: i64,
    pub business_id: String,
    pub comment: String,
    pub variables: Vec<TaskVariable>,
}

/// Task list scoped by workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListByInstanceReq {
    pub instance_id: i64,
    pub offset: u64,
    pub limit: u64,
}

/// Body for `/task/update/args`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateArgsReq {
    pub id: TaskId,
    pub args: serde_json::Value,
}

/// Body for `/task/update/variables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVariablesReq {
    pub id: TaskId,
    /// JSON-encoded variables.
    pub variables: String,
}
