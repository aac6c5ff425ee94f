use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{task_priority::TaskPriority, task_status::TaskStatus};

/// `assignedToId` is always sent, as `null` when the task is unassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateRequest {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    pub priority: TaskPriority,
    pub assigned_to_id: Option<i64>,
    pub status: TaskStatus,
    pub created_by_id: i64,
}
