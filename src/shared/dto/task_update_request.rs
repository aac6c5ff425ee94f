use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{task_priority::TaskPriority, task_status::TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    pub priority: TaskPriority,
    pub assigned_to_id: Option<i64>,
    pub status: TaskStatus,
    pub updated_by_id: i64,
}
