use serde::{Deserialize, Serialize};

use super::choice::Choice;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl Choice for TaskStatus {
    const ALL: &'static [Self] = &[TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Completed];

    fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}
