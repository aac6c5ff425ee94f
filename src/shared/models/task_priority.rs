use serde::{Deserialize, Serialize};

use super::choice::Choice;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Choice for TaskPriority {
    const ALL: &'static [Self] = &[TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        }
    }
}
