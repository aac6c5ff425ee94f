use chrono::{Local, NaiveDateTime};

use super::{
    checks::Checks,
    draft::{Draft, UpdateDraft},
    field_errors::FieldErrors,
};
use crate::{
    choice::Choice, task::Task, task_create_request::TaskCreateRequest, task_priority::TaskPriority,
    task_status::TaskStatus, task_update_request::TaskUpdateRequest, user::UserRef,
};

/// Zone-less, millisecond precision: what a `datetime-local` field round-trips.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskCreateDraft {
    pub title: String,
    pub description: String,
    pub deadline: String,
    pub priority: String,
    pub status: String,
    pub assigned_to_id: Option<i64>,
    pub created_by_id: i64,
}

impl TaskCreateDraft {
    pub fn due_at(deadline: NaiveDateTime) -> Self {
        Self {
            title: "Add new title".to_string(),
            description: "Add new description".to_string(),
            deadline: deadline.format(DEADLINE_FORMAT).to_string(),
            priority: TaskPriority::Medium.as_str().to_string(),
            status: TaskStatus::Todo.as_str().to_string(),
            assigned_to_id: None,
            created_by_id: 0,
        }
    }
}

impl Default for TaskCreateDraft {
    fn default() -> Self {
        Self::due_at(Local::now().naive_local())
    }
}

impl Draft for TaskCreateDraft {
    type Payload = TaskCreateRequest;

    fn stamp_actor(&mut self, actor_id: i64) {
        self.created_by_id = actor_id;
    }

    fn validate(&self) -> Result<TaskCreateRequest, FieldErrors> {
        let mut checks = Checks::new();
        let body = check_body(
            &mut checks,
            &self.title,
            &self.description,
            &self.deadline,
            &self.priority,
            &self.status,
            self.assigned_to_id,
        );
        let created_by_id =
            checks.positive("createdById", self.created_by_id, "CreatedById must be a positive integer");

        let errors = checks.finish();
        match body {
            Some(body) if errors.is_empty() => Ok(TaskCreateRequest {
                title: body.title,
                description: body.description,
                deadline: body.deadline,
                priority: body.priority,
                assigned_to_id: body.assigned_to_id,
                status: body.status,
                created_by_id,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdateDraft {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub deadline: String,
    pub priority: String,
    pub status: String,
    pub assigned_to_id: Option<i64>,
    pub updated_by_id: i64,
}

impl From<&Task> for TaskUpdateDraft {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            deadline: task.deadline.clone(),
            priority: task.priority.as_str().to_string(),
            status: task.status.as_str().to_string(),
            assigned_to_id: task.assigned_to.as_ref().map(|user| user.id),
            updated_by_id: 0,
        }
    }
}

impl Draft for TaskUpdateDraft {
    type Payload = TaskUpdateRequest;

    fn stamp_actor(&mut self, actor_id: i64) {
        self.updated_by_id = actor_id;
    }

    fn validate(&self) -> Result<TaskUpdateRequest, FieldErrors> {
        let mut checks = Checks::new();
        let id = checks.positive("id", self.id, "ID must be a positive number");
        let body = check_body(
            &mut checks,
            &self.title,
            &self.description,
            &self.deadline,
            &self.priority,
            &self.status,
            self.assigned_to_id,
        );
        let updated_by_id =
            checks.positive("updatedById", self.updated_by_id, "UpdatedById must be a positive integer");

        let errors = checks.finish();
        match body {
            Some(body) if errors.is_empty() => Ok(TaskUpdateRequest {
                id,
                title: body.title,
                description: body.description,
                deadline: body.deadline,
                priority: body.priority,
                assigned_to_id: body.assigned_to_id,
                status: body.status,
                updated_by_id,
            }),
            _ => Err(errors),
        }
    }
}

impl UpdateDraft for TaskUpdateDraft {
    fn target_id(&self) -> i64 {
        self.id
    }
}

struct Body {
    title: String,
    description: String,
    deadline: NaiveDateTime,
    priority: TaskPriority,
    status: TaskStatus,
    assigned_to_id: Option<i64>,
}

/// `None` when an enum or the deadline did not parse; the reasons are in `checks`.
fn check_body(
    checks: &mut Checks,
    title: &str,
    description: &str,
    deadline: &str,
    priority: &str,
    status: &str,
    assigned_to_id: Option<i64>,
) -> Option<Body> {
    let title = checks.required("title", title, "Title is required");
    let description = checks.required("description", description, "Description is required");
    let deadline = checks.date_time("deadline", deadline, "Invalid date format");
    let priority = checks.choice::<TaskPriority>("priority", priority);
    let status = checks.choice::<TaskStatus>("status", status);
    let assigned_to_id =
        checks.optional_positive("assignedToId", assigned_to_id, "AssignedToId must be a positive integer");

    Some(Body {
        title,
        description,
        deadline: deadline?,
        priority: priority?,
        status: status?,
        assigned_to_id,
    })
}

/// Check a task the server sent back.
pub fn validate_task(task: &Task) -> Result<(), FieldErrors> {
    let mut checks = Checks::new();
    checks.positive("id", task.id, "ID must be a positive number");
    checks.required("title", &task.title, "Title is required");
    checks.required("description", &task.description, "Description is required");
    checks.date_time("deadline", &task.deadline, "Invalid date format");
    checks.date_time("createdAt", &task.created_at, "Invalid date format");
    checks.date_time("updatedAt", &task.updated_at, "Invalid date format");
    for (field, user) in [
        ("assignedTo", &task.assigned_to),
        ("createdBy", &task.created_by),
        ("updatedBy", &task.updated_by),
    ] {
        if let Some(user) = user {
            check_user_ref(&mut checks, field, user);
        }
    }

    let errors = checks.finish();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_user_ref(checks: &mut Checks, field: &str, user: &UserRef) {
    checks.positive(field, user.id, "ID must be a positive number");
    checks.required(field, &user.username, "Username is required");
    checks.email(field, &user.email, "Invalid email format");
}
