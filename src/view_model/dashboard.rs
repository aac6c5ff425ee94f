use std::sync::Arc;

use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;

use super::list_view::ListView;
use crate::{
    checks::parse_date_time,
    store::{
        entity_store::{TaskStore, UserStore},
        error::StoreError,
        resource::Tasks,
    },
    task_priority::TaskPriority,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_users: usize,
    pub total_tasks: usize,
    pub high_priority_tasks: usize,
    pub due_next_7_days: usize,
}

/// Summary cards over the cached users and tasks, plus a paged task table.
pub struct DashboardScreen {
    users: Arc<UserStore>,
    tasks: ListView<Tasks>,
}

impl DashboardScreen {
    pub fn new(users: Arc<UserStore>, tasks: Arc<TaskStore>) -> Self {
        DashboardScreen { users, tasks: ListView::new(tasks) }
    }

    /// Fetch tasks, then users. Only a task failure fails the load; without
    /// users the total falls back to whatever is cached.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.tasks.store().fetch_all().await?;
        self.tasks.refresh();
        if let Err(e) = self.users.fetch_all().await {
            tracing::warn!(error = %e, "user count unavailable for the dashboard");
        }
        Ok(())
    }

    pub fn tasks(&self) -> &ListView<Tasks> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut ListView<Tasks> {
        &mut self.tasks
    }

    pub fn summary(&self) -> DashboardSummary {
        self.summary_at(Local::now().naive_local())
    }

    /// Counts as of `now`. A task is due in the next seven days when its
    /// deadline falls in `[now, now + 7 days]`; unparseable deadlines never are.
    pub fn summary_at(&self, now: NaiveDateTime) -> DashboardSummary {
        let horizon = now + Duration::days(7);
        let (total_tasks, high_priority_tasks, due_next_7_days) = self.tasks.store().with_items(|tasks| {
            let high = tasks.iter().filter(|task| task.priority == TaskPriority::High).count();
            let due = tasks
                .iter()
                .filter_map(|task| parse_date_time(&task.deadline))
                .filter(|deadline| (now..=horizon).contains(deadline))
                .count();
            (tasks.len(), high, due)
        });
        DashboardSummary { total_users: self.users.len(), total_tasks, high_priority_tasks, due_next_7_days }
    }
}
