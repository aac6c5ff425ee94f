use std::sync::Arc;

use serde::Serialize;

use super::{
    form_flow::FormFlow,
    list_view::ListView,
    submit::{SubmitError, Submitted},
};
use crate::{
    profile::Profile,
    store::{
        entity_store::{TaskStore, UserStore},
        error::StoreError,
        resource::Tasks,
        task_filter::TaskFilter,
    },
};

/// Quick filter buttons above the tasks table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickFilter {
    #[default]
    All,
    Today,
    Next7Days,
}

/// The tasks table.
///
/// Administrators work on every task; everyone else only sees the tasks
/// they created. The same scope applies to the first load, to "All", and
/// to the re-fetch after a create or update.
pub struct TaskScreen {
    actor: Profile,
    users: Arc<UserStore>,
    quick: QuickFilter,
    list: ListView<Tasks>,
    form: FormFlow<Tasks>,
}

impl TaskScreen {
    pub fn new(tasks: Arc<TaskStore>, users: Arc<UserStore>, actor: Profile) -> Self {
        TaskScreen { actor, users, quick: QuickFilter::All, list: ListView::new(tasks), form: FormFlow::new() }
    }

    pub async fn load(&mut self) -> Result<usize, StoreError> {
        self.show(QuickFilter::All).await
    }

    /// Re-fetch through one of the quick filters.
    pub async fn show(&mut self, quick: QuickFilter) -> Result<usize, StoreError> {
        let store = Arc::clone(self.list.store());
        let count = match quick {
            QuickFilter::All if self.actor.is_admin() => store.fetch_all().await?,
            QuickFilter::All => store.fetch_filtered(&TaskFilter::ByCreator(self.creator())).await?,
            QuickFilter::Today => store.fetch_filtered(&TaskFilter::CreatedToday(self.creator())).await?,
            QuickFilter::Next7Days => store.fetch_filtered(&TaskFilter::CreatedNext7Days(self.creator())).await?,
        };
        self.quick = quick;
        self.list.refresh();
        Ok(count)
    }

    pub fn quick_filter(&self) -> QuickFilter {
        self.quick
    }

    fn creator(&self) -> String {
        match self.actor.username.trim() {
            "" => "none".to_string(),
            name => name.to_string(),
        }
    }

    pub fn list(&self) -> &ListView<Tasks> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<Tasks> {
        &mut self.list
    }

    pub fn form(&self) -> &FormFlow<Tasks> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormFlow<Tasks> {
        &mut self.form
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Load assignee choices, then open the edit modal. The task opens
    /// even when the user list cannot be fetched.
    pub async fn open_edit(&mut self, id: i64) -> bool {
        if let Err(e) = self.users.fetch_all().await {
            tracing::warn!(error = %e, "assignee choices unavailable");
        }
        self.form.open_edit_by_id(self.list.store(), id)
    }

    pub fn open_delete(&mut self, id: i64) -> bool {
        self.form.open_delete_by_id(self.list.store(), id)
    }

    /// `(id, username)` of every cached user.
    pub fn assignee_choices(&self) -> Vec<(i64, String)> {
        self.users.with_items(|users| users.iter().map(|user| (user.id, user.username.clone())).collect())
    }

    pub async fn submit(&mut self) -> Result<Submitted, SubmitError> {
        let store = Arc::clone(self.list.store());
        let submitted = self.form.submit(&store, self.actor.id).await?;
        if submitted.needs_refetch() {
            if let Err(e) = self.show(QuickFilter::All).await {
                tracing::warn!(error = %e, "task re-fetch after submit failed, showing cached rows");
            }
        }
        self.list.refresh();
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use wiremock::{
        matchers::{body_partial_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::{api::client::ApiClient, context::Session, credential::Credential};

    fn task_json(id: i64, title: &str, priority: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "details",
            "deadline": "2025-03-01T12:00:00",
            "priority": priority,
            "status": "TODO",
            "assignedTo": { "id": 3, "username": "cy" }
        })
    }

    fn screen(server: &MockServer, roles: &[&str]) -> TaskScreen {
        let api = ApiClient::new(server.uri());
        let session = Session::with_credential(Credential::derive("ada", "pw"));
        let tasks = Arc::new(TaskStore::new(api.clone(), session.clone()));
        let users = Arc::new(UserStore::new(api, session));
        let actor = Profile { id: 4, username: "ada".into(), roles: roles.iter().map(|r| r.to_string()).collect() };
        TaskScreen::new(tasks, users, actor)
    }

    #[tokio::test]
    async fn regular_users_only_load_their_own_tasks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks/by-creator-name"))
            .and(query_param("username", "ada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(1, "Mine", "LOW")])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = screen(&server, &["ROLE_USER"]);
        assert_eq!(screen.load().await.unwrap(), 1);
        assert_eq!(screen.list().visible()[0].title, "Mine");
    }

    #[tokio::test]
    async fn quick_filters_and_admin_scope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                task_json(1, "Write spec", "HIGH"),
                task_json(2, "Deploy", "LOW")
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks/created-today"))
            .and(query_param("username", "ada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(2, "Deploy", "LOW")])))
            .mount(&server)
            .await;

        let mut screen = screen(&server, &["ROLE_ADMIN"]);
        screen.load().await.unwrap();
        screen.list_mut().set_query("high");
        assert_eq!(screen.list().matched(), 1);

        screen.list_mut().set_query("");
        assert_eq!(screen.show(QuickFilter::Today).await.unwrap(), 1);
        assert_eq!(screen.quick_filter(), QuickFilter::Today);
        assert_eq!(screen.list().visible().len(), 1);
    }

    #[tokio::test]
    async fn edit_opens_even_without_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(5, "Ship", "MEDIUM")])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/tasks/5"))
            .and(body_partial_json(json!({ "id": 5, "assignedToId": 3, "updatedById": 4, "priority": "HIGH" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "priority": "HIGH" })))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = screen(&server, &["ROLE_ADMIN"]);
        screen.load().await.unwrap();
        assert!(screen.open_edit(5).await);
        assert!(screen.assignee_choices().is_empty());

        if let Some(draft) = screen.form_mut().modal_mut().edit_draft_mut() {
            draft.priority = "HIGH".into();
        }
        assert_eq!(screen.submit().await.unwrap(), Submitted::Updated);
        assert!(!screen.form().is_open());
    }

    #[tokio::test]
    async fn created_task_shows_when_the_refetch_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(201).set_body_json(task_json(7, "Fresh", "LOW")))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = screen(&server, &["ROLE_ADMIN"]);
        screen.load().await.unwrap();
        assert!(screen.list().visible().is_empty());

        screen.open_create();
        if let Some(draft) = screen.form_mut().modal_mut().create_draft_mut() {
            draft.title = "Fresh".into();
            draft.description = "details".into();
            draft.deadline = "2025-03-01T12:00:00".into();
            draft.priority = "LOW".into();
            draft.status = "TODO".into();
        }
        assert_eq!(screen.submit().await.unwrap(), Submitted::Created);

        assert_eq!(screen.list().store().len(), 1);
        assert_eq!(screen.list().visible().iter().map(|t| t.id).collect::<Vec<_>>(), vec![7]);
    }

    #[tokio::test]
    async fn invalid_priority_is_reported() {
        let server = MockServer::start().await;
        let mut screen = screen(&server, &["ROLE_ADMIN"]);
        screen.open_create();
        if let Some(draft) = screen.form_mut().modal_mut().create_draft_mut() {
            draft.priority = "URGENT".into();
            draft.title = String::new();
        }

        assert!(matches!(screen.submit().await, Err(SubmitError::Invalid(_))));
        assert!(screen.form().errors().contains("priority"));
        assert!(screen.form().errors().contains("title"));
        assert!(screen.form().is_open());
    }
}
