use std::sync::Arc;

use super::{
    form_flow::FormFlow,
    list_view::ListView,
    submit::{SubmitError, Submitted},
};
use crate::{
    profile::Profile,
    store::{
        entity_store::{RoleStore, UserStore},
        error::StoreError,
        resource::Users,
    },
};

/// The users table, plus the roles a user form can pick from.
pub struct UserScreen {
    actor: Profile,
    roles: Arc<RoleStore>,
    list: ListView<Users>,
    form: FormFlow<Users>,
}

impl UserScreen {
    pub fn new(users: Arc<UserStore>, roles: Arc<RoleStore>, actor: Profile) -> Self {
        UserScreen { actor, roles, list: ListView::new(users), form: FormFlow::new() }
    }

    /// Fetch users, then roles. Only the user fetch can fail the load.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.list.store().fetch_all().await?;
        self.list.refresh();
        if let Err(e) = self.roles.fetch_all().await {
            tracing::warn!(error = %e, "role choices unavailable");
        }
        Ok(())
    }

    /// `(id, name)` of every cached role, for the role picker.
    pub fn role_choices(&self) -> Vec<(i64, String)> {
        self.roles.with_items(|roles| roles.iter().map(|role| (role.id, role.name.clone())).collect())
    }

    pub fn list(&self) -> &ListView<Users> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<Users> {
        &mut self.list
    }

    pub fn form(&self) -> &FormFlow<Users> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormFlow<Users> {
        &mut self.form
    }

    pub fn open_edit(&mut self, id: i64) -> bool {
        self.form.open_edit_by_id(self.list.store(), id)
    }

    pub fn open_delete(&mut self, id: i64) -> bool {
        self.form.open_delete_by_id(self.list.store(), id)
    }

    /// Submit the open modal, then re-fetch every user.
    pub async fn submit(&mut self) -> Result<Submitted, SubmitError> {
        let store = Arc::clone(self.list.store());
        let submitted = self.form.submit(&store, self.actor.id).await?;
        let _ = store.fetch_all().await;
        self.list.refresh();
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::{api::client::ApiClient, context::Session, credential::Credential};

    fn user_json(id: i64, username: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "username": username,
            "email": format!("{username}@example.com"),
            "roles": [{ "id": 2, "name": "ROLE_USER" }],
            "status": status
        })
    }

    async fn screen(server: &MockServer) -> UserScreen {
        let api = ApiClient::new(server.uri());
        let session = Session::with_credential(Credential::derive("root", "pw"));
        let users = Arc::new(UserStore::new(api.clone(), session.clone()));
        let roles = Arc::new(RoleStore::new(api, session));
        let actor = Profile { id: 1, username: "root".into(), roles: vec!["ROLE_ADMIN".into()] };
        UserScreen::new(users, roles, actor)
    }

    #[tokio::test]
    async fn load_survives_missing_roles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                user_json(1, "ada", "ACTIVE"),
                user_json(2, "bob", "INACTIVE")
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/roles"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut screen = screen(&server).await;
        screen.load().await.unwrap();
        assert!(screen.role_choices().is_empty());

        screen.list_mut().set_query("inactive");
        assert_eq!(screen.list().visible().iter().map(|u| u.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn bad_email_and_short_password_stay_local() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(201)).expect(0).mount(&server).await;

        let mut screen = screen(&server).await;
        screen.form_mut().open_create();
        if let Some(draft) = screen.form_mut().modal_mut().create_draft_mut() {
            draft.email = "not-an-email".into();
            draft.password = "123".into();
            draft.status = "PENDING".into();
        }

        let err = screen.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        let errors = screen.form().errors();
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
        assert!(errors.contains("status"));
        assert!(screen.form().is_open());
    }
}
