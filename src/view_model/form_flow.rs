//! The create/edit/delete modal shared by every list screen.
//!
//! Create and edit drafts are stamped with the acting user and validated
//! before anything is sent; a draft that fails keeps its modal open with
//! the per-field messages. Deletes skip validation.

use super::{
    modal::{DeleteTarget, Modal},
    submit::{SubmitError, Submitted},
};
use crate::{
    draft::{Draft, UpdateDraft},
    field_errors::FieldErrors,
    role::Role,
    role_schema::{RoleCreateDraft, RoleUpdateDraft},
    store::{
        entity_store::EntityStore,
        resource::{Record, Resource, Roles, Tasks, Users},
    },
    task::Task,
    task_schema::{TaskCreateDraft, TaskUpdateDraft},
    user::User,
    user_schema::{UserCreateDraft, UserUpdateDraft},
};

/// A resource a screen can create, edit and delete through a modal.
pub trait Editable: Resource {
    type CreateForm: Draft<Payload = Self::Create> + Default;
    type EditForm: UpdateDraft<Payload = Self::Update> + for<'a> From<&'a Self::Record>;

    /// How the delete confirmation names a record.
    fn label(record: &Self::Record) -> String;
}

impl Editable for Roles {
    type CreateForm = RoleCreateDraft;
    type EditForm = RoleUpdateDraft;

    fn label(role: &Role) -> String {
        role.name.clone()
    }
}

impl Editable for Users {
    type CreateForm = UserCreateDraft;
    type EditForm = UserUpdateDraft;

    fn label(user: &User) -> String {
        user.username.clone()
    }
}

impl Editable for Tasks {
    type CreateForm = TaskCreateDraft;
    type EditForm = TaskUpdateDraft;

    fn label(task: &Task) -> String {
        task.title.clone()
    }
}

pub type FormModal<R> = Modal<<R as Editable>::CreateForm, <R as Editable>::EditForm>;

pub struct FormFlow<R: Editable> {
    modal: FormModal<R>,
    errors: FieldErrors,
}

impl<R: Editable> Default for FormFlow<R> {
    fn default() -> Self {
        FormFlow { modal: Modal::Closed, errors: FieldErrors::new() }
    }
}

impl<R: Editable> FormFlow<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> &FormModal<R> {
        &self.modal
    }

    /// For editing draft fields in place.
    pub fn modal_mut(&mut self) -> &mut FormModal<R> {
        &mut self.modal
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn open_create(&mut self) {
        self.open(Modal::Create(R::CreateForm::default()));
    }

    pub fn open_create_with(&mut self, draft: R::CreateForm) {
        self.open(Modal::Create(draft));
    }

    pub fn open_edit(&mut self, record: &R::Record) {
        self.open(Modal::Edit(R::EditForm::from(record)));
    }

    pub fn open_delete(&mut self, record: &R::Record) {
        self.open(Modal::Delete(DeleteTarget { id: record.id(), label: R::label(record) }));
    }

    /// Open the edit modal for a cached record. Returns whether it was found.
    pub fn open_edit_by_id(&mut self, store: &EntityStore<R>, id: i64) -> bool {
        match store.get(id) {
            Some(record) => {
                self.open_edit(&record);
                true
            }
            None => false,
        }
    }

    pub fn open_delete_by_id(&mut self, store: &EntityStore<R>, id: i64) -> bool {
        match store.get(id) {
            Some(record) => {
                self.open_delete(&record);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open(Modal::Closed);
    }

    fn open(&mut self, modal: FormModal<R>) {
        self.modal = modal;
        self.errors.clear();
    }

    /// Validate and send whatever the open modal holds, closing it on success.
    pub async fn submit(&mut self, store: &EntityStore<R>, actor_id: i64) -> Result<Submitted, SubmitError> {
        self.errors.clear();

        let sent = match &mut self.modal {
            Modal::Closed => return Err(SubmitError::NoForm),
            Modal::Create(draft) => {
                draft.stamp_actor(actor_id);
                match draft.validate() {
                    Ok(payload) => store.create(&payload).await.map(|_| Submitted::Created),
                    Err(errors) => return Err(reject::<R>(&mut self.errors, errors)),
                }
            }
            Modal::Edit(draft) => {
                draft.stamp_actor(actor_id);
                let id = draft.target_id();
                match draft.validate() {
                    Ok(payload) => store.update(id, &payload).await.map(|_| Submitted::Updated),
                    Err(errors) => return Err(reject::<R>(&mut self.errors, errors)),
                }
            }
            Modal::Delete(target) => store.delete(target.id).await.map(|_| Submitted::Deleted),
        };

        match sent {
            Ok(submitted) => {
                self.close();
                Ok(submitted)
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, error = %e, "submission failed, keeping the form open");
                Err(SubmitError::Store(e))
            }
        }
    }
}

fn reject<R: Resource>(slot: &mut FieldErrors, errors: FieldErrors) -> SubmitError {
    tracing::debug!(resource = R::NAME, fields = errors.len(), "draft rejected by validation");
    *slot = errors.clone();
    SubmitError::Invalid(errors)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{any, body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::{api::client::ApiClient, context::Session, credential::Credential};

    fn store(server: &MockServer) -> EntityStore<Roles> {
        EntityStore::new(ApiClient::new(server.uri()), Session::with_credential(Credential::derive("admin", "admin")))
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_store() {
        let server = MockServer::start().await;
        Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;
        let store = store(&server);

        let mut flow = FormFlow::<Roles>::new();
        flow.open_create();
        if let Some(draft) = flow.modal_mut().create_draft_mut() {
            draft.name = "   ".into();
        }

        let err = flow.submit(&store, 4).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(flow.errors().contains("name"));
        assert!(flow.is_open());
        assert_eq!(flow.modal().create_draft().map(|d| d.created_by_id), Some(4));
    }

    #[tokio::test]
    async fn successful_create_closes_the_modal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/roles"))
            .and(body_partial_json(json!({ "name": "New Role", "createdById": 4 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 8, "name": "New Role" })))
            .expect(1)
            .mount(&server)
            .await;
        let store = store(&server);

        let mut flow = FormFlow::<Roles>::new();
        flow.open_create();
        assert_eq!(flow.submit(&store, 4).await.unwrap(), Submitted::Created);

        assert!(!flow.is_open());
        assert!(flow.errors().is_empty());
        assert_eq!(store.get(8).map(|r| r.name), Some("New Role".to_string()));
    }

    #[tokio::test]
    async fn store_failure_keeps_the_modal_open() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/roles/3"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;
        let store = store(&server);
        let role: Role = serde_json::from_value(json!({ "id": 3, "name": "Ops" })).unwrap();

        let mut flow = FormFlow::<Roles>::new();
        flow.open_delete(&role);
        assert_eq!(flow.modal().delete_target().map(|t| t.label.as_str()), Some("Ops"));

        let err = flow.submit(&store, 1).await.unwrap_err();
        assert!(matches!(err, SubmitError::Store(_)));
        assert!(flow.is_open());
    }

    #[tokio::test]
    async fn nothing_open_is_an_error() {
        let server = MockServer::start().await;
        let mut flow = FormFlow::<Roles>::new();
        assert!(matches!(flow.submit(&store(&server), 1).await, Err(SubmitError::NoForm)));
    }

    #[test]
    fn edit_prefills_from_the_record() {
        let role: Role = serde_json::from_value(json!({ "id": 5, "name": "Dev", "description": "Builds" })).unwrap();
        let mut flow = FormFlow::<Roles>::new();
        flow.open_edit(&role);

        let draft = flow.modal().edit_draft().unwrap();
        assert_eq!(draft.id, 5);
        assert_eq!(draft.name, "Dev");

        flow.close();
        assert!(!flow.is_open());
    }
}
