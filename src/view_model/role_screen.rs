use std::sync::Arc;

use super::{
    form_flow::FormFlow,
    list_view::ListView,
    submit::{SubmitError, Submitted},
};
use crate::{
    profile::Profile,
    store::{entity_store::RoleStore, error::StoreError, resource::Roles},
};

/// The roles table: search on name and description.
pub struct RoleScreen {
    actor: Profile,
    list: ListView<Roles>,
    form: FormFlow<Roles>,
}

impl RoleScreen {
    pub fn new(store: Arc<RoleStore>, actor: Profile) -> Self {
        RoleScreen { actor, list: ListView::new(store), form: FormFlow::new() }
    }

    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.list.store().fetch_all().await?;
        self.list.refresh();
        Ok(())
    }

    pub fn list(&self) -> &ListView<Roles> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<Roles> {
        &mut self.list
    }

    pub fn form(&self) -> &FormFlow<Roles> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormFlow<Roles> {
        &mut self.form
    }

    pub fn open_edit(&mut self, id: i64) -> bool {
        self.form.open_edit_by_id(self.list.store(), id)
    }

    pub fn open_delete(&mut self, id: i64) -> bool {
        self.form.open_delete_by_id(self.list.store(), id)
    }

    /// Submit the open modal, then re-fetch every role.
    pub async fn submit(&mut self) -> Result<Submitted, SubmitError> {
        let store = Arc::clone(self.list.store());
        let submitted = self.form.submit(&store, self.actor.id).await?;
        // A failed re-fetch is logged by the store and leaves the old rows.
        let _ = store.fetch_all().await;
        self.list.refresh();
        Ok(submitted)
    }
}
