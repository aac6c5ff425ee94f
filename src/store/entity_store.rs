//! One cached remote collection.
//!
//! Every operation reads the credential from the session first and gives
//! up with `Unauthenticated` before touching the network or the busy flag.
//! Successful operations mutate the cache and publish a `StoreEvent`;
//! failures are logged, returned, and leave the cache as it was.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use serde_json::Value;
use tokio::sync::broadcast;

use super::{
    error::StoreError,
    event::StoreEvent,
    merge::merge_record,
    resource::{Record, Resource, Roles, Tasks, Users},
    task_filter::TaskFilter,
};
use crate::{api::client::ApiClient, context::Session, credential::Credential};

const EVENT_CAPACITY: usize = 64;

pub type RoleStore = EntityStore<Roles>;
pub type UserStore = EntityStore<Users>;
pub type TaskStore = EntityStore<Tasks>;

pub struct EntityStore<R: Resource> {
    api: ApiClient,
    session: Session,
    items: RwLock<Vec<R::Record>>,
    busy: AtomicBool,
    events: broadcast::Sender<StoreEvent>,
}

/// Clears the busy flag on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<R: Resource> EntityStore<R> {
    pub fn new(api: ApiClient, session: Session) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        EntityStore {
            api,
            session,
            items: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
            events,
        }
    }

    // ── Reads ──────────────────────────────────────────────────

    /// Run `f` over the cached collection without cloning it.
    pub fn with_items<T>(&self, f: impl FnOnce(&[R::Record]) -> T) -> T {
        f(&self.read())
    }

    pub fn items(&self) -> Vec<R::Record> {
        self.read().clone()
    }

    pub fn get(&self, id: i64) -> Option<R::Record> {
        self.read().iter().find(|item| item.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── Operations ─────────────────────────────────────────────

    /// `GET` the collection and replace the cache. Returns the new count.
    pub async fn fetch_all(&self) -> Result<usize, StoreError> {
        self.fetch_from(R::PATH, &[]).await
    }

    pub(super) async fn fetch_from(&self, path: &str, query: &[(&str, &str)]) -> Result<usize, StoreError> {
        let credential = self.credential()?;
        let _busy = self.begin();

        let records: Vec<R::Record> = self
            .api
            .get_json(path, query, &credential)
            .await
            .map_err(|e| self.failed("fetch", e.into()))?;

        let count = records.len();
        *self.write() = records;
        self.publish(StoreEvent::Replaced { count });
        Ok(count)
    }

    /// `POST` the payload and append the record the server returns.
    pub async fn create(&self, payload: &R::Create) -> Result<R::Record, StoreError> {
        let credential = self.credential()?;
        let _busy = self.begin();

        let created: R::Record = self
            .api
            .post_json(R::PATH, payload, &credential)
            .await
            .map_err(|e| self.failed("create", e.into()))?;

        self.write().push(created.clone());
        self.publish(StoreEvent::Created { id: created.id() });
        Ok(created)
    }

    /// `PUT {id}` and merge the returned fields into the cached record.
    ///
    /// Returns the merged record, or `None` when `id` was not cached (the
    /// server still saw the update).
    pub async fn update(&self, id: i64, payload: &R::Update) -> Result<Option<R::Record>, StoreError> {
        let credential = self.credential()?;
        let _busy = self.begin();

        let patch: Value = self
            .api
            .put_json(&item_path::<R>(id), payload, &credential)
            .await
            .map_err(|e| self.failed("update", e.into()))?;

        let merged = {
            let mut items = self.write();
            let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
                tracing::debug!(resource = R::NAME, id, "updated record not cached, nothing to merge");
                return Ok(None);
            };
            let merged = merge_record(&*slot, patch).map_err(|source| {
                self.failed("update", StoreError::Merge { resource: R::NAME, id, source })
            })?;
            *slot = merged.clone();
            merged
        };

        self.publish(StoreEvent::Updated { id });
        Ok(Some(merged))
    }

    /// `DELETE {id}` and drop it from the cache. Returns whether it was cached.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let credential = self.credential()?;
        let _busy = self.begin();

        self.api
            .delete(&item_path::<R>(id), &credential)
            .await
            .map_err(|e| self.failed("delete", e.into()))?;

        let removed = {
            let mut items = self.write();
            let before = items.len();
            items.retain(|item| item.id() != id);
            items.len() != before
        };

        if removed {
            self.publish(StoreEvent::Deleted { id });
        }
        Ok(removed)
    }

    // ── Helpers ────────────────────────────────────────────────

    fn credential(&self) -> Result<Credential, StoreError> {
        self.session.credential().ok_or_else(|| {
            tracing::warn!(resource = R::NAME, "no credentials available, log in first");
            StoreError::Unauthenticated
        })
    }

    fn begin(&self) -> BusyGuard<'_> {
        self.busy.store(true, Ordering::SeqCst);
        BusyGuard(&self.busy)
    }

    fn failed(&self, operation: &'static str, error: StoreError) -> StoreError {
        tracing::error!(resource = R::NAME, operation, error = %error, "store operation failed");
        error
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<R::Record>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<R::Record>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskStore {
    /// Replace the cache with one of the server-side task views.
    pub async fn fetch_filtered(&self, filter: &TaskFilter) -> Result<usize, StoreError> {
        self.fetch_from(filter.path(), &[("username", filter.username())]).await
    }
}

fn item_path<R: Resource>(id: i64) -> String {
    format!("{}/{id}", R::PATH)
}
