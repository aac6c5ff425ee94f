use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::{
    choice::Choice,
    role::Role,
    store::{
        entity_store::EntityStore,
        event::StoreEvent,
        resource::{Record, Resource},
    },
    task::Task,
    user::User,
};

pub const PAGE_SIZE: usize = 10;

/// Text a list screen matches its search box against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.priority.as_str(), self.status.as_str()]
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.email.as_str(), self.status.as_str()]
    }
}

impl Searchable for Role {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_deref().unwrap_or_default()]
    }
}

/// Case-insensitive substring match on any field. A blank query matches all.
pub fn matches_query<T: Searchable>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || item.search_fields().iter().any(|field| field.to_lowercase().contains(&query))
}

/// Number of pages for `total` items; never less than one.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// The 1-based `page` of `items`. Empty past the end and for page 0.
pub fn page_window<T>(items: &[T], page: usize) -> &[T] {
    let Some(start) = page.checked_sub(1).map(|p| p * PAGE_SIZE) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    &items[start..items.len().min(start + PAGE_SIZE)]
}

/// A searched, paginated slice of one store, kept current by its events.
pub struct ListView<R: Resource>
where
    R::Record: Searchable,
{
    store: Arc<EntityStore<R>>,
    events: broadcast::Receiver<StoreEvent>,
    query: String,
    page: usize,
    matched: usize,
    visible: Vec<R::Record>,
}

impl<R: Resource> ListView<R>
where
    R::Record: Searchable,
{
    pub fn new(store: Arc<EntityStore<R>>) -> Self {
        let events = store.subscribe();
        let mut view = ListView { store, events, query: String::new(), page: 1, matched: 0, visible: Vec::new() };
        view.recompute();
        view
    }

    pub fn store(&self) -> &Arc<EntityStore<R>> {
        &self.store
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Items matching the query across all pages.
    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn page_count(&self) -> usize {
        page_count(self.matched)
    }

    /// The current page, in ascending id order.
    pub fn visible(&self) -> &[R::Record] {
        &self.visible
    }

    /// New search text always starts again from page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
        self.recompute();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.recompute();
    }

    /// Apply any pending store events. Returns whether the slice was rebuilt.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn recompute(&mut self) {
        let (matched, mut visible) = self.store.with_items(|items| {
            let hits: Vec<&R::Record> = items.iter().filter(|item| matches_query(*item, &self.query)).collect();
            let window = page_window(&hits, self.page).iter().map(|item| (*item).clone()).collect::<Vec<_>>();
            (hits.len(), window)
        });
        visible.sort_by_key(Record::id);
        self.matched = matched;
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{api::client::ApiClient, context::Session, credential::Credential, store::resource::Roles};

    fn task(title: &str, priority: &str, status: &str) -> Task {
        serde_json::from_value(json!({
            "id": 1,
            "title": title,
            "description": "d",
            "deadline": "2025-01-01T00:00:00",
            "priority": priority,
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn high_matches_only_the_high_priority_task() {
        let tasks = [task("Write spec", "HIGH", "TODO"), task("Deploy", "LOW", "COMPLETED")];
        let hits: Vec<&Task> = tasks.iter().filter(|t| matches_query(*t, "high")).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Write spec");
    }

    #[test]
    fn blank_query_matches_everything() {
        let t = task("Deploy", "LOW", "COMPLETED");
        assert!(matches_query(&t, ""));
        assert!(matches_query(&t, "   "));
        assert!(!matches_query(&t, "in_pro"));
        assert!(matches_query(&t, "DEPLOY"));
    }

    #[test]
    fn pages_of_twenty_five() {
        let items: Vec<usize> = (1..=25).collect();
        assert_eq!(page_window(&items, 1), &(1..=10).collect::<Vec<_>>()[..]);
        assert_eq!(page_window(&items, 3), &[21, 22, 23, 24, 25]);
        assert!(page_window(&items, 0).is_empty());
        assert_eq!(page_count(items.len()), 3);
        assert_eq!(page_count(0), 1);

        for n in [0usize, 1, 9, 10, 11, 25, 30] {
            let items: Vec<usize> = (0..n).collect();
            for p in 1..=5 {
                assert_eq!(!page_window(&items, p).is_empty(), (p - 1) * PAGE_SIZE < n, "n={n} p={p}");
            }
        }
    }

    #[tokio::test]
    async fn view_follows_store_events_and_sorts_by_id() {
        use wiremock::{
            matchers::{method, path},
            Mock, MockServer, ResponseTemplate,
        };

        let server = MockServer::start().await;
        let roles: Vec<_> = [3, 1, 2, 12]
            .iter()
            .map(|id| json!({ "id": id, "name": format!("role{id}"), "description": "team" }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(roles))
            .mount(&server)
            .await;

        let store = Arc::new(EntityStore::<Roles>::new(
            ApiClient::new(server.uri()),
            Session::with_credential(Credential::derive("admin", "admin")),
        ));
        let mut view = ListView::new(store.clone());
        assert!(view.visible().is_empty());

        store.fetch_all().await.unwrap();
        assert!(view.refresh());
        let ids: Vec<i64> = view.visible().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 12]);
        assert!(!view.refresh());

        view.set_page(2);
        assert!(view.visible().is_empty());
        view.set_query("ROLE1");
        assert_eq!(view.page(), 1);
        assert_eq!(view.matched(), 2);
        assert_eq!(view.visible().iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 12]);
    }
}
