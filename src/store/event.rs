/// Published after every successful change to a store's cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Replaced { count: usize },
    Created { id: i64 },
    Updated { id: i64 },
    Deleted { id: i64 },
}
