/// Server-side task views, each keyed by a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    ByCreator(String),
    CreatedToday(String),
    CreatedNext7Days(String),
}

impl TaskFilter {
    pub fn path(&self) -> &'static str {
        match self {
            TaskFilter::ByCreator(_) => "/tasks/by-creator-name",
            TaskFilter::CreatedToday(_) => "/tasks/created-today",
            TaskFilter::CreatedNext7Days(_) => "/tasks/created-next-7-days",
        }
    }

    pub fn username(&self) -> &str {
        match self {
            TaskFilter::ByCreator(name) | TaskFilter::CreatedToday(name) | TaskFilter::CreatedNext7Days(name) => {
                name
            }
        }
    }
}
