/// What a delete confirmation needs to show and send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: i64,
    pub label: String,
}

/// The one modal a list screen can have open.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal<C, U> {
    #[default]
    Closed,
    Create(C),
    Edit(U),
    Delete(DeleteTarget),
}

impl<C, U> Modal<C, U> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn create_draft(&self) -> Option<&C> {
        match self {
            Modal::Create(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn create_draft_mut(&mut self) -> Option<&mut C> {
        match self {
            Modal::Create(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn edit_draft(&self) -> Option<&U> {
        match self {
            Modal::Edit(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut U> {
        match self {
            Modal::Edit(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn delete_target(&self) -> Option<&DeleteTarget> {
        match self {
            Modal::Delete(target) => Some(target),
            _ => None,
        }
    }
}
