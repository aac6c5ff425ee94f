use super::field_errors::FieldErrors;

/// An in-progress form value that validates into a wire payload.
pub trait Draft: Clone + Send + Sync {
    type Payload;

    /// Record the acting user as the creator or updater.
    fn stamp_actor(&mut self, actor_id: i64);

    fn validate(&self) -> Result<Self::Payload, FieldErrors>;
}

/// A draft that edits an existing record.
pub trait UpdateDraft: Draft {
    fn target_id(&self) -> i64;
}
