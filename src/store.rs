use async_trait::async_trait;

use crate::types::errors::StoreError;
use crate::types::status::Status;

/// The narrow surface the sweeper needs from the status platform.
///
/// Implementations wrap whatever transport the platform speaks; the sweeper
/// is agnostic to it and tests substitute an in-memory store.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// One page of the authenticated account's own statuses carrying `tag`,
    /// newest first. `max_id` requests the page older than that status id;
    /// an empty page ends pagination.
    async fn tagged_statuses(
        &self,
        tag: &str,
        limit: u32,
        max_id: Option<&str>,
    ) -> Result<Vec<Status>, StoreError>;

    /// Fetches a single status. Fails with [`StoreError::NotFound`] when it
    /// no longer exists.
    async fn status(&self, id: &str) -> Result<Status, StoreError>;

    /// Deletes a status. Deleting one that is already gone is a success,
    /// not an error: the sweeper re-runs with at-least-once semantics.
    async fn delete_status(&self, id: &str) -> Result<(), StoreError>;
}
