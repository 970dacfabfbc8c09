use crate::db::DbResult;
use crate::models::resource::{Resource, ResourceUpdate};

#[async_trait::async_trait]
pub trait ResourceRepo: Send + Sync {
    /// Updates the resource with the given uid. Only the fields set on the update are written.
    /// Returns the stored resource after the update.
    async fn update(&self, update: ResourceUpdate) -> DbResult<Resource>;

    /// Fetches a resource by its uid
    async fn get_by_uid(&self, uid: &str) -> DbResult<Option<Resource>>;
}
