use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::models::{DocumentHandle, Patch};
use crate::utils::AppError;

pub type DocumentStream = BoxStream<'static, Result<DocumentHandle, AppError>>;

/// The two collection operations the updater needs from a document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Streams every document of `collection` in the store's default order.
    async fn list_documents(&self, collection: &str) -> Result<DocumentStream, AppError>;

    /// Partially updates one document. Fails with `AppError::Update` when the
    /// write is rejected or the document no longer exists.
    async fn apply_patch(
        &self,
        collection: &str,
        handle: &DocumentHandle,
        patch: &Patch,
    ) -> Result<(), AppError>;
}
