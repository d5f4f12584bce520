use async_trait::async_trait;

use crate::models::application::{Application, NewApplication};
use crate::models::document::Document;
use crate::models::draft::FileAttachment;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("record store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("record store returned no row")]
    EmptyResponse,

    #[error("could not decode record store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The hosted tables and object storage that applications are written to.
///
/// Carried in `AppState` as `Arc<dyn RecordStore>` so tests can swap in a fake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts the application and returns the stored row, with its id and
    /// creation timestamp filled in by the store.
    async fn insert_application(&self, row: &NewApplication) -> Result<Application, StoreError>;

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        file: &FileAttachment,
    ) -> Result<(), StoreError>;

    async fn insert_document(&self, row: &Document) -> Result<(), StoreError>;
}
