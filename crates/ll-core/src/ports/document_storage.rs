use async_trait::async_trait;

use crate::documents::{DocumentCategory, DocumentFile, UploadedDocument};
use crate::ids::UserId;

#[async_trait]
pub trait DocumentStoragePort: Send + Sync {
    /// Store `file` for `user_id` under `category`.
    ///
    /// Callers check the upload policy first; implementations may assume the
    /// file is within limits.
    async fn upload_document(
        &self,
        user_id: &UserId,
        category: DocumentCategory,
        file: &DocumentFile,
    ) -> anyhow::Result<UploadedDocument>;
}
