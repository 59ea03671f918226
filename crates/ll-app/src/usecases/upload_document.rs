use std::sync::Arc;
use std::time::Duration;

use ll_core::ports::DocumentStoragePort;
use ll_core::{DocumentCategory, DocumentError, DocumentFile, DocumentPolicy, UploadedDocument, UserId};
use tracing::{info, warn};

/// Use case for uploading a credential document.
///
/// The policy is checked before any bytes leave the client. The storage call is
/// bounded by a client-side timeout; when it elapses the upload is reported as
/// failed even though the underlying request may still complete.
pub struct UploadDocument {
    documents: Arc<dyn DocumentStoragePort>,
    policy: DocumentPolicy,
    timeout: Duration,
}

impl UploadDocument {
    pub fn new(
        documents: Arc<dyn DocumentStoragePort>,
        policy: DocumentPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            documents,
            policy,
            timeout,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        category: DocumentCategory,
        file: &DocumentFile,
    ) -> Result<UploadedDocument, DocumentError> {
        self.policy.check(category, file)?;

        let upload = self.documents.upload_document(user_id, category, file);
        match tokio::time::timeout(self.timeout, upload).await {
            Ok(Ok(document)) => {
                info!(
                    user_id = %user_id,
                    category = %category,
                    size = document.size,
                    "document uploaded"
                );
                Ok(document)
            }
            Ok(Err(err)) => {
                warn!(user_id = %user_id, category = %category, error = %err, "document upload failed");
                Err(DocumentError::Storage(err.to_string()))
            }
            Err(_) => {
                warn!(
                    user_id = %user_id,
                    category = %category,
                    timeout_secs = self.timeout.as_secs(),
                    "document upload timed out"
                );
                Err(DocumentError::TimedOut {
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl CountingStore {
        fn new(delay: Duration, fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl DocumentStoragePort for CountingStore {
        async fn upload_document(
            &self,
            user_id: &UserId,
            category: DocumentCategory,
            file: &DocumentFile,
        ) -> anyhow::Result<UploadedDocument> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                anyhow::bail!("bucket unavailable");
            }
            Ok(UploadedDocument {
                url: format!("mem://{user_id}/{category}/{}", file.file_name),
                size: file.size() as u64,
                name: file.file_name.clone(),
            })
        }
    }

    fn upload(store: Arc<CountingStore>) -> UploadDocument {
        UploadDocument::new(store, DocumentPolicy::default(), Duration::from_secs(30))
    }

    #[tokio::test]
    async fn uploads_valid_file() {
        let store = Arc::new(CountingStore::new(Duration::ZERO, false));
        let doc = upload(store.clone())
            .execute(
                &UserId::from("u1"),
                DocumentCategory::Cv,
                &DocumentFile::new("cv.pdf", vec![7; 64]),
            )
            .await
            .unwrap();
        assert_eq!(doc.size, 64);
        assert_eq!(doc.name, "cv.pdf");
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn policy_violation_never_reaches_storage() {
        let store = Arc::new(CountingStore::new(Duration::ZERO, false));
        let err = upload(store.clone())
            .execute(
                &UserId::from("u1"),
                DocumentCategory::Cv,
                &DocumentFile::new("cv.exe", vec![7; 64]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::ExtensionNotAllowed { .. }));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_storage_times_out() {
        let store = Arc::new(CountingStore::new(Duration::from_secs(60), false));
        let err = upload(store)
            .execute(
                &UserId::from("u1"),
                DocumentCategory::GovernmentId,
                &DocumentFile::new("id.png", vec![1; 8]),
            )
            .await
            .unwrap_err();
        assert_eq!(err, DocumentError::TimedOut { secs: 30 });
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let store = Arc::new(CountingStore::new(Duration::ZERO, true));
        let err = upload(store)
            .execute(
                &UserId::from("u1"),
                DocumentCategory::MedicalLicense,
                &DocumentFile::new("license.pdf", vec![1; 8]),
            )
            .await
            .unwrap_err();
        assert_eq!(err, DocumentError::Storage("bucket unavailable".into()));
    }
}
