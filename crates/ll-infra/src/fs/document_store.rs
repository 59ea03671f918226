use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use ll_core::documents::storage_prefix;
use ll_core::ports::DocumentStoragePort;
use ll_core::{DocumentCategory, DocumentFile, UploadedDocument, UserId};
use tokio::fs;
use tracing::debug;

/// Stores uploads under `<root>/documents/<user>/<category>/<uuid>-<file name>`.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

/// Last path component of `name`, with anything outside a conservative set replaced.
fn safe_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl DocumentStoragePort for FsDocumentStore {
    async fn upload_document(
        &self,
        user_id: &UserId,
        category: DocumentCategory,
        file: &DocumentFile,
    ) -> Result<UploadedDocument> {
        if !user_id.is_path_safe() {
            bail!("user id is not usable as a directory name: {user_id:?}");
        }

        let dir = self.root.join(storage_prefix(user_id, category));
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create document dir failed: {}", dir.display()))?;

        let stored_name = format!(
            "{}-{}",
            uuid::Uuid::new_v4(),
            safe_file_name(&file.file_name)
        );
        let path = dir.join(stored_name);
        fs::write(&path, &file.bytes)
            .await
            .with_context(|| format!("write document failed: {}", path.display()))?;

        let absolute = fs::canonicalize(&path).await.unwrap_or(path);
        debug!(user_id = %user_id, category = %category, path = %absolute.display(), "document stored");

        Ok(UploadedDocument {
            url: format!("file://{}", absolute.display()),
            size: file.bytes.len() as u64,
            name: file.file_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_names_are_reduced_to_a_safe_basename() {
        assert_eq!(safe_file_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_file_name("C:\\Users\\me\\My CV.pdf"), "My_CV.pdf");
        assert_eq!(safe_file_name("license.png"), "license.png");
    }

    #[tokio::test]
    async fn upload_writes_bytes_under_user_and_category() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(temp_dir.path().to_path_buf());

        let doc = store
            .upload_document(
                &UserId::from("u1"),
                DocumentCategory::MedicalLicense,
                &DocumentFile::new("license.pdf", vec![1, 2, 3]),
            )
            .await
            .unwrap();

        assert_eq!(doc.size, 3);
        assert_eq!(doc.name, "license.pdf");
        assert!(doc.url.starts_with("file://"));
        assert!(doc.url.ends_with("-license.pdf"));

        let dir = temp_dir.path().join("documents/u1/medical_license");
        let entries: Vec<_> = std::fs::read_dir(dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let stored = std::fs::read(entries[0].as_ref().unwrap().path()).unwrap();
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unsafe_user_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(temp_dir.path().to_path_buf());

        let result = store
            .upload_document(
                &UserId::from("../u1"),
                DocumentCategory::Cv,
                &DocumentFile::new("cv.pdf", vec![1]),
            )
            .await;

        assert!(result.is_err());
    }
}
