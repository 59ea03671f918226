//! Credential document uploads: categories, the upload policy and its errors.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Client-side limit applied before any bytes reach storage.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Upload timeout when the configuration does not set one.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Cv,
    MedicalLicense,
    GovernmentId,
    BoardCertification,
    DeaCertificate,
}

impl DocumentCategory {
    pub const REQUIRED: [DocumentCategory; 3] = [
        DocumentCategory::Cv,
        DocumentCategory::MedicalLicense,
        DocumentCategory::GovernmentId,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DocumentCategory::Cv => "cv",
            DocumentCategory::MedicalLicense => "medical_license",
            DocumentCategory::GovernmentId => "government_id",
            DocumentCategory::BoardCertification => "board_certification",
            DocumentCategory::DeaCertificate => "dea_certificate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentCategory::Cv => "CV",
            DocumentCategory::MedicalLicense => "Medical license",
            DocumentCategory::GovernmentId => "Government-issued ID",
            DocumentCategory::BoardCertification => "Board certification",
            DocumentCategory::DeaCertificate => "DEA certificate",
        }
    }

    /// Lower-case extensions accepted for this category.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            DocumentCategory::Cv => &["pdf", "doc", "docx"],
            DocumentCategory::MedicalLicense
            | DocumentCategory::GovernmentId
            | DocumentCategory::BoardCertification
            | DocumentCategory::DeaCertificate => &["pdf", "jpg", "jpeg", "png"],
        }
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A file picked by the user, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Lower-cased extension after the last dot, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Where storage put an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub url: String,
    pub size: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("file is empty")]
    Empty,
    #[error("file is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },
    #[error("file has no extension")]
    MissingExtension,
    #[error(".{extension} files are not accepted for {category}")]
    ExtensionNotAllowed {
        category: DocumentCategory,
        extension: String,
    },
    #[error("upload timed out after {secs}s")]
    TimedOut { secs: u64 },
    #[error("storage error: {0}")]
    Storage(String),
}

/// Size and extension checks applied before upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentPolicy {
    pub max_bytes: usize,
}

impl Default for DocumentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_DOCUMENT_BYTES,
        }
    }
}

impl DocumentPolicy {
    pub fn check(&self, category: DocumentCategory, file: &DocumentFile) -> Result<(), DocumentError> {
        if file.bytes.is_empty() {
            return Err(DocumentError::Empty);
        }
        if file.size() > self.max_bytes {
            return Err(DocumentError::TooLarge {
                size: file.size(),
                max: self.max_bytes,
            });
        }
        let extension = file.extension().ok_or(DocumentError::MissingExtension)?;
        if !category.allowed_extensions().contains(&extension.as_str()) {
            return Err(DocumentError::ExtensionNotAllowed {
                category,
                extension,
            });
        }
        Ok(())
    }
}

/// Storage key for an upload, `documents/<user>/<category>`.
pub fn storage_prefix(user_id: &UserId, category: DocumentCategory) -> String {
    format!("documents/{}/{}", user_id, category.key())
}
