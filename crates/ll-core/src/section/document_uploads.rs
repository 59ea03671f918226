use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::documents::{DocumentCategory, UploadedDocument};
use crate::section::{impl_section_data, SectionForm, SectionId};
use crate::validation::FieldErrors;

/// Uploaded credential documents, one per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentUploads {
    pub documents: BTreeMap<DocumentCategory, UploadedDocument>,
}

impl DocumentUploads {
    pub fn record(&mut self, category: DocumentCategory, document: UploadedDocument) {
        self.documents.insert(category, document);
    }

    pub fn missing_required(&self) -> Vec<DocumentCategory> {
        DocumentCategory::REQUIRED
            .into_iter()
            .filter(|category| !self.documents.contains_key(category))
            .collect()
    }
}

impl SectionForm for DocumentUploads {
    const ID: SectionId = SectionId::DocumentUploads;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for category in self.missing_required() {
            errors.insert(
                format!("/documents/{}", category.key()),
                format!("{} is required", category.label()),
            );
        }
        for (category, document) in &self.documents {
            if document.url.trim().is_empty() {
                errors.insert(
                    format!("/documents/{}/url", category.key()),
                    "Upload did not complete",
                );
            }
        }
        errors
    }

    impl_section_data!(DocumentUploads);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> UploadedDocument {
        UploadedDocument {
            url: format!("file:///docs/{name}"),
            size: 2048,
            name: name.to_string(),
        }
    }

    #[test]
    fn requires_cv_license_and_government_id() {
        let mut section = DocumentUploads::default();
        assert_eq!(section.missing_required().len(), 3);

        section.record(DocumentCategory::Cv, doc("cv.pdf"));
        section.record(DocumentCategory::MedicalLicense, doc("license.png"));
        assert!(!section.is_complete());
        assert!(section.validate().contains("/documents/government_id"));

        section.record(DocumentCategory::GovernmentId, doc("passport.jpg"));
        assert!(section.is_complete());
    }

    #[test]
    fn optional_categories_do_not_gate_completion() {
        let mut section = DocumentUploads::default();
        section.record(DocumentCategory::DeaCertificate, doc("dea.pdf"));
        assert!(!section.is_complete());
        assert_eq!(section.missing_required().len(), 3);
    }

    #[test]
    fn document_without_url_is_flagged() {
        let mut section = DocumentUploads::default();
        for category in DocumentCategory::REQUIRED {
            section.record(category, doc("x.pdf"));
        }
        section
            .documents
            .get_mut(&DocumentCategory::Cv)
            .unwrap()
            .url
            .clear();
        assert!(!section.is_complete());
    }
}
