use serde::{Deserialize, Serialize};

use crate::section::{impl_section_data, SectionForm, SectionId};
use crate::validation::{is_valid_date, FieldErrors, INVALID_DATE_MESSAGE};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseRecord {
    pub state: String,
    pub license_number: String,
    /// `YYYY-MM-DD`
    pub expiration_date: String,
    pub status: String,
}

impl LicenseRecord {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("/state", &self.state);
        errors.require_text("/license_number", &self.license_number);
        errors.require_format(
            "/expiration_date",
            &self.expiration_date,
            is_valid_date,
            INVALID_DATE_MESSAGE,
        );
        errors.require_text("/status", &self.status);
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// State medical licenses. Holds any number of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Licensure {
    pub licenses: Vec<LicenseRecord>,
}

impl SectionForm for Licensure {
    const ID: SectionId = SectionId::Licensure;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.licenses.is_empty() {
            errors.insert("/licenses", "Add at least one license");
        }
        for (index, license) in self.licenses.iter().enumerate() {
            errors.extend_prefixed(&format!("/licenses/{index}"), license.validate());
        }
        errors
    }

    /// At least one fully valid record; blank or partial extra rows do not count against it.
    fn is_complete(&self) -> bool {
        self.licenses.iter().any(LicenseRecord::is_valid)
    }

    impl_section_data!(Licensure);
}
