//! Profile sections.
//!
//! A profile is split into seven self-contained sections, each edited by its own
//! form and persisted independently. Every section record implements
//! [`SectionForm`], which carries its required-field predicate.

pub mod completion;
pub mod digital_signature;
pub mod document_uploads;
pub mod draft;
pub mod licensure;
pub mod optional_preferences;
pub mod personal_identifiers;
pub mod professional_information;
pub mod questionnaires;

use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::identity::UserIdentity;
use crate::validation::FieldErrors;

pub use completion::CompletionMap;
pub use digital_signature::DigitalSignature;
pub use document_uploads::DocumentUploads;
pub use draft::{ProfileDraft, StoredProfile};
pub use licensure::{LicenseRecord, Licensure};
pub use optional_preferences::OptionalPreferences;
pub use personal_identifiers::{Address, PersonalIdentifiers};
pub use professional_information::ProfessionalInformation;
pub use questionnaires::{Answer, QuestionResponse, Questionnaires};

/// Section identifiers, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionId {
    #[serde(rename = "personalIdentifiers", alias = "personal_identifiers")]
    PersonalIdentifiers,
    #[serde(rename = "professionalInformation", alias = "professional_information")]
    ProfessionalInformation,
    #[serde(rename = "licensure")]
    Licensure,
    #[serde(rename = "documentUploads", alias = "document_uploads")]
    DocumentUploads,
    #[serde(rename = "questionnaires")]
    Questionnaires,
    #[serde(rename = "digitalSignature", alias = "digital_signature")]
    DigitalSignature,
    #[serde(rename = "optionalPreferences", alias = "optional_preferences")]
    OptionalPreferences,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::PersonalIdentifiers,
        SectionId::ProfessionalInformation,
        SectionId::Licensure,
        SectionId::DocumentUploads,
        SectionId::Questionnaires,
        SectionId::DigitalSignature,
        SectionId::OptionalPreferences,
    ];

    pub const REQUIRED: [SectionId; 6] = [
        SectionId::PersonalIdentifiers,
        SectionId::ProfessionalInformation,
        SectionId::Licensure,
        SectionId::DocumentUploads,
        SectionId::Questionnaires,
        SectionId::DigitalSignature,
    ];

    pub fn is_required(self) -> bool {
        self != SectionId::OptionalPreferences
    }

    /// Position in the wizard.
    pub fn index(self) -> usize {
        SectionId::ALL
            .iter()
            .position(|id| *id == self)
            .unwrap_or_default()
    }

    /// camelCase key used by the storage service.
    pub fn key(self) -> &'static str {
        match self {
            SectionId::PersonalIdentifiers => "personalIdentifiers",
            SectionId::ProfessionalInformation => "professionalInformation",
            SectionId::Licensure => "licensure",
            SectionId::DocumentUploads => "documentUploads",
            SectionId::Questionnaires => "questionnaires",
            SectionId::DigitalSignature => "digitalSignature",
            SectionId::OptionalPreferences => "optionalPreferences",
        }
    }

    /// snake_case key used by the canonical stored document.
    pub fn snake_key(self) -> &'static str {
        match self {
            SectionId::PersonalIdentifiers => "personal_identifiers",
            SectionId::ProfessionalInformation => "professional_information",
            SectionId::Licensure => "licensure",
            SectionId::DocumentUploads => "document_uploads",
            SectionId::Questionnaires => "questionnaires",
            SectionId::DigitalSignature => "digital_signature",
            SectionId::OptionalPreferences => "optional_preferences",
        }
    }

    /// Accepts either naming convention.
    pub fn from_key(key: &str) -> Option<SectionId> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.key() == key || id.snake_key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::PersonalIdentifiers => "Personal Identifiers",
            SectionId::ProfessionalInformation => "Professional Information",
            SectionId::Licensure => "Licensure",
            SectionId::DocumentUploads => "Document Uploads",
            SectionId::Questionnaires => "Questionnaires",
            SectionId::DigitalSignature => "Attestation & Signature",
            SectionId::OptionalPreferences => "Preferences",
        }
    }
}

impl Display for SectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Contract every section record fulfils.
pub trait SectionForm:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const ID: SectionId;

    /// Field-level messages for everything that is missing or malformed.
    fn validate(&self) -> FieldErrors;

    /// Required-field predicate. Defaults to "no validation errors".
    fn is_complete(&self) -> bool {
        self.validate().is_empty()
    }

    /// One-shot fill from the identity provider. Returns whether anything changed.
    fn prefill_from_identity(&mut self, _identity: &UserIdentity) -> bool {
        false
    }

    fn into_data(self) -> SectionData;

    fn from_data(data: SectionData) -> Option<Self>;
}

/// A section value tagged with the section it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "data")]
pub enum SectionData {
    #[serde(rename = "personalIdentifiers")]
    PersonalIdentifiers(PersonalIdentifiers),
    #[serde(rename = "professionalInformation")]
    ProfessionalInformation(ProfessionalInformation),
    #[serde(rename = "licensure")]
    Licensure(Licensure),
    #[serde(rename = "documentUploads")]
    DocumentUploads(DocumentUploads),
    #[serde(rename = "questionnaires")]
    Questionnaires(Questionnaires),
    #[serde(rename = "digitalSignature")]
    DigitalSignature(DigitalSignature),
    #[serde(rename = "optionalPreferences")]
    OptionalPreferences(OptionalPreferences),
}

macro_rules! section_forms {
    ($($variant:ident),* $(,)?) => {
        impl SectionData {
            pub fn id(&self) -> SectionId {
                match self {
                    $(SectionData::$variant(_) => SectionId::$variant,)*
                }
            }

            pub fn is_complete(&self) -> bool {
                match self {
                    $(SectionData::$variant(form) => form.is_complete(),)*
                }
            }

            pub fn errors(&self) -> FieldErrors {
                match self {
                    $(SectionData::$variant(form) => form.validate(),)*
                }
            }

            /// Record without the section tag.
            pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
                match self {
                    $(SectionData::$variant(form) => serde_json::to_value(form),)*
                }
            }

            /// Parses an untagged record for `id`.
            pub fn from_value(id: SectionId, value: serde_json::Value) -> serde_json::Result<SectionData> {
                Ok(match id {
                    $(SectionId::$variant => SectionData::$variant(serde_json::from_value(value)?),)*
                })
            }

            /// Empty record for `id`.
            pub fn empty(id: SectionId) -> SectionData {
                match id {
                    $(SectionId::$variant => SectionData::$variant(Default::default()),)*
                }
            }
        }
    };
}

section_forms!(
    PersonalIdentifiers,
    ProfessionalInformation,
    Licensure,
    DocumentUploads,
    Questionnaires,
    DigitalSignature,
    OptionalPreferences,
);

/// Implements the `SectionData` conversions of [`SectionForm`] for a record.
macro_rules! impl_section_data {
    ($variant:ident) => {
        fn into_data(self) -> $crate::section::SectionData {
            $crate::section::SectionData::$variant(self)
        }

        fn from_data(data: $crate::section::SectionData) -> Option<Self> {
            match data {
                $crate::section::SectionData::$variant(form) => Some(form),
                _ => None,
            }
        }
    };
}

pub(crate) use impl_section_data;

/// Change notification sent from a section editor to the wizard.
///
/// `skip_persist` marks updates that came from storage (hydration) or from the
/// identity-provider prefill; those must not be written back.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionUpdate {
    pub section: SectionId,
    pub data: SectionData,
    pub is_complete: bool,
    pub skip_persist: bool,
}

impl SectionUpdate {
    pub fn user_edit(data: SectionData) -> Self {
        Self {
            section: data.id(),
            is_complete: data.is_complete(),
            data,
            skip_persist: false,
        }
    }

    pub fn hydration(data: SectionData) -> Self {
        Self {
            section: data.id(),
            is_complete: data.is_complete(),
            data,
            skip_persist: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_keys_round_trip_both_conventions() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::from_key(id.key()), Some(id));
            assert_eq!(SectionId::from_key(id.snake_key()), Some(id));
        }
        assert_eq!(SectionId::from_key("unknown"), None);
    }

    #[test]
    fn serde_accepts_snake_case_alias() {
        let id: SectionId = serde_json::from_str("\"digital_signature\"").unwrap();
        assert_eq!(id, SectionId::DigitalSignature);
        assert_eq!(
            serde_json::to_string(&SectionId::DigitalSignature).unwrap(),
            "\"digitalSignature\""
        );
    }

    #[test]
    fn every_section_has_a_distinct_title() {
        let titles: std::collections::BTreeSet<_> =
            SectionId::ALL.into_iter().map(SectionId::title).collect();
        assert_eq!(titles.len(), SectionId::ALL.len());
        assert_eq!(SectionId::DigitalSignature.title(), "Attestation & Signature");
    }

    #[test]
    fn preferences_is_the_only_optional_section() {
        let optional: Vec<_> = SectionId::ALL
            .into_iter()
            .filter(|id| !id.is_required())
            .collect();
        assert_eq!(optional, vec![SectionId::OptionalPreferences]);
        assert_eq!(SectionId::REQUIRED.len(), 6);
    }

    #[test]
    fn index_follows_wizard_order() {
        assert_eq!(SectionId::PersonalIdentifiers.index(), 0);
        assert_eq!(SectionId::OptionalPreferences.index(), 6);
    }

    #[test]
    fn empty_data_matches_requested_section() {
        for id in SectionId::ALL {
            assert_eq!(SectionData::empty(id).id(), id);
        }
    }

    #[test]
    fn value_conversion_strips_the_tag() {
        let data = SectionData::empty(SectionId::Licensure);
        let value = data.to_value().unwrap();
        assert!(value.get("section").is_none());
        assert_eq!(
            SectionData::from_value(SectionId::Licensure, value).unwrap(),
            data
        );
    }
}
