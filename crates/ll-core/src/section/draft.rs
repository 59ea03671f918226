use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::section::{
    DigitalSignature, DocumentUploads, Licensure, OptionalPreferences,
    PersonalIdentifiers, ProfessionalInformation, Questionnaires, SectionData, SectionId,
};

/// In-memory aggregate of all seven sections for one editing session.
///
/// `None` means storage has no value for that section yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub personal_identifiers: Option<PersonalIdentifiers>,
    pub professional_information: Option<ProfessionalInformation>,
    pub licensure: Option<Licensure>,
    pub document_uploads: Option<DocumentUploads>,
    pub questionnaires: Option<Questionnaires>,
    pub digital_signature: Option<DigitalSignature>,
    pub optional_preferences: Option<OptionalPreferences>,
}

impl ProfileDraft {
    pub fn get(&self, section: SectionId) -> Option<SectionData> {
        match section {
            SectionId::PersonalIdentifiers => self
                .personal_identifiers
                .clone()
                .map(SectionData::PersonalIdentifiers),
            SectionId::ProfessionalInformation => self
                .professional_information
                .clone()
                .map(SectionData::ProfessionalInformation),
            SectionId::Licensure => self.licensure.clone().map(SectionData::Licensure),
            SectionId::DocumentUploads => self
                .document_uploads
                .clone()
                .map(SectionData::DocumentUploads),
            SectionId::Questionnaires => {
                self.questionnaires.clone().map(SectionData::Questionnaires)
            }
            SectionId::DigitalSignature => self
                .digital_signature
                .clone()
                .map(SectionData::DigitalSignature),
            SectionId::OptionalPreferences => self
                .optional_preferences
                .clone()
                .map(SectionData::OptionalPreferences),
        }
    }

    pub fn set(&mut self, data: SectionData) {
        match data {
            SectionData::PersonalIdentifiers(v) => self.personal_identifiers = Some(v),
            SectionData::ProfessionalInformation(v) => self.professional_information = Some(v),
            SectionData::Licensure(v) => self.licensure = Some(v),
            SectionData::DocumentUploads(v) => self.document_uploads = Some(v),
            SectionData::Questionnaires(v) => self.questionnaires = Some(v),
            SectionData::DigitalSignature(v) => self.digital_signature = Some(v),
            SectionData::OptionalPreferences(v) => self.optional_preferences = Some(v),
        }
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.get(section).is_some()
    }

    /// Sections that have a value, in wizard order.
    pub fn sections(&self) -> Vec<SectionData> {
        SectionId::ALL
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

/// Profile record as returned by the storage boundary, already normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredProfile {
    pub draft: ProfileDraft,
    /// Flags as last written; may be stale relative to `draft`.
    pub completion_flags: BTreeMap<SectionId, bool>,
    pub profile_complete: bool,
    pub completion_percentage: u8,
}
