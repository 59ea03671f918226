use serde::{Deserialize, Serialize};

use crate::identity::UserIdentity;
use crate::section::{impl_section_data, SectionForm, SectionId};
use crate::validation::{is_blank, is_valid_date, FieldErrors, INVALID_DATE_MESSAGE};

/// Attestation that everything in the profile is accurate, signed by typed name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalSignature {
    pub signature_name: String,
    pub attested: bool,
    /// `YYYY-MM-DD`
    pub signed_date: String,
}

impl SectionForm for DigitalSignature {
    const ID: SectionId = SectionId::DigitalSignature;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("/signature_name", &self.signature_name);
        if !self.attested {
            errors.insert("/attested", "You must attest before signing");
        }
        errors.require_format(
            "/signed_date",
            &self.signed_date,
            is_valid_date,
            INVALID_DATE_MESSAGE,
        );
        errors
    }

    fn prefill_from_identity(&mut self, identity: &UserIdentity) -> bool {
        let name = identity.display_name.trim();
        if is_blank(&self.signature_name) && !name.is_empty() {
            self.signature_name = name.to_string();
            return true;
        }
        false
    }

    impl_section_data!(DigitalSignature);
}
