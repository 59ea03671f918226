use serde::{Deserialize, Serialize};

use crate::identity::UserIdentity;
use crate::section::{impl_section_data, SectionForm, SectionId};
use crate::validation::{
    is_blank, is_valid_date, is_valid_email, is_valid_phone, FieldErrors, INVALID_DATE_MESSAGE,
    INVALID_EMAIL_MESSAGE, INVALID_PHONE_MESSAGE,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Legal name, contact details and home address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalIdentifiers {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Optional; checked only when present.
    pub date_of_birth: String,
    pub address: Address,
}

impl SectionForm for PersonalIdentifiers {
    const ID: SectionId = SectionId::PersonalIdentifiers;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("/first_name", &self.first_name);
        errors.require_text("/last_name", &self.last_name);
        errors.require_format("/email", &self.email, is_valid_email, INVALID_EMAIL_MESSAGE);
        errors.require_format("/phone", &self.phone, is_valid_phone, INVALID_PHONE_MESSAGE);
        if !is_blank(&self.date_of_birth) && !is_valid_date(&self.date_of_birth) {
            errors.insert("/date_of_birth", INVALID_DATE_MESSAGE);
        }
        errors.require_text("/address/street", &self.address.street);
        errors.require_text("/address/city", &self.address.city);
        errors.require_text("/address/state", &self.address.state);
        errors.require_text("/address/zip", &self.address.zip);
        errors
    }

    /// Fills name and email, only into fields that are still blank.
    fn prefill_from_identity(&mut self, identity: &UserIdentity) -> bool {
        let (first, last) = identity.name_parts();
        let mut changed = false;
        for (field, value) in [
            (&mut self.first_name, first),
            (&mut self.last_name, last),
            (&mut self.email, identity.email.trim().to_string()),
        ] {
            if is_blank(field) && !value.is_empty() {
                *field = value;
                changed = true;
            }
        }
        changed
    }

    impl_section_data!(PersonalIdentifiers);
}
