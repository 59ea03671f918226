use serde::{Deserialize, Serialize};

use crate::section::{impl_section_data, SectionForm, SectionId};
use crate::validation::FieldErrors;

/// Assignment preferences. Never gates profile completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionalPreferences {
    pub preferred_states: Vec<String>,
    pub shift_types: Vec<String>,
    pub minimum_daily_rate: Option<u32>,
    pub travel_radius_miles: Option<u32>,
    pub notes: String,
}

impl SectionForm for OptionalPreferences {
    const ID: SectionId = SectionId::OptionalPreferences;

    fn validate(&self) -> FieldErrors {
        FieldErrors::new()
    }

    fn is_complete(&self) -> bool {
        true
    }

    impl_section_data!(OptionalPreferences);
}
