use serde::{Deserialize, Serialize};

use crate::section::{impl_section_data, SectionForm, SectionId};
use crate::validation::{
    is_non_negative_integer, is_valid_npi, FieldErrors, INVALID_NPI_MESSAGE, REQUIRED_MESSAGE,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalInformation {
    pub npi: String,
    pub primary_specialty: String,
    pub years_of_experience: String,
    /// `None` until the question has been answered.
    pub board_certified: Option<bool>,
    /// Required once `board_certified` is answered yes.
    pub certifying_board: String,
    pub dea_number: String,
}

impl SectionForm for ProfessionalInformation {
    const ID: SectionId = SectionId::ProfessionalInformation;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_format("/npi", &self.npi, is_valid_npi, INVALID_NPI_MESSAGE);
        errors.require_text("/primary_specialty", &self.primary_specialty);
        errors.require_format(
            "/years_of_experience",
            &self.years_of_experience,
            is_non_negative_integer,
            "Enter a whole number of years",
        );
        match self.board_certified {
            None => errors.insert("/board_certified", REQUIRED_MESSAGE),
            Some(true) => {
                errors.require_text("/certifying_board", &self.certifying_board);
            }
            Some(false) => {}
        }
        errors
    }

    impl_section_data!(ProfessionalInformation);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ProfessionalInformation {
        ProfessionalInformation {
            npi: "1234567893".into(),
            primary_specialty: "Emergency Medicine".into(),
            years_of_experience: "12".into(),
            board_certified: Some(false),
            certifying_board: String::new(),
            dea_number: String::new(),
        }
    }

    #[test]
    fn complete_without_board_certification() {
        assert!(complete().is_complete());
    }

    #[test]
    fn board_certified_requires_board_name() {
        let mut record = complete();
        record.board_certified = Some(true);
        assert_eq!(
            record.validate().get("/certifying_board"),
            Some(REQUIRED_MESSAGE)
        );

        record.certifying_board = "ABEM".into();
        assert!(record.is_complete());
    }

    #[test]
    fn unanswered_board_question_is_incomplete() {
        let mut record = complete();
        record.board_certified = None;
        assert!(record.validate().contains("/board_certified"));
    }

    #[test]
    fn npi_and_years_are_format_checked() {
        let mut record = complete();
        record.npi = "12345".into();
        record.years_of_experience = "a decade".into();
        let errors = record.validate();
        assert_eq!(errors.get("/npi"), Some(INVALID_NPI_MESSAGE));
        assert!(errors.contains("/years_of_experience"));
    }
}
