use serde::{Deserialize, Serialize};

use crate::section::{impl_section_data, SectionForm, SectionId};
use crate::validation::{FieldErrors, REQUIRED_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionResponse {
    pub question_id: String,
    pub prompt: String,
    /// A yes answer must be explained in `details`.
    pub requires_details: bool,
    pub answer: Option<Answer>,
    pub details: String,
}

impl QuestionResponse {
    pub fn new(question_id: &str, prompt: &str, requires_details: bool) -> Self {
        Self {
            question_id: question_id.to_string(),
            prompt: prompt.to_string(),
            requires_details,
            answer: None,
            details: String::new(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_answer_with_details(
            "/answer",
            self.answer.map(|a| a == Answer::Yes),
            "/details",
            &self.details,
            self.requires_details,
        );
        errors
    }
}

/// Disclosure questions every physician must answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Questionnaires {
    pub responses: Vec<QuestionResponse>,
}

impl Questionnaires {
    pub fn standard() -> Self {
        Self {
            responses: vec![
                QuestionResponse::new(
                    "malpractice_claims",
                    "Have you had any malpractice claims, settlements or judgments in the past 10 years?",
                    true,
                ),
                QuestionResponse::new(
                    "disciplinary_action",
                    "Has any license, registration or privilege ever been denied, limited, suspended or revoked?",
                    true,
                ),
                QuestionResponse::new(
                    "felony_conviction",
                    "Have you ever been convicted of a felony?",
                    true,
                ),
                QuestionResponse::new(
                    "health_limitation",
                    "Do you have any condition that limits your ability to practise safely?",
                    true,
                ),
            ],
        }
    }

    pub fn answer(&mut self, question_id: &str, answer: Answer, details: &str) -> bool {
        match self
            .responses
            .iter_mut()
            .find(|r| r.question_id == question_id)
        {
            Some(response) => {
                response.answer = Some(answer);
                response.details = details.to_string();
                true
            }
            None => false,
        }
    }
}

impl Default for Questionnaires {
    fn default() -> Self {
        Self::standard()
    }
}

impl SectionForm for Questionnaires {
    const ID: SectionId = SectionId::Questionnaires;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.responses.is_empty() {
            errors.insert("/responses", REQUIRED_MESSAGE);
        }
        for (index, response) in self.responses.iter().enumerate() {
            errors.extend_prefixed(&format!("/responses/{index}"), response.validate());
        }
        errors
    }

    impl_section_data!(Questionnaires);
}
