//! Field-level validation shared by every section.
//!
//! Rules only flag; they never reject a write. A section is complete when its
//! required-field predicate passes, and the messages collected here are what the
//! form shows next to each field.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address";
pub const INVALID_PHONE_MESSAGE: &str = "Enter a 10-digit phone number";
pub const INVALID_NPI_MESSAGE: &str = "NPI must be exactly 10 digits";
pub const INVALID_DATE_MESSAGE: &str = "Enter a date as YYYY-MM-DD";
pub const DETAILS_REQUIRED_MESSAGE: &str = "Please provide details";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validation messages keyed by JSON pointer into the section record,
/// e.g. `/address/city` or `/licenses/1/state`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merges `other`, prefixing each of its paths with `prefix`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.insert(format!("{prefix}{field}"), message);
        }
    }

    /// Records a "required" error when `value` is blank. Returns whether it passed.
    pub fn require_text(&mut self, field: &str, value: &str) -> bool {
        if is_blank(value) {
            self.insert(field, REQUIRED_MESSAGE);
            return false;
        }
        true
    }

    /// Required text that must additionally satisfy `check`.
    pub fn require_format(
        &mut self,
        field: &str,
        value: &str,
        check: fn(&str) -> bool,
        message: &str,
    ) -> bool {
        if !self.require_text(field, value) {
            return false;
        }
        if !check(value) {
            self.insert(field, message);
            return false;
        }
        true
    }

    /// "Do you have X?" with a follow-up field that becomes required on yes.
    pub fn require_answer_with_details(
        &mut self,
        answer_field: &str,
        answer: Option<bool>,
        details_field: &str,
        details: &str,
        requires_details: bool,
    ) -> bool {
        match answer {
            None => {
                self.insert(answer_field, REQUIRED_MESSAGE);
                false
            }
            Some(true) if requires_details && is_blank(details) => {
                self.insert(details_field, DETAILS_REQUIRED_MESSAGE);
                false
            }
            Some(_) => true,
        }
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Ten digits once every non-digit character is stripped.
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() == 10
}

/// National Provider Identifier: exactly ten ASCII digits, nothing else.
pub fn is_valid_npi(value: &str) -> bool {
    let value = value.trim();
    value.len() == 10 && value.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}

pub fn is_non_negative_integer(value: &str) -> bool {
    value.trim().parse::<u32>().is_ok()
}
