use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::models::draft::ApplicationDraft;

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Please enter a valid phone number";
pub const NATIONALITY_REQUIRED: &str = "Nationality is required";
pub const EDUCATION_REQUIRED: &str = "Education is required";
pub const RESUME_REQUIRED: &str = "Resume is required";
pub const COVER_LETTER_REQUIRED: &str = "Cover letter is required";

/// Which rule set the form enforces. `Standard` leaves the cover letter
/// optional and only requires a phone number; `Strict` requires a cover
/// letter and checks the phone format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    #[default]
    Standard,
    Strict,
}

impl FromStr for FormVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(FormVariant::Standard),
            "strict" => Ok(FormVariant::Strict),
            other => Err(format!("expected `standard` or `strict`, got `{}`", other)),
        }
    }
}

/// Fields that carry validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    Phone,
    Nationality,
    Education,
    Resume,
    CoverLetter,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::Nationality,
        FormField::Education,
        FormField::Resume,
        FormField::CoverLetter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FullName => "full_name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Nationality => "nationality",
            FormField::Education => "education",
            FormField::Resume => "resume",
            FormField::CoverLetter => "cover_letter",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field messages. A field is `None` exactly when it passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<&'static str>,
}

impl ValidationErrors {
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::FullName => self.full_name,
            FormField::Email => self.email,
            FormField::Phone => self.phone,
            FormField::Nationality => self.nationality,
            FormField::Education => self.education,
            FormField::Resume => self.resume,
            FormField::CoverLetter => self.cover_letter,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut Option<&'static str> {
        match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Nationality => &mut self.nationality,
            FormField::Education => &mut self.education,
            FormField::Resume => &mut self.resume,
            FormField::CoverLetter => &mut self.cover_letter,
        }
    }

    pub fn set(&mut self, field: FormField, message: &'static str) {
        *self.slot(field) = Some(message);
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        FormField::ALL
            .iter()
            .filter_map(move |f| self.get(*f).map(|msg| (*f, msg)))
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.iter().map(|(f, _)| f).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?[0-9\-\s()]{10,}$").expect("phone pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Runs every rule against the draft and collects all failures.
pub fn validate_draft(draft: &ApplicationDraft, variant: FormVariant) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if is_blank(&draft.full_name) {
        errors.set(FormField::FullName, FULL_NAME_REQUIRED);
    }

    if is_blank(&draft.email) {
        errors.set(FormField::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&draft.email) {
        errors.set(FormField::Email, EMAIL_INVALID);
    }

    if is_blank(&draft.phone) {
        errors.set(FormField::Phone, PHONE_REQUIRED);
    } else if variant == FormVariant::Strict && !is_valid_phone(&draft.phone) {
        errors.set(FormField::Phone, PHONE_INVALID);
    }

    if draft.nationality.is_empty() {
        errors.set(FormField::Nationality, NATIONALITY_REQUIRED);
    }

    if is_blank(&draft.education) {
        errors.set(FormField::Education, EDUCATION_REQUIRED);
    }

    if draft.resume.is_none() {
        errors.set(FormField::Resume, RESUME_REQUIRED);
    }

    if variant == FormVariant::Strict && is_blank(&draft.cover_letter) {
        errors.set(FormField::CoverLetter, COVER_LETTER_REQUIRED);
    }

    errors
}
