use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::draft::ApplicationDraft;

/// Review state of an application. Only `Pending` is ever written here; the
/// remaining transitions belong to the reviewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interviewed,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Application {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub position: String,
    pub experience: String,
    pub education: String,
    pub passport_number: String,
    pub visa_status: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

/// Row sent to the `applications` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplication {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub position: String,
    pub experience: String,
    pub education: String,
    pub passport_number: String,
    pub visa_status: String,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

impl NewApplication {
    pub const TABLE: &'static str = "applications";

    pub fn from_draft(draft: &ApplicationDraft) -> Self {
        let cover_letter = draft.cover_letter.trim();
        Self {
            full_name: draft.full_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            nationality: draft.nationality.clone(),
            position: draft.position.trim().to_string(),
            experience: draft.experience.trim().to_string(),
            education: draft.education.trim().to_string(),
            passport_number: draft.passport_number.trim().to_string(),
            visa_status: draft
                .visa_status
                .map(|v| v.as_str().to_string())
                .unwrap_or_default(),
            status: ApplicationStatus::Pending,
            cover_letter: (!cover_letter.is_empty()).then(|| cover_letter.to_string()),
        }
    }

    /// The row as the store hands it back once it has assigned an id.
    pub fn into_stored(self, id: impl Into<String>, created_at: DateTime<Utc>) -> Application {
        Application {
            id: id.into(),
            created_at,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            nationality: self.nationality,
            position: self.position,
            experience: self.experience,
            education: self.education,
            passport_number: self.passport_number,
            visa_status: self.visa_status,
            status: self.status,
            cover_letter: self.cover_letter,
        }
    }
}
