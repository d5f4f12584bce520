use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// UAE visa held by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VisaStatus {
    Resident,
    Tourist,
    Visit,
    None,
}

impl VisaStatus {
    pub const ALL: [VisaStatus; 4] = [
        VisaStatus::Resident,
        VisaStatus::Tourist,
        VisaStatus::Visit,
        VisaStatus::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisaStatus::Resident => "resident",
            VisaStatus::Tourist => "tourist",
            VisaStatus::Visit => "visit",
            VisaStatus::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VisaStatus::Resident => "UAE Resident",
            VisaStatus::Tourist => "Tourist Visa",
            VisaStatus::Visit => "Visit Visa",
            VisaStatus::None => "No UAE Visa",
        }
    }
}

impl fmt::Display for VisaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resident" => Ok(VisaStatus::Resident),
            "tourist" => Ok(VisaStatus::Tourist),
            "visit" => Ok(VisaStatus::Visit),
            "none" => Ok(VisaStatus::None),
            other => Err(format!("Unknown visa status: {}", other)),
        }
    }
}

/// An uploaded file held in memory until it is pushed to object storage.
#[derive(Clone, PartialEq)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FileAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// In-progress state of one application form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// ISO 3166-1 alpha-2 code picked from the country list.
    pub nationality: String,
    pub position: String,
    pub experience: String,
    pub education: String,
    pub passport_number: String,
    pub visa_status: Option<VisaStatus>,
    pub cover_letter: String,
    pub resume: Option<FileAttachment>,
    pub cover_letter_file: Option<FileAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visa_status_parses_form_values() {
        assert_eq!("resident".parse::<VisaStatus>(), Ok(VisaStatus::Resident));
        assert_eq!(" Visit ".parse::<VisaStatus>(), Ok(VisaStatus::Visit));
        assert_eq!("none".parse::<VisaStatus>(), Ok(VisaStatus::None));
        assert!("golden".parse::<VisaStatus>().is_err());
    }

    #[test]
    fn attachment_reports_size_without_content() {
        let file = FileAttachment::new("My CV.PDF", "application/pdf", &b"%PDF-1.7"[..]);
        assert_eq!(file.size(), 8);
        assert!(!format!("{:?}", file).contains("%PDF"));
        assert!(format!("{:?}", file).contains("size: 8"));
    }
}
