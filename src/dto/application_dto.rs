use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::application::Application;
use crate::models::document::Document;
use crate::services::submission_service::SubmittedApplication;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplyQuery {
    /// Title of the opening the visitor picked before opening the form.
    pub job: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitApplicationResponse {
    pub status: String,
    pub message: String,
    pub application: Application,
    pub documents: Vec<Document>,
}

impl From<SubmittedApplication> for SubmitApplicationResponse {
    fn from(submitted: SubmittedApplication) -> Self {
        Self {
            status: "success".to_string(),
            message: "Thank you for your application! We will contact you soon.".to_string(),
            application: submitted.application,
            documents: submitted.documents,
        }
    }
}
