use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::services::form_service::SubmitError;
use crate::services::submission_service::SubmissionError;
use crate::utils::validation::ValidationErrors;

pub type Result<T> = std::result::Result<T, Error>;

pub const SUBMISSION_FAILED_MESSAGE: &str = "Submission failed, please try again.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl From<SubmitError> for Error {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => Error::Validation(errors),
            SubmitError::InFlight => {
                Error::Conflict("A submission is already in progress".to_string())
            }
            SubmitError::Failed(source) => Error::Submission(source),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::Validation(fields) => {
                let body = Json(json!({
                    "error": "validation_failed",
                    "fields": fields,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            // Already logged with its orphaned id by the form controller.
            Error::Submission(_) => (StatusCode::BAD_GATEWAY, SUBMISSION_FAILED_MESSAGE.to_string()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg),
            // Oversized bodies surface here as 413.
            Error::Multipart(err) => (err.status(), err.body_text()),
            other => {
                tracing::error!(error = ?other, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::record_store::StoreError;
    use crate::utils::validation::{FormField, EMAIL_REQUIRED};
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: Error) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_lists_failing_fields_only() {
        let mut errors = ValidationErrors::default();
        errors.set(FormField::Email, EMAIL_REQUIRED);

        let (status, body) = body_of(Error::Validation(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["fields"], json!({ "email": EMAIL_REQUIRED }));
    }

    #[tokio::test]
    async fn submission_failure_hides_store_details() {
        let err = SubmissionError::Upload {
            application_id: "A3".into(),
            path: "A3/resume/cv.pdf".into(),
            source: StoreError::Rejected {
                status: 403,
                message: "new row violates row-level security policy".into(),
            },
        };

        let (status, body) = body_of(Error::from(SubmitError::Failed(err))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], SUBMISSION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn in_flight_submission_is_a_conflict() {
        let (status, _) = body_of(Error::from(SubmitError::InFlight)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
