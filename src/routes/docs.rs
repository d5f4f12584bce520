use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::application_dto::SubmitApplicationResponse;
use crate::dto::reference_dto::VisaStatusOption;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::document::{Document, DocumentType};
use crate::models::draft::VisaStatus;
use crate::models::job::JobPosition;
use crate::reference::countries::CountryOption;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::list_countries,
        crate::routes::jobs::list_visa_statuses,
        crate::routes::applications::submit_application,
    ),
    components(schemas(
        Application,
        ApplicationStatus,
        CountryOption,
        Document,
        DocumentType,
        JobPosition,
        SubmitApplicationResponse,
        VisaStatus,
        VisaStatusOption,
    )),
    tags((name = "careers", description = "Consulate recruitment form"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
