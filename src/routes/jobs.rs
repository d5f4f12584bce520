use axum::{response::IntoResponse, Json};

use crate::dto::reference_dto::{visa_status_options, VisaStatusOption};
use crate::models::job::JobPosition;
use crate::reference::countries::{country_options, CountryOption};
use crate::reference::openings::current_openings;

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses((status = 200, description = "Current openings", body = [JobPosition]))
)]
#[axum::debug_handler]
pub async fn list_jobs() -> impl IntoResponse {
    Json(current_openings())
}

#[utoipa::path(
    get,
    path = "/api/countries",
    responses((status = 200, description = "Nationality options", body = [CountryOption]))
)]
#[axum::debug_handler]
pub async fn list_countries() -> impl IntoResponse {
    Json(country_options())
}

#[utoipa::path(
    get,
    path = "/api/visa-statuses",
    responses((status = 200, description = "UAE visa status options", body = [VisaStatusOption]))
)]
#[axum::debug_handler]
pub async fn list_visa_statuses() -> impl IntoResponse {
    Json(visa_status_options())
}
