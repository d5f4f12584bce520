pub mod applications;
pub mod docs;
pub mod health;
pub mod jobs;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::middleware::{cors::cors_layer, rate_limit};
use crate::AppState;

pub fn build_router(state: AppState) -> Result<Router> {
    let config = state.config.clone();

    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi_json));

    let public_api = Router::new()
        .route("/api/jobs", get(jobs::list_jobs))
        .route("/api/countries", get(jobs::list_countries))
        .route("/api/visa-statuses", get(jobs::list_visa_statuses))
        .route("/api/applications", post(applications::submit_application))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .with_state(state)
        .layer(cors_layer(config.cors_allowed_origin.as_deref())?)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Ok(app)
}
