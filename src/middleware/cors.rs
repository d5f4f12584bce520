use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{Error, Result};

/// Browsers post the form from the landing page's origin. Without a configured
/// origin every origin is allowed.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    match allowed_origin {
        None => Ok(layer.allow_origin(Any)),
        Some(origin) => {
            let value = HeaderValue::from_str(origin.trim()).map_err(|e| {
                Error::Config(format!("Invalid value for CORS_ALLOWED_ORIGIN: {}", e))
            })?;
            Ok(layer.allow_origin(value))
        }
    }
}
