use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Public quote endpoint; no account needed to ask for a price.
pub async fn estimate(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::EstimateRequest>,
) -> axum::response::Response {
    match services.pricing.estimate(&body.depart, &body.arrivee).await {
        Ok(quote) => Json(quote).into_response(),
        Err(e) => errors::pricing_error_to_response(e),
    }
}
