use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use naycourse_core::CourierId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_couriers).post(create_courier))
        .route(
            "/:id",
            get(get_courier).put(update_courier).delete(delete_courier),
        )
        .route("/:id/status", axum::routing::patch(update_courier_status))
}

pub async fn create_courier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::CourierRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    match services.couriers.create(&body.into_draft(), Utc::now()) {
        Ok(courier) => (StatusCode::CREATED, Json(courier)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_couriers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    match services.couriers.list() {
        Ok(couriers) => Json(couriers).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_courier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: CourierId = match common::parse_id(&id, "courier") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.couriers.get(id) {
        Ok(courier) => Json(courier).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_courier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CourierRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: CourierId = match common::parse_id(&id, "courier") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.couriers.update(id, &body.into_draft(), Utc::now()) {
        Ok(courier) => Json(courier).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Availability changes have their own endpoint; assignment never touches it.
pub async fn update_courier_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CourierStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: CourierId = match common::parse_id(&id, "courier") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let draft = naycourse_couriers::CourierDraft {
        status: Some(body.statut),
        ..naycourse_couriers::CourierDraft::default()
    };
    match services.couriers.update(id, &draft, Utc::now()) {
        Ok(courier) => Json(courier).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_courier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: CourierId = match common::parse_id(&id, "courier") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.couriers.delete(id) {
        Ok(courier) => Json(courier).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
