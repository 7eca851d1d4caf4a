//! Manager console: inbox triage, lifecycle transitions, trash.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::Utc;

use naycourse_core::{AuditEntryId, CourierId, OrderId, VaultEntryId};
use naycourse_orders::{LifecycleEvent, OrderRef};

use crate::app::routes::{common, couriers};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/inbox", get(list_inbox).post(append_inbox_note))
        .route("/inbox/:id/done", patch(mark_inbox_done))
        .route("/orders/pending", get(list_pending_orders))
        .route("/orders/:id/validate", patch(validate_order))
        .route("/orders/:id/assign-courier", patch(assign_courier))
        .route("/orders/:id/cancel", patch(cancel_order))
        .route("/orders/:id/delivered", patch(mark_delivered))
        .route("/orders/:id/viewed", patch(mark_viewed))
        .route("/move-to-trash", post(move_to_trash))
        .route("/trash", get(list_trash).delete(empty_trash))
        .route("/trash/:id", delete(purge_trash_entry))
        .route("/trash/:id/restore", patch(restore_trash_entry))
        .nest("/coursiers", couriers::router())
}

pub async fn list_inbox(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    match services.inbox.list() {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn append_inbox_note(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::InboxNoteRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let order_ref: OrderRef = match body.commande.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .inbox
        .append_note(body.action, order_ref, &body.client, &body.details, Utc::now())
    {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn mark_inbox_done(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: AuditEntryId = match common::parse_id(&id, "inbox entry") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.inbox.mark_done(id) {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_pending_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    match services.orders.list_pending() {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn validate_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ValidateOrderRequest>,
) -> axum::response::Response {
    transition(&services, &ctx, &id, LifecycleEvent::Confirm { price: body.prix })
}

pub async fn assign_courier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AssignCourierRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }

    // A roster id wins; otherwise the caller supplies the pair inline. Either
    // way the lifecycle engine validates that both fields are present.
    let (name, phone) = if let Some(raw) = &body.coursier_id {
        let courier_id: CourierId = match common::parse_id(raw, "courier") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        match services.couriers.get(courier_id) {
            Ok(courier) => (courier.full_name, courier.phone),
            Err(e) => return errors::service_error_to_response(e),
        }
    } else {
        let inline = body.coursier.unwrap_or(dto::InlineCourier {
            nom_complet: None,
            telephone: None,
        });
        (
            inline.nom_complet.unwrap_or_default(),
            inline.telephone.unwrap_or_default(),
        )
    };

    transition(&services, &ctx, &id, LifecycleEvent::AssignCourier { name, phone })
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CancelOrderRequest>,
) -> axum::response::Response {
    transition(&services, &ctx, &id, LifecycleEvent::Cancel { reason: body.motif })
}

pub async fn mark_delivered(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &ctx, &id, LifecycleEvent::MarkDelivered)
}

pub async fn mark_viewed(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    transition(&services, &ctx, &id, LifecycleEvent::MarkViewed)
}

fn transition(
    services: &AppServices,
    ctx: &AuthContext,
    raw_id: &str,
    event: LifecycleEvent,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(ctx) {
        return resp;
    }
    let id: OrderId = match common::parse_id(raw_id, "order") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.transition(id, event, Utc::now()) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn move_to_trash(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::MoveToTrashRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    match services
        .trash
        .move_to_trash(body.item_type, &body.item_id, Utc::now())
    {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_trash(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    match services.trash.list() {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn restore_trash_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: VaultEntryId = match common::parse_id(&id, "trash entry") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.trash.restore(id, Utc::now()) {
        Ok(restored) => Json(restored).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn purge_trash_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: VaultEntryId = match common::parse_id(&id, "trash entry") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.trash.purge(id) {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn empty_trash(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    match services.trash.purge_all() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
