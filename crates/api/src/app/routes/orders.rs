use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use naycourse_core::{DomainError, OrderId, UserId};
use naycourse_infra::AssembledOrder;
use naycourse_orders::OrderRef;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::{AuthContext, MaybeAuth};

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(MaybeAuth(auth)): Extension<MaybeAuth>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let draft = body.into_draft(auth.map(|a| a.user_id()));

    match services.orders.create(&draft, Utc::now()) {
        Ok(assembled) => (StatusCode::CREATED, Json(assembled)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }

    match services.orders.list_all() {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match common::parse_id(&id, "order") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.orders.get(id) {
        Ok(assembled) => authorized_view(&ctx, assembled),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_order_by_ref(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(order_ref): Path<String>,
) -> axum::response::Response {
    let order_ref: OrderRef = match order_ref.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.orders.get_by_ref(&order_ref) {
        Ok(assembled) => authorized_view(&ctx, assembled),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_orders_for_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let user_id: UserId = match common::parse_id(&user_id, "user") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !ctx.can_act_for(user_id) {
        return errors::domain_error_to_response(DomainError::Forbidden);
    }

    match services.orders.list_for_owner(user_id) {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderRequest>,
) -> axum::response::Response {
    let id: OrderId = match common::parse_id(&id, "order") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // Ownership is checked against the stored order before touching anything.
    let current = match services.orders.get(id) {
        Ok(assembled) => assembled,
        Err(e) => return errors::service_error_to_response(e),
    };
    if !may_view(&ctx, &current) {
        return errors::domain_error_to_response(DomainError::Forbidden);
    }

    match services.orders.update(id, &body.into_update(), Utc::now()) {
        Ok(assembled) => Json(assembled).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Hard delete. Recoverable deletion goes through the manager's
/// move-to-trash endpoint instead.
pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = common::require_elevated(&ctx) {
        return resp;
    }
    let id: OrderId = match common::parse_id(&id, "order") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.orders.delete(id) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn may_view(ctx: &AuthContext, assembled: &AssembledOrder) -> bool {
    ctx.role().is_elevated() || assembled.order.owner_id == Some(ctx.user_id())
}

fn authorized_view(ctx: &AuthContext, assembled: AssembledOrder) -> axum::response::Response {
    if may_view(ctx, &assembled) {
        Json(assembled).into_response()
    } else {
        errors::domain_error_to_response(DomainError::Forbidden)
    }
}
