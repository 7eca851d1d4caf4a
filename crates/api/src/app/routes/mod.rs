use axum::{routing::get, Router};

pub mod common;
pub mod couriers;
pub mod manager;
pub mod orders;
pub mod pricing;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/orders", get(orders::list_orders))
        .route(
            "/orders/:id",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/orders/ref/*order_ref", get(orders::get_order_by_ref))
        .route("/orders/user/:user_id", get(orders::list_orders_for_user))
        .nest("/manager", manager::router())
}
