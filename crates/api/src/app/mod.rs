//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store and service wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and mapping onto domain drafts
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, routing::post, Extension, Router};

use naycourse_orders::LifecycleConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub struct AppConfig {
    pub jwt_secret: String,
    pub lifecycle: LifecycleConfig,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    let verifier = Arc::new(naycourse_auth::Hs256Verifier::new(
        config.jwt_secret.as_bytes(),
    ));
    let auth_state = middleware::AuthState { verifier };

    let services = Arc::new(services::build_services(config.lifecycle));

    // Order intake is open to guests; a valid token attaches ownership.
    let intake = Router::new()
        .route("/orders", post(routes::orders::create_order))
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            middleware::optional_auth,
        ));

    // Everything else under a bearer token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::require_auth,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/pricing/estimate", post(routes::pricing::estimate))
        .merge(intake)
        .merge(protected)
        .layer(Extension(services))
}
