use naycourse_api::app::{self, AppConfig};
use naycourse_orders::{LifecycleConfig, TimeFormat};

#[tokio::main]
async fn main() {
    naycourse_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let mut lifecycle = LifecycleConfig::default();
    if let Ok(raw) = std::env::var("MIN_ORDER_PRICE") {
        match raw.parse() {
            Ok(min) => lifecycle.min_price = min,
            Err(_) => tracing::warn!(value = %raw, "MIN_ORDER_PRICE is not a number; keeping default"),
        }
    }
    if let Ok(raw) = std::env::var("DELIVERY_TIME_FORMAT") {
        match TimeFormat::from_pattern(&raw) {
            Some(format) => lifecycle.delivery_time_format = format,
            None => tracing::warn!(value = %raw, "unknown DELIVERY_TIME_FORMAT; keeping default"),
        }
    }

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = app::build_app(AppConfig {
        jwt_secret,
        lifecycle,
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {bind_addr}: {err}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
