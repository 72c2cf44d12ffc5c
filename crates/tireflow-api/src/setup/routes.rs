//! Route configuration and setup

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use tireflow_core::Config;

use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // A multipart submission carries several photos, each bounded separately
    // by validation; the transport limit just caps the whole body.
    let body_limit = config.max_photo_size_bytes.saturating_mul(10);

    // Server-level concurrency limit to protect against resource exhaustion
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(request_routes())
        .merge(order_routes())
        .with_state(state)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        // Axum's built-in 2 MB default would reject photo uploads; both
        // limits track the configured photo size.
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Tire request routes: CRUD, validation, approvals, dashboards, photos.
fn request_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/tire-requests",
            post(handlers::requests::create_tire_request)
                .get(handlers::requests::list_tire_requests),
        )
        .route(
            "/api/tire-requests/validate",
            post(handlers::requests::validate_tire_request),
        )
        .route(
            "/api/tire-requests/summary/counts",
            get(handlers::dashboards::summary_counts),
        )
        .route(
            "/api/tire-requests/manager/requests",
            get(handlers::dashboards::manager_requests),
        )
        .route(
            "/api/tire-requests/tto/requests",
            get(handlers::dashboards::tto_requests),
        )
        .route(
            "/api/tire-requests/engineer/requests",
            get(handlers::dashboards::engineer_requests),
        )
        .route(
            "/api/tire-requests/{id}",
            get(handlers::requests::get_tire_request)
                .put(handlers::requests::update_tire_request)
                .delete(handlers::requests::delete_tire_request),
        )
        .route(
            "/api/tire-requests/{id}/photos",
            get(handlers::photos::get_request_photos),
        )
        .route(
            "/api/tire-requests/{id}/approve",
            post(handlers::approvals::manager_approve),
        )
        .route(
            "/api/tire-requests/{id}/reject",
            post(handlers::approvals::manager_reject),
        )
        .route(
            "/api/tire-requests/{id}/tto-approve",
            post(handlers::approvals::tto_approve),
        )
        .route(
            "/api/tire-requests/{id}/tto-reject",
            post(handlers::approvals::tto_reject),
        )
        .route(
            "/api/tire-requests/{id}/engineer-approve",
            post(handlers::approvals::engineer_approve),
        )
        .route(
            "/api/tire-requests/{id}/engineer-reject",
            post(handlers::approvals::engineer_reject),
        )
}

/// Seller order routes.
fn order_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/tire-orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route(
            "/api/tire-orders/vendor/{vendorEmail}",
            get(handlers::orders::vendor_orders),
        )
        .route(
            "/api/tire-orders/{id}",
            get(handlers::orders::get_order).delete(handlers::orders::delete_order),
        )
        .route(
            "/api/tire-orders/{id}/confirm",
            put(handlers::orders::confirm_order),
        )
        .route(
            "/api/tire-orders/{id}/reject",
            put(handlers::orders::reject_order),
        )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    };
    Ok(cors)
}
