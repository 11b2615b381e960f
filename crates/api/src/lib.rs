//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the operations dashboard
//! - Error responses

pub mod error;
pub mod routes;

use std::time::Duration;

use axum::Router;
use painel_core::dashboard::DashboardService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dashboard aggregation service.
    pub dashboard: DashboardService,
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
