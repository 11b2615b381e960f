//! Dashboard routes.
//!
//! `GET /dashboard` always answers 200 with every section, failed ones
//! included. The per-section routes answer 503 when their section failed.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use painel_core::dashboard::{DashboardSnapshot, Section};
use painel_shared::AppError;
use serde::Serialize;
use tracing::warn;

use crate::{AppState, error::ApiError};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_snapshot))
        .route("/dashboard/stats", get(get_stats))
        .route("/dashboard/status/drivers", get(get_driver_status))
        .route("/dashboard/status/vehicles", get(get_vehicle_status))
        .route("/dashboard/activity", get(get_activity))
}

/// Renders one section: its data when loaded, a 503 when it failed.
fn section_response<T: Serialize>(name: &str, section: Section<T>) -> Response {
    match section {
        Section::Loaded { data } => (StatusCode::OK, Json(data)).into_response(),
        Section::Failed { error, .. } => {
            warn!(section = name, error = %error, "Serving failed dashboard section");
            ApiError(AppError::Unavailable(format!("{name}: {error}"))).into_response()
        }
    }
}

/// GET /dashboard
async fn get_snapshot(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot().await)
}

/// GET /dashboard/stats
async fn get_stats(State(state): State<AppState>) -> Response {
    section_response("stats", state.dashboard.stats().await)
}

/// GET /dashboard/status/drivers
async fn get_driver_status(State(state): State<AppState>) -> Response {
    section_response("driver_status", state.dashboard.driver_status().await)
}

/// GET /dashboard/status/vehicles
async fn get_vehicle_status(State(state): State<AppState>) -> Response {
    section_response("vehicle_status", state.dashboard.vehicle_status().await)
}

/// GET /dashboard/activity
async fn get_activity(State(state): State<AppState>) -> Response {
    section_response("activities", state.dashboard.activity().await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{body::Body, http::Request};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use painel_core::dashboard::{DashboardService, FixedClock};
    use painel_core::store::{Collection, Document, FieldValue, MemoryStore};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::create_router;

    fn app(store: MemoryStore) -> Router {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let dashboard =
            DashboardService::new(Arc::new(store)).with_clock(Arc::new(FixedClock(now)));
        create_router(AppState { dashboard }, Duration::from_secs(5))
    }

    fn store() -> MemoryStore {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        MemoryStore::new()
            .with_collection(
                Collection::Funcionarios,
                vec![
                    Document::new("e1")
                        .with("nome", "Ana")
                        .with("funcao", "motorista")
                        .with("status", "trabalhando"),
                ],
            )
            .with_collection(
                Collection::Rotas,
                vec![
                    Document::new("r1")
                        .with("motoristaId", "e1")
                        .with("destino", "Porto")
                        .with("dataCriacao", FieldValue::Date(now)),
                ],
            )
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_snapshot_route() {
        let (status, body) = get(app(store()), "/api/v1/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["status"], "loaded");
        assert_eq!(body["stats"]["data"]["motoristas"], 1);
        assert_eq!(body["driver_status"]["data"][0]["name"], "Trabalhando");
        assert_eq!(body["activities"]["data"][0]["type"], "route");
        assert_eq!(
            body["activities"]["data"][0]["title"],
            "Nova rota para Porto"
        );
    }

    #[tokio::test]
    async fn test_snapshot_route_reports_failed_sections() {
        let store = store().with_failure(Collection::Cidades, "unavailable");
        let (status, body) = get(app(store), "/api/v1/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["status"], "failed");
        assert_eq!(body["stats"]["data"]["funcionarios"], 0);
        assert_eq!(body["driver_status"]["status"], "loaded");
    }

    #[tokio::test]
    async fn test_stats_route() {
        let (status, body) = get(app(store()), "/api/v1/dashboard/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["funcionarios"], 1);
        assert_eq!(body["rotas"], 1);
    }

    #[tokio::test]
    async fn test_failed_section_route_is_unavailable() {
        let store = store().with_failure(Collection::Veiculos, "timeout");
        let (status, body) = get(app(store), "/api/v1/dashboard/status/vehicles").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("vehicle_status")
        );
    }

    #[tokio::test]
    async fn test_driver_status_and_activity_routes() {
        let (status, body) = get(app(store()), "/api/v1/dashboard/status/drivers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["color"], "green");

        let (status, body) = get(app(store()), "/api/v1/dashboard/activity").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
