//! Liveness, readiness and build info for load balancers and deploy tooling.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of a liveness or readiness check. `store` is only reported by readiness.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<&'static str>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses((status = 200, description = "Process is up", body = ServiceStatus))
)]
pub async fn health() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "ok",
        store: None,
    })
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "status",
    responses(
        (status = 200, description = "Store reachable", body = ServiceStatus),
        (status = 503, description = "Store unreachable", body = ServiceStatus)
    )
)]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ServiceStatus>) {
    let reachable = match state.store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "store health check errored");
            false
        }
    };
    if reachable {
        return (
            StatusCode::OK,
            Json(ServiceStatus {
                status: "ok",
                store: Some("ok"),
            }),
        );
    }
    tracing::warn!("not ready: store unavailable");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ServiceStatus {
            status: "degraded",
            store: Some("unavailable"),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/version",
    tag = "status",
    responses((status = 200, description = "Crate name and version", body = BuildInfo))
)]
pub async fn version() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
