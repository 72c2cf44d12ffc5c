//! Role dashboard listings and summary counts

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::dto::{DashboardCounts, TireRequestResponse};
use crate::error::HttpAppError;
use crate::services::DashboardStage;
use crate::state::AppState;

async fn dashboard_listing(
    state: &AppState,
    stage: DashboardStage,
) -> Result<Json<Vec<TireRequestResponse>>, HttpAppError> {
    let requests = state.workflow.list_for_dashboard(stage).await?;
    Ok(Json(
        requests.into_iter().map(TireRequestResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/tire-requests/manager/requests",
    tag = "dashboards",
    responses(
        (status = 200, description = "Requests awaiting or past manager review", body = [TireRequestResponse])
    )
)]
pub async fn manager_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    dashboard_listing(&state, DashboardStage::Manager).await
}

#[utoipa::path(
    get,
    path = "/api/tire-requests/tto/requests",
    tag = "dashboards",
    responses(
        (status = 200, description = "Requests visible to the TTO", body = [TireRequestResponse])
    )
)]
pub async fn tto_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    dashboard_listing(&state, DashboardStage::Tto).await
}

#[utoipa::path(
    get,
    path = "/api/tire-requests/engineer/requests",
    tag = "dashboards",
    responses(
        (status = 200, description = "Requests visible to the engineer", body = [TireRequestResponse])
    )
)]
pub async fn engineer_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    dashboard_listing(&state, DashboardStage::Engineer).await
}

#[utoipa::path(
    get,
    path = "/api/tire-requests/summary/counts",
    tag = "dashboards",
    responses(
        (status = 200, description = "Per-dashboard request counts", body = DashboardCounts)
    )
)]
pub async fn summary_counts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let counts = state.workflow.dashboard_counts().await?;
    Ok(Json(counts))
}
