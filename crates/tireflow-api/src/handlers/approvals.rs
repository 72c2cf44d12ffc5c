//! Approval decision handlers: Manager → TTO → Engineer

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::dto::{RejectPayload, TireRequestResponse};
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/tire-requests/{id}/approve",
    tag = "approvals",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request approved by manager", body = TireRequestResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn manager_approve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state.workflow.manager_approve(id).await?;
    Ok(Json(TireRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/tire-requests/{id}/reject",
    tag = "approvals",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = RejectPayload,
    responses(
        (status = 200, description = "Request rejected by manager", body = TireRequestResponse),
        (status = 400, description = "Rejection reason missing", body = crate::error::ErrorResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn manager_reject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RejectPayload>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state
        .workflow
        .manager_reject(id, payload.reason.as_deref())
        .await?;
    Ok(Json(TireRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/tire-requests/{id}/tto-approve",
    tag = "approvals",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request approved by TTO", body = TireRequestResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn tto_approve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state.workflow.tto_approve(id).await?;
    Ok(Json(TireRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/tire-requests/{id}/tto-reject",
    tag = "approvals",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = RejectPayload,
    responses(
        (status = 200, description = "Request rejected by TTO", body = TireRequestResponse),
        (status = 400, description = "Rejection reason missing", body = crate::error::ErrorResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Not yet approved by manager", body = crate::error::ErrorResponse)
    )
)]
pub async fn tto_reject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RejectPayload>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state
        .workflow
        .tto_reject(id, payload.reason.as_deref())
        .await?;
    Ok(Json(TireRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/tire-requests/{id}/engineer-approve",
    tag = "approvals",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request approved by engineer", body = TireRequestResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn engineer_approve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state.workflow.engineer_approve(id).await?;
    Ok(Json(TireRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/tire-requests/{id}/engineer-reject",
    tag = "approvals",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request rejected by engineer", body = TireRequestResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn engineer_reject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state.workflow.engineer_reject(id).await?;
    Ok(Json(TireRequestResponse::from(request)))
}
