//! Photo listing for a single request

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/tire-requests/{id}/photos",
    tag = "tire-requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Consolidated photo data URLs", body = [String]),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request_photos(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let photos = state.workflow.photos(id).await?;
    Ok(Json(photos))
}
