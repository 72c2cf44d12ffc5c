//! CRUD handlers for tire requests

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use tireflow_core::models::TireRequest;
use tireflow_core::validation;
use tireflow_core::AppError;

use crate::dto::{SubmissionFields, TireRequestResponse, ValidationOutcome};
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::IncomingPhoto;
use crate::state::AppState;

/// Everything pulled out of one multipart submission: text fields, uploaded
/// photo files, and any legacy photo-URL text fields.
pub struct ParsedSubmission {
    pub fields: SubmissionFields,
    pub photos: Vec<IncomingPhoto>,
    pub legacy_photo_urls: Vec<String>,
}

/// Read a multipart form into fields + photos. Photo files may arrive under
/// either historical field name; repeated `photoUrls`/`tirePhotoUrls` text
/// fields carry already-encoded data URLs from older clients.
pub async fn parse_submission(mut multipart: Multipart) -> Result<ParsedSubmission, AppError> {
    let mut fields = SubmissionFields::default();
    let mut photos = Vec::new();
    let mut legacy_photo_urls = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "tirePhotos" | "photos" => {
                let filename = field.file_name().unwrap_or("photo").to_string();
                let content_type = field.content_type().unwrap_or("image/jpeg").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::InvalidInput(format!("Failed to read photo upload: {}", e))
                    })?
                    .to_vec();
                photos.push(IncomingPhoto {
                    filename,
                    content_type,
                    bytes,
                });
            }
            "photoUrls" | "tirePhotoUrls" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read form field: {}", e))
                })?;
                if !value.trim().is_empty() {
                    legacy_photo_urls.push(value);
                }
            }
            _ => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read form field: {}", e))
                })?;
                if !fields.set(&name, value) {
                    tracing::debug!(field = %name, "Ignoring unknown form field");
                }
            }
        }
    }

    Ok(ParsedSubmission {
        fields,
        photos,
        legacy_photo_urls,
    })
}

#[utoipa::path(
    post,
    path = "/api/tire-requests",
    tag = "tire-requests",
    responses(
        (status = 201, description = "Request created", body = TireRequestResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_tire_request(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let submission = parse_submission(multipart).await?;
    let created = state
        .workflow
        .create(
            &submission.fields,
            submission.photos,
            submission.legacy_photo_urls,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(TireRequestResponse::from(created)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/tire-requests",
    tag = "tire-requests",
    responses(
        (status = 200, description = "All requests", body = [TireRequestResponse])
    )
)]
pub async fn list_tire_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let requests = state.workflow.list_all().await?;
    let response: Vec<TireRequestResponse> =
        requests.into_iter().map(TireRequestResponse::from).collect();
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/tire-requests/{id}",
    tag = "tire-requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = TireRequestResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_tire_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state.workflow.get(id).await?;
    Ok(Json(TireRequestResponse::from(request)))
}

#[utoipa::path(
    put,
    path = "/api/tire-requests/{id}",
    tag = "tire-requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request updated", body = TireRequestResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_tire_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let submission = parse_submission(multipart).await?;
    let updated = state
        .workflow
        .update(
            id,
            &submission.fields,
            submission.photos,
            submission.legacy_photo_urls,
        )
        .await?;
    Ok(Json(TireRequestResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/tire-requests/{id}",
    tag = "tire-requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request deleted"),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_tire_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.workflow.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/tire-requests/validate",
    tag = "tire-requests",
    request_body = SubmissionFields,
    responses(
        (status = 200, description = "Request is valid", body = ValidationOutcome),
        (status = 400, description = "Validation failed", body = ValidationOutcome)
    )
)]
pub async fn validate_tire_request(
    ValidatedJson(fields): ValidatedJson<SubmissionFields>,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut request = TireRequest::new();
    fields.apply_to(&mut request);
    validation::auto_populate(&mut request);
    let errors = validation::validate(&request);

    let status = if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    let outcome = ValidationOutcome {
        valid: errors.is_empty(),
        errors,
        auto_populated_data: TireRequestResponse::from(request),
    };
    Ok((status, Json(outcome)))
}
