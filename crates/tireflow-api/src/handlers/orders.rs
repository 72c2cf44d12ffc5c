//! Seller order handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::dto::{CreateOrderPayload, RejectPayload, TireOrderResponse};
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/tire-orders",
    tag = "tire-orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Order created", body = TireOrderResponse),
        (status = 400, description = "Invalid quantity", body = crate::error::ErrorResponse),
        (status = 404, description = "Backing request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateOrderPayload>,
) -> Result<impl IntoResponse, HttpAppError> {
    let order = state.orders.create(payload).await?;
    Ok((StatusCode::CREATED, Json(TireOrderResponse::from(order))))
}

#[utoipa::path(
    get,
    path = "/api/tire-orders",
    tag = "tire-orders",
    responses(
        (status = 200, description = "All orders", body = [TireOrderResponse])
    )
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let orders = state.orders.list_all().await?;
    let response: Vec<TireOrderResponse> =
        orders.into_iter().map(TireOrderResponse::from).collect();
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/tire-orders/{id}",
    tag = "tire-orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = TireOrderResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let order = state.orders.get(id).await?;
    Ok(Json(TireOrderResponse::from(order)))
}

#[utoipa::path(
    get,
    path = "/api/tire-orders/vendor/{vendorEmail}",
    tag = "tire-orders",
    params(("vendorEmail" = String, Path, description = "Seller email")),
    responses(
        (status = 200, description = "Orders for one seller", body = [TireOrderResponse])
    )
)]
pub async fn vendor_orders(
    State(state): State<Arc<AppState>>,
    Path(vendor_email): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let orders = state.orders.list_by_vendor(&vendor_email).await?;
    let response: Vec<TireOrderResponse> =
        orders.into_iter().map(TireOrderResponse::from).collect();
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/tire-orders/{id}",
    tag = "tire-orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/tire-orders/{id}/confirm",
    tag = "tire-orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order confirmed", body = TireOrderResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn confirm_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let order = state.orders.confirm(id).await?;
    Ok(Json(TireOrderResponse::from(order)))
}

#[utoipa::path(
    put,
    path = "/api/tire-orders/{id}/reject",
    tag = "tire-orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = RejectPayload,
    responses(
        (status = 200, description = "Order rejected", body = TireOrderResponse),
        (status = 400, description = "Rejection reason missing", body = crate::error::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn reject_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RejectPayload>,
) -> Result<impl IntoResponse, HttpAppError> {
    let order = state
        .orders
        .reject(id, payload.reason.as_deref())
        .await?;
    Ok(Json(TireOrderResponse::from(order)))
}
