//! Order projection: seller-facing purchase orders for fully approved
//! requests
//!
//! Key requester fields are copied onto the order at creation so it stays
//! actionable if the request is later deleted. Requester notifications
//! resolve the email through the request back-reference first, then the copy.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tireflow_core::models::{OrderStatus, TireOrder, TireRequest};
use tireflow_core::AppError;
use tireflow_db::{OrderStore, RequestStore};
use tireflow_services::NotificationService;

use crate::dto::CreateOrderPayload;

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    requests: Arc<dyn RequestStore>,
    notifications: NotificationService,
    default_vendor_email: String,
}

fn db_error(err: anyhow::Error) -> AppError {
    tracing::error!(error = %err, "Order store operation failed");
    AppError::Database(err.to_string())
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        requests: Arc<dyn RequestStore>,
        notifications: NotificationService,
        default_vendor_email: String,
    ) -> Self {
        Self {
            orders,
            requests,
            notifications,
            default_vendor_email,
        }
    }

    async fn load(&self, id: Uuid) -> Result<TireOrder, AppError> {
        self.orders
            .find_by_id(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    fn resolve_quantity(
        payload: &CreateOrderPayload,
        request: &TireRequest,
    ) -> Result<i32, AppError> {
        let quantity = match payload.quantity {
            Some(quantity) => quantity,
            None => request.no_of_tires.trim().parse::<i32>().map_err(|_| {
                AppError::ValidationFailed(vec!["Quantity must be a valid number".to_string()])
            })?,
        };
        if quantity < 1 {
            return Err(AppError::ValidationFailed(vec![
                "Quantity must be at least 1".to_string(),
            ]));
        }
        Ok(quantity)
    }

    /// Create an order for the seller. The backing request must exist; its
    /// key fields fill anything the payload leaves out. Seller notification
    /// failure does not roll back the creation.
    pub async fn create(&self, payload: CreateOrderPayload) -> Result<TireOrder, AppError> {
        let request = self
            .requests
            .find_by_id(payload.request_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

        let quantity = Self::resolve_quantity(&payload, &request)?;
        let now = Utc::now();
        let order = TireOrder {
            id: Uuid::new_v4(),
            request_id: request.id,
            vendor_email: payload
                .vendor_email
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| self.default_vendor_email.clone()),
            user_email: payload
                .user_email
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| request.email.clone()),
            vehicle_no: payload
                .vehicle_no
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| request.vehicle_no.clone()),
            tire_brand: payload.tire_brand.filter(|b| !b.trim().is_empty()),
            tire_size: payload
                .tire_size
                .filter(|s| !s.trim().is_empty())
                .or_else(|| {
                    if request.tire_size.trim().is_empty() {
                        None
                    } else {
                        Some(request.tire_size.clone())
                    }
                }),
            quantity,
            status: OrderStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };

        let saved = self.orders.save(&order).await.map_err(db_error)?;
        tracing::info!(
            order_id = %saved.id,
            request_id = %saved.request_id,
            quantity = saved.quantity,
            "Tire order created"
        );
        self.notifications.order_created(&saved).await;
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<TireOrder, AppError> {
        self.load(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<TireOrder>, AppError> {
        self.orders.list_all().await.map_err(db_error)
    }

    pub async fn list_by_vendor(&self, vendor_email: &str) -> Result<Vec<TireOrder>, AppError> {
        self.orders
            .find_by_vendor_email(vendor_email)
            .await
            .map_err(db_error)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.orders.delete(id).await.map_err(db_error)?;
        if !deleted {
            return Err(AppError::NotFound("Order not found".to_string()));
        }
        tracing::info!(order_id = %id, "Tire order deleted");
        Ok(())
    }

    /// Requester email: the live request wins, the copy on the order covers
    /// requests that were deleted after approval.
    async fn requester_email(&self, order: &TireOrder) -> String {
        match self.requests.find_by_id(order.request_id).await {
            Ok(Some(request)) if !request.email.trim().is_empty() => request.email,
            Ok(_) => order.user_email.clone(),
            Err(e) => {
                tracing::warn!(
                    order_id = %order.id,
                    error = %e,
                    "Failed to resolve requester via back-reference, using copied email"
                );
                order.user_email.clone()
            }
        }
    }

    pub async fn confirm(&self, id: Uuid) -> Result<TireOrder, AppError> {
        let mut order = self.load(id).await?;
        order.status = OrderStatus::Confirmed;
        order.updated_at = Utc::now();
        let saved = self.orders.save(&order).await.map_err(db_error)?;
        tracing::info!(order_id = %id, "Tire order confirmed by seller");

        let recipient = self.requester_email(&saved).await;
        self.notifications.order_confirmed(&saved, &recipient).await;
        Ok(saved)
    }

    pub async fn reject(&self, id: Uuid, reason: Option<&str>) -> Result<TireOrder, AppError> {
        let reason = match reason.map(str::trim) {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => {
                return Err(AppError::ValidationFailed(vec![
                    "Rejection reason is required".to_string(),
                ]))
            }
        };

        let mut order = self.load(id).await?;
        order.status = OrderStatus::Rejected;
        order.rejection_reason = Some(reason.clone());
        order.updated_at = Utc::now();
        let saved = self.orders.save(&order).await.map_err(db_error)?;
        tracing::info!(order_id = %id, reason = %reason, "Tire order rejected by seller");

        let recipient = self.requester_email(&saved).await;
        self.notifications
            .order_rejected(&saved, &recipient, &reason)
            .await;
        Ok(saved)
    }
}
