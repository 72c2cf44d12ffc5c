//! Notification dispatcher
//!
//! One dispatcher for every workflow stage. Recipients and the frontend URL
//! are injected at construction. Transport errors never cross this module's
//! boundary: each dispatch catches, logs, and returns, so a failed email can
//! never undo a committed state transition.

use std::sync::Arc;

use tireflow_core::models::{TireOrder, TireRequest};
use tireflow_core::Config;

use crate::mailer::Mailer;

/// Recipients and link targets for all workflow notifications.
#[derive(Clone, Debug)]
pub struct NotificationConfig {
    pub manager_email: String,
    pub tto_email: String,
    pub engineer_email: String,
    pub seller_email: String,
    pub frontend_url: String,
}

impl NotificationConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            manager_email: config.manager_email.clone(),
            tto_email: config.tto_email.clone(),
            engineer_email: config.engineer_email.clone(),
            seller_email: config.seller_email.clone(),
            frontend_url: config.frontend_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    config: NotificationConfig,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, config: NotificationConfig) -> Self {
        Self { mailer, config }
    }

    async fn dispatch(&self, stage: &str, to: &str, subject: &str, body: &str) {
        match self.mailer.send(to, subject, body).await {
            Ok(()) => {
                tracing::info!(stage = stage, to = %to, "Notification sent");
            }
            Err(e) => {
                tracing::error!(stage = stage, to = %to, error = %e, "Failed to send notification");
            }
        }
    }

    /// New request submitted: notify the manager with a dashboard link.
    pub async fn request_submitted(&self, request: &TireRequest) {
        let review_url = format!(
            "{}/manager?requestId={}",
            self.config.frontend_url, request.id
        );
        let subject = format!(
            "New Tire Request Awaiting Approval - {}",
            request.vehicle_no
        );
        let body = format!(
            "<html><body>\
             <h2>New Tire Request Submitted</h2>\
             <p>A new tire replacement request requires your approval.</p>\
             <ul>\
             <li><strong>Request ID:</strong> {}</li>\
             <li><strong>Vehicle Number:</strong> {}</li>\
             <li><strong>Vehicle Type:</strong> {}</li>\
             <li><strong>User Section:</strong> {}</li>\
             <li><strong>Tire Size:</strong> {}</li>\
             <li><strong>Number of Tires:</strong> {}</li>\
             <li><strong>Requested By:</strong> {}</li>\
             </ul>\
             <p><a href='{}'>Review in Manager Dashboard</a></p>\
             <p>After your approval, the request is forwarded to the Transport Officer.</p>\
             </body></html>",
            request.id,
            request.vehicle_no,
            request.vehicle_type,
            request.user_section,
            request.tire_size,
            request.no_of_tires,
            request.email,
            review_url
        );
        self.dispatch("manager", &self.config.manager_email, &subject, &body)
            .await;
    }

    /// Manager approved: notify the TTO.
    pub async fn manager_approved(&self, request: &TireRequest) {
        let review_url = format!("{}/tto?requestId={}", self.config.frontend_url, request.id);
        let subject = format!(
            "Tire Request Approved by Manager - Awaiting TTO Review - {}",
            request.vehicle_no
        );
        let body = format!(
            "<html><body>\
             <h2>Manager Approved - TTO Review Required</h2>\
             <p>A tire request has been approved by the Manager and now requires your review.</p>\
             <ul>\
             <li><strong>Request ID:</strong> {}</li>\
             <li><strong>Vehicle Number:</strong> {}</li>\
             <li><strong>User Section:</strong> {}</li>\
             <li><strong>Tire Requirements:</strong> {} tires, {} tubes</li>\
             </ul>\
             <p><a href='{}'>Review in TTO Dashboard</a></p>\
             <p>After your approval, this request is forwarded to the Engineer for final review.</p>\
             </body></html>",
            request.id,
            request.vehicle_no,
            request.user_section,
            request.no_of_tires,
            request.no_of_tubes,
            review_url
        );
        self.dispatch("tto", &self.config.tto_email, &subject, &body)
            .await;
    }

    /// TTO approved: notify the engineer.
    pub async fn tto_approved(&self, request: &TireRequest) {
        let review_url = format!(
            "{}/engineer?requestId={}",
            self.config.frontend_url, request.id
        );
        let subject = format!(
            "Tire Request - Final Engineering Approval Required - {}",
            request.vehicle_no
        );
        let body = format!(
            "<html><body>\
             <h2>Final Engineering Approval Required</h2>\
             <p>A tire request has been approved by both the Manager and the Transport Officer.</p>\
             <ul>\
             <li><strong>Request ID:</strong> {}</li>\
             <li><strong>Vehicle:</strong> {} ({} {})</li>\
             <li><strong>Tire Specifications:</strong> {}</li>\
             <li><strong>Quantity Required:</strong> {} tires, {} tubes</li>\
             <li><strong>Current Mileage:</strong> {} km</li>\
             <li><strong>Requesting Department:</strong> {}</li>\
             </ul>\
             <p><a href='{}'>Final Review in Engineer Dashboard</a></p>\
             </body></html>",
            request.id,
            request.vehicle_no,
            request.vehicle_brand,
            request.vehicle_model,
            request.tire_size,
            request.no_of_tires,
            request.no_of_tubes,
            request.present_km,
            request.user_section,
            review_url
        );
        self.dispatch("engineer", &self.config.engineer_email, &subject, &body)
            .await;
    }

    /// Engineer approved: tell the submitter the request is fully approved
    /// and link to order creation. Skipped when the request carries no email.
    pub async fn request_fully_approved(&self, request: &TireRequest) {
        if request.email.trim().is_empty() {
            tracing::warn!(request_id = %request.id, "No submitter email, skipping final notification");
            return;
        }
        let order_link = format!(
            "{}/order-tires/{}",
            self.config.frontend_url, request.id
        );
        let subject = "Your Tire Request is Approved - Order Now".to_string();
        let body = format!(
            "<html><body>\
             <h2>Your Tire Request Has Been Approved</h2>\
             <p>Hello,</p>\
             <p>Your tire request <strong>{}</strong> for vehicle <strong>{}</strong> \
             has been approved by the Engineer.</p>\
             <p><a href='{}'>Order Tires Now</a></p>\
             <p>Best regards,<br/>Tire Management Team</p>\
             </body></html>",
            request.id, request.vehicle_no, order_link
        );
        self.dispatch("submitter", &request.email, &subject, &body)
            .await;
    }

    /// Order created: notify the seller.
    pub async fn order_created(&self, order: &TireOrder) {
        let dashboard_url = format!("{}/seller", self.config.frontend_url);
        let tire_info = format!(
            "{} - Size: {}",
            order.tire_brand.as_deref().unwrap_or("Standard Tire"),
            order.tire_size.as_deref().unwrap_or("Standard Size")
        );
        let subject = format!("New Tire Order - Processing Required - Order #{}", order.id);
        let body = format!(
            "<html><body>\
             <h2>New Tire Order Received</h2>\
             <p>A fully approved tire request has been converted to an order.</p>\
             <ul>\
             <li><strong>Order ID:</strong> {}</li>\
             <li><strong>Vehicle Number:</strong> {}</li>\
             <li><strong>Tire Specifications:</strong> {}</li>\
             <li><strong>Quantity Required:</strong> {}</li>\
             <li><strong>Customer Email:</strong> {}</li>\
             </ul>\
             <p><a href='{}'>Process Order in Seller Dashboard</a></p>\
             </body></html>",
            order.id, order.vehicle_no, tire_info, order.quantity, order.user_email, dashboard_url
        );
        self.dispatch("seller", &order.vendor_email, &subject, &body)
            .await;
    }

    /// Seller confirmed the order: notify the requester. The recipient is
    /// resolved by the caller (request back-reference, falling back to the
    /// email copied onto the order).
    pub async fn order_confirmed(&self, order: &TireOrder, recipient: &str) {
        let subject = format!("Your Tire Order is Confirmed! Order ID: {}", order.id);
        let body = format!(
            "<html><body>\
             <h2>Tire Order Confirmed</h2>\
             <p>Your tire order <strong>{}</strong> for vehicle <strong>{}</strong> \
             ({} tires) has been confirmed by the seller.</p>\
             </body></html>",
            order.id, order.vehicle_no, order.quantity
        );
        self.dispatch("requester", recipient, &subject, &body).await;
    }

    /// Seller rejected the order: notify the requester with the reason.
    pub async fn order_rejected(&self, order: &TireOrder, recipient: &str, reason: &str) {
        let subject = format!("Your Tire Order is Rejected - Order ID: {}", order.id);
        let body = format!(
            "<html><body>\
             <h2>Tire Order Rejected</h2>\
             <p>Your tire order <strong>{}</strong> for vehicle <strong>{}</strong> \
             has been rejected by the seller.</p>\
             <p><strong>Reason:</strong> {}</p>\
             </body></html>",
            order.id, order.vehicle_no, reason
        );
        self.dispatch("requester", recipient, &subject, &body).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockMailer;
    use chrono::Utc;
    use tireflow_core::models::OrderStatus;
    use uuid::Uuid;

    fn test_config() -> NotificationConfig {
        NotificationConfig {
            manager_email: "manager@example.com".to_string(),
            tto_email: "tto@example.com".to_string(),
            engineer_email: "engineer@example.com".to_string(),
            seller_email: "seller@example.com".to_string(),
            frontend_url: "http://localhost:3001".to_string(),
        }
    }

    fn test_request() -> TireRequest {
        let mut request = TireRequest::new();
        request.vehicle_no = "WP-1234".to_string();
        request.email = "driver@example.com".to_string();
        request.no_of_tires = "4".to_string();
        request
    }

    fn test_order() -> TireOrder {
        let now = Utc::now();
        TireOrder {
            id: Uuid::new_v4(),
            request_id: Uuid::new_v4(),
            vendor_email: "seller@example.com".to_string(),
            user_email: "driver@example.com".to_string(),
            vehicle_no: "WP-1234".to_string(),
            tire_brand: None,
            tire_size: Some("195/65R15".to_string()),
            quantity: 4,
            status: OrderStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn submitted_notification_goes_to_manager_with_deep_link() {
        let mailer = Arc::new(MockMailer::new());
        let service = NotificationService::new(mailer.clone(), test_config());

        service.request_submitted(&test_request()).await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "manager@example.com");
        assert!(sent[0].subject.contains("WP-1234"));
        assert!(sent[0].body.contains("http://localhost:3001/manager?requestId="));
    }

    #[tokio::test]
    async fn final_notification_carries_order_link() {
        let mailer = Arc::new(MockMailer::new());
        let service = NotificationService::new(mailer.clone(), test_config());
        let request = test_request();

        service.request_fully_approved(&request).await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "driver@example.com");
        assert!(sent[0]
            .body
            .contains(&format!("http://localhost:3001/order-tires/{}", request.id)));
    }

    #[tokio::test]
    async fn final_notification_skipped_without_submitter_email() {
        let mailer = Arc::new(MockMailer::new());
        let service = NotificationService::new(mailer.clone(), test_config());
        let mut request = test_request();
        request.email = String::new();

        service.request_fully_approved(&request).await;
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_absorbed() {
        let mailer = Arc::new(MockMailer::failing());
        let service = NotificationService::new(mailer.clone(), test_config());

        // Must not panic or propagate.
        service.manager_approved(&test_request()).await;
        service.order_created(&test_order()).await;
        assert_eq!(mailer.attempts(), 2);
    }

    #[tokio::test]
    async fn order_notifications_use_copied_requester_email() {
        let mailer = Arc::new(MockMailer::new());
        let service = NotificationService::new(mailer.clone(), test_config());
        let order = test_order();

        service.order_confirmed(&order, &order.user_email).await;
        service
            .order_rejected(&order, &order.user_email, "out of stock")
            .await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|m| m.to == "driver@example.com"));
        assert!(sent[1].body.contains("out of stock"));
    }
}
