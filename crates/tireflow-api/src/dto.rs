//! Wire types for the HTTP surface
//!
//! Responses keep the frontend's camelCase field names. The photo list is
//! canonical internally but still serialized under both historical keys
//! (`photoUrls` and `tirePhotoUrls`) so existing clients keep working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tireflow_core::models::{OrderStatus, RequestStatus, TireOrder, TireRequest};

/// Tire request as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TireRequestResponse {
    pub id: Uuid,
    pub status: RequestStatus,
    pub vehicle_no: String,
    pub vehicle_type: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub user_section: String,
    pub replacement_date: String,
    pub existing_make: String,
    pub tire_size: String,
    pub no_of_tires: String,
    pub no_of_tubes: String,
    pub cost_center: String,
    pub present_km: String,
    pub previous_km: String,
    pub wear_indicator: String,
    pub wear_pattern: String,
    pub officer_service_no: String,
    pub email: String,
    pub comments: Option<String>,
    /// Canonical photo list.
    pub photo_urls: Vec<String>,
    /// Legacy duplicate of `photoUrls`, kept for wire compatibility.
    pub tire_photo_urls: Vec<String>,
    pub rejection_reason: Option<String>,
    pub manager_approved_at: Option<DateTime<Utc>>,
    pub manager_rejected_at: Option<DateTime<Utc>>,
    pub tto_approved_at: Option<DateTime<Utc>>,
    pub tto_rejected_at: Option<DateTime<Utc>>,
    pub engineer_approved_at: Option<DateTime<Utc>>,
    pub engineer_rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TireRequest> for TireRequestResponse {
    fn from(request: TireRequest) -> Self {
        TireRequestResponse {
            id: request.id,
            status: request.status,
            vehicle_no: request.vehicle_no,
            vehicle_type: request.vehicle_type,
            vehicle_brand: request.vehicle_brand,
            vehicle_model: request.vehicle_model,
            user_section: request.user_section,
            replacement_date: request.replacement_date,
            existing_make: request.existing_make,
            tire_size: request.tire_size,
            no_of_tires: request.no_of_tires,
            no_of_tubes: request.no_of_tubes,
            cost_center: request.cost_center,
            present_km: request.present_km,
            previous_km: request.previous_km,
            wear_indicator: request.wear_indicator,
            wear_pattern: request.wear_pattern,
            officer_service_no: request.officer_service_no,
            email: request.email,
            comments: request.comments,
            tire_photo_urls: request.photo_urls.clone(),
            photo_urls: request.photo_urls,
            rejection_reason: request.rejection_reason,
            manager_approved_at: request.manager_approved_at,
            manager_rejected_at: request.manager_rejected_at,
            tto_approved_at: request.tto_approved_at,
            tto_rejected_at: request.tto_rejected_at,
            engineer_approved_at: request.engineer_approved_at,
            engineer_rejected_at: request.engineer_rejected_at,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// Submitter-editable fields, as they arrive from the multipart form or the
/// validate endpoint's JSON body. Everything optional: validation decides
/// what is actually required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFields {
    pub vehicle_no: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub user_section: Option<String>,
    pub replacement_date: Option<String>,
    pub existing_make: Option<String>,
    pub tire_size: Option<String>,
    pub no_of_tires: Option<String>,
    pub no_of_tubes: Option<String>,
    pub cost_center: Option<String>,
    pub present_km: Option<String>,
    pub previous_km: Option<String>,
    pub wear_indicator: Option<String>,
    pub wear_pattern: Option<String>,
    pub officer_service_no: Option<String>,
    pub email: Option<String>,
    pub comments: Option<String>,
}

impl SubmissionFields {
    /// Copy the provided fields onto a request, leaving absent ones alone.
    pub fn apply_to(&self, request: &mut TireRequest) {
        macro_rules! apply {
            ($field:ident) => {
                if let Some(value) = &self.$field {
                    request.$field = value.clone();
                }
            };
        }
        apply!(vehicle_no);
        apply!(vehicle_type);
        apply!(vehicle_brand);
        apply!(vehicle_model);
        apply!(user_section);
        apply!(replacement_date);
        apply!(existing_make);
        apply!(tire_size);
        apply!(no_of_tires);
        apply!(no_of_tubes);
        apply!(cost_center);
        apply!(present_km);
        apply!(previous_km);
        apply!(wear_indicator);
        apply!(wear_pattern);
        apply!(officer_service_no);
        apply!(email);
        if self.comments.is_some() {
            request.comments = self.comments.clone();
        }
    }

    /// Set a field by its wire name. Returns false for unknown names so the
    /// multipart parser can log and skip them.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "vehicleNo" => &mut self.vehicle_no,
            "vehicleType" => &mut self.vehicle_type,
            "vehicleBrand" => &mut self.vehicle_brand,
            "vehicleModel" => &mut self.vehicle_model,
            "userSection" | "section" => &mut self.user_section,
            "replacementDate" => &mut self.replacement_date,
            "existingMake" => &mut self.existing_make,
            "tireSize" => &mut self.tire_size,
            "noOfTires" | "numberOfTires" => &mut self.no_of_tires,
            "noOfTubes" | "numberOfTubes" => &mut self.no_of_tubes,
            "costCenter" => &mut self.cost_center,
            "presentKm" => &mut self.present_km,
            "previousKm" => &mut self.previous_km,
            "wearIndicator" => &mut self.wear_indicator,
            "wearPattern" => &mut self.wear_pattern,
            "officerServiceNo" => &mut self.officer_service_no,
            "email" => &mut self.email,
            "comments" => &mut self.comments,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Dry-run validation outcome for POST /api/tire-requests/validate.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
    pub auto_populated_data: TireRequestResponse,
}

/// Reject payloads carry a mandatory free-text reason.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectPayload {
    pub reason: Option<String>,
}

/// Dashboard counts for the summary endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub manager_requests: i64,
    pub tto_requests: i64,
    pub engineer_requests: i64,
    pub total_requests: i64,
}

/// Payload for creating a seller order from an approved request. Fields left
/// out are copied from the request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub request_id: Uuid,
    pub vendor_email: Option<String>,
    pub user_email: Option<String>,
    pub vehicle_no: Option<String>,
    pub tire_brand: Option<String>,
    pub tire_size: Option<String>,
    pub quantity: Option<i32>,
}

/// Tire order as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TireOrderResponse {
    pub id: Uuid,
    pub request_id: Uuid,
    pub vendor_email: String,
    pub user_email: String,
    pub vehicle_no: String,
    pub tire_brand: Option<String>,
    pub tire_size: Option<String>,
    pub quantity: i32,
    pub status: OrderStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TireOrder> for TireOrderResponse {
    fn from(order: TireOrder) -> Self {
        TireOrderResponse {
            id: order.id,
            request_id: order.request_id,
            vendor_email: order.vendor_email,
            user_email: order.user_email,
            vehicle_no: order.vehicle_no,
            tire_brand: order.tire_brand,
            tire_size: order.tire_size,
            quantity: order.quantity,
            status: order.status,
            rejection_reason: order.rejection_reason,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_photos_under_both_keys() {
        let mut request = TireRequest::new();
        request.photo_urls = vec!["data:image/png;base64,AAAA".to_string()];
        let response = TireRequestResponse::from(request);

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["photoUrls"], json["tirePhotoUrls"]);
        assert_eq!(json["photoUrls"].as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn submission_fields_set_accepts_legacy_names() {
        let mut fields = SubmissionFields::default();
        assert!(fields.set("numberOfTires", "4".to_string()));
        assert!(fields.set("section", "IT".to_string()));
        assert!(!fields.set("unknownField", "x".to_string()));
        assert_eq!(fields.no_of_tires.as_deref(), Some("4"));
        assert_eq!(fields.user_section.as_deref(), Some("IT"));
    }

    #[test]
    fn apply_to_leaves_absent_fields_untouched() {
        let mut request = TireRequest::new();
        request.vehicle_no = "WP-1234".to_string();
        request.email = "keep@company.com".to_string();

        let fields = SubmissionFields {
            user_section: Some("HR".to_string()),
            ..Default::default()
        };
        fields.apply_to(&mut request);

        assert_eq!(request.vehicle_no, "WP-1234");
        assert_eq!(request.email, "keep@company.com");
        assert_eq!(request.user_section, "HR");
    }
}
