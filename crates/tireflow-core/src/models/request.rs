//! Tire replacement request model and workflow status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Workflow position of a request. The single source of truth: only the
/// approval state machine mutates it.
///
/// Stored as TEXT. Historical documents may carry `PENDING`/`pending` or
/// `APPROVED`/`approved`; those parse as [`RequestStatus::Submitted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Submitted,
    ManagerApproved,
    ManagerRejected,
    TtoApproved,
    TtoRejected,
    EngineerApproved,
    EngineerRejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Submitted => "SUBMITTED",
            RequestStatus::ManagerApproved => "MANAGER_APPROVED",
            RequestStatus::ManagerRejected => "MANAGER_REJECTED",
            RequestStatus::TtoApproved => "TTO_APPROVED",
            RequestStatus::TtoRejected => "TTO_REJECTED",
            RequestStatus::EngineerApproved => "ENGINEER_APPROVED",
            RequestStatus::EngineerRejected => "ENGINEER_REJECTED",
        }
    }

    /// Parse a stored status, accepting the legacy alias spellings.
    pub fn parse(s: &str) -> Option<RequestStatus> {
        match s {
            "SUBMITTED" | "PENDING" | "pending" | "APPROVED" | "approved" => {
                Some(RequestStatus::Submitted)
            }
            "MANAGER_APPROVED" => Some(RequestStatus::ManagerApproved),
            "MANAGER_REJECTED" => Some(RequestStatus::ManagerRejected),
            "TTO_APPROVED" => Some(RequestStatus::TtoApproved),
            "TTO_REJECTED" => Some(RequestStatus::TtoRejected),
            "ENGINEER_APPROVED" => Some(RequestStatus::EngineerApproved),
            "ENGINEER_REJECTED" => Some(RequestStatus::EngineerRejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::ManagerRejected
                | RequestStatus::TtoRejected
                | RequestStatus::EngineerApproved
                | RequestStatus::EngineerRejected
        )
    }

    /// Status filter for the manager dashboard. The sets keep the legacy
    /// spellings so documents written before the status cleanup still match.
    pub fn manager_dashboard_statuses() -> &'static [&'static str] {
        &[
            "pending",
            "PENDING",
            "SUBMITTED",
            "MANAGER_APPROVED",
            "APPROVED",
        ]
    }

    /// Status filter for the TTO dashboard: everything from manager approval
    /// onward stays visible after TTO action.
    pub fn tto_dashboard_statuses() -> &'static [&'static str] {
        &[
            "APPROVED",
            "approved",
            "pending",
            "PENDING",
            "SUBMITTED",
            "MANAGER_APPROVED",
            "TTO_APPROVED",
            "TTO_REJECTED",
            "ENGINEER_APPROVED",
            "ENGINEER_REJECTED",
        ]
    }

    /// Status filter for the engineer dashboard.
    pub fn engineer_dashboard_statuses() -> &'static [&'static str] {
        &["TTO_APPROVED", "ENGINEER_APPROVED", "ENGINEER_REJECTED"]
    }
}

/// One tire replacement request, as submitted by an employee.
///
/// Submitter fields are free-form strings: they are validated for shape but
/// never semantically interpreted beyond that. Photos live in a single
/// canonical `photo_urls` list of base64 data URLs; the legacy duplicated
/// field only survives at the serialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TireRequest {
    pub id: Uuid,
    pub status: RequestStatus,
    pub vehicle_no: String,
    pub vehicle_type: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub user_section: String,
    /// yyyy-MM-dd
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
    pub photo_urls: Vec<String>,
    /// Set only while the request sits in a rejection state; cleared on
    /// manager approval.
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

impl TireRequest {
    /// Fresh request in the initial workflow state. Submitter fields start
    /// empty and are filled from the submission payload.
    pub fn new() -> Self {
        let now = Utc::now();
        TireRequest {
            id: Uuid::new_v4(),
            status: RequestStatus::Submitted,
            vehicle_no: String::new(),
            vehicle_type: String::new(),
            vehicle_brand: String::new(),
            vehicle_model: String::new(),
            user_section: String::new(),
            replacement_date: String::new(),
            existing_make: String::new(),
            tire_size: String::new(),
            no_of_tires: String::new(),
            no_of_tubes: String::new(),
            cost_center: String::new(),
            present_km: String::new(),
            previous_km: String::new(),
            wear_indicator: String::new(),
            wear_pattern: String::new(),
            officer_service_no: String::new(),
            email: String::new(),
            comments: None,
            photo_urls: Vec::new(),
            rejection_reason: None,
            manager_approved_at: None,
            manager_rejected_at: None,
            tto_approved_at: None,
            tto_rejected_at: None,
            engineer_approved_at: None,
            engineer_rejected_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for TireRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_names() {
        assert_eq!(
            RequestStatus::parse("MANAGER_APPROVED"),
            Some(RequestStatus::ManagerApproved)
        );
        assert_eq!(
            RequestStatus::parse("ENGINEER_REJECTED"),
            Some(RequestStatus::EngineerRejected)
        );
    }

    #[test]
    fn parse_treats_legacy_aliases_as_submitted() {
        for alias in ["PENDING", "pending", "APPROVED", "approved"] {
            assert_eq!(
                RequestStatus::parse(alias),
                Some(RequestStatus::Submitted),
                "alias {alias} should map to SUBMITTED"
            );
        }
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(RequestStatus::parse("SHIPPED"), None);
    }

    #[test]
    fn round_trip_through_as_str() {
        for status in [
            RequestStatus::Submitted,
            RequestStatus::ManagerApproved,
            RequestStatus::ManagerRejected,
            RequestStatus::TtoApproved,
            RequestStatus::TtoRejected,
            RequestStatus::EngineerApproved,
            RequestStatus::EngineerRejected,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn dashboard_sets_keep_legacy_spellings() {
        assert!(RequestStatus::manager_dashboard_statuses().contains(&"pending"));
        assert!(RequestStatus::manager_dashboard_statuses().contains(&"APPROVED"));
        assert!(RequestStatus::tto_dashboard_statuses().contains(&"approved"));
        assert!(!RequestStatus::engineer_dashboard_statuses().contains(&"pending"));
    }

    #[test]
    fn terminal_states() {
        assert!(RequestStatus::EngineerApproved.is_terminal());
        assert!(RequestStatus::TtoRejected.is_terminal());
        assert!(!RequestStatus::ManagerApproved.is_terminal());
        assert!(!RequestStatus::Submitted.is_terminal());
    }
}
