//! Approval state machine for tire requests
//!
//! Every transition is one read-modify-write through the request store
//! followed by a stage notification. Notifications are failure-isolated in
//! the dispatcher: a committed transition is never undone by a transport
//! error. No optimistic-concurrency token is used; concurrent transitions on
//! one id are last-write-wins.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tireflow_core::models::{RequestStatus, TireRequest};
use tireflow_core::validation::{self, PhotoUpload};
use tireflow_core::AppError;
use tireflow_db::RequestStore;
use tireflow_services::NotificationService;

use crate::dto::{DashboardCounts, SubmissionFields};

/// One uploaded photo file, already read out of the multipart stream.
#[derive(Debug, Clone)]
pub struct IncomingPhoto {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Which role's dashboard is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardStage {
    Manager,
    Tto,
    Engineer,
}

impl DashboardStage {
    fn statuses(&self) -> &'static [&'static str] {
        match self {
            DashboardStage::Manager => RequestStatus::manager_dashboard_statuses(),
            DashboardStage::Tto => RequestStatus::tto_dashboard_statuses(),
            DashboardStage::Engineer => RequestStatus::engineer_dashboard_statuses(),
        }
    }
}

#[derive(Clone)]
pub struct RequestWorkflow {
    store: Arc<dyn RequestStore>,
    notifications: NotificationService,
}

fn db_error(err: anyhow::Error) -> AppError {
    tracing::error!(error = %err, "Request store operation failed");
    AppError::Database(err.to_string())
}

fn require_reason(reason: Option<&str>) -> Result<String, AppError> {
    match reason.map(str::trim) {
        Some(reason) if !reason.is_empty() => Ok(reason.to_string()),
        _ => Err(AppError::ValidationFailed(vec![
            "Rejection reason is required".to_string(),
        ])),
    }
}

impl RequestWorkflow {
    pub fn new(store: Arc<dyn RequestStore>, notifications: NotificationService) -> Self {
        Self {
            store,
            notifications,
        }
    }

    async fn load(&self, id: Uuid) -> Result<TireRequest, AppError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))
    }

    async fn persist(&self, request: &mut TireRequest) -> Result<TireRequest, AppError> {
        request.updated_at = Utc::now();
        self.store.save(request).await.map_err(db_error)
    }

    /// Encode uploaded photos as data URLs, skipping files whose bytes do not
    /// carry an image signature. Declared-metadata validation has already
    /// run; this is the byte-level backstop.
    fn encode_photos(photos: &[IncomingPhoto]) -> Vec<String> {
        let mut urls = Vec::with_capacity(photos.len());
        for photo in photos {
            if photo.bytes.is_empty() {
                tracing::warn!(filename = %photo.filename, "Empty photo upload, skipping");
                continue;
            }
            if !validation::has_image_signature(&photo.bytes) {
                tracing::warn!(filename = %photo.filename, "Upload bytes are not a recognized image, skipping");
                continue;
            }
            urls.push(validation::to_data_url(&photo.content_type, &photo.bytes));
        }
        urls
    }

    fn validate_submission(
        request: &TireRequest,
        photos: &[IncomingPhoto],
    ) -> Result<(), AppError> {
        let mut errors = validation::validate(request);
        let uploads: Vec<PhotoUpload> = photos
            .iter()
            .map(|p| PhotoUpload {
                filename: p.filename.clone(),
                content_type: p.content_type.clone(),
                size: p.bytes.len(),
            })
            .collect();
        errors.extend(validation::validate_photo_uploads(&uploads));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationFailed(errors))
        }
    }

    /// Create a request from a submission. Legacy photo-URL fields from the
    /// form are merged with the uploaded files into the canonical list.
    pub async fn create(
        &self,
        fields: &SubmissionFields,
        photos: Vec<IncomingPhoto>,
        legacy_photo_urls: Vec<String>,
    ) -> Result<TireRequest, AppError> {
        let mut request = TireRequest::new();
        fields.apply_to(&mut request);
        validation::auto_populate(&mut request);
        Self::validate_submission(&request, &photos)?;

        let uploaded = Self::encode_photos(&photos);
        request.photo_urls = validation::consolidate(&uploaded, &legacy_photo_urls);

        let saved = self.persist(&mut request).await?;
        tracing::info!(
            request_id = %saved.id,
            vehicle_no = %saved.vehicle_no,
            photos = saved.photo_urls.len(),
            "Tire request created"
        );
        self.notifications.request_submitted(&saved).await;
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<TireRequest, AppError> {
        self.load(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<TireRequest>, AppError> {
        self.store.list_all().await.map_err(db_error)
    }

    pub async fn list_for_dashboard(
        &self,
        stage: DashboardStage,
    ) -> Result<Vec<TireRequest>, AppError> {
        self.store
            .find_by_status_in(stage.statuses())
            .await
            .map_err(db_error)
    }

    pub async fn dashboard_counts(&self) -> Result<DashboardCounts, AppError> {
        let manager_requests = self
            .store
            .count_by_status_in(DashboardStage::Manager.statuses())
            .await
            .map_err(db_error)?;
        let tto_requests = self
            .store
            .count_by_status_in(DashboardStage::Tto.statuses())
            .await
            .map_err(db_error)?;
        let engineer_requests = self
            .store
            .count_by_status_in(DashboardStage::Engineer.statuses())
            .await
            .map_err(db_error)?;
        let total_requests = self.store.count().await.map_err(db_error)?;
        Ok(DashboardCounts {
            manager_requests,
            tto_requests,
            engineer_requests,
            total_requests,
        })
    }

    /// Replace submitter fields and photos. Workflow state (status, approval
    /// metadata) is owned by the transitions below and survives updates.
    pub async fn update(
        &self,
        id: Uuid,
        fields: &SubmissionFields,
        photos: Vec<IncomingPhoto>,
        legacy_photo_urls: Vec<String>,
    ) -> Result<TireRequest, AppError> {
        let mut request = self.load(id).await?;
        fields.apply_to(&mut request);
        validation::auto_populate(&mut request);
        Self::validate_submission(&request, &photos)?;

        if !photos.is_empty() || !legacy_photo_urls.is_empty() {
            let uploaded = Self::encode_photos(&photos);
            request.photo_urls = validation::consolidate(&uploaded, &legacy_photo_urls);
        }

        let saved = self.persist(&mut request).await?;
        tracing::info!(request_id = %saved.id, "Tire request updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.store.delete(id).await.map_err(db_error)?;
        if !deleted {
            return Err(AppError::NotFound("Request not found".to_string()));
        }
        tracing::info!(request_id = %id, "Tire request deleted");
        Ok(())
    }

    /// Consolidated photo list for one request, dropping any entry that is
    /// no longer a well-formed image data URL.
    pub async fn photos(&self, id: Uuid) -> Result<Vec<String>, AppError> {
        let request = self.load(id).await?;
        let total = request.photo_urls.len();
        let valid: Vec<String> = request
            .photo_urls
            .into_iter()
            .filter(|photo| validation::is_valid_image(photo))
            .collect();
        if valid.len() < total {
            tracing::warn!(
                request_id = %id,
                dropped = total - valid.len(),
                "Corrupted photo entries filtered from listing"
            );
        }
        Ok(valid)
    }

    pub async fn manager_approve(&self, id: Uuid) -> Result<TireRequest, AppError> {
        let mut request = self.load(id).await?;
        request.status = RequestStatus::ManagerApproved;
        request.rejection_reason = None;
        request.manager_approved_at = Some(Utc::now());
        let saved = self.persist(&mut request).await?;
        tracing::info!(request_id = %id, "Request approved by manager");
        self.notifications.manager_approved(&saved).await;
        Ok(saved)
    }

    pub async fn manager_reject(
        &self,
        id: Uuid,
        reason: Option<&str>,
    ) -> Result<TireRequest, AppError> {
        let reason = require_reason(reason)?;
        let mut request = self.load(id).await?;
        request.status = RequestStatus::ManagerRejected;
        request.rejection_reason = Some(reason);
        request.manager_rejected_at = Some(Utc::now());
        let saved = self.persist(&mut request).await?;
        tracing::info!(request_id = %id, "Request rejected by manager");
        Ok(saved)
    }

    /// Permissive: an unexpected current status is logged, not blocked.
    pub async fn tto_approve(&self, id: Uuid) -> Result<TireRequest, AppError> {
        let mut request = self.load(id).await?;
        if !matches!(
            request.status,
            RequestStatus::Submitted | RequestStatus::ManagerApproved
        ) {
            tracing::warn!(
                request_id = %id,
                status = request.status.as_str(),
                "Unexpected request status for TTO approval"
            );
        }
        request.status = RequestStatus::TtoApproved;
        request.tto_approved_at = Some(Utc::now());
        let saved = self.persist(&mut request).await?;
        tracing::info!(request_id = %id, "Request approved by TTO");
        self.notifications.tto_approved(&saved).await;
        Ok(saved)
    }

    pub async fn tto_reject(
        &self,
        id: Uuid,
        reason: Option<&str>,
    ) -> Result<TireRequest, AppError> {
        let reason = require_reason(reason)?;
        let mut request = self.load(id).await?;
        if request.status != RequestStatus::ManagerApproved {
            return Err(AppError::TransitionNotAllowed(
                "Request must be approved by manager before TTO can reject it".to_string(),
            ));
        }
        request.status = RequestStatus::TtoRejected;
        request.rejection_reason = Some(reason);
        request.tto_rejected_at = Some(Utc::now());
        let saved = self.persist(&mut request).await?;
        tracing::info!(request_id = %id, "Request rejected by TTO");
        Ok(saved)
    }

    /// No guard: re-approval after an engineer rejection is permitted, and
    /// the final status reflects the last call.
    pub async fn engineer_approve(&self, id: Uuid) -> Result<TireRequest, AppError> {
        let mut request = self.load(id).await?;
        request.status = RequestStatus::EngineerApproved;
        request.engineer_approved_at = Some(Utc::now());
        let saved = self.persist(&mut request).await?;
        tracing::info!(request_id = %id, "Request approved by engineer");
        self.notifications.request_fully_approved(&saved).await;
        Ok(saved)
    }

    pub async fn engineer_reject(&self, id: Uuid) -> Result<TireRequest, AppError> {
        let mut request = self.load(id).await?;
        request.status = RequestStatus::EngineerRejected;
        request.engineer_rejected_at = Some(Utc::now());
        let saved = self.persist(&mut request).await?;
        tracing::info!(request_id = %id, "Request rejected by engineer");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reason_rejects_blank_input() {
        assert!(require_reason(None).is_err());
        assert!(require_reason(Some("")).is_err());
        assert!(require_reason(Some("  \t")).is_err());
        assert_eq!(
            require_reason(Some("  worn unevenly ")).expect("trimmed"),
            "worn unevenly"
        );
    }

    #[test]
    fn encode_photos_skips_empty_and_non_image_bytes() {
        let photos = vec![
            IncomingPhoto {
                filename: "real.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            },
            IncomingPhoto {
                filename: "empty.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: Vec::new(),
            },
            IncomingPhoto {
                filename: "text.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: b"plain text".to_vec(),
            },
        ];
        let urls = RequestWorkflow::encode_photos(&photos);
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("data:image/jpeg;base64,"));
    }
}
