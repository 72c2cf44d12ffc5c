//! Postgres-backed stores
//!
//! Rows round-trip through plain row structs so the status TEXT column can be
//! parsed tolerantly: documents written before the status cleanup may still
//! carry legacy spellings.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

use tireflow_core::models::{OrderStatus, RequestStatus, TireOrder, TireRequest};

use crate::traits::{OrderStore, RequestStore};

const REQUEST_COLUMNS: &str = r#"
    id, status, vehicle_no, vehicle_type, vehicle_brand, vehicle_model,
    user_section, replacement_date, existing_make, tire_size,
    no_of_tires, no_of_tubes, cost_center, present_km, previous_km,
    wear_indicator, wear_pattern, officer_service_no, email, comments,
    photo_urls, rejection_reason,
    manager_approved_at, manager_rejected_at,
    tto_approved_at, tto_rejected_at,
    engineer_approved_at, engineer_rejected_at,
    created_at, updated_at
"#;

#[derive(FromRow)]
struct TireRequestRow {
    id: Uuid,
    status: String,
    vehicle_no: String,
    vehicle_type: String,
    vehicle_brand: String,
    vehicle_model: String,
    user_section: String,
    replacement_date: String,
    existing_make: String,
    tire_size: String,
    no_of_tires: String,
    no_of_tubes: String,
    cost_center: String,
    present_km: String,
    previous_km: String,
    wear_indicator: String,
    wear_pattern: String,
    officer_service_no: String,
    email: String,
    comments: Option<String>,
    photo_urls: Vec<String>,
    rejection_reason: Option<String>,
    manager_approved_at: Option<DateTime<Utc>>,
    manager_rejected_at: Option<DateTime<Utc>>,
    tto_approved_at: Option<DateTime<Utc>>,
    tto_rejected_at: Option<DateTime<Utc>>,
    engineer_approved_at: Option<DateTime<Utc>>,
    engineer_rejected_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TireRequestRow> for TireRequest {
    type Error = anyhow::Error;

    fn try_from(row: TireRequestRow) -> Result<Self> {
        let status = RequestStatus::parse(&row.status)
            .with_context(|| format!("Unknown request status '{}' for {}", row.status, row.id))?;
        Ok(TireRequest {
            id: row.id,
            status,
            vehicle_no: row.vehicle_no,
            vehicle_type: row.vehicle_type,
            vehicle_brand: row.vehicle_brand,
            vehicle_model: row.vehicle_model,
            user_section: row.user_section,
            replacement_date: row.replacement_date,
            existing_make: row.existing_make,
            tire_size: row.tire_size,
            no_of_tires: row.no_of_tires,
            no_of_tubes: row.no_of_tubes,
            cost_center: row.cost_center,
            present_km: row.present_km,
            previous_km: row.previous_km,
            wear_indicator: row.wear_indicator,
            wear_pattern: row.wear_pattern,
            officer_service_no: row.officer_service_no,
            email: row.email,
            comments: row.comments,
            photo_urls: row.photo_urls,
            rejection_reason: row.rejection_reason,
            manager_approved_at: row.manager_approved_at,
            manager_rejected_at: row.manager_rejected_at,
            tto_approved_at: row.tto_approved_at,
            tto_rejected_at: row.tto_rejected_at,
            engineer_approved_at: row.engineer_approved_at,
            engineer_rejected_at: row.engineer_rejected_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TireRequest>> {
        let row = sqlx::query_as::<Postgres, TireRequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM tire_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get tire request")?;
        row.map(TireRequest::try_from).transpose()
    }

    async fn find_by_status_in(&self, statuses: &[&str]) -> Result<Vec<TireRequest>> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
        let rows = sqlx::query_as::<Postgres, TireRequestRow>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM tire_requests
            WHERE status = ANY($1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(&statuses)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tire requests by status")?;
        rows.into_iter().map(TireRequest::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<TireRequest>> {
        let rows = sqlx::query_as::<Postgres, TireRequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM tire_requests ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tire requests")?;
        rows.into_iter().map(TireRequest::try_from).collect()
    }

    async fn save(&self, request: &TireRequest) -> Result<TireRequest> {
        let row = sqlx::query_as::<Postgres, TireRequestRow>(&format!(
            r#"
            INSERT INTO tire_requests (
                id, status, vehicle_no, vehicle_type, vehicle_brand, vehicle_model,
                user_section, replacement_date, existing_make, tire_size,
                no_of_tires, no_of_tubes, cost_center, present_km, previous_km,
                wear_indicator, wear_pattern, officer_service_no, email, comments,
                photo_urls, rejection_reason,
                manager_approved_at, manager_rejected_at,
                tto_approved_at, tto_rejected_at,
                engineer_approved_at, engineer_rejected_at,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
                $21, $22, $23, $24, $25, $26, $27, $28, $29, $30
            )
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                vehicle_no = EXCLUDED.vehicle_no,
                vehicle_type = EXCLUDED.vehicle_type,
                vehicle_brand = EXCLUDED.vehicle_brand,
                vehicle_model = EXCLUDED.vehicle_model,
                user_section = EXCLUDED.user_section,
                replacement_date = EXCLUDED.replacement_date,
                existing_make = EXCLUDED.existing_make,
                tire_size = EXCLUDED.tire_size,
                no_of_tires = EXCLUDED.no_of_tires,
                no_of_tubes = EXCLUDED.no_of_tubes,
                cost_center = EXCLUDED.cost_center,
                present_km = EXCLUDED.present_km,
                previous_km = EXCLUDED.previous_km,
                wear_indicator = EXCLUDED.wear_indicator,
                wear_pattern = EXCLUDED.wear_pattern,
                officer_service_no = EXCLUDED.officer_service_no,
                email = EXCLUDED.email,
                comments = EXCLUDED.comments,
                photo_urls = EXCLUDED.photo_urls,
                rejection_reason = EXCLUDED.rejection_reason,
                manager_approved_at = EXCLUDED.manager_approved_at,
                manager_rejected_at = EXCLUDED.manager_rejected_at,
                tto_approved_at = EXCLUDED.tto_approved_at,
                tto_rejected_at = EXCLUDED.tto_rejected_at,
                engineer_approved_at = EXCLUDED.engineer_approved_at,
                engineer_rejected_at = EXCLUDED.engineer_rejected_at,
                updated_at = EXCLUDED.updated_at
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request.id)
        .bind(request.status.as_str())
        .bind(&request.vehicle_no)
        .bind(&request.vehicle_type)
        .bind(&request.vehicle_brand)
        .bind(&request.vehicle_model)
        .bind(&request.user_section)
        .bind(&request.replacement_date)
        .bind(&request.existing_make)
        .bind(&request.tire_size)
        .bind(&request.no_of_tires)
        .bind(&request.no_of_tubes)
        .bind(&request.cost_center)
        .bind(&request.present_km)
        .bind(&request.previous_km)
        .bind(&request.wear_indicator)
        .bind(&request.wear_pattern)
        .bind(&request.officer_service_no)
        .bind(&request.email)
        .bind(request.comments.as_deref())
        .bind(&request.photo_urls)
        .bind(request.rejection_reason.as_deref())
        .bind(request.manager_approved_at)
        .bind(request.manager_rejected_at)
        .bind(request.tto_approved_at)
        .bind(request.tto_rejected_at)
        .bind(request.engineer_approved_at)
        .bind(request.engineer_rejected_at)
        .bind(request.created_at)
        .bind(request.updated_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save tire request")?;
        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tire_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete tire request")?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status_in(&self, statuses: &[&str]) -> Result<i64> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tire_requests WHERE status = ANY($1)")
                .bind(&statuses)
                .fetch_one(&self.pool)
                .await
                .context("Failed to count tire requests by status")?;
        Ok(count)
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tire_requests")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count tire requests")?;
        Ok(count)
    }
}

const ORDER_COLUMNS: &str = r#"
    id, request_id, vendor_email, user_email, vehicle_no,
    tire_brand, tire_size, quantity, status, rejection_reason,
    created_at, updated_at
"#;

#[derive(FromRow)]
struct TireOrderRow {
    id: Uuid,
    request_id: Uuid,
    vendor_email: String,
    user_email: String,
    vehicle_no: String,
    tire_brand: Option<String>,
    tire_size: Option<String>,
    quantity: i32,
    status: String,
    rejection_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TireOrderRow> for TireOrder {
    type Error = anyhow::Error;

    fn try_from(row: TireOrderRow) -> Result<Self> {
        let status = OrderStatus::parse(&row.status)
            .with_context(|| format!("Unknown order status '{}' for {}", row.status, row.id))?;
        Ok(TireOrder {
            id: row.id,
            request_id: row.request_id,
            vendor_email: row.vendor_email,
            user_email: row.user_email,
            vehicle_no: row.vehicle_no,
            tire_brand: row.tire_brand,
            tire_size: row.tire_size,
            quantity: row.quantity,
            status,
            rejection_reason: row.rejection_reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TireOrder>> {
        let row = sqlx::query_as::<Postgres, TireOrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM tire_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get tire order")?;
        row.map(TireOrder::try_from).transpose()
    }

    async fn find_by_vendor_email(&self, vendor_email: &str) -> Result<Vec<TireOrder>> {
        let rows = sqlx::query_as::<Postgres, TireOrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM tire_orders
            WHERE vendor_email = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(vendor_email)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tire orders by vendor")?;
        rows.into_iter().map(TireOrder::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<TireOrder>> {
        let rows = sqlx::query_as::<Postgres, TireOrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM tire_orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tire orders")?;
        rows.into_iter().map(TireOrder::try_from).collect()
    }

    async fn save(&self, order: &TireOrder) -> Result<TireOrder> {
        let row = sqlx::query_as::<Postgres, TireOrderRow>(&format!(
            r#"
            INSERT INTO tire_orders (
                id, request_id, vendor_email, user_email, vehicle_no,
                tire_brand, tire_size, quantity, status, rejection_reason,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                request_id = EXCLUDED.request_id,
                vendor_email = EXCLUDED.vendor_email,
                user_email = EXCLUDED.user_email,
                vehicle_no = EXCLUDED.vehicle_no,
                tire_brand = EXCLUDED.tire_brand,
                tire_size = EXCLUDED.tire_size,
                quantity = EXCLUDED.quantity,
                status = EXCLUDED.status,
                rejection_reason = EXCLUDED.rejection_reason,
                updated_at = EXCLUDED.updated_at
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.id)
        .bind(order.request_id)
        .bind(&order.vendor_email)
        .bind(&order.user_email)
        .bind(&order.vehicle_no)
        .bind(order.tire_brand.as_deref())
        .bind(order.tire_size.as_deref())
        .bind(order.quantity)
        .bind(order.status.as_str())
        .bind(order.rejection_reason.as_deref())
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save tire order")?;
        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tire_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete tire order")?;
        Ok(result.rows_affected() > 0)
    }
}
