//! Document-store abstraction traits
//!
//! The workflow treats persistence as an opaque document store: find-by-id,
//! find-by-status-set, save, delete, count. Services hold `Arc<dyn ...>` so
//! the Postgres implementation and the in-memory test stores are
//! interchangeable.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use tireflow_core::models::{TireOrder, TireRequest};

/// CRUD interface for tire requests.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TireRequest>>;

    /// Requests whose stored status matches any entry of `statuses`. The
    /// sets include legacy spellings, so matching happens on the raw stored
    /// text, not the parsed enum.
    async fn find_by_status_in(&self, statuses: &[&str]) -> Result<Vec<TireRequest>>;

    async fn list_all(&self) -> Result<Vec<TireRequest>>;

    /// Insert or replace the full document, returning the stored row.
    async fn save(&self, request: &TireRequest) -> Result<TireRequest>;

    /// Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count_by_status_in(&self, statuses: &[&str]) -> Result<i64>;

    async fn count(&self) -> Result<i64>;
}

/// CRUD interface for tire orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TireOrder>>;

    async fn find_by_vendor_email(&self, vendor_email: &str) -> Result<Vec<TireOrder>>;

    async fn list_all(&self) -> Result<Vec<TireOrder>>;

    async fn save(&self, order: &TireOrder) -> Result<TireOrder>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}
