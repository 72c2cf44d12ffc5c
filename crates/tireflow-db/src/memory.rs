//! In-memory store implementations
//!
//! Hashmap-backed stores for tests and local experimentation. Status matching
//! mirrors the Postgres stores: raw stored text against the filter set.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use tireflow_core::models::{TireOrder, TireRequest};

use crate::traits::{OrderStore, RequestStore};

#[derive(Default)]
pub struct MemoryRequestStore {
    requests: Mutex<HashMap<Uuid, TireRequest>>,
}

impl MemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TireRequest>> {
        let requests = self.requests.lock().expect("request store lock");
        Ok(requests.get(&id).cloned())
    }

    async fn find_by_status_in(&self, statuses: &[&str]) -> Result<Vec<TireRequest>> {
        let requests = self.requests.lock().expect("request store lock");
        let mut matched: Vec<TireRequest> = requests
            .values()
            .filter(|r| statuses.contains(&r.status.as_str()))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn list_all(&self) -> Result<Vec<TireRequest>> {
        let requests = self.requests.lock().expect("request store lock");
        let mut all: Vec<TireRequest> = requests.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn save(&self, request: &TireRequest) -> Result<TireRequest> {
        let mut requests = self.requests.lock().expect("request store lock");
        requests.insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut requests = self.requests.lock().expect("request store lock");
        Ok(requests.remove(&id).is_some())
    }

    async fn count_by_status_in(&self, statuses: &[&str]) -> Result<i64> {
        let requests = self.requests.lock().expect("request store lock");
        Ok(requests
            .values()
            .filter(|r| statuses.contains(&r.status.as_str()))
            .count() as i64)
    }

    async fn count(&self) -> Result<i64> {
        let requests = self.requests.lock().expect("request store lock");
        Ok(requests.len() as i64)
    }
}

#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<HashMap<Uuid, TireOrder>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TireOrder>> {
        let orders = self.orders.lock().expect("order store lock");
        Ok(orders.get(&id).cloned())
    }

    async fn find_by_vendor_email(&self, vendor_email: &str) -> Result<Vec<TireOrder>> {
        let orders = self.orders.lock().expect("order store lock");
        let mut matched: Vec<TireOrder> = orders
            .values()
            .filter(|o| o.vendor_email == vendor_email)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn list_all(&self) -> Result<Vec<TireOrder>> {
        let orders = self.orders.lock().expect("order store lock");
        let mut all: Vec<TireOrder> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn save(&self, order: &TireOrder) -> Result<TireOrder> {
        let mut orders = self.orders.lock().expect("order store lock");
        orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut orders = self.orders.lock().expect("order store lock");
        Ok(orders.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tireflow_core::models::RequestStatus;

    #[tokio::test]
    async fn save_find_delete_round_trip() {
        let store = MemoryRequestStore::new();
        let mut request = TireRequest::new();
        request.vehicle_no = "WP-1234".to_string();

        store.save(&request).await.expect("save");
        let found = store
            .find_by_id(request.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found.vehicle_no, "WP-1234");

        assert!(store.delete(request.id).await.expect("delete"));
        assert!(store.find_by_id(request.id).await.expect("find").is_none());
        assert!(!store.delete(request.id).await.expect("second delete"));
    }

    #[tokio::test]
    async fn status_filters_match_canonical_text() {
        let store = MemoryRequestStore::new();
        let mut submitted = TireRequest::new();
        submitted.vehicle_no = "AAA-1".to_string();
        store.save(&submitted).await.expect("save");

        let mut approved = TireRequest::new();
        approved.vehicle_no = "BBB-2".to_string();
        approved.status = RequestStatus::ManagerApproved;
        store.save(&approved).await.expect("save");

        let manager_view = store
            .find_by_status_in(RequestStatus::manager_dashboard_statuses())
            .await
            .expect("filter");
        assert_eq!(manager_view.len(), 2);

        let engineer_view = store
            .find_by_status_in(RequestStatus::engineer_dashboard_statuses())
            .await
            .expect("filter");
        assert!(engineer_view.is_empty());

        assert_eq!(store.count().await.expect("count"), 2);
        assert_eq!(
            store
                .count_by_status_in(&["MANAGER_APPROVED"])
                .await
                .expect("count"),
            1
        );
    }
}
