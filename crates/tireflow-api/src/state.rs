//! Application state shared across handlers.

use sqlx::PgPool;

use tireflow_core::Config;

use crate::services::{OrderService, RequestWorkflow};

/// Main application state, injected into every handler via `State<Arc<_>>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub workflow: RequestWorkflow,
    pub orders: OrderService,
    pub config: Config,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
