//! Service and store construction

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;

use tireflow_core::Config;
use tireflow_db::{OrderStore, PgOrderStore, PgRequestStore, RequestStore};
use tireflow_services::{
    Mailer, NoopMailer, NotificationConfig, NotificationService, SmtpMailer,
};

use crate::services::{OrderService, RequestWorkflow};
use crate::state::AppState;

/// Wire up stores, the mail transport, and the workflow services.
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let request_store: Arc<dyn RequestStore> = Arc::new(PgRequestStore::new(pool.clone()));
    let order_store: Arc<dyn OrderStore> = Arc::new(PgOrderStore::new(pool.clone()));

    let mailer: Arc<dyn Mailer> = match SmtpMailer::from_config(config) {
        Some(mailer) => Arc::new(mailer),
        None => {
            tracing::info!("SMTP not configured, notifications will be dropped");
            Arc::new(NoopMailer)
        }
    };
    let notifications =
        NotificationService::new(mailer, NotificationConfig::from_config(config));

    let workflow = RequestWorkflow::new(request_store.clone(), notifications.clone());
    let orders = OrderService::new(
        order_store,
        request_store,
        notifications,
        config.seller_email.clone(),
    );

    Ok(Arc::new(AppState {
        pool,
        workflow,
        orders,
        is_production: config.is_production(),
        config: config.clone(),
    }))
}
