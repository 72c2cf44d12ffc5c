//! Business services: the approval state machine and the order projection

pub mod order_service;
pub mod request_workflow;

pub use order_service::OrderService;
pub use request_workflow::{DashboardStage, IncomingPhoto, RequestWorkflow};
