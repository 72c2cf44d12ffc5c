//! HTTP handlers

pub mod approvals;
pub mod dashboards;
pub mod orders;
pub mod photos;
pub mod requests;
