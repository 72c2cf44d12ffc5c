//! Tireflow HTTP API
//!
//! Axum application exposing the tire request approval workflow: request
//! CRUD, the Manager → TTO → Engineer approval chain, role dashboards, and
//! seller orders.

pub mod api_doc;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
