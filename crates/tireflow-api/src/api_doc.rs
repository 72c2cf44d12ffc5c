//! OpenAPI document, served at /api/openapi.json and rendered at /docs

use utoipa::OpenApi;

use crate::dto::{
    CreateOrderPayload, DashboardCounts, RejectPayload, SubmissionFields, TireOrderResponse,
    TireRequestResponse, ValidationOutcome,
};
use crate::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tireflow API",
        description = "Tire replacement request/approval workflow backend"
    ),
    paths(
        crate::handlers::requests::create_tire_request,
        crate::handlers::requests::list_tire_requests,
        crate::handlers::requests::get_tire_request,
        crate::handlers::requests::update_tire_request,
        crate::handlers::requests::delete_tire_request,
        crate::handlers::requests::validate_tire_request,
        crate::handlers::photos::get_request_photos,
        crate::handlers::approvals::manager_approve,
        crate::handlers::approvals::manager_reject,
        crate::handlers::approvals::tto_approve,
        crate::handlers::approvals::tto_reject,
        crate::handlers::approvals::engineer_approve,
        crate::handlers::approvals::engineer_reject,
        crate::handlers::dashboards::manager_requests,
        crate::handlers::dashboards::tto_requests,
        crate::handlers::dashboards::engineer_requests,
        crate::handlers::dashboards::summary_counts,
        crate::handlers::orders::create_order,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::vendor_orders,
        crate::handlers::orders::delete_order,
        crate::handlers::orders::confirm_order,
        crate::handlers::orders::reject_order,
    ),
    components(schemas(
        TireRequestResponse,
        TireOrderResponse,
        SubmissionFields,
        ValidationOutcome,
        RejectPayload,
        CreateOrderPayload,
        DashboardCounts,
        ErrorResponse,
    ))
)]
struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
