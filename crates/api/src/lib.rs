// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for FIPS performance reporting.
//!
//! Transport-agnostic: handlers take a `Persistence`, a request DTO and an
//! `AuthenticatedActor`, and return response DTOs or an `ApiError`. The HTTP
//! server maps these onto routes and status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedActor, AuthorizationService, IdentityError, Role, USER_EMAIL_HEADER,
    USER_ROLE_HEADER, authenticate,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    LoadedReturn, assign_product, create_metric, delete_metric, disable_metric, enable_metric,
    get_metric, get_month_overview, get_product_performance, list_assigned_products, list_metrics,
    load_reporting_context, parse_reporting_period, save_metric_value, submit_product_return,
    submit_return, unassign_product, update_metric,
};
pub use request_response::{
    AssignProductRequest, AssignmentInfo, DeleteMetricResponse, ListAssignmentsResponse,
    ListMetricsResponse, MetricDefinitionRequest, MetricInfo, MetricMutationResponse,
    MonthOverviewResponse, ProductMetricView, ProductOverview, ProductPerformanceResponse,
    SaveMetricValueRequest, SaveMetricValueResponse, SubmitProductReturnResponse,
    SubmitReturnRequest, SubmitReturnResponse, UnassignProductRequest, UnassignProductResponse,
};
