// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fips_reporting_domain::{ReportingPeriod, UserEmail};
use fips_reporting_persistence::Persistence;
use time::Month;

use crate::{
    AssignProductRequest, AuthenticatedActor, MetricDefinitionRequest, Role, SaveMetricValueRequest,
    assign_product, create_metric,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(UserEmail::new("admin@example.gov.uk").unwrap(), Role::Admin)
}

pub fn create_test_reporter() -> AuthenticatedActor {
    AuthenticatedActor::new(
        UserEmail::new("reporter@example.gov.uk").unwrap(),
        Role::Reporter,
    )
}

pub fn create_test_period() -> ReportingPeriod {
    ReportingPeriod::new(2025, Month::August).unwrap()
}

pub fn metric_request(unique_id: &str, name: &str, data_kind: &str) -> MetricDefinitionRequest {
    MetricDefinitionRequest {
        unique_id: unique_id.to_string(),
        name: name.to_string(),
        description: None,
        category: None,
        data_kind: data_kind.to_string(),
        mandatory: false,
        null_return_allowed: false,
        validation_criteria: None,
        applicable_phases: None,
        enabled: None,
    }
}

/// Mandatory percentage between 0 and 100.
pub fn uptime_request() -> MetricDefinitionRequest {
    let mut request: MetricDefinitionRequest = metric_request("PM-001", "Uptime", "percentage");
    request.mandatory = true;
    request.validation_criteria = Some(String::from("min:0,max:100"));
    request
}

/// Non-negative whole number that allows a null return.
pub fn incidents_request() -> MetricDefinitionRequest {
    let mut request: MetricDefinitionRequest = metric_request("PM-002", "Incidents", "number");
    request.null_return_allowed = true;
    request.validation_criteria = Some(String::from("min:0"));
    request
}

pub fn value(raw: &str) -> SaveMetricValueRequest {
    SaveMetricValueRequest {
        value: Some(raw.to_string()),
        ..SaveMetricValueRequest::default()
    }
}

pub fn assign(persistence: &mut Persistence, reporter: &AuthenticatedActor, product_id: &str) {
    assign_product(
        persistence,
        &AssignProductRequest {
            user_email: reporter.email.value().to_string(),
            product_id: product_id.to_string(),
            product_name: format!("Service {product_id}"),
        },
        &create_test_admin(),
    )
    .unwrap();
}

/// Creates both test metrics and assigns `FIPS-1` and `FIPS-2` to the test
/// reporter. Returns the metric ids.
pub fn seed(persistence: &mut Persistence) -> (i64, i64) {
    let admin: AuthenticatedActor = create_test_admin();

    let uptime_id: i64 = create_metric(persistence, uptime_request(), &admin)
        .unwrap()
        .metric
        .metric_id;
    let incidents_id: i64 = create_metric(persistence, incidents_request(), &admin)
        .unwrap()
        .metric
        .metric_id;

    let reporter: AuthenticatedActor = create_test_reporter();
    assign(persistence, &reporter, "FIPS-1");
    assign(persistence, &reporter, "FIPS-2");

    (uptime_id, incidents_id)
}

/// An in-memory store seeded by `seed`.
pub fn create_seeded_persistence() -> (Persistence, i64, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (uptime_id, incidents_id): (i64, i64) = seed(&mut persistence);
    (persistence, uptime_id, incidents_id)
}
