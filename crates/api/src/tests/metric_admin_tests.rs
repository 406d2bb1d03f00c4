// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fips_reporting_domain::DEFAULT_PHASES;
use fips_reporting_persistence::Persistence;

use crate::{
    ApiError, ListMetricsResponse, MetricDefinitionRequest, MetricMutationResponse, create_metric,
    delete_metric, disable_metric, enable_metric, get_metric, list_metrics, update_metric,
};

use super::helpers::{
    create_test_admin, create_test_reporter, incidents_request, metric_request, uptime_request,
};

#[test]
fn test_create_metric_applies_defaults() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let response: MetricMutationResponse =
        create_metric(&mut persistence, uptime_request(), &create_test_admin()).unwrap();

    assert!(response.metric.metric_id > 0);
    assert_eq!(response.metric.unique_id, "PM-001");
    assert_eq!(response.metric.data_kind, "percentage");
    assert!(response.metric.enabled);
    assert_eq!(response.metric.applicable_phases.len(), DEFAULT_PHASES.len());
    assert_eq!(
        response.metric.validation_criteria.as_deref(),
        Some("min:0,max:100")
    );
    assert_eq!(response.message, "Metric 'PM-001' created");
}

#[test]
fn test_reporter_cannot_create_metric() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<MetricMutationResponse, ApiError> =
        create_metric(&mut persistence, uptime_request(), &create_test_reporter());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(persistence.list_metrics().unwrap().is_empty());
}

#[test]
fn test_unknown_data_kind_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<MetricMutationResponse, ApiError> = create_metric(
        &mut persistence,
        metric_request("PM-009", "Colour", "colour"),
        &create_test_admin(),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "data_kind"),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn test_malformed_criteria_are_rejected_on_create() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request: MetricDefinitionRequest = metric_request("PM-010", "Latency", "decimal");
    request.validation_criteria = Some(String::from("min:fast"));

    let result: Result<MetricMutationResponse, ApiError> =
        create_metric(&mut persistence, request, &create_test_admin());

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "validation_criteria"),
        other => panic!("expected invalid criteria, got {other:?}"),
    }
}

#[test]
fn test_duplicate_unique_id_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    create_metric(&mut persistence, uptime_request(), &admin).unwrap();

    let mut duplicate: MetricDefinitionRequest = incidents_request();
    duplicate.unique_id = String::from(" PM-001 ");
    let result: Result<MetricMutationResponse, ApiError> =
        create_metric(&mut persistence, duplicate, &admin);

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "unique_metric_id"),
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
}

#[test]
fn test_update_metric_replaces_definition() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    let metric_id: i64 = create_metric(&mut persistence, uptime_request(), &admin)
        .unwrap()
        .metric
        .metric_id;

    let mut request: MetricDefinitionRequest = uptime_request();
    request.name = String::from("Service uptime");
    request.validation_criteria = Some(String::from("min:90,max:100"));
    let response: MetricMutationResponse =
        update_metric(&mut persistence, metric_id, request, &admin).unwrap();

    assert_eq!(response.metric.metric_id, metric_id);
    assert_eq!(response.metric.name, "Service uptime");
    assert_eq!(
        response.metric.validation_criteria.as_deref(),
        Some("min:90,max:100")
    );
}

#[test]
fn test_update_may_keep_its_own_unique_id_but_not_take_another() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    create_metric(&mut persistence, uptime_request(), &admin).unwrap();
    let incidents_id: i64 = create_metric(&mut persistence, incidents_request(), &admin)
        .unwrap()
        .metric
        .metric_id;

    assert!(update_metric(&mut persistence, incidents_id, incidents_request(), &admin).is_ok());

    let mut stolen: MetricDefinitionRequest = incidents_request();
    stolen.unique_id = String::from("PM-001");
    assert!(matches!(
        update_metric(&mut persistence, incidents_id, stolen, &admin),
        Err(ApiError::DomainRuleViolation { .. })
    ));
}

#[test]
fn test_update_unknown_metric_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<MetricMutationResponse, ApiError> =
        update_metric(&mut persistence, 42, uptime_request(), &create_test_admin());

    match result {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, "Metric");
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn test_disable_and_enable_metric() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    let metric_id: i64 = create_metric(&mut persistence, uptime_request(), &admin)
        .unwrap()
        .metric
        .metric_id;

    let disabled: MetricMutationResponse =
        disable_metric(&mut persistence, metric_id, &admin).unwrap();
    assert!(!disabled.metric.enabled);
    assert_eq!(disabled.message, "Metric 'PM-001' disabled");
    assert!(
        list_metrics(&mut persistence, true, &admin)
            .unwrap()
            .metrics
            .is_empty()
    );
    assert_eq!(
        list_metrics(&mut persistence, false, &admin)
            .unwrap()
            .metrics
            .len(),
        1
    );

    let enabled: MetricMutationResponse =
        enable_metric(&mut persistence, metric_id, &admin).unwrap();
    assert!(enabled.metric.enabled);
    assert_eq!(
        list_metrics(&mut persistence, true, &admin)
            .unwrap()
            .metrics
            .len(),
        1
    );
}

#[test]
fn test_delete_metric_then_get_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    let metric_id: i64 = create_metric(&mut persistence, uptime_request(), &admin)
        .unwrap()
        .metric
        .metric_id;

    delete_metric(&mut persistence, metric_id, &admin).unwrap();

    assert!(matches!(
        get_metric(&mut persistence, metric_id, &admin),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        delete_metric(&mut persistence, metric_id, &admin),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_list_metrics_is_ordered_by_name() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    create_metric(&mut persistence, uptime_request(), &admin).unwrap();
    create_metric(&mut persistence, incidents_request(), &admin).unwrap();

    let response: ListMetricsResponse = list_metrics(&mut persistence, false, &admin).unwrap();
    let names: Vec<&str> = response.metrics.iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["Incidents", "Uptime"]);
    assert!(list_metrics(&mut persistence, false, &create_test_reporter()).is_err());
}
