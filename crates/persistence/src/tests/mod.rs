// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod submission_tests;

use diesel::RunQueryDsl;
use fips_reporting::MetricValueWrite;
use fips_reporting_domain::{DataKind, MetricDefinition, ProductId, ReportingPeriod, UserEmail};
use time::Month;

use crate::{BackendConnection, Persistence};

pub fn create_test_admin() -> UserEmail {
    UserEmail::new("admin@example.gov.uk").unwrap()
}

pub fn create_test_reporter() -> UserEmail {
    UserEmail::new("reporter@example.gov.uk").unwrap()
}

pub fn create_test_period() -> ReportingPeriod {
    ReportingPeriod::new(2025, Month::August).unwrap()
}

pub fn product(id: &str) -> ProductId {
    ProductId::new(id).unwrap()
}

pub fn create_uptime_metric() -> MetricDefinition {
    let mut metric: MetricDefinition =
        MetricDefinition::new("PM-001", "Uptime", DataKind::Percentage)
            .with_criteria(Some("min:0,max:100"));
    metric.mandatory = true;
    metric.category = String::from("Availability");
    metric.applicable_phases = vec![String::from("Beta"), String::from("Live")];
    metric
}

pub fn create_incidents_metric() -> MetricDefinition {
    let mut metric: MetricDefinition =
        MetricDefinition::new("PM-002", "Incidents", DataKind::Number).with_criteria(Some("min:0"));
    metric.null_return_allowed = true;
    metric
}

/// A database with both test metrics stored. Returns their ids in creation order.
pub fn create_seeded_persistence() -> (Persistence, i64, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin: UserEmail = create_test_admin();
    let uptime_id: i64 = persistence
        .create_metric(&create_uptime_metric(), &admin)
        .unwrap();
    let incidents_id: i64 = persistence
        .create_metric(&create_incidents_metric(), &admin)
        .unwrap();
    (persistence, uptime_id, incidents_id)
}

pub fn value_write(metric_id: i64, product_id: &str, value: Option<&str>) -> MetricValueWrite {
    MetricValueWrite {
        metric_id,
        product_id: product(product_id),
        period: create_test_period(),
        value: value.map(String::from),
        comment: None,
        is_null_return: false,
        saved_by: create_test_reporter(),
    }
}

/// Runs raw SQL against the test database, bypassing the adapter.
pub fn execute_sql(persistence: &mut Persistence, sql: &str) {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => {
            diesel::sql_query(sql).execute(conn).unwrap();
        }
        #[cfg(feature = "mysql")]
        BackendConnection::Mysql(conn) => {
            diesel::sql_query(sql).execute(conn).unwrap();
        }
    }
}
