// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fips_reporting_domain::{
    DataKind, MetricDefinition, ProductId, RecordedValue, ReportingPeriod, UserEmail,
};
use time::Month;

use crate::{ProductReturn, ReportingContext};

pub fn create_test_period() -> ReportingPeriod {
    ReportingPeriod::new(2025, Month::August).unwrap()
}

pub fn create_test_reporter() -> UserEmail {
    UserEmail::new("reporter@example.gov.uk").unwrap()
}

/// Two enabled metrics: a mandatory percentage (id 1) and a null-returnable number (id 2).
pub fn create_test_metrics() -> Vec<MetricDefinition> {
    let mut uptime: MetricDefinition =
        MetricDefinition::new("PM-001", "Uptime", DataKind::Percentage)
            .with_criteria(Some("min:0,max:100"));
    uptime.metric_id = Some(1);
    uptime.mandatory = true;

    let mut incidents: MetricDefinition =
        MetricDefinition::new("PM-002", "Incidents", DataKind::Number).with_criteria(Some("min:0"));
    incidents.metric_id = Some(2);
    incidents.null_return_allowed = true;

    vec![uptime, incidents]
}

pub fn answered(metric_id: i64, value: &str) -> RecordedValue {
    RecordedValue {
        metric_id,
        value: Some(value.to_string()),
        is_null_return: false,
    }
}

pub fn create_test_product(id: &str, values: Vec<RecordedValue>) -> ProductReturn {
    ProductReturn {
        product_id: ProductId::new(id).unwrap(),
        product_name: format!("Product {id}"),
        values,
        submitted: false,
    }
}

pub fn create_test_context(products: Vec<ProductReturn>) -> ReportingContext {
    let mut context: ReportingContext =
        ReportingContext::new(create_test_reporter(), create_test_period(), create_test_metrics());
    context.products = products;
    context
}
