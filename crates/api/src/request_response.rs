// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use fips_reporting_domain::MetricDefinition;
use serde::{Deserialize, Serialize};

/// Create or replace a metric definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetricDefinitionRequest {
    pub unique_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// One of `number`, `decimal`, `percentage`, `boolean`,
    /// `single_option`, `multiple_option`, `text`.
    pub data_kind: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub null_return_allowed: bool,
    /// `min:<n>,max:<n>` for numeric kinds, a comma-separated option list for
    /// option kinds.
    #[serde(default)]
    pub validation_criteria: Option<String>,
    /// Defaults to every lifecycle phase.
    #[serde(default)]
    pub applicable_phases: Option<Vec<String>>,
    /// Defaults to `true`.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// A metric definition as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricInfo {
    pub metric_id: i64,
    pub unique_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub data_kind: String,
    pub mandatory: bool,
    pub null_return_allowed: bool,
    pub validation_criteria: Option<String>,
    pub applicable_phases: Vec<String>,
    pub enabled: bool,
}

impl MetricInfo {
    /// Converts a stored definition. Unsaved definitions report id 0.
    #[must_use]
    pub fn from_definition(metric: &MetricDefinition) -> Self {
        Self {
            metric_id: metric.metric_id.unwrap_or_default(),
            unique_id: metric.unique_id.clone(),
            name: metric.name.clone(),
            description: metric.description.clone(),
            category: metric.category.clone(),
            data_kind: metric.data_kind().as_str().to_string(),
            mandatory: metric.mandatory,
            null_return_allowed: metric.null_return_allowed,
            validation_criteria: metric.raw_criteria().map(String::from),
            applicable_phases: metric.applicable_phases.clone(),
            enabled: metric.enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricMutationResponse {
    pub metric: MetricInfo,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMetricResponse {
    pub metric_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetricsResponse {
    pub metrics: Vec<MetricInfo>,
}

/// Assign a product to a reporter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignProductRequest {
    pub user_email: String,
    pub product_id: String,
    pub product_name: String,
}

/// Remove a product from a reporter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnassignProductRequest {
    pub user_email: String,
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    pub assignment_id: i64,
    pub user_email: String,
    pub product_id: String,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAssignmentsResponse {
    pub user_email: String,
    pub products: Vec<AssignmentInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignProductResponse {
    pub user_email: String,
    pub product_id: String,
    pub message: String,
}

/// Save the value of one metric for one product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SaveMetricValueRequest {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Declares there is nothing to report. Ignored when the metric does
    /// not allow null returns.
    #[serde(default)]
    pub is_null_return: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetricValueResponse {
    pub value_id: i64,
    pub metric_id: i64,
    pub product_id: String,
    pub reporting_period: String,
    /// The product's performance status after the save.
    pub performance_status: String,
    pub message: String,
}

/// One enabled metric alongside what the product has recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetricView {
    pub metric: MetricInfo,
    pub value: Option<String>,
    pub comment: Option<String>,
    pub is_null_return: bool,
    pub is_submitted: bool,
    pub answered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPerformanceResponse {
    pub product_id: String,
    pub product_name: String,
    /// Period key, e.g. `2025-august`.
    pub reporting_period: String,
    /// Display name, e.g. `August 2025`.
    pub period_name: String,
    pub metrics: Vec<ProductMetricView>,
    pub completed: usize,
    pub total: usize,
    pub performance_status: String,
    pub submission_status: String,
    /// `Red`, `Amber` or `Green`.
    pub rag_status: String,
    pub rag_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOverview {
    pub product_id: String,
    pub product_name: String,
    pub completed: usize,
    pub total: usize,
    pub performance_status: String,
    pub submission_status: String,
    pub rag_status: String,
    pub rag_description: String,
}

/// A reporter's whole return for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverviewResponse {
    pub user_email: String,
    pub reporting_period: String,
    pub period_name: String,
    pub products: Vec<ProductOverview>,
    /// Products whose performance is complete.
    pub completed_products: usize,
    pub total_products: usize,
    pub submission_status: String,
    pub return_state: String,
    /// ISO 8601 date, the 7th of the following month.
    pub due_date: String,
    pub due_date_status: String,
    /// `On track`, `At risk` or `Off track`.
    pub progress_status: String,
    pub submitted_at: Option<String>,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitProductReturnResponse {
    pub product_id: String,
    pub reporting_period: String,
    pub rows_submitted: usize,
    pub message: String,
}

/// Submit the whole return.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SubmitReturnRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReturnResponse {
    pub submission_id: i64,
    pub reporting_period: String,
    pub products_submitted: usize,
    pub rows_submitted: usize,
    /// True when this replaced an earlier submission.
    pub resubmission: bool,
    pub message: String,
}
