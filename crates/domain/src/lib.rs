// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod lifecycle;
mod metric;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use lifecycle::{ReturnState, validate_product_submission, validate_return_submission};
pub use metric::{
    CriteriaIssue, DataKind, MetricDefinition, NumericRange, ParsedCriteria, RangeBound,
    ValidationCriteria,
};
pub use status::{
    DUE_SOON_WINDOW_DAYS, DueDateStatus, MetricProgress, PerformanceStatus, ProgressStatus,
    RagStatus, RecordedValue, ServiceCompletion, SubmissionStatus, performance_status,
};
pub use types::{
    DUE_DAY_OF_FOLLOWING_MONTH, MAX_REPORTING_YEAR, MIN_REPORTING_YEAR, ProductId,
    ReportingPeriod, UserEmail,
};
pub use validation::{
    BOOLEAN_NO, BOOLEAN_YES, RejectionReason, VALUE_FIELD, ValueRejection,
    validate_metric_definition, validate_metric_value,
};

// Lifecycle phases offered when none are configured for a metric.
pub const DEFAULT_PHASES: [&str; 4] = ["Alpha", "Beta", "Live", "Retired"];
