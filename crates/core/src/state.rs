// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fips_reporting_domain::{
    MetricDefinition, MetricProgress, PerformanceStatus, ProductId, RecordedValue, ReportingPeriod,
    ReturnState, ServiceCompletion, SubmissionStatus, UserEmail,
};

/// One assigned product's slice of a monthly return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReturn {
    /// The product's FIPS identifier.
    pub product_id: ProductId,
    /// The product's display name.
    pub product_name: String,
    /// Values recorded for this product in the period.
    pub values: Vec<RecordedValue>,
    /// True once any of this product's values has been submitted.
    pub submitted: bool,
}

/// Everything known about one reporter's return for one period.
///
/// Contexts are loaded fresh for each request and never cached; every status
/// below is derived from these rows on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingContext {
    /// The reporter whose return this is.
    pub reporter: UserEmail,
    /// The reporting period.
    pub period: ReportingPeriod,
    /// Metric definitions, enabled or not.
    pub metrics: Vec<MetricDefinition>,
    /// Products assigned to the reporter.
    pub products: Vec<ProductReturn>,
    /// True when the submission ledger holds a record for this reporter and period.
    pub return_submitted: bool,
}

impl ReportingContext {
    /// Creates a context with no products and no submission.
    #[must_use]
    pub const fn new(
        reporter: UserEmail,
        period: ReportingPeriod,
        metrics: Vec<MetricDefinition>,
    ) -> Self {
        Self {
            reporter,
            period,
            metrics,
            products: Vec::new(),
            return_submitted: false,
        }
    }

    /// Finds an assigned product.
    #[must_use]
    pub fn product(&self, product_id: &ProductId) -> Option<&ProductReturn> {
        self.products
            .iter()
            .find(|product| &product.product_id == product_id)
    }

    /// Finds a metric by its database identifier.
    #[must_use]
    pub fn metric(&self, metric_id: i64) -> Option<&MetricDefinition> {
        self.metrics
            .iter()
            .find(|metric| metric.metric_id == Some(metric_id))
    }

    /// Answered versus enabled metrics for a product.
    #[must_use]
    pub fn progress(&self, product: &ProductReturn) -> MetricProgress {
        MetricProgress::measure(&self.metrics, &product.values)
    }

    #[must_use]
    pub fn performance_status(&self, product: &ProductReturn) -> PerformanceStatus {
        self.progress(product).status()
    }

    /// Submission status for a single product.
    #[must_use]
    pub fn product_submission_status(&self, product: &ProductReturn) -> SubmissionStatus {
        SubmissionStatus::derive(self.performance_status(product), product.submitted)
    }

    /// Performance status of every assigned product, in assignment order.
    #[must_use]
    pub fn product_statuses(&self) -> Vec<(ProductId, PerformanceStatus)> {
        self.products
            .iter()
            .map(|product| (product.product_id.clone(), self.performance_status(product)))
            .collect()
    }

    #[must_use]
    pub fn completion(&self) -> ServiceCompletion {
        ServiceCompletion::from_statuses(
            self.products
                .iter()
                .map(|product| self.performance_status(product)),
        )
    }

    /// Overall submission status for the whole return.
    #[must_use]
    pub fn submission_status(&self) -> SubmissionStatus {
        self.completion().submission_status(self.return_submitted)
    }

    #[must_use]
    pub fn return_state(&self) -> ReturnState {
        let statuses: Vec<PerformanceStatus> = self
            .products
            .iter()
            .map(|product| self.performance_status(product))
            .collect();
        ReturnState::derive(&statuses, self.return_submitted)
    }
}

/// A value to be written to the value ledger.
///
/// The value and comment are already trimmed, with blanks turned into `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricValueWrite {
    pub metric_id: i64,
    pub product_id: ProductId,
    pub period: ReportingPeriod,
    pub value: Option<String>,
    pub comment: Option<String>,
    pub is_null_return: bool,
    pub saved_by: UserEmail,
}

/// The writes produced by applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Upsert one value keyed on (metric, product, period).
    ValueRecorded(MetricValueWrite),
    /// Mark one product's values for the period as submitted.
    ProductSubmitted {
        product_id: ProductId,
        period: ReportingPeriod,
        submitted_by: UserEmail,
    },
    /// Mark every listed product's values as submitted and upsert the
    /// reporter's submission record.
    ReturnSubmitted {
        products: Vec<ProductId>,
        period: ReportingPeriod,
        submitted_by: UserEmail,
        notes: Option<String>,
        /// True when a submission record already existed.
        resubmission: bool,
    },
}
