// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::metric::CriteriaIssue;
use crate::status::PerformanceStatus;
use crate::types::ProductId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A stored or requested data kind is not one the validator understands.
    UnknownDataKind(String),
    /// User email is empty or malformed.
    InvalidUserEmail(String),
    /// Product (FIPS) identifier is empty.
    InvalidProductId(String),
    /// Metric name is empty.
    InvalidMetricName(String),
    /// Metric unique identifier is empty or contains whitespace.
    InvalidUniqueId(String),
    /// Reporting year is outside the supported range.
    InvalidReportingYear(i32),
    /// Month name could not be recognised.
    InvalidReportingMonth(String),
    /// Reporting period key is not of the form `<year>-<month>`.
    InvalidReportingPeriodKey(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Validation criteria do not fit the metric's data kind.
    InvalidCriteria {
        /// The metric's unique identifier.
        metric: String,
        /// Every problem found while parsing the criteria.
        issues: Vec<CriteriaIssue>,
    },
    /// A metric with this unique identifier already exists.
    DuplicateMetricUniqueId(String),
    /// Metric does not exist.
    MetricNotFound(i64),
    /// Metric exists but is disabled and cannot accept values.
    MetricDisabled(i64),
    /// The reporter is not assigned to the product.
    ProductNotAssigned {
        /// The product identifier.
        product: ProductId,
        /// The reporter's email.
        user: String,
    },
    /// The reporter has no products for the period, so there is nothing to submit.
    NoAssignedProducts {
        /// The reporting period key.
        period: String,
    },
    /// A single product's return was submitted before every metric was answered.
    ProductIncomplete {
        /// The product identifier.
        product: ProductId,
        /// The reporting period key.
        period: String,
        /// The product's current performance status.
        status: PerformanceStatus,
    },
    /// The whole return was submitted while some products are incomplete.
    ReturnIncomplete {
        /// The reporting period key.
        period: String,
        /// Products that are not yet complete.
        incomplete_products: Vec<ProductId>,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDataKind(kind) => write!(f, "Unknown metric data kind: '{kind}'"),
            Self::InvalidUserEmail(email) => write!(f, "Invalid user email: '{email}'"),
            Self::InvalidProductId(id) => write!(f, "Invalid product identifier: '{id}'"),
            Self::InvalidMetricName(msg) => write!(f, "Invalid metric name: {msg}"),
            Self::InvalidUniqueId(id) => write!(f, "Invalid metric unique identifier: '{id}'"),
            Self::InvalidReportingYear(year) => write!(f, "Invalid reporting year: {year}"),
            Self::InvalidReportingMonth(month) => write!(f, "Invalid reporting month: '{month}'"),
            Self::InvalidReportingPeriodKey(key) => {
                write!(f, "Invalid reporting period key: '{key}'")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
            Self::InvalidCriteria { metric, issues } => {
                write!(f, "Validation criteria for metric '{metric}' are invalid: ")?;
                for (index, issue) in issues.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{issue}")?;
                }
                Ok(())
            }
            Self::DuplicateMetricUniqueId(id) => {
                write!(f, "A metric with unique identifier '{id}' already exists")
            }
            Self::MetricNotFound(id) => write!(f, "Metric {id} not found"),
            Self::MetricDisabled(id) => write!(f, "Metric {id} is disabled"),
            Self::ProductNotAssigned { product, user } => {
                write!(f, "Product '{product}' is not assigned to {user}")
            }
            Self::NoAssignedProducts { period } => {
                write!(f, "No products are assigned for reporting period {period}")
            }
            Self::ProductIncomplete {
                product,
                period,
                status,
            } => write!(
                f,
                "Product '{product}' cannot be submitted for {period}: status is '{status}'"
            ),
            Self::ReturnIncomplete {
                period,
                incomplete_products,
            } => {
                let products: Vec<&str> = incomplete_products.iter().map(ProductId::value).collect();
                write!(
                    f,
                    "Return for {period} cannot be submitted: incomplete products {}",
                    products.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
