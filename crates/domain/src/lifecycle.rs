// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle of a reporter's monthly return.
//!
//! ```text
//! NotStarted -> InProgress -> Complete -> Submitted
//!                   ^            |            |
//!                   +------------+            +-- resubmit (stays Submitted)
//! ```
//!
//! Submission is gated: a whole return may only move to `Submitted` when
//! every assigned product is `Complete`.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::status::PerformanceStatus;
use crate::types::{ProductId, ReportingPeriod};

/// State of one reporter's return for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnState {
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "In progress")]
    InProgress,
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "Submitted")]
    Submitted,
}

impl ReturnState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Complete => "Complete",
            Self::Submitted => "Submitted",
        }
    }

    /// Derives the return state from per-product statuses and the ledger flag.
    #[must_use]
    pub fn derive(product_statuses: &[PerformanceStatus], already_submitted: bool) -> Self {
        if already_submitted {
            return Self::Submitted;
        }
        if !product_statuses.is_empty()
            && product_statuses
                .iter()
                .all(|status| *status == PerformanceStatus::Complete)
        {
            return Self::Complete;
        }
        if product_statuses
            .iter()
            .any(|status| *status != PerformanceStatus::NotStarted)
        {
            return Self::InProgress;
        }
        Self::NotStarted
    }
}

impl std::fmt::Display for ReturnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checks the whole-return submission gate.
///
/// # Errors
///
/// Returns `DomainError::NoAssignedProducts` when there is nothing to submit,
/// or `DomainError::ReturnIncomplete` listing every product that is not yet
/// `Complete`.
pub fn validate_return_submission(
    period: &ReportingPeriod,
    products: &[(ProductId, PerformanceStatus)],
) -> Result<(), DomainError> {
    if products.is_empty() {
        return Err(DomainError::NoAssignedProducts {
            period: period.key(),
        });
    }

    let incomplete_products: Vec<ProductId> = products
        .iter()
        .filter(|(_, status)| *status != PerformanceStatus::Complete)
        .map(|(product, _)| product.clone())
        .collect();

    if !incomplete_products.is_empty() {
        return Err(DomainError::ReturnIncomplete {
            period: period.key(),
            incomplete_products,
        });
    }

    Ok(())
}

/// Checks that a single product's return is complete before it is submitted.
///
/// # Errors
///
/// Returns `DomainError::ProductIncomplete` unless the status is `Complete`.
pub fn validate_product_submission(
    period: &ReportingPeriod,
    product: &ProductId,
    status: PerformanceStatus,
) -> Result<(), DomainError> {
    if status == PerformanceStatus::Complete {
        return Ok(());
    }
    Err(DomainError::ProductIncomplete {
        product: product.clone(),
        period: period.key(),
        status,
    })
}
