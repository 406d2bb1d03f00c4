// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fips_reporting_domain::RecordedValue;
use serde::{Deserialize, Serialize};

/// A stored metric value for one (metric, product, period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValueData {
    pub value_id: i64,
    pub metric_id: i64,
    pub product_id: String,
    pub reporting_period: String,
    pub value: Option<String>,
    pub comment: Option<String>,
    pub is_null_return: bool,
    pub is_submitted: bool,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl MetricValueData {
    /// The subset of the row that status derivation reads.
    #[must_use]
    pub fn to_recorded_value(&self) -> RecordedValue {
        RecordedValue {
            metric_id: self.metric_id,
            value: self.value.clone(),
            is_null_return: self.is_null_return,
        }
    }
}

/// A reporter's submission record for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecordData {
    pub submission_id: i64,
    pub user_email: String,
    pub reporting_period: String,
    pub status: String,
    pub submitted_by: String,
    pub submitted_at: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A product a reporter is responsible for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAssignmentData {
    pub assignment_id: i64,
    pub user_email: String,
    pub product_id: String,
    pub product_name: String,
    pub created_at: String,
}

/// What a persisted transition wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistedTransition {
    /// The value row that was inserted or updated.
    ValueRecorded { value_id: i64 },
    /// Number of value rows marked submitted.
    ProductSubmitted { rows_submitted: usize },
    /// The submission record and the number of value rows marked submitted.
    ReturnSubmitted {
        submission_id: i64,
        rows_submitted: usize,
    },
}
