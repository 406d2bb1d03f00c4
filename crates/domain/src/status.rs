// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status derivation for monthly returns.
//!
//! Every status here is computed from source rows on demand and never
//! stored. The functions are pure; "today" is always supplied by the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::{Date, Duration};

use crate::metric::MetricDefinition;

/// Number of days before the due date at which a return becomes "due soon".
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// A value recorded against one metric for one product and period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedValue {
    pub metric_id: i64,
    pub value: Option<String>,
    pub is_null_return: bool,
}

impl RecordedValue {
    /// A value counts as answered when it is non-blank or is a null return.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.is_null_return || self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

/// How far a single product's return has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceStatus {
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "In progress")]
    InProgress,
    #[serde(rename = "Complete")]
    Complete,
}

impl PerformanceStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Complete => "Complete",
        }
    }

    /// Derives the status from the number of enabled metrics and the
    /// number of them that have been answered.
    #[must_use]
    pub const fn derive(total: usize, completed: usize) -> Self {
        if total == 0 || completed == 0 {
            Self::NotStarted
        } else if completed == total {
            Self::Complete
        } else {
            Self::InProgress
        }
    }
}

impl std::fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answered versus total enabled metrics for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricProgress {
    pub completed: usize,
    pub total: usize,
}

impl MetricProgress {
    /// Counts answered values against the enabled metrics.
    ///
    /// Values for disabled or unknown metrics are ignored, and a metric is
    /// counted once no matter how many values reference it, so `completed`
    /// never exceeds `total`.
    #[must_use]
    pub fn measure(metrics: &[MetricDefinition], values: &[RecordedValue]) -> Self {
        let enabled: BTreeSet<i64> = metrics
            .iter()
            .filter(|metric| metric.enabled)
            .filter_map(|metric| metric.metric_id)
            .collect();

        let answered: BTreeSet<i64> = values
            .iter()
            .filter(|value| value.is_answered() && enabled.contains(&value.metric_id))
            .map(|value| value.metric_id)
            .collect();

        Self {
            completed: answered.len(),
            total: enabled.len(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> PerformanceStatus {
        PerformanceStatus::derive(self.total, self.completed)
    }
}

/// Red/Amber/Green rating of a product's metric progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RagStatus {
    Red,
    Amber,
    Green,
}

impl RagStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Amber => "Amber",
            Self::Green => "Green",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Red => "Not started",
            Self::Amber => "Partially completed",
            Self::Green => "All metrics completed",
        }
    }

    /// Green when complete, amber when partly answered, red otherwise.
    #[must_use]
    pub const fn from_performance(status: PerformanceStatus) -> Self {
        match status {
            PerformanceStatus::NotStarted => Self::Red,
            PerformanceStatus::InProgress => Self::Amber,
            PerformanceStatus::Complete => Self::Green,
        }
    }
}

impl std::fmt::Display for RagStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricProgress {
    #[must_use]
    pub const fn rag(&self) -> RagStatus {
        RagStatus::from_performance(self.status())
    }
}

/// Shorthand for `MetricProgress::measure(metrics, values).status()`.
#[must_use]
pub fn performance_status(metrics: &[MetricDefinition], values: &[RecordedValue]) -> PerformanceStatus {
    MetricProgress::measure(metrics, values).status()
}

/// Whether a return can be, or has been, submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[serde(rename = "Cannot submit")]
    CannotSubmit,
    #[serde(rename = "Ready to submit")]
    ReadyToSubmit,
    #[serde(rename = "Submitted")]
    Submitted,
}

impl SubmissionStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CannotSubmit => "Cannot submit",
            Self::ReadyToSubmit => "Ready to submit",
            Self::Submitted => "Submitted",
        }
    }

    /// A prior submission always wins; otherwise only a complete return is ready.
    #[must_use]
    pub const fn derive(performance: PerformanceStatus, already_submitted: bool) -> Self {
        if already_submitted {
            Self::Submitted
        } else if matches!(performance, PerformanceStatus::Complete) {
            Self::ReadyToSubmit
        } else {
            Self::CannotSubmit
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete products versus assigned products for one reporter and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceCompletion {
    pub completed: usize,
    pub total: usize,
}

impl ServiceCompletion {
    /// Tallies product statuses. An empty input yields `(0, 0)`.
    #[must_use]
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = PerformanceStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut completion, status| {
                completion.total += 1;
                if status == PerformanceStatus::Complete {
                    completion.completed += 1;
                }
                completion
            })
    }

    /// True when there is at least one product and all of them are complete.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// The overall submission status for the whole return.
    #[must_use]
    pub const fn submission_status(&self, already_submitted: bool) -> SubmissionStatus {
        if already_submitted {
            SubmissionStatus::Submitted
        } else if self.is_complete() {
            SubmissionStatus::ReadyToSubmit
        } else {
            SubmissionStatus::CannotSubmit
        }
    }
}

/// Urgency of a return relative to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DueDateStatus {
    #[serde(rename = "Overdue")]
    Overdue,
    #[serde(rename = "Due soon")]
    DueSoon,
    #[serde(rename = "Upcoming")]
    Upcoming,
}

impl DueDateStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::DueSoon => "Due soon",
            Self::Upcoming => "Upcoming",
        }
    }

    /// Overdue strictly after the due date; due soon when the due date is
    /// within `DUE_SOON_WINDOW_DAYS` of today, inclusive.
    #[must_use]
    pub fn evaluate(today: Date, due: Date) -> Self {
        if today > due {
            Self::Overdue
        } else if today.saturating_add(Duration::days(DUE_SOON_WINDOW_DAYS)) >= due {
            Self::DueSoon
        } else {
            Self::Upcoming
        }
    }
}

impl std::fmt::Display for DueDateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schedule label for a return, read off its due-date status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressStatus {
    #[serde(rename = "On track")]
    OnTrack,
    #[serde(rename = "At risk")]
    AtRisk,
    #[serde(rename = "Off track")]
    OffTrack,
}

impl ProgressStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "On track",
            Self::AtRisk => "At risk",
            Self::OffTrack => "Off track",
        }
    }

    #[must_use]
    pub const fn from_due_date(status: DueDateStatus) -> Self {
        match status {
            DueDateStatus::Upcoming => Self::OnTrack,
            DueDateStatus::DueSoon => Self::AtRisk,
            DueDateStatus::Overdue => Self::OffTrack,
        }
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
