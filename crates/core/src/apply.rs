// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fips_reporting_domain::{
    DomainError, MetricDefinition, PerformanceStatus, ProductId, validate_metric_value,
    validate_product_submission, validate_return_submission,
};

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{MetricValueWrite, ProductReturn, ReportingContext, Transition};

/// Applies a command to a reporting context, producing the writes to persist.
///
/// The context is never modified. Callers persist the returned transition and
/// reload the context to observe its effect.
///
/// # Arguments
///
/// * `context` - The reporter's current return (immutable)
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - The product is not assigned to the reporter
/// - The metric does not exist or is disabled
/// - The value fails metric validation
/// - A submission gate is not satisfied
pub fn apply(context: &ReportingContext, command: Command) -> Result<Transition, CoreError> {
    match command {
        Command::SaveMetricValue {
            product_id,
            metric_id,
            value,
            comment,
            is_null_return,
        } => {
            assigned_product(context, &product_id)?;

            let metric: &MetricDefinition = context
                .metric(metric_id)
                .ok_or(DomainError::MetricNotFound(metric_id))?;
            if !metric.enabled {
                return Err(DomainError::MetricDisabled(metric_id).into());
            }

            validate_metric_value(metric, value.as_deref(), is_null_return)?;

            // A null-return flag on a metric that does not allow one is dropped.
            let is_null_return: bool = is_null_return && metric.null_return_allowed;
            let value: Option<String> = if is_null_return {
                None
            } else {
                normalize_text(value)
            };

            Ok(Transition::ValueRecorded(MetricValueWrite {
                metric_id,
                product_id,
                period: context.period,
                value,
                comment: normalize_text(comment),
                is_null_return,
                saved_by: context.reporter.clone(),
            }))
        }
        Command::SubmitProductReturn { product_id } => {
            let product: &ProductReturn = assigned_product(context, &product_id)?;
            let status: PerformanceStatus = context.performance_status(product);
            validate_product_submission(&context.period, &product_id, status)?;

            Ok(Transition::ProductSubmitted {
                product_id,
                period: context.period,
                submitted_by: context.reporter.clone(),
            })
        }
        Command::SubmitReturn { notes } => {
            let statuses: Vec<(ProductId, PerformanceStatus)> = context.product_statuses();
            validate_return_submission(&context.period, &statuses)?;

            Ok(Transition::ReturnSubmitted {
                products: statuses.into_iter().map(|(product, _)| product).collect(),
                period: context.period,
                submitted_by: context.reporter.clone(),
                notes: normalize_text(notes),
                resubmission: context.return_submitted,
            })
        }
    }
}

fn assigned_product<'a>(
    context: &'a ReportingContext,
    product_id: &ProductId,
) -> Result<&'a ProductReturn, CoreError> {
    context.product(product_id).ok_or_else(|| {
        CoreError::DomainViolation(DomainError::ProductNotAssigned {
            product: product_id.clone(),
            user: context.reporter.value().to_string(),
        })
    })
}

/// Trims text and turns blanks into `None`.
fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
