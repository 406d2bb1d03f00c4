// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of submitted metric values and of metric definitions.

use rust_decimal::Decimal;

use crate::error::DomainError;
use crate::metric::{
    DataKind, MetricDefinition, RangeBound, ValidationCriteria, parse_plain_decimal,
};

/// Field name reported for every value rejection.
pub const VALUE_FIELD: &str = "value";

/// Accepted spellings for boolean metrics. Matching is exact.
pub const BOOLEAN_YES: &str = "Yes";
pub const BOOLEAN_NO: &str = "No";

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    MissingMandatory,
    NotWholeNumber,
    NotDecimal,
    NotNumber,
    NotYesNo,
    NotAnOption,
    InvalidOption { token: String },
    BelowMinimum { min: Decimal },
    AboveMaximum { max: Decimal },
}

/// An expected validation failure, returned as a value.
///
/// `message` is user-facing and is shown verbatim next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRejection {
    pub field: String,
    pub message: String,
    pub reason: RejectionReason,
}

impl ValueRejection {
    fn new(reason: RejectionReason, message: String) -> Self {
        Self {
            field: String::from(VALUE_FIELD),
            message,
            reason,
        }
    }
}

impl std::fmt::Display for ValueRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValueRejection {}

/// Decides whether a raw submitted value is acceptable for a metric.
///
/// Rules apply in order and the first applicable rule decides:
///
/// 1. A null return on a metric that allows one is accepted.
/// 2. A missing or blank value is rejected for mandatory metrics and
///    accepted otherwise.
/// 3. The trimmed value is checked against the metric's data kind and,
///    for numeric kinds, each range bound in configured order.
///
/// # Errors
///
/// Returns a `ValueRejection` carrying the field name and user-facing message.
pub fn validate_metric_value(
    metric: &MetricDefinition,
    raw_value: Option<&str>,
    is_null_return: bool,
) -> Result<(), ValueRejection> {
    if is_null_return && metric.null_return_allowed {
        return Ok(());
    }

    let value: &str = raw_value.map_or("", str::trim);
    if value.is_empty() {
        if metric.mandatory {
            return Err(ValueRejection::new(
                RejectionReason::MissingMandatory,
                format!("'{}' is mandatory and must be completed.", metric.name),
            ));
        }
        return Ok(());
    }

    let name: &str = &metric.name;
    match metric.data_kind() {
        DataKind::Number => {
            let number: i32 = value.parse().map_err(|_| {
                ValueRejection::new(
                    RejectionReason::NotWholeNumber,
                    format!("'{name}' must be a whole number."),
                )
            })?;
            check_range(name, Decimal::from(number), metric.criteria())
        }
        DataKind::Decimal => {
            let number: Decimal = parse_plain_decimal(value).ok_or_else(|| {
                ValueRejection::new(
                    RejectionReason::NotDecimal,
                    format!("'{name}' must be a decimal number."),
                )
            })?;
            check_range(name, number, metric.criteria())
        }
        DataKind::Percentage => {
            let number: Decimal = parse_plain_decimal(value).ok_or_else(|| {
                ValueRejection::new(
                    RejectionReason::NotNumber,
                    format!("'{name}' must be a number."),
                )
            })?;
            check_range(name, number, metric.criteria())
        }
        DataKind::Boolean => {
            if value == BOOLEAN_YES || value == BOOLEAN_NO {
                Ok(())
            } else {
                Err(ValueRejection::new(
                    RejectionReason::NotYesNo,
                    format!("'{name}' must be either '{BOOLEAN_YES}' or '{BOOLEAN_NO}'."),
                ))
            }
        }
        DataKind::SingleOption => {
            let ValidationCriteria::Options(options) = metric.criteria() else {
                return Ok(());
            };
            if options.iter().any(|option| option == value) {
                Ok(())
            } else {
                Err(ValueRejection::new(
                    RejectionReason::NotAnOption,
                    format!("'{name}' must be one of: {}", options.join(", ")),
                ))
            }
        }
        DataKind::MultipleOption => {
            let ValidationCriteria::Options(options) = metric.criteria() else {
                return Ok(());
            };
            let invalid: Option<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .find(|token| !options.iter().any(|option| option == *token));
            match invalid {
                None => Ok(()),
                Some(token) => Err(ValueRejection::new(
                    RejectionReason::InvalidOption {
                        token: token.to_string(),
                    },
                    format!(
                        "'{name}' contains invalid option: {token}. Valid options are: {}",
                        options.join(", ")
                    ),
                )),
            }
        }
        DataKind::Text => Ok(()),
    }
}

fn check_range(
    name: &str,
    value: Decimal,
    criteria: &ValidationCriteria,
) -> Result<(), ValueRejection> {
    let ValidationCriteria::Range(range) = criteria else {
        return Ok(());
    };

    for bound in range.bounds() {
        match *bound {
            RangeBound::Min(min) if value < min => {
                return Err(ValueRejection::new(
                    RejectionReason::BelowMinimum { min },
                    format!("'{name}' must be at least {min}."),
                ));
            }
            RangeBound::Max(max) if value > max => {
                return Err(ValueRejection::new(
                    RejectionReason::AboveMaximum { max },
                    format!("'{name}' must be no more than {max}."),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Validates a metric definition before it is stored.
///
/// # Errors
///
/// Returns an error if the unique identifier or name is blank, or if the
/// criteria text produced any issue for the metric's data kind.
pub fn validate_metric_definition(metric: &MetricDefinition) -> Result<(), DomainError> {
    if metric.unique_id.is_empty() || metric.unique_id.contains(char::is_whitespace) {
        return Err(DomainError::InvalidUniqueId(metric.unique_id.clone()));
    }

    if metric.name.is_empty() {
        return Err(DomainError::InvalidMetricName(String::from(
            "Metric name cannot be empty",
        )));
    }

    if !metric.criteria_issues().is_empty() {
        return Err(DomainError::InvalidCriteria {
            metric: metric.unique_id.clone(),
            issues: metric.criteria_issues().to_vec(),
        });
    }

    Ok(())
}
