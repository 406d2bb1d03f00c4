// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fips_reporting::CoreError;
use fips_reporting_domain::DomainError;
use fips_reporting_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller's identity could not be established.
    AuthenticationFailed { reason: String },
    /// The caller's role does not permit the action.
    Unauthorized {
        action: String,
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are the API contract; domain, core and persistence errors are
/// translated into them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    AuthenticationFailed {
        reason: String,
    },
    Unauthorized {
        action: String,
        required_role: String,
    },
    /// A reporting rule was violated.
    DomainRuleViolation {
        /// Stable name of the rule, e.g. `return_complete`.
        rule: String,
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The offending field.
        field: String,
        /// Shown to the user verbatim.
        message: String,
    },
    ResourceNotFound {
        resource_type: String,
        message: String,
    },
    Internal {
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { message, .. } => write!(f, "{message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::UnknownDataKind(_) => invalid("data_kind", message),
        DomainError::InvalidUserEmail(_) => invalid("user_email", message),
        DomainError::InvalidProductId(_) => invalid("product_id", message),
        DomainError::InvalidMetricName(_) => invalid("name", message),
        DomainError::InvalidUniqueId(_) => invalid("unique_id", message),
        DomainError::InvalidReportingYear(_) => invalid("year", message),
        DomainError::InvalidReportingMonth(_) => invalid("month", message),
        DomainError::InvalidReportingPeriodKey(_) => invalid("reporting_period", message),
        DomainError::DateArithmeticOverflow { .. } => invalid("date", message),
        DomainError::InvalidCriteria { .. } => invalid("validation_criteria", message),
        DomainError::DuplicateMetricUniqueId(_) => rule("unique_metric_id", message),
        DomainError::MetricNotFound(_) => not_found("Metric", message),
        DomainError::MetricDisabled(_) => rule("metric_enabled", message),
        DomainError::ProductNotAssigned { .. } => not_found("Product", message),
        DomainError::NoAssignedProducts { .. } => rule("products_assigned", message),
        DomainError::ProductIncomplete { .. } => rule("product_complete", message),
        DomainError::ReturnIncomplete { .. } => rule("return_complete", message),
    }
}

/// Translates a core error into an API error.
///
/// A rejected value keeps the validator's field and message unchanged.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ValueRejected(rejection) => ApiError::InvalidInput {
            field: rejection.field,
            message: rejection.message,
        },
    }
}

/// Translates a persistence failure, logging it.
///
/// Only a unique-index rejection is the caller's fault; anything else
/// becomes an internal error.
#[must_use]
pub fn translate_persistence_error(operation: &str, err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(what) => not_found("Record", what),
        PersistenceError::UniqueViolation(msg) => rule("unique", msg),
        other => {
            error!(operation, error = %other, "Persistence operation failed");
            ApiError::Internal {
                message: format!("Failed to {operation}: {other}"),
            }
        }
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}
