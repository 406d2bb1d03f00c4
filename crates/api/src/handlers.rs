// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler authorizes the caller, translates the request into domain
//! types, runs the pure core transition where one exists, persists the
//! result and builds a response. Reporting state is always reloaded from
//! storage; nothing is cached between requests.

use std::str::FromStr;

use fips_reporting::{Command, ProductReturn, ReportingContext, Transition, apply};
use fips_reporting_domain::{
    DEFAULT_PHASES, DataKind, DomainError, DueDateStatus, MetricDefinition, MetricProgress,
    PerformanceStatus, ProductId, ProgressStatus, RagStatus, ReportingPeriod, ServiceCompletion,
    UserEmail, validate_metric_definition,
};
use fips_reporting_persistence::{
    MetricValueData, PersistedTransition, Persistence, PersistenceError, ProductAssignmentData,
    SubmissionRecordData,
};
use time::Date;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssignProductRequest, AssignmentInfo, DeleteMetricResponse, ListAssignmentsResponse,
    ListMetricsResponse, MetricDefinitionRequest, MetricInfo, MetricMutationResponse,
    MonthOverviewResponse, ProductMetricView, ProductOverview, ProductPerformanceResponse,
    SaveMetricValueRequest, SaveMetricValueResponse, SubmitProductReturnResponse,
    SubmitReturnRequest, SubmitReturnResponse, UnassignProductRequest, UnassignProductResponse,
};

/// Parses the `{year}/{month}` part of a reporting URL.
///
/// The month may be a full name, a three-letter abbreviation or a number.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unsupported year or unknown month.
pub fn parse_reporting_period(year: i32, month: &str) -> Result<ReportingPeriod, ApiError> {
    ReportingPeriod::from_parts(year, month).map_err(translate_domain_error)
}

// ============================================================================
// Metric Administration
// ============================================================================

fn build_definition(request: MetricDefinitionRequest) -> Result<MetricDefinition, ApiError> {
    let data_kind: DataKind =
        DataKind::from_str(&request.data_kind).map_err(translate_domain_error)?;

    let mut metric: MetricDefinition =
        MetricDefinition::new(&request.unique_id, &request.name, data_kind)
            .with_criteria(request.validation_criteria.as_deref());
    metric.description = request
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    metric.category = request
        .category
        .map(|c| c.trim().to_string())
        .unwrap_or_default();
    metric.mandatory = request.mandatory;
    metric.null_return_allowed = request.null_return_allowed;
    metric.applicable_phases = request
        .applicable_phases
        .unwrap_or_else(|| DEFAULT_PHASES.iter().map(|p| (*p).to_string()).collect());
    metric.enabled = request.enabled.unwrap_or(true);

    validate_metric_definition(&metric).map_err(translate_domain_error)?;
    Ok(metric)
}

fn ensure_unique_id_available(
    persistence: &mut Persistence,
    unique_id: &str,
    current: Option<i64>,
) -> Result<(), ApiError> {
    let existing: Option<MetricDefinition> = persistence
        .get_metric_by_unique_id(unique_id)
        .map_err(|e| translate_persistence_error("look up metric", e))?;

    match existing {
        Some(existing) if existing.metric_id != current => Err(translate_domain_error(
            DomainError::DuplicateMetricUniqueId(unique_id.to_string()),
        )),
        _ => Ok(()),
    }
}

fn load_metric(persistence: &mut Persistence, metric_id: i64) -> Result<MetricDefinition, ApiError> {
    persistence
        .get_metric(metric_id)
        .map_err(|e| translate_persistence_error("load metric", e))?
        .ok_or_else(|| translate_domain_error(DomainError::MetricNotFound(metric_id)))
}

/// Creates a metric definition.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The data kind is unknown or the criteria do not fit it
/// - The unique id is blank or already used
pub fn create_metric(
    persistence: &mut Persistence,
    request: MetricDefinitionRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MetricMutationResponse, ApiError> {
    AuthorizationService::authorize_manage_metrics(authenticated_actor)?;

    let metric: MetricDefinition = build_definition(request)?;
    ensure_unique_id_available(persistence, &metric.unique_id, None)?;

    let metric_id: i64 = persistence
        .create_metric(&metric, &authenticated_actor.email)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => translate_domain_error(
                DomainError::DuplicateMetricUniqueId(metric.unique_id.clone()),
            ),
            other => translate_persistence_error("create metric", other),
        })?;

    let stored: MetricDefinition = load_metric(persistence, metric_id)?;
    info!(metric_id, unique_id = %stored.unique_id, "Metric created");

    Ok(MetricMutationResponse {
        message: format!("Metric '{}' created", stored.unique_id),
        metric: MetricInfo::from_definition(&stored),
    })
}

/// Replaces a metric definition.
///
/// Values already recorded against the metric are kept.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the metric does not
/// exist, or the new definition is invalid.
pub fn update_metric(
    persistence: &mut Persistence,
    metric_id: i64,
    request: MetricDefinitionRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MetricMutationResponse, ApiError> {
    AuthorizationService::authorize_manage_metrics(authenticated_actor)?;

    load_metric(persistence, metric_id)?;
    let metric: MetricDefinition = build_definition(request)?;
    ensure_unique_id_available(persistence, &metric.unique_id, Some(metric_id))?;

    persistence
        .update_metric(metric_id, &metric, &authenticated_actor.email)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => translate_domain_error(
                DomainError::DuplicateMetricUniqueId(metric.unique_id.clone()),
            ),
            other => translate_persistence_error("update metric", other),
        })?;

    let stored: MetricDefinition = load_metric(persistence, metric_id)?;
    info!(metric_id, "Metric updated");

    Ok(MetricMutationResponse {
        message: format!("Metric '{}' updated", stored.unique_id),
        metric: MetricInfo::from_definition(&stored),
    })
}

fn set_metric_enabled(
    persistence: &mut Persistence,
    metric_id: i64,
    enabled: bool,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MetricMutationResponse, ApiError> {
    AuthorizationService::authorize_manage_metrics(authenticated_actor)?;

    load_metric(persistence, metric_id)?;
    persistence
        .set_metric_enabled(metric_id, enabled, &authenticated_actor.email)
        .map_err(|e| translate_persistence_error("change metric availability", e))?;

    let stored: MetricDefinition = load_metric(persistence, metric_id)?;
    let verb: &str = if enabled { "enabled" } else { "disabled" };

    Ok(MetricMutationResponse {
        message: format!("Metric '{}' {verb}", stored.unique_id),
        metric: MetricInfo::from_definition(&stored),
    })
}

/// Makes a metric part of every return again.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the metric does not exist.
pub fn enable_metric(
    persistence: &mut Persistence,
    metric_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MetricMutationResponse, ApiError> {
    set_metric_enabled(persistence, metric_id, true, authenticated_actor)
}

/// Removes a metric from returns without deleting its history.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the metric does not exist.
pub fn disable_metric(
    persistence: &mut Persistence,
    metric_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MetricMutationResponse, ApiError> {
    set_metric_enabled(persistence, metric_id, false, authenticated_actor)
}

/// Deletes a metric and every value recorded against it.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the metric does not exist.
pub fn delete_metric(
    persistence: &mut Persistence,
    metric_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteMetricResponse, ApiError> {
    AuthorizationService::authorize_manage_metrics(authenticated_actor)?;

    let metric: MetricDefinition = load_metric(persistence, metric_id)?;
    persistence
        .delete_metric(metric_id)
        .map_err(|e| translate_persistence_error("delete metric", e))?;

    info!(metric_id, unique_id = %metric.unique_id, "Metric deleted");
    Ok(DeleteMetricResponse {
        metric_id,
        message: format!("Metric '{}' deleted", metric.unique_id),
    })
}

/// Lists metric definitions, optionally only the enabled ones.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the metrics cannot be loaded.
pub fn list_metrics(
    persistence: &mut Persistence,
    enabled_only: bool,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListMetricsResponse, ApiError> {
    AuthorizationService::authorize_manage_metrics(authenticated_actor)?;

    let listed: Result<Vec<MetricDefinition>, PersistenceError> = if enabled_only {
        persistence.list_enabled_metrics()
    } else {
        persistence.list_metrics()
    };
    let metrics: Vec<MetricDefinition> =
        listed.map_err(|e| translate_persistence_error("list metrics", e))?;

    Ok(ListMetricsResponse {
        metrics: metrics.iter().map(MetricInfo::from_definition).collect(),
    })
}

/// Returns one metric definition.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the metric does not exist.
pub fn get_metric(
    persistence: &mut Persistence,
    metric_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MetricInfo, ApiError> {
    AuthorizationService::authorize_manage_metrics(authenticated_actor)?;
    let metric: MetricDefinition = load_metric(persistence, metric_id)?;
    Ok(MetricInfo::from_definition(&metric))
}

// ============================================================================
// Product Assignments
// ============================================================================

fn parse_user_email(raw: &str) -> Result<UserEmail, ApiError> {
    UserEmail::new(raw).map_err(translate_domain_error)
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::new(raw).map_err(translate_domain_error)
}

fn assignment_info(data: ProductAssignmentData) -> AssignmentInfo {
    AssignmentInfo {
        assignment_id: data.assignment_id,
        user_email: data.user_email,
        product_id: data.product_id,
        product_name: data.product_name,
    }
}

/// Makes a reporter responsible for a product.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the input is invalid.
pub fn assign_product(
    persistence: &mut Persistence,
    request: &AssignProductRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AssignmentInfo, ApiError> {
    AuthorizationService::authorize_manage_assignments(authenticated_actor)?;

    let reporter: UserEmail = parse_user_email(&request.user_email)?;
    let product_id: ProductId = parse_product_id(&request.product_id)?;
    let product_name: &str = request.product_name.trim();
    if product_name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("product_name"),
            message: String::from("Product name cannot be empty"),
        });
    }

    let assignment_id: i64 = persistence
        .assign_product(&reporter, &product_id, product_name)
        .map_err(|e| translate_persistence_error("assign product", e))?;

    info!(assignment_id, reporter = %reporter, product = %product_id, "Product assigned");
    Ok(AssignmentInfo {
        assignment_id,
        user_email: reporter.value().to_string(),
        product_id: product_id.value().to_string(),
        product_name: product_name.to_string(),
    })
}

/// Removes a product from a reporter. Recorded values are kept.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the product was not assigned.
pub fn unassign_product(
    persistence: &mut Persistence,
    request: &UnassignProductRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<UnassignProductResponse, ApiError> {
    AuthorizationService::authorize_manage_assignments(authenticated_actor)?;

    let reporter: UserEmail = parse_user_email(&request.user_email)?;
    let product_id: ProductId = parse_product_id(&request.product_id)?;

    persistence
        .unassign_product(&reporter, &product_id)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Assignment"),
                message: format!("Product '{product_id}' is not assigned to {reporter}"),
            },
            other => translate_persistence_error("unassign product", other),
        })?;

    Ok(UnassignProductResponse {
        message: format!("Product '{product_id}' unassigned from {reporter}"),
        user_email: reporter.value().to_string(),
        product_id: product_id.value().to_string(),
    })
}

/// Lists a reporter's products. Defaults to the caller.
///
/// # Errors
///
/// Returns an error if a reporter asks about someone else.
pub fn list_assigned_products(
    persistence: &mut Persistence,
    user_email: Option<&str>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListAssignmentsResponse, ApiError> {
    let reporter: UserEmail = match user_email {
        Some(raw) => parse_user_email(raw)?,
        None => authenticated_actor.email.clone(),
    };
    AuthorizationService::authorize_view_assignments(authenticated_actor, &reporter)?;

    let products: Vec<ProductAssignmentData> = persistence
        .list_assigned_products(&reporter)
        .map_err(|e| translate_persistence_error("list assigned products", e))?;

    Ok(ListAssignmentsResponse {
        user_email: reporter.value().to_string(),
        products: products.into_iter().map(assignment_info).collect(),
    })
}

// ============================================================================
// Reporting
// ============================================================================

/// A reporter's return for one period as loaded from storage.
pub struct LoadedReturn {
    pub context: ReportingContext,
    /// Every stored value row for the assigned products.
    pub values: Vec<MetricValueData>,
    pub submission: Option<SubmissionRecordData>,
}

/// Loads everything needed to derive a reporter's statuses for a period.
///
/// # Errors
///
/// Returns an error if storage cannot be read.
pub fn load_reporting_context(
    persistence: &mut Persistence,
    reporter: &UserEmail,
    period: ReportingPeriod,
) -> Result<LoadedReturn, ApiError> {
    let metrics: Vec<MetricDefinition> = persistence
        .list_metrics()
        .map_err(|e| translate_persistence_error("load metrics", e))?;
    let assignments: Vec<ProductAssignmentData> = persistence
        .list_assigned_products(reporter)
        .map_err(|e| translate_persistence_error("load assignments", e))?;
    let product_ids: Vec<ProductId> = assignments
        .iter()
        .map(|a| parse_product_id(&a.product_id))
        .collect::<Result<Vec<ProductId>, ApiError>>()?;
    let values: Vec<MetricValueData> = persistence
        .list_values(&product_ids, &period)
        .map_err(|e| translate_persistence_error("load metric values", e))?;
    let submission: Option<SubmissionRecordData> = persistence
        .get_submission_record(reporter, &period)
        .map_err(|e| translate_persistence_error("load submission record", e))?;

    let mut context: ReportingContext = ReportingContext::new(reporter.clone(), period, metrics);
    context.products = assignments
        .into_iter()
        .zip(product_ids)
        .map(|(assignment, product_id)| {
            let own: Vec<&MetricValueData> = values
                .iter()
                .filter(|v| v.product_id == assignment.product_id)
                .collect();
            ProductReturn {
                product_id,
                product_name: assignment.product_name,
                submitted: own.iter().any(|v| v.is_submitted),
                values: own.iter().map(|v| v.to_recorded_value()).collect(),
            }
        })
        .collect();
    context.return_submitted = submission.is_some();

    debug!(
        reporter = %reporter,
        period = %period,
        products = context.products.len(),
        values = values.len(),
        "Loaded reporting context"
    );

    Ok(LoadedReturn {
        context,
        values,
        submission,
    })
}

fn not_assigned(product_id: &ProductId, reporter: &UserEmail) -> ApiError {
    translate_domain_error(DomainError::ProductNotAssigned {
        product: product_id.clone(),
        user: reporter.value().to_string(),
    })
}

fn product_overview(context: &ReportingContext, product: &ProductReturn) -> ProductOverview {
    let progress: MetricProgress = context.progress(product);
    let rag: RagStatus = progress.rag();
    ProductOverview {
        product_id: product.product_id.value().to_string(),
        product_name: product.product_name.clone(),
        completed: progress.completed,
        total: progress.total,
        performance_status: progress.status().as_str().to_string(),
        submission_status: context.product_submission_status(product).as_str().to_string(),
        rag_status: rag.as_str().to_string(),
        rag_description: rag.description().to_string(),
    }
}

/// Saves one metric value for one of the caller's products.
///
/// # Errors
///
/// Returns an error if the product is not assigned to the caller, the
/// metric is unknown or disabled, or the value fails validation. A rejected
/// value carries the validator's message unchanged.
pub fn save_metric_value(
    persistence: &mut Persistence,
    period: ReportingPeriod,
    fips_id: &str,
    metric_id: i64,
    request: SaveMetricValueRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SaveMetricValueResponse, ApiError> {
    let product_id: ProductId = parse_product_id(fips_id)?;
    let loaded: LoadedReturn =
        load_reporting_context(persistence, &authenticated_actor.email, period)?;

    let command: Command = Command::SaveMetricValue {
        product_id: product_id.clone(),
        metric_id,
        value: request.value,
        comment: request.comment,
        is_null_return: request.is_null_return,
    };
    let transition: Transition = apply(&loaded.context, command).map_err(translate_core_error)?;

    let value_id: i64 = match persistence
        .persist_transition(&transition)
        .map_err(|e| translate_persistence_error("save metric value", e))?
    {
        PersistedTransition::ValueRecorded { value_id } => value_id,
        other => {
            return Err(ApiError::Internal {
                message: format!("Unexpected result while saving a value: {other:?}"),
            });
        }
    };

    let reloaded: LoadedReturn =
        load_reporting_context(persistence, &authenticated_actor.email, period)?;
    let status: PerformanceStatus = reloaded
        .context
        .product(&product_id)
        .map_or(PerformanceStatus::NotStarted, |p| {
            reloaded.context.performance_status(p)
        });

    info!(
        value_id,
        metric_id,
        product = %product_id,
        period = %period,
        reporter = %authenticated_actor.email,
        "Metric value saved"
    );

    Ok(SaveMetricValueResponse {
        value_id,
        metric_id,
        product_id: product_id.value().to_string(),
        reporting_period: period.key(),
        performance_status: status.as_str().to_string(),
        message: String::from("Value saved"),
    })
}

/// Shows every enabled metric for one product with what has been recorded.
///
/// # Errors
///
/// Returns an error if the product is not assigned to the caller.
pub fn get_product_performance(
    persistence: &mut Persistence,
    period: ReportingPeriod,
    fips_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ProductPerformanceResponse, ApiError> {
    let product_id: ProductId = parse_product_id(fips_id)?;
    let loaded: LoadedReturn =
        load_reporting_context(persistence, &authenticated_actor.email, period)?;
    let context: &ReportingContext = &loaded.context;
    let product: &ProductReturn = context
        .product(&product_id)
        .ok_or_else(|| not_assigned(&product_id, &authenticated_actor.email))?;

    let metrics: Vec<ProductMetricView> = context
        .metrics
        .iter()
        .filter(|metric| metric.enabled)
        .map(|metric| {
            let stored: Option<&MetricValueData> = metric.metric_id.and_then(|id| {
                loaded
                    .values
                    .iter()
                    .find(|v| v.metric_id == id && v.product_id == product_id.value())
            });
            ProductMetricView {
                metric: MetricInfo::from_definition(metric),
                value: stored.and_then(|v| v.value.clone()),
                comment: stored.and_then(|v| v.comment.clone()),
                is_null_return: stored.is_some_and(|v| v.is_null_return),
                is_submitted: stored.is_some_and(|v| v.is_submitted),
                answered: stored.is_some_and(|v| v.to_recorded_value().is_answered()),
            }
        })
        .collect();

    let overview: ProductOverview = product_overview(context, product);

    Ok(ProductPerformanceResponse {
        product_id: overview.product_id,
        product_name: overview.product_name,
        reporting_period: period.key(),
        period_name: period.display_name(),
        metrics,
        completed: overview.completed,
        total: overview.total,
        performance_status: overview.performance_status,
        submission_status: overview.submission_status,
        rag_status: overview.rag_status,
        rag_description: overview.rag_description,
    })
}

/// Summarises the caller's whole return for a month.
///
/// # Arguments
///
/// * `today` - The date used for the due-date status
///
/// # Errors
///
/// Returns an error if storage cannot be read or the due date overflows.
pub fn get_month_overview(
    persistence: &mut Persistence,
    period: ReportingPeriod,
    authenticated_actor: &AuthenticatedActor,
    today: Date,
) -> Result<MonthOverviewResponse, ApiError> {
    let loaded: LoadedReturn =
        load_reporting_context(persistence, &authenticated_actor.email, period)?;
    let context: &ReportingContext = &loaded.context;

    let completion: ServiceCompletion = context.completion();
    let due_date: Date = period.due_date().map_err(translate_domain_error)?;
    let due_date_status: DueDateStatus = DueDateStatus::evaluate(today, due_date);

    Ok(MonthOverviewResponse {
        user_email: authenticated_actor.email.value().to_string(),
        reporting_period: period.key(),
        period_name: period.display_name(),
        products: context
            .products
            .iter()
            .map(|product| product_overview(context, product))
            .collect(),
        completed_products: completion.completed,
        total_products: completion.total,
        submission_status: context.submission_status().as_str().to_string(),
        return_state: context.return_state().as_str().to_string(),
        due_date: due_date.to_string(),
        due_date_status: due_date_status.as_str().to_string(),
        progress_status: ProgressStatus::from_due_date(due_date_status)
            .as_str()
            .to_string(),
        submitted_at: loaded.submission.as_ref().map(|s| s.submitted_at.clone()),
        submitted_by: loaded.submission.as_ref().map(|s| s.submitted_by.clone()),
    })
}

/// Submits one complete product.
///
/// # Errors
///
/// Returns an error if the product is not assigned to the caller or not
/// every enabled metric is answered.
pub fn submit_product_return(
    persistence: &mut Persistence,
    period: ReportingPeriod,
    fips_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SubmitProductReturnResponse, ApiError> {
    let product_id: ProductId = parse_product_id(fips_id)?;
    let loaded: LoadedReturn =
        load_reporting_context(persistence, &authenticated_actor.email, period)?;

    let transition: Transition = apply(
        &loaded.context,
        Command::SubmitProductReturn {
            product_id: product_id.clone(),
        },
    )
    .map_err(translate_core_error)?;

    let rows_submitted: usize = match persistence
        .persist_transition(&transition)
        .map_err(|e| translate_persistence_error("submit product return", e))?
    {
        PersistedTransition::ProductSubmitted { rows_submitted } => rows_submitted,
        other => {
            return Err(ApiError::Internal {
                message: format!("Unexpected result while submitting a product: {other:?}"),
            });
        }
    };

    info!(product = %product_id, period = %period, rows_submitted, "Product return submitted");
    Ok(SubmitProductReturnResponse {
        message: format!(
            "Return for '{product_id}' submitted for {}",
            period.display_name()
        ),
        product_id: product_id.value().to_string(),
        reporting_period: period.key(),
        rows_submitted,
    })
}

/// Submits the caller's whole return for a month.
///
/// Submitting again after a successful submission refreshes the record.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` if no products are assigned or
/// any assigned product is incomplete.
pub fn submit_return(
    persistence: &mut Persistence,
    period: ReportingPeriod,
    request: SubmitReturnRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SubmitReturnResponse, ApiError> {
    let loaded: LoadedReturn =
        load_reporting_context(persistence, &authenticated_actor.email, period)?;

    let transition: Transition = apply(
        &loaded.context,
        Command::SubmitReturn {
            notes: request.notes,
        },
    )
    .map_err(translate_core_error)?;

    let (products_submitted, resubmission): (usize, bool) = match &transition {
        Transition::ReturnSubmitted {
            products,
            resubmission,
            ..
        } => (products.len(), *resubmission),
        _ => (0, false),
    };

    let (submission_id, rows_submitted): (i64, usize) = match persistence
        .persist_transition(&transition)
        .map_err(|e| translate_persistence_error("submit return", e))?
    {
        PersistedTransition::ReturnSubmitted {
            submission_id,
            rows_submitted,
        } => (submission_id, rows_submitted),
        other => {
            return Err(ApiError::Internal {
                message: format!("Unexpected result while submitting a return: {other:?}"),
            });
        }
    };

    info!(
        submission_id,
        reporter = %authenticated_actor.email,
        period = %period,
        products_submitted,
        resubmission,
        "Return submitted"
    );

    Ok(SubmitReturnResponse {
        submission_id,
        reporting_period: period.key(),
        products_submitted,
        rows_submitted,
        resubmission,
        message: format!("Return for {} submitted", period.display_name()),
    })
}
