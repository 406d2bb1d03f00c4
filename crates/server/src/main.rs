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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod identity;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use fips_reporting_api::{
    ApiError, AssignProductRequest, AssignmentInfo, DeleteMetricResponse, ListAssignmentsResponse,
    ListMetricsResponse, MetricDefinitionRequest, MetricInfo, MetricMutationResponse,
    MonthOverviewResponse, ProductPerformanceResponse, SaveMetricValueRequest,
    SaveMetricValueResponse, SubmitProductReturnResponse, SubmitReturnRequest,
    SubmitReturnResponse, UnassignProductRequest, UnassignProductResponse, assign_product,
    create_metric, delete_metric, disable_metric, enable_metric, get_metric, get_month_overview,
    get_product_performance, list_assigned_products, list_metrics, parse_reporting_period,
    save_metric_value, submit_product_return, submit_return, unassign_product, update_metric,
};
use fips_reporting_domain::ReportingPeriod;
use fips_reporting_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;

use crate::identity::Caller;

/// FIPS Reporting Server - HTTP server for monthly performance returns
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL` connection URL. Takes precedence over `--database`.
    #[cfg(feature = "mysql")]
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameters for listing assignments.
#[derive(Debug, Deserialize)]
struct ListAssignmentsQuery {
    /// Whose assignments to list. Defaults to the caller.
    user_email: Option<String>,
}

/// Query parameters for GET `/metrics`.
#[derive(Debug, Deserialize)]
struct ListMetricsQuery {
    /// Only list metrics reporters currently answer.
    #[serde(default)]
    enabled_only: bool,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    error: bool,
    message: String,
    /// The offending input field, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    status: StatusCode,
    message: String,
    field: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            field: self.field,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let field: Option<String> = match &err {
            ApiError::InvalidInput { field, .. } => Some(field.clone()),
            _ => None,
        };
        Self {
            status,
            message: err.to_string(),
            field,
        }
    }
}

fn period_from_path(year: i32, month: &str) -> Result<ReportingPeriod, HttpError> {
    parse_reporting_period(year, month).map_err(HttpError::from)
}

// ============================================================================
// Metric Administration
// ============================================================================

/// Handler for GET `/metrics`.
async fn handle_list_metrics(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListMetricsQuery>,
    Caller(actor): Caller,
) -> Result<Json<ListMetricsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListMetricsResponse =
        list_metrics(&mut persistence, query.enabled_only, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/metrics`.
async fn handle_create_metric(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<MetricDefinitionRequest>,
) -> Result<Json<MetricMutationResponse>, HttpError> {
    info!(
        user = %actor.email,
        unique_id = %req.unique_id,
        "Handling create_metric request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: MetricMutationResponse = create_metric(&mut persistence, req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/metrics/{metric_id}`.
async fn handle_get_metric(
    AxumState(app_state): AxumState<AppState>,
    Path(metric_id): Path<i64>,
    Caller(actor): Caller,
) -> Result<Json<MetricInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MetricInfo = get_metric(&mut persistence, metric_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/metrics/{metric_id}`.
async fn handle_update_metric(
    AxumState(app_state): AxumState<AppState>,
    Path(metric_id): Path<i64>,
    Caller(actor): Caller,
    Json(req): Json<MetricDefinitionRequest>,
) -> Result<Json<MetricMutationResponse>, HttpError> {
    info!(user = %actor.email, metric_id, "Handling update_metric request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MetricMutationResponse = update_metric(&mut persistence, metric_id, req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/metrics/{metric_id}`.
async fn handle_delete_metric(
    AxumState(app_state): AxumState<AppState>,
    Path(metric_id): Path<i64>,
    Caller(actor): Caller,
) -> Result<Json<DeleteMetricResponse>, HttpError> {
    info!(user = %actor.email, metric_id, "Handling delete_metric request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteMetricResponse = delete_metric(&mut persistence, metric_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/metrics/{metric_id}/enable`.
async fn handle_enable_metric(
    AxumState(app_state): AxumState<AppState>,
    Path(metric_id): Path<i64>,
    Caller(actor): Caller,
) -> Result<Json<MetricMutationResponse>, HttpError> {
    info!(user = %actor.email, metric_id, "Handling enable_metric request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MetricMutationResponse = enable_metric(&mut persistence, metric_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/metrics/{metric_id}/disable`.
async fn handle_disable_metric(
    AxumState(app_state): AxumState<AppState>,
    Path(metric_id): Path<i64>,
    Caller(actor): Caller,
) -> Result<Json<MetricMutationResponse>, HttpError> {
    info!(user = %actor.email, metric_id, "Handling disable_metric request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MetricMutationResponse = disable_metric(&mut persistence, metric_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Product Assignments
// ============================================================================

/// Handler for GET `/assignments`.
async fn handle_list_assignments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListAssignmentsQuery>,
    Caller(actor): Caller,
) -> Result<Json<ListAssignmentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListAssignmentsResponse =
        list_assigned_products(&mut persistence, query.user_email.as_deref(), &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments`.
async fn handle_assign_product(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<AssignProductRequest>,
) -> Result<Json<AssignmentInfo>, HttpError> {
    info!(
        user = %actor.email,
        reporter = %req.user_email,
        product = %req.product_id,
        "Handling assign_product request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AssignmentInfo = assign_product(&mut persistence, &req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/assignments`.
async fn handle_unassign_product(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<UnassignProductRequest>,
) -> Result<Json<UnassignProductResponse>, HttpError> {
    info!(
        user = %actor.email,
        reporter = %req.user_email,
        product = %req.product_id,
        "Handling unassign_product request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: UnassignProductResponse = unassign_product(&mut persistence, &req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Reporting
// ============================================================================

/// Handler for GET `/reporting/{year}/{month}`.
///
/// Due-date status is evaluated against today's UTC date.
async fn handle_month_overview(
    AxumState(app_state): AxumState<AppState>,
    Path((year, month)): Path<(i32, String)>,
    Caller(actor): Caller,
) -> Result<Json<MonthOverviewResponse>, HttpError> {
    let period: ReportingPeriod = period_from_path(year, &month)?;
    let today: time::Date = OffsetDateTime::now_utc().date();

    let mut persistence = app_state.persistence.lock().await;
    let response: MonthOverviewResponse =
        get_month_overview(&mut persistence, period, &actor, today)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/reporting/{year}/{month}/service/{fips_id}`.
async fn handle_product_performance(
    AxumState(app_state): AxumState<AppState>,
    Path((year, month, fips_id)): Path<(i32, String, String)>,
    Caller(actor): Caller,
) -> Result<Json<ProductPerformanceResponse>, HttpError> {
    let period: ReportingPeriod = period_from_path(year, &month)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ProductPerformanceResponse =
        get_product_performance(&mut persistence, period, &fips_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reporting/{year}/{month}/service/{fips_id}/metrics/{metric_id}`.
async fn handle_save_metric_value(
    AxumState(app_state): AxumState<AppState>,
    Path((year, month, fips_id, metric_id)): Path<(i32, String, String, i64)>,
    Caller(actor): Caller,
    Json(req): Json<SaveMetricValueRequest>,
) -> Result<Json<SaveMetricValueResponse>, HttpError> {
    let period: ReportingPeriod = period_from_path(year, &month)?;
    info!(
        user = %actor.email,
        period = %period,
        product = %fips_id,
        metric_id,
        "Handling save_metric_value request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SaveMetricValueResponse =
        save_metric_value(&mut persistence, period, &fips_id, metric_id, req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reporting/{year}/{month}/service/{fips_id}/submit`.
async fn handle_submit_product_return(
    AxumState(app_state): AxumState<AppState>,
    Path((year, month, fips_id)): Path<(i32, String, String)>,
    Caller(actor): Caller,
) -> Result<Json<SubmitProductReturnResponse>, HttpError> {
    let period: ReportingPeriod = period_from_path(year, &month)?;
    info!(
        user = %actor.email,
        period = %period,
        product = %fips_id,
        "Handling submit_product_return request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitProductReturnResponse =
        submit_product_return(&mut persistence, period, &fips_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reporting/{year}/{month}/submit`.
async fn handle_submit_return(
    AxumState(app_state): AxumState<AppState>,
    Path((year, month)): Path<(i32, String)>,
    Caller(actor): Caller,
    Json(req): Json<SubmitReturnRequest>,
) -> Result<Json<SubmitReturnResponse>, HttpError> {
    let period: ReportingPeriod = period_from_path(year, &month)?;
    info!(user = %actor.email, period = %period, "Handling submit_return request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitReturnResponse = submit_return(&mut persistence, period, req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(handle_list_metrics).post(handle_create_metric))
        .route(
            "/metrics/{metric_id}",
            get(handle_get_metric)
                .put(handle_update_metric)
                .delete(handle_delete_metric),
        )
        .route("/metrics/{metric_id}/enable", post(handle_enable_metric))
        .route("/metrics/{metric_id}/disable", post(handle_disable_metric))
        .route(
            "/assignments",
            get(handle_list_assignments)
                .post(handle_assign_product)
                .delete(handle_unassign_product),
        )
        .route("/reporting/{year}/{month}", get(handle_month_overview))
        .route("/reporting/{year}/{month}/submit", post(handle_submit_return))
        .route(
            "/reporting/{year}/{month}/service/{fips_id}",
            get(handle_product_performance),
        )
        .route(
            "/reporting/{year}/{month}/service/{fips_id}/submit",
            post(handle_submit_product_return),
        )
        .route(
            "/reporting/{year}/{month}/service/{fips_id}/metrics/{metric_id}",
            post(handle_save_metric_value),
        )
        .with_state(app_state)
}

fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    #[cfg(feature = "mysql")]
    {
        if let Some(url) = &args.mysql_url {
            info!("Using MySQL database");
            return Persistence::new_with_mysql(url);
        }
    }

    if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing FIPS Reporting Server");

    let persistence: Persistence = open_persistence(&args)?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
