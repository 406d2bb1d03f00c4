// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Metric definition queries.

use std::str::FromStr;

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use fips_reporting_domain::{DataKind, MetricDefinition};
use tracing::{debug, warn};

use crate::diesel_schema::performance_metrics;
use crate::error::PersistenceError;

/// Diesel Queryable struct for metric rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = performance_metrics)]
pub(crate) struct MetricRow {
    metric_id: i64,
    unique_id: String,
    name: String,
    description: Option<String>,
    category: String,
    data_kind: String,
    mandatory: i32,
    null_return_allowed: i32,
    validation_criteria: Option<String>,
    applicable_phases: String,
    enabled: i32,
}

/// Rebuilds a metric definition from its stored row.
///
/// Stored criteria are re-parsed for the stored kind. Problems in them are
/// logged, not rejected, so an old definition never blocks a reporter.
///
/// # Errors
///
/// Returns `PersistenceError::ReconstructionError` for an unknown data kind
/// and `PersistenceError::SerializationError` for unreadable phases.
pub(crate) fn metric_from_row(row: MetricRow) -> Result<MetricDefinition, PersistenceError> {
    let data_kind: DataKind = DataKind::from_str(&row.data_kind).map_err(|e| {
        PersistenceError::ReconstructionError(format!("metric {}: {e}", row.metric_id))
    })?;
    let applicable_phases: Vec<String> = serde_json::from_str(&row.applicable_phases)?;

    let mut metric: MetricDefinition = MetricDefinition::new(&row.unique_id, &row.name, data_kind)
        .with_criteria(row.validation_criteria.as_deref());
    metric.metric_id = Some(row.metric_id);
    metric.description = row.description;
    metric.category = row.category;
    metric.mandatory = row.mandatory != 0;
    metric.null_return_allowed = row.null_return_allowed != 0;
    metric.applicable_phases = applicable_phases;
    metric.enabled = row.enabled != 0;

    for issue in metric.criteria_issues() {
        warn!(
            metric_id = row.metric_id,
            unique_id = %metric.unique_id,
            "Stored validation criteria problem: {}",
            issue
        );
    }

    Ok(metric)
}

/// Rebuilds every readable row. An unreadable row is logged and left out so
/// one bad definition cannot take down every reporter's return.
fn rows_to_metrics(rows: Vec<MetricRow>) -> Vec<MetricDefinition> {
    rows.into_iter()
        .filter_map(|row| {
            let metric_id: i64 = row.metric_id;
            metric_from_row(row)
                .map_err(|e| warn!(metric_id, error = %e, "Skipping unreadable metric definition"))
                .ok()
        })
        .collect()
}

backend_fn! {
/// Lists every readable metric, enabled or not, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_metrics(conn: &mut _) -> Result<Vec<MetricDefinition>, PersistenceError> {
    let rows: Vec<MetricRow> = performance_metrics::table
        .order((performance_metrics::name.asc(), performance_metrics::metric_id.asc()))
        .select(MetricRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded metric definitions");
    Ok(rows_to_metrics(rows))
}
}

backend_fn! {
/// Lists readable enabled metrics ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_enabled_metrics(conn: &mut _) -> Result<Vec<MetricDefinition>, PersistenceError> {
    let rows: Vec<MetricRow> = performance_metrics::table
        .filter(performance_metrics::enabled.ne(0))
        .order((performance_metrics::name.asc(), performance_metrics::metric_id.asc()))
        .select(MetricRow::as_select())
        .load(conn)?;

    Ok(rows_to_metrics(rows))
}
}

backend_fn! {
/// Looks up a metric by its database id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
/// Returns `Ok(None)` if no such metric.
pub fn get_metric_by_id(
    conn: &mut _,
    metric_id: i64,
) -> Result<Option<MetricDefinition>, PersistenceError> {
    let row: Option<MetricRow> = performance_metrics::table
        .filter(performance_metrics::metric_id.eq(metric_id))
        .select(MetricRow::as_select())
        .first(conn)
        .optional()?;

    row.map(metric_from_row).transpose()
}
}

backend_fn! {
/// Looks up a metric by its unique id (e.g. `PM-001`).
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if no such metric.
pub fn get_metric_by_unique_id(
    conn: &mut _,
    unique_id: &str,
) -> Result<Option<MetricDefinition>, PersistenceError> {
    let row: Option<MetricRow> = performance_metrics::table
        .filter(performance_metrics::unique_id.eq(unique_id.trim()))
        .select(MetricRow::as_select())
        .first(conn)
        .optional()?;

    row.map(metric_from_row).transpose()
}
}
