// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Metric definition mutations.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use fips_reporting_domain::MetricDefinition;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::performance_metrics;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a new metric definition.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `metric` - The definition to store; its `metric_id` is ignored
/// * `actor` - Email of the admin creating it
/// * `now` - RFC 3339 timestamp for the audit columns
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the unique id is taken.
pub fn create_metric(
    conn: &mut _,
    metric: &MetricDefinition,
    actor: &str,
    now: &str,
) -> Result<i64, PersistenceError> {
    let phases: String = serde_json::to_string(&metric.applicable_phases)?;

    diesel::insert_into(performance_metrics::table)
        .values((
            performance_metrics::unique_id.eq(&metric.unique_id),
            performance_metrics::name.eq(&metric.name),
            performance_metrics::description.eq(metric.description.as_deref()),
            performance_metrics::category.eq(&metric.category),
            performance_metrics::data_kind.eq(metric.data_kind().as_str()),
            performance_metrics::mandatory.eq(i32::from(metric.mandatory)),
            performance_metrics::null_return_allowed.eq(i32::from(metric.null_return_allowed)),
            performance_metrics::validation_criteria.eq(metric.raw_criteria()),
            performance_metrics::applicable_phases.eq(&phases),
            performance_metrics::enabled.eq(i32::from(metric.enabled)),
            performance_metrics::created_at.eq(now),
            performance_metrics::created_by.eq(actor),
            performance_metrics::updated_at.eq(now),
            performance_metrics::updated_by.eq(actor),
        ))
        .execute(conn)?;

    let metric_id: i64 = conn.get_last_insert_rowid()?;
    info!(metric_id, unique_id = %metric.unique_id, actor, "Created metric");

    Ok(metric_id)
}
}

backend_fn! {
/// Replaces every editable column of an existing metric.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the metric does not exist and
/// `PersistenceError::UniqueViolation` if the new unique id is taken.
pub fn update_metric(
    conn: &mut _,
    metric_id: i64,
    metric: &MetricDefinition,
    actor: &str,
    now: &str,
) -> Result<(), PersistenceError> {
    let phases: String = serde_json::to_string(&metric.applicable_phases)?;

    let updated: usize = diesel::update(performance_metrics::table)
        .filter(performance_metrics::metric_id.eq(metric_id))
        .set((
            performance_metrics::unique_id.eq(&metric.unique_id),
            performance_metrics::name.eq(&metric.name),
            performance_metrics::description.eq(metric.description.as_deref()),
            performance_metrics::category.eq(&metric.category),
            performance_metrics::data_kind.eq(metric.data_kind().as_str()),
            performance_metrics::mandatory.eq(i32::from(metric.mandatory)),
            performance_metrics::null_return_allowed.eq(i32::from(metric.null_return_allowed)),
            performance_metrics::validation_criteria.eq(metric.raw_criteria()),
            performance_metrics::applicable_phases.eq(&phases),
            performance_metrics::enabled.eq(i32::from(metric.enabled)),
            performance_metrics::updated_at.eq(now),
            performance_metrics::updated_by.eq(actor),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("metric {metric_id}")));
    }

    info!(metric_id, actor, "Updated metric");
    Ok(())
}
}

backend_fn! {
/// Turns a metric on or off for reporting.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the metric does not exist.
pub fn set_metric_enabled(
    conn: &mut _,
    metric_id: i64,
    enabled: bool,
    actor: &str,
    now: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(performance_metrics::table)
        .filter(performance_metrics::metric_id.eq(metric_id))
        .set((
            performance_metrics::enabled.eq(i32::from(enabled)),
            performance_metrics::updated_at.eq(now),
            performance_metrics::updated_by.eq(actor),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("metric {metric_id}")));
    }

    info!(metric_id, enabled, actor, "Changed metric availability");
    Ok(())
}
}

backend_fn! {
/// Deletes a metric. Its recorded values go with it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the metric does not exist.
pub fn delete_metric(conn: &mut _, metric_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        performance_metrics::table.filter(performance_metrics::metric_id.eq(metric_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("metric {metric_id}")));
    }

    info!(metric_id, "Deleted metric");
    Ok(())
}
}
