// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Value ledger mutations.
//!
//! The ledger holds at most one row per (metric, product, period). Saving a
//! value for an existing key updates that row in place and keeps its
//! submitted flag.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use fips_reporting::MetricValueWrite;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::metric_values;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts or updates the value for the write's (metric, product, period).
///
/// Runs in a transaction. The insert is tried first; when the unique index
/// on the key rejects it, because the row already exists or a concurrent
/// writer got there first, the existing row is updated instead. The
/// submitted flag and `created_by` of an existing row are left alone.
///
/// # Returns
///
/// The id of the row that now holds the value.
///
/// # Errors
///
/// Returns an error if the write fails, including a foreign key failure
/// when the metric does not exist.
pub fn upsert_metric_value(
    conn: &mut _,
    write: &MetricValueWrite,
    now: &str,
) -> Result<i64, PersistenceError> {
    let period_key: String = write.period.key();
    let product_id: &str = write.product_id.value();
    let is_null_return: i32 = i32::from(write.is_null_return);

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let inserted: Result<usize, PersistenceError> = diesel::insert_into(metric_values::table)
            .values((
                metric_values::metric_id.eq(write.metric_id),
                metric_values::product_id.eq(product_id),
                metric_values::reporting_period.eq(&period_key),
                metric_values::value.eq(write.value.as_deref()),
                metric_values::comment.eq(write.comment.as_deref()),
                metric_values::is_null_return.eq(is_null_return),
                metric_values::is_submitted.eq(0),
                metric_values::created_by.eq(write.saved_by.value()),
                metric_values::created_at.eq(now),
                metric_values::updated_at.eq(now),
            ))
            .execute(conn)
            .map_err(PersistenceError::from);

        match inserted {
            Ok(_) => {
                let value_id: i64 = conn.get_last_insert_rowid()?;
                debug!(value_id, metric_id = write.metric_id, "Inserted metric value");
                Ok(value_id)
            }
            Err(PersistenceError::UniqueViolation(_)) => {
                diesel::update(
                    metric_values::table
                        .filter(metric_values::metric_id.eq(write.metric_id))
                        .filter(metric_values::product_id.eq(product_id))
                        .filter(metric_values::reporting_period.eq(&period_key)),
                )
                .set((
                    metric_values::value.eq(write.value.as_deref()),
                    metric_values::comment.eq(write.comment.as_deref()),
                    metric_values::is_null_return.eq(is_null_return),
                    metric_values::updated_at.eq(now),
                ))
                .execute(conn)?;

                let value_id: i64 = metric_values::table
                    .filter(metric_values::metric_id.eq(write.metric_id))
                    .filter(metric_values::product_id.eq(product_id))
                    .filter(metric_values::reporting_period.eq(&period_key))
                    .select(metric_values::value_id)
                    .first(conn)?;
                debug!(value_id, metric_id = write.metric_id, "Key exists, updated metric value");
                Ok(value_id)
            }
            Err(e) => Err(e),
        }
    })
}
}

backend_fn! {
/// Marks every value a product holds for the period as submitted.
///
/// # Returns
///
/// The number of value rows marked.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_product_submitted(
    conn: &mut _,
    product_id: &str,
    period_key: &str,
    submitted_by: &str,
    now: &str,
) -> Result<usize, PersistenceError> {
    let marked: usize = diesel::update(
        metric_values::table
            .filter(metric_values::product_id.eq(product_id))
            .filter(metric_values::reporting_period.eq(period_key)),
    )
    .set((
        metric_values::is_submitted.eq(1),
        metric_values::submitted_by.eq(Some(submitted_by)),
        metric_values::submitted_at.eq(Some(now)),
        metric_values::updated_at.eq(now),
    ))
    .execute(conn)?;

    info!(product_id, period = period_key, marked, "Marked product values submitted");
    Ok(marked)
}
}
