// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Value ledger queries.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::MetricValueData;
use crate::diesel_schema::metric_values;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = metric_values)]
struct MetricValueRow {
    value_id: i64,
    metric_id: i64,
    product_id: String,
    reporting_period: String,
    value: Option<String>,
    comment: Option<String>,
    is_null_return: i32,
    is_submitted: i32,
    submitted_by: Option<String>,
    submitted_at: Option<String>,
    created_by: String,
    created_at: String,
    updated_at: String,
}

impl From<MetricValueRow> for MetricValueData {
    fn from(row: MetricValueRow) -> Self {
        Self {
            value_id: row.value_id,
            metric_id: row.metric_id,
            product_id: row.product_id,
            reporting_period: row.reporting_period,
            value: row.value,
            comment: row.comment,
            is_null_return: row.is_null_return != 0,
            is_submitted: row.is_submitted != 0,
            submitted_by: row.submitted_by,
            submitted_at: row.submitted_at,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

backend_fn! {
/// Loads the values recorded for the given products in one period.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `product_ids` - Products to load values for
/// * `period_key` - The period key, e.g. `2025-august`
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_values_for_products(
    conn: &mut _,
    product_ids: &[String],
    period_key: &str,
) -> Result<Vec<MetricValueData>, PersistenceError> {
    if product_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<MetricValueRow> = metric_values::table
        .filter(metric_values::product_id.eq_any(product_ids))
        .filter(metric_values::reporting_period.eq(period_key))
        .order((metric_values::product_id.asc(), metric_values::metric_id.asc()))
        .select(MetricValueRow::as_select())
        .load(conn)?;

    debug!(
        products = product_ids.len(),
        period = period_key,
        values = rows.len(),
        "Loaded metric values"
    );

    Ok(rows.into_iter().map(MetricValueData::from).collect())
}
}
