// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product assignment queries.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::ProductAssignmentData;
use crate::diesel_schema::product_assignments;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = product_assignments)]
struct AssignmentRow {
    assignment_id: i64,
    user_email: String,
    product_id: String,
    product_name: String,
    created_at: String,
}

backend_fn! {
/// Lists the products assigned to a reporter, ordered by product name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_assigned_products(
    conn: &mut _,
    user_email: &str,
) -> Result<Vec<ProductAssignmentData>, PersistenceError> {
    let rows: Vec<AssignmentRow> = product_assignments::table
        .filter(product_assignments::user_email.eq(user_email))
        .order((
            product_assignments::product_name.asc(),
            product_assignments::product_id.asc(),
        ))
        .select(AssignmentRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| ProductAssignmentData {
            assignment_id: row.assignment_id,
            user_email: row.user_email,
            product_id: row.product_id,
            product_name: row.product_name,
            created_at: row.created_at,
        })
        .collect())
}
}
