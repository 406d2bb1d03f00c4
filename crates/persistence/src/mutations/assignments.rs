// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product assignment mutations.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::product_assignments;
use crate::error::PersistenceError;

backend_fn! {
/// Assigns a product to a reporter.
///
/// Assigning an already assigned product refreshes its display name.
///
/// # Returns
///
/// The assignment id.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn assign_product(
    conn: &mut _,
    user_email: &str,
    product_id: &str,
    product_name: &str,
    now: &str,
) -> Result<i64, PersistenceError> {
    let existing: Option<i64> = product_assignments::table
        .filter(product_assignments::user_email.eq(user_email))
        .filter(product_assignments::product_id.eq(product_id))
        .select(product_assignments::assignment_id)
        .first(conn)
        .optional()?;

    if let Some(assignment_id) = existing {
        diesel::update(
            product_assignments::table
                .filter(product_assignments::assignment_id.eq(assignment_id)),
        )
        .set(product_assignments::product_name.eq(product_name))
        .execute(conn)?;
        return Ok(assignment_id);
    }

    diesel::insert_into(product_assignments::table)
        .values((
            product_assignments::user_email.eq(user_email),
            product_assignments::product_id.eq(product_id),
            product_assignments::product_name.eq(product_name),
            product_assignments::created_at.eq(now),
        ))
        .execute(conn)?;

    let assignment_id: i64 = conn.get_last_insert_rowid()?;
    info!(assignment_id, user_email, product_id, "Assigned product");
    Ok(assignment_id)
}
}

backend_fn! {
/// Removes a product from a reporter. Recorded values are kept.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the product was not assigned.
pub fn unassign_product(
    conn: &mut _,
    user_email: &str,
    product_id: &str,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        product_assignments::table
            .filter(product_assignments::user_email.eq(user_email))
            .filter(product_assignments::product_id.eq(product_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "assignment of {product_id} to {user_email}"
        )));
    }

    info!(user_email, product_id, "Unassigned product");
    Ok(())
}
}
