// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Whole-return submission.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{metric_values, submission_records};
use crate::error::PersistenceError;

/// Status stored on a submission record.
pub const SUBMITTED_STATUS: &str = "Submitted";

backend_fn! {
/// Submits a reporter's return for a period.
///
/// In one transaction, marks every value of the listed products for the
/// period as submitted and creates or refreshes the reporter's submission
/// record. The record insert is tried first; a unique violation on
/// (user, period) means a record already exists, and it is refreshed in
/// place, keeping its id and updating who submitted, when and the notes.
///
/// # Returns
///
/// The submission record id and the number of value rows marked.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is committed in that case.
pub fn submit_return(
    conn: &mut _,
    user_email: &str,
    product_ids: &[String],
    period_key: &str,
    submitted_by: &str,
    notes: Option<&str>,
    now: &str,
) -> Result<(i64, usize), PersistenceError> {
    conn.transaction::<(i64, usize), PersistenceError, _>(|conn| {
        let marked: usize = if product_ids.is_empty() {
            0
        } else {
            diesel::update(
                metric_values::table
                    .filter(metric_values::product_id.eq_any(product_ids))
                    .filter(metric_values::reporting_period.eq(period_key)),
            )
            .set((
                metric_values::is_submitted.eq(1),
                metric_values::submitted_by.eq(Some(submitted_by)),
                metric_values::submitted_at.eq(Some(now)),
                metric_values::updated_at.eq(now),
            ))
            .execute(conn)?
        };

        let inserted: Result<usize, PersistenceError> =
            diesel::insert_into(submission_records::table)
                .values((
                    submission_records::user_email.eq(user_email),
                    submission_records::reporting_period.eq(period_key),
                    submission_records::status.eq(SUBMITTED_STATUS),
                    submission_records::submitted_by.eq(submitted_by),
                    submission_records::submitted_at.eq(now),
                    submission_records::notes.eq(notes),
                    submission_records::created_at.eq(now),
                    submission_records::updated_at.eq(now),
                ))
                .execute(conn)
                .map_err(PersistenceError::from);

        let (submission_id, resubmission): (i64, bool) = match inserted {
            Ok(_) => (conn.get_last_insert_rowid()?, false),
            Err(PersistenceError::UniqueViolation(_)) => {
                diesel::update(
                    submission_records::table
                        .filter(submission_records::user_email.eq(user_email))
                        .filter(submission_records::reporting_period.eq(period_key)),
                )
                .set((
                    submission_records::status.eq(SUBMITTED_STATUS),
                    submission_records::submitted_by.eq(submitted_by),
                    submission_records::submitted_at.eq(now),
                    submission_records::notes.eq(notes),
                    submission_records::updated_at.eq(now),
                ))
                .execute(conn)?;

                let submission_id: i64 = submission_records::table
                    .filter(submission_records::user_email.eq(user_email))
                    .filter(submission_records::reporting_period.eq(period_key))
                    .select(submission_records::submission_id)
                    .first(conn)?;
                (submission_id, true)
            }
            Err(e) => return Err(e),
        };

        info!(
            submission_id,
            user_email,
            period = period_key,
            products = product_ids.len(),
            marked,
            resubmission,
            "Return submitted"
        );

        Ok((submission_id, marked))
    })
}
}
