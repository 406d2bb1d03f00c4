// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission record queries.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::SubmissionRecordData;
use crate::diesel_schema::submission_records;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = submission_records)]
struct SubmissionRow {
    submission_id: i64,
    user_email: String,
    reporting_period: String,
    status: String,
    submitted_by: String,
    submitted_at: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

backend_fn! {
/// Loads the reporter's submission record for a period.
///
/// At most one exists per (reporter, period).
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the reporter
/// has not submitted for the period.
pub fn get_submission_record(
    conn: &mut _,
    user_email: &str,
    period_key: &str,
) -> Result<Option<SubmissionRecordData>, PersistenceError> {
    let row: Option<SubmissionRow> = submission_records::table
        .filter(submission_records::user_email.eq(user_email))
        .filter(submission_records::reporting_period.eq(period_key))
        .select(SubmissionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| SubmissionRecordData {
        submission_id: row.submission_id,
        user_email: row.user_email,
        reporting_period: row.reporting_period,
        status: row.status,
        submitted_by: row.submitted_by,
        submitted_at: row.submitted_at,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
}
