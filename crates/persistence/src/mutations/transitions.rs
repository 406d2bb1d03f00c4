// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes the outcome of a core command.
//!
//! These dispatch to other backend-specific functions, so they are written
//! out per backend instead of through `backend_fn!`.

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use fips_reporting::Transition;
use tracing::debug;

use crate::data_models::PersistedTransition;
use crate::error::PersistenceError;
use crate::product_keys;

use super::metric_values::{mark_product_submitted_sqlite, upsert_metric_value_sqlite};
use super::submissions::submit_return_sqlite;
#[cfg(feature = "mysql")]
use super::{
    metric_values::{mark_product_submitted_mysql, upsert_metric_value_mysql},
    submissions::submit_return_mysql,
};

/// Persists a transition - `SQLite` version.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn persist_transition_sqlite(
    conn: &mut SqliteConnection,
    transition: &Transition,
    now: &str,
) -> Result<PersistedTransition, PersistenceError> {
    let persisted: PersistedTransition = match transition {
        Transition::ValueRecorded(write) => PersistedTransition::ValueRecorded {
            value_id: upsert_metric_value_sqlite(conn, write, now)?,
        },
        Transition::ProductSubmitted {
            product_id,
            period,
            submitted_by,
        } => PersistedTransition::ProductSubmitted {
            rows_submitted: mark_product_submitted_sqlite(
                conn,
                product_id.value(),
                &period.key(),
                submitted_by.value(),
                now,
            )?,
        },
        Transition::ReturnSubmitted {
            products,
            period,
            submitted_by,
            notes,
            ..
        } => {
            let (submission_id, rows_submitted) = submit_return_sqlite(
                conn,
                submitted_by.value(),
                &product_keys(products),
                &period.key(),
                submitted_by.value(),
                notes.as_deref(),
                now,
            )?;
            PersistedTransition::ReturnSubmitted {
                submission_id,
                rows_submitted,
            }
        }
    };

    debug!(?persisted, "Persisted transition");
    Ok(persisted)
}

/// Persists a transition - `MySQL` version.
///
/// # Errors
///
/// Returns an error if persistence fails.
#[cfg(feature = "mysql")]
pub fn persist_transition_mysql(
    conn: &mut MysqlConnection,
    transition: &Transition,
    now: &str,
) -> Result<PersistedTransition, PersistenceError> {
    let persisted: PersistedTransition = match transition {
        Transition::ValueRecorded(write) => PersistedTransition::ValueRecorded {
            value_id: upsert_metric_value_mysql(conn, write, now)?,
        },
        Transition::ProductSubmitted {
            product_id,
            period,
            submitted_by,
        } => PersistedTransition::ProductSubmitted {
            rows_submitted: mark_product_submitted_mysql(
                conn,
                product_id.value(),
                &period.key(),
                submitted_by.value(),
                now,
            )?,
        },
        Transition::ReturnSubmitted {
            products,
            period,
            submitted_by,
            notes,
            ..
        } => {
            let (submission_id, rows_submitted) = submit_return_mysql(
                conn,
                submitted_by.value(),
                &product_keys(products),
                &period.key(),
                submitted_by.value(),
                notes.as_deref(),
                now,
            )?;
            PersistedTransition::ReturnSubmitted {
                submission_id,
                rows_submitted,
            }
        }
    };

    debug!(?persisted, "Persisted transition");
    Ok(persisted)
}
