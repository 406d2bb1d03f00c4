// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Only what Diesel's DSL cannot express lives here: connecting, running
//! the embedded migrations, PRAGMA/system-variable checks and last insert id
//! lookups.
//!
//! - `sqlite`: always compiled; used by tests and single-node deployments
//! - `mysql`: `MySQL`/`MariaDB`, compiled with the `mysql` cargo feature
//!
//! Reporting queries and mutations live in `queries/` and `mutations/` and
//! are written once for both backends via `backend_fn!`.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod sqlite;

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// Backend helpers callable from inside `backend_fn!` bodies.
pub trait PersistenceBackend: Connection {
    /// Returns the id assigned by the most recent insert on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Confirms that foreign keys are enforced, so deleting a metric
    /// cascades to its values.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

#[cfg(feature = "mysql")]
impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
