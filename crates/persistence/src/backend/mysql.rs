// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `MySQL`/`MariaDB` connection setup and helpers.
//!
//! Compiled only with the `mysql` feature. The schema in
//! `migrations_mysql/` mirrors the `SQLite` one using `AUTO_INCREMENT`,
//! `VARCHAR` keys and `InnoDB` tables.

use diesel::dsl::sql;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Embedded `MySQL` migrations.
pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

#[derive(QueryableByName)]
struct ForeignKeyCheck {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

/// Returns `LAST_INSERT_ID()` for this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut MysqlConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(conn)?)
}

/// Connects and runs pending migrations.
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    info!("Initializing MySQL database");

    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    info!("Running MySQL database migrations");
    conn.run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Fails unless `@@foreign_key_checks` is on.
///
/// # Errors
///
/// Returns an error if the check cannot be read or enforcement is off.
pub fn verify_foreign_key_enforcement(conn: &mut MysqlConnection) -> Result<(), PersistenceError> {
    let check: ForeignKeyCheck = diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks")
        .get_result(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("Failed to verify foreign key enforcement: {e}"))
        })?;

    if check.fk_checks == 1 {
        info!("MySQL foreign key enforcement is enabled");
        Ok(())
    } else {
        Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
    }
}
