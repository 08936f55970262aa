//! Schema creation and teardown.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::result::QueryResult;

const CREATE_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_accounts/up.sql");

const DROP_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_accounts/down.sql");

/// Creates the account, message, and follow tables.
///
/// # Errors
///
/// Returns the database error when any statement fails, including when the
/// tables already exist.
pub fn create_all(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(CREATE_SCHEMA_SQL)
}

/// Drops the account, message, and follow tables if they exist.
///
/// # Errors
///
/// Returns the database error when any statement fails.
pub fn drop_all(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(DROP_SCHEMA_SQL)
}

/// Drops and recreates every table, discarding all rows.
///
/// # Errors
///
/// Returns the database error when either phase fails.
pub fn reset_all(connection: &mut PgConnection) -> QueryResult<()> {
    drop_all(connection)?;
    create_all(connection)
}
