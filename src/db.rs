//! Schema creation and migration for the application database.
//!
//! The schema version is kept in SQLite's `user_version` pragma. Each entry in
//! [MIGRATIONS] upgrades the schema by one version and [initialize] applies the
//! ones the database has not seen yet.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::Error;

/// Ordered schema migrations, the entry at index `i` upgrades version `i` to `i + 1`.
const MIGRATIONS: [&str; 2] = [
    // 1: the transaction table and its secondary indices.
    "CREATE TABLE IF NOT EXISTS \"transaction\" (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK (type IN ('expense', 'income')),
        amount REAL NOT NULL CHECK (amount > 0),
        category TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);
    CREATE INDEX IF NOT EXISTS idx_transaction_type ON \"transaction\"(type);
    CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category);",
    // 2: covers the ordering used when listing all transactions.
    "CREATE INDEX IF NOT EXISTS idx_transaction_date_id ON \"transaction\"(date DESC, id ASC);",
];

/// The schema version after every migration has been applied.
pub const LATEST_SCHEMA_VERSION: i64 = MIGRATIONS.len() as i64;

/// Create or upgrade the tables for the domain models.
///
/// Safe to call on every start up: migrations that were already applied are
/// skipped and existing rows are kept. All pending migrations run inside one
/// exclusive transaction, so a failure leaves the database at its old version.
///
/// # Errors
/// Returns an:
/// - [Error::UnsupportedSchemaVersion] if the database was written by a newer
///   version of the application or has a negative version, e.g. it belongs to
///   another program,
/// - or [Error::SqlError] if a migration fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    let current_version = schema_version(&transaction)?;

    if current_version < 0 {
        tracing::error!("database schema version {current_version} is negative");
        return Err(Error::UnsupportedSchemaVersion(current_version));
    }

    if current_version > LATEST_SCHEMA_VERSION {
        tracing::error!(
            "database schema version {current_version} is newer than the latest supported version {LATEST_SCHEMA_VERSION}"
        );
        return Err(Error::UnsupportedSchemaVersion(current_version));
    }

    migrate(&transaction, current_version, LATEST_SCHEMA_VERSION)?;

    transaction.commit()?;

    Ok(())
}

/// Get the schema version stored in the database, zero for a new database.
pub fn schema_version(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(Error::from)
}

fn migrate(connection: &Connection, from: i64, to: i64) -> Result<(), Error> {
    for version in from..to {
        let next_version = version + 1;
        tracing::info!("migrating database schema from version {version} to {next_version}");

        let migration = usize::try_from(version)
            .ok()
            .and_then(|index| MIGRATIONS.get(index))
            .ok_or(Error::UnsupportedSchemaVersion(version))?;

        connection.execute_batch(migration)?;
        connection.execute_batch(&format!("PRAGMA user_version = {next_version}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::{LATEST_SCHEMA_VERSION, initialize, migrate, schema_version},
    };

    fn count_rows(connection: &Connection) -> i64 {
        connection
            .query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| row.get(0))
            .unwrap()
    }

    fn index_names(connection: &Connection) -> Vec<String> {
        connection
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'index' AND tbl_name = 'transaction' AND name LIKE 'idx_%'
                 ORDER BY name",
            )
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn creates_schema_on_new_database() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        assert_eq!(schema_version(&connection).unwrap(), LATEST_SCHEMA_VERSION);
        assert_eq!(
            index_names(&connection),
            vec![
                "idx_transaction_category",
                "idx_transaction_date",
                "idx_transaction_date_id",
                "idx_transaction_type",
            ]
        );
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute(
                "INSERT INTO \"transaction\" (type, amount, category, date, created_at)
                 VALUES ('expense', 1.0, 'Other', '2025-01-01', '2025-01-01 00:00:00Z')",
                (),
            )
            .unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();

        assert_eq!(count_rows(&connection), 1);
        assert_eq!(schema_version(&connection).unwrap(), LATEST_SCHEMA_VERSION);
    }

    #[test]
    fn upgrade_keeps_existing_rows() {
        let connection = Connection::open_in_memory().unwrap();
        migrate(&connection, 0, 1).unwrap();
        connection
            .execute(
                "INSERT INTO \"transaction\" (type, amount, category, date, created_at)
                 VALUES ('income', 10.0, 'Gift', '2024-12-25', '2024-12-25 00:00:00Z')",
                (),
            )
            .unwrap();
        assert_eq!(schema_version(&connection).unwrap(), 1);

        initialize(&connection).unwrap();

        assert_eq!(schema_version(&connection).unwrap(), LATEST_SCHEMA_VERSION);
        assert_eq!(count_rows(&connection), 1);
        assert!(index_names(&connection).contains(&"idx_transaction_date_id".to_owned()));
    }

    #[test]
    fn rejects_newer_schema() {
        let connection = Connection::open_in_memory().unwrap();
        let future_version = LATEST_SCHEMA_VERSION + 1;
        connection
            .execute_batch(&format!("PRAGMA user_version = {future_version}"))
            .unwrap();

        let result = initialize(&connection);

        assert_eq!(result, Err(Error::UnsupportedSchemaVersion(future_version)));
    }

    #[test]
    fn rejects_negative_schema_version() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute_batch("PRAGMA user_version = -1").unwrap();

        let result = initialize(&connection);

        assert_eq!(result, Err(Error::UnsupportedSchemaVersion(-1)));
        assert_eq!(schema_version(&connection).unwrap(), -1);
    }

    #[test]
    fn migrate_from_negative_version_is_an_error() {
        let connection = Connection::open_in_memory().unwrap();

        let result = migrate(&connection, -1, LATEST_SCHEMA_VERSION);

        assert_eq!(result, Err(Error::UnsupportedSchemaVersion(-1)));
    }

    #[test]
    fn table_rejects_invalid_rows() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let non_positive = connection.execute(
            "INSERT INTO \"transaction\" (type, amount, category, date, created_at)
             VALUES ('expense', 0.0, 'Other', '2025-01-01', '2025-01-01 00:00:00Z')",
            (),
        );
        let unknown_type = connection.execute(
            "INSERT INTO \"transaction\" (type, amount, category, date, created_at)
             VALUES ('refund', 1.0, 'Other', '2025-01-01', '2025-01-01 00:00:00Z')",
            (),
        );

        assert!(non_positive.is_err());
        assert!(unknown_type.is_err());
    }
}
