//! A SQLite backed store for transactions.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock},
};

use rusqlite::{Connection, OptionalExtension};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    db,
    transaction::{
        NewTransaction, Transaction, TransactionPatch, core::map_transaction_row,
        validation::check_transaction,
    },
};

/// Stores transactions in a SQLite database.
///
/// The store must be initialized with [TransactionStore::initialize] before
/// writing to it. Clones share the same connection and initialization state.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    connection: Arc<Mutex<Connection>>,
    initialized: Arc<OnceLock<()>>,
}

impl TransactionStore {
    /// Create a store for `connection` without touching the database.
    pub fn new(connection: Connection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
            initialized: Arc::new(OnceLock::new()),
        }
    }

    /// Open the SQLite database at `path`, creating it if needed, and initialize it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created or upgraded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let store = Self::new(Connection::open(path)?);
        store.initialize()?;

        Ok(store)
    }

    /// Create an initialized store backed by an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the database cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        let store = Self::new(Connection::open_in_memory()?);
        store.initialize()?;

        Ok(store)
    }

    /// Create or upgrade the database schema.
    ///
    /// Only the first successful call does any work. The connection lock is
    /// held while migrating so concurrent callers wait for the first one.
    ///
    /// # Errors
    /// Returns an error if the lock is poisoned or the schema cannot be
    /// created or upgraded, in which case a later call will try again.
    pub fn initialize(&self) -> Result<(), Error> {
        if self.is_initialized() {
            return Ok(());
        }

        let connection = self.lock()?;

        // Another caller may have finished while this one waited for the lock.
        if self.is_initialized() {
            return Ok(());
        }

        db::initialize(&connection)?;
        let _ = self.initialized.set(());
        tracing::debug!("transaction store initialized");

        Ok(())
    }

    /// Whether [TransactionStore::initialize] has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized.get().is_some()
    }

    /// Add a new transaction, returning the ID the store assigned to it.
    ///
    /// The creation time is set to the current time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StoreNotInitialized] if the store has not been initialized,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if the write fails, in which case nothing is written.
    pub fn add(&self, transaction: NewTransaction) -> Result<TransactionId, Error> {
        self.ensure_initialized()?;
        let mut connection = self.lock()?;
        let sql_transaction = connection.transaction()?;

        let id = sql_transaction.query_row(
            "INSERT INTO \"transaction\" (type, amount, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
            (
                transaction.transaction_type,
                transaction.amount,
                &transaction.category,
                &transaction.description,
                transaction.date,
                OffsetDateTime::now_utc(),
            ),
            |row| row.get(0),
        )?;

        sql_transaction.commit()?;
        tracing::debug!("added transaction {id}");

        Ok(id)
    }

    /// Get every transaction, most recent `date` first.
    ///
    /// Transactions on the same date are listed in the order they were added.
    /// An uninitialized store has no transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error.
    pub fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        if !self.is_initialized() {
            return Ok(Vec::new());
        }

        self.lock()?
            .prepare(
                "SELECT id, type, amount, category, description, date, created_at
                 FROM \"transaction\"
                 ORDER BY date DESC, id ASC",
            )?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Get the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored transaction,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        if !self.is_initialized() {
            return Err(Error::NotFound);
        }

        let connection = self.lock()?;
        select_transaction(id, &connection)?.ok_or(Error::NotFound)
    }

    /// Merge `patch` onto the transaction with `id` and return the result.
    ///
    /// The read, merge and write happen in one SQL transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored transaction,
    /// - [Error::Validation] if the merged transaction breaks a record
    ///   invariant, e.g. the type changed but the category did not,
    /// - [Error::StoreNotInitialized] if the store has not been initialized,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn update(&self, id: TransactionId, patch: TransactionPatch) -> Result<Transaction, Error> {
        self.ensure_initialized()?;
        let mut connection = self.lock()?;
        let sql_transaction = connection.transaction()?;

        let existing = select_transaction(id, &sql_transaction)?.ok_or(Error::NotFound)?;
        let updated = patch.apply(existing);
        check_transaction(&updated)?;

        sql_transaction.execute(
            "UPDATE \"transaction\"
             SET type = ?1, amount = ?2, category = ?3, description = ?4, date = ?5
             WHERE id = ?6",
            (
                updated.transaction_type,
                updated.amount,
                &updated.category,
                &updated.description,
                updated.date,
                id,
            ),
        )?;

        sql_transaction.commit()?;
        tracing::debug!("updated transaction {id}");

        Ok(updated)
    }

    /// Delete the transaction with `id`.
    ///
    /// Deleting a transaction that does not exist is not an error. Returns
    /// whether a transaction was removed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StoreNotInitialized] if the store has not been initialized,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error.
    pub fn delete(&self, id: TransactionId) -> Result<bool, Error> {
        self.ensure_initialized()?;
        let mut connection = self.lock()?;
        let sql_transaction = connection.transaction()?;

        let rows_affected =
            sql_transaction.execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

        sql_transaction.commit()?;

        if rows_affected == 0 {
            tracing::debug!("transaction {id} was already deleted");
        }

        Ok(rows_affected > 0)
    }

    /// Get the total number of stored transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error.
    pub fn count(&self) -> Result<u32, Error> {
        if !self.is_initialized() {
            return Ok(0);
        }

        self.lock()?
            .query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| {
                row.get(0)
            })
            .map_err(Error::from)
    }

    fn ensure_initialized(&self) -> Result<(), Error> {
        if self.is_initialized() {
            Ok(())
        } else {
            tracing::error!("tried to write to the transaction store before initializing it");
            Err(Error::StoreNotInitialized)
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

fn select_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    connection
        .query_row(
            "SELECT id, type, amount, category, description, date, created_at
             FROM \"transaction\"
             WHERE id = ?1",
            (id,),
            map_transaction_row,
        )
        .optional()
        .map_err(Error::from)
}
