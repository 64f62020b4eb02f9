//! Implements a struct that holds the state of the REST server.

use crate::{Error, timezone::local_today, transaction::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// Where the transactions are kept.
    pub store: TransactionStore,
}

impl AppState {
    /// Create a new [AppState] backed by `store`.
    ///
    /// This function will initialize the store if that has not happened yet.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a known timezone or the
    /// store cannot be initialized.
    pub fn new(store: TransactionStore, local_timezone: &str) -> Result<Self, Error> {
        local_today(local_timezone)?;
        store.initialize()?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            store,
        })
    }
}
