use time::Date;

use crate::{
    database_id::TransactionId,
    transaction::{NewTransaction, TransactionStore, TransactionType},
};

pub(crate) fn test_store() -> TransactionStore {
    TransactionStore::open_in_memory().expect("Could not create test store")
}

#[track_caller]
pub(crate) fn must_add(
    store: &TransactionStore,
    transaction_type: TransactionType,
    amount: f64,
    category: &str,
    date: Date,
) -> TransactionId {
    let transaction = NewTransaction::new(transaction_type, amount, category, "", date)
        .expect("Could not create test transaction");

    store
        .add(transaction)
        .expect("Could not add test transaction")
}
