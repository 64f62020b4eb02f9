//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a row in the transaction table.
///
/// IDs are assigned by SQLite's `AUTOINCREMENT`, so they strictly increase and
/// are never handed out twice, even after the row they referred to is deleted.
pub type TransactionId = DatabaseId;
