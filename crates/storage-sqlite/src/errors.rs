//! Storage-specific error types for SQLite operations.

use thiserror::Error;

/// Errors surfaced by the store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying SQLite call failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A table or column name is not a usable SQL identifier.
    ///
    /// Identifiers are interpolated into DDL, so anything outside
    /// `[A-Za-z_][A-Za-z0-9_]*` is rejected up front.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A table without columns cannot be written.
    #[error("cannot write a table with no columns")]
    EmptyTable,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_display() {
        let error = StoreError::InvalidIdentifier("drop table;--".to_string());
        assert_eq!(format!("{}", error), "invalid identifier: \"drop table;--\"");
    }
}
