//! Error types for connection, query and materialization failures.
//!
//! None of these are retried internally; re-executing a query is a caller
//! decision.

use strata_frame::{ColumnType, FrameError};

/// Errors raised while materializing a result stream into a frame.
///
/// All of these are contract violations in the upstream source, fatal to
/// the current materialization; no partial frame is returned.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    /// A row carried a different number of values than declared columns.
    #[error("row {row} has {found} values, expected {expected} columns")]
    RowArity {
        /// Zero-based index of the offending row.
        row: usize,
        /// Declared column count.
        expected: usize,
        /// Number of values the row actually carried.
        found: usize,
    },

    /// A cell could not be decoded as the column's declared type.
    #[error("row {row}, column '{column}': value does not fit declared type {expected}")]
    Value {
        /// Zero-based index of the offending row.
        row: usize,
        /// Name of the offending column.
        column: String,
        /// The column's declared type.
        expected: ColumnType,
    },

    /// The server declared a column type this client cannot represent.
    #[error("unsupported column type '{0}'")]
    UnsupportedColumnType(String),

    /// The materialized columns violated a frame invariant.
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Errors from connection and query operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The session is closed, the endpoint is unreachable, or the
    /// transport failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server rejected the query; carries the server's diagnostic
    /// message unmodified.
    #[error("query error: {0}")]
    Query(String),

    /// The result could not be materialized.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

impl ClientError {
    pub(crate) fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub(crate) fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Connection(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_frame::TypeKind;

    #[test]
    fn arity_error_names_the_row() {
        let err = MaterializeError::RowArity {
            row: 3,
            expected: 2,
            found: 5,
        };
        let s = err.to_string();
        assert!(s.contains("row 3"));
        assert!(s.contains("expected 2"));
    }

    #[test]
    fn value_error_names_row_and_column() {
        let err = MaterializeError::Value {
            row: 0,
            column: "col1".into(),
            expected: ColumnType::plain(TypeKind::UInt8),
        };
        let s = err.to_string();
        assert!(s.contains("row 0"));
        assert!(s.contains("col1"));
        assert!(s.contains("UInt8"));
    }

    #[test]
    fn query_error_keeps_the_diagnostic() {
        let err = ClientError::query("Code: 62. DB::Exception: Syntax error");
        assert!(err.to_string().contains("DB::Exception: Syntax error"));
    }
}
