//! Frame invariant violations.

/// Errors raised when constructing or converting a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A column's length differs from the frame's row count.
    #[error("column '{column}' has length {found}, expected {expected}")]
    LengthMismatch {
        /// Name of the offending column.
        column: String,
        /// Row count established by the preceding columns.
        expected: usize,
        /// Actual length of the offending column.
        found: usize,
    },

    /// Two columns share the same name.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// The dataframe conversion failed.
    #[cfg(feature = "polars")]
    #[error("dataframe conversion failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
