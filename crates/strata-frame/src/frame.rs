//! The columnar frame and its invariants.

use crate::data::{ColumnData, ColumnType};
use crate::error::FrameError;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column from a name and its storage.
    #[must_use]
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column's values.
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// The column's declared type.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    /// Consume into name and storage.
    #[must_use]
    pub fn into_parts(self) -> (String, ColumnData) {
        (self.name, self.data)
    }
}

/// A materialized columnar table.
///
/// Invariants, checked at construction:
/// - every column has the same length (the frame's row count);
/// - column names are unique.
///
/// Column order is preserved from the order of construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnarFrame {
    columns: Vec<Column>,
}

impl ColumnarFrame {
    /// Build a frame, validating the invariants.
    ///
    /// # Errors
    ///
    /// [`FrameError::LengthMismatch`] when a column's length differs from
    /// the first column's, [`FrameError::DuplicateColumn`] when a name
    /// repeats.
    pub fn try_new(columns: Vec<Column>) -> Result<Self, FrameError> {
        if let Some(first) = columns.first() {
            let expected = first.data.len();
            for column in &columns {
                if column.data.len() != expected {
                    return Err(FrameError::LengthMismatch {
                        column: column.name.clone(),
                        expected,
                        found: column.data.len(),
                    });
                }
            }
        }
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].iter().any(|c| c.name == column.name) {
                return Err(FrameError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// A frame with no columns and no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows; zero for a frame without columns.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names, in frame order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Look up a column's values by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(Column::data)
    }

    /// All columns, in frame order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consume into the columns, in frame order.
    #[must_use]
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
