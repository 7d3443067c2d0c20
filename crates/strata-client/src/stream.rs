//! Lazy result handles and their materialization.

use serde_json::Value as Json;
use strata_frame::{Column, ColumnData, ColumnType, ColumnarFrame};

use crate::error::{ClientError, MaterializeError};
use crate::protocol;

/// Lazy handle to the rows produced by one query execution.
///
/// Carries the declared column names and types and yields rows in server
/// order. The handle is single-consumer and single-use: the row iterator
/// makes exactly one pass, and [`materialize`](Self::materialize) consumes
/// the handle.
#[derive(Debug)]
pub struct ResultStream {
    names: Vec<String>,
    types: Vec<ColumnType>,
    rows: std::vec::IntoIter<Vec<Json>>,
}

impl ResultStream {
    /// Build a handle from declared columns and raw rows.
    ///
    /// Rows are JSON cell arrays as produced by the wire format; decoding
    /// against the declared types happens during materialization.
    #[must_use]
    pub fn from_rows(columns: Vec<(String, ColumnType)>, rows: Vec<Vec<Json>>) -> Self {
        let (names, types) = columns.into_iter().unzip();
        Self {
            names,
            types,
            rows: rows.into_iter(),
        }
    }

    /// Declared column names, in server order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Declared column types, aligned with [`column_names`](Self::column_names).
    #[must_use]
    pub fn column_types(&self) -> &[ColumnType] {
        &self.types
    }

    /// Number of declared columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    /// Drain the remaining rows into a [`ColumnarFrame`].
    ///
    /// Row order and declared column order are preserved. A zero-row (or
    /// already exhausted) handle yields a frame with every declared column
    /// present and empty.
    ///
    /// # Errors
    ///
    /// [`MaterializeError::RowArity`] when a row's value count differs
    /// from the declared column count, [`MaterializeError::Value`] when a
    /// cell does not fit its column's declared type. Both name the
    /// offending row; no partial frame is returned.
    pub fn materialize(self) -> Result<ColumnarFrame, ClientError> {
        let Self { names, types, rows } = self;
        let expected = names.len();
        let mut builders: Vec<ColumnData> = types.iter().map(ColumnData::new).collect();

        for (row, cells) in rows.enumerate() {
            if cells.len() != expected {
                return Err(MaterializeError::RowArity {
                    row,
                    expected,
                    found: cells.len(),
                }
                .into());
            }
            for (index, cell) in cells.iter().enumerate() {
                let mismatch = || MaterializeError::Value {
                    row,
                    column: names[index].clone(),
                    expected: types[index],
                };
                let value = protocol::decode_value(&types[index], cell).ok_or_else(mismatch)?;
                if builders[index].push(value).is_err() {
                    return Err(mismatch().into());
                }
            }
        }

        let columns = names
            .into_iter()
            .zip(builders)
            .map(|(name, data)| Column::new(name, data))
            .collect();
        ColumnarFrame::try_new(columns).map_err(|e| MaterializeError::from(e).into())
    }
}

impl Iterator for ResultStream {
    type Item = Vec<Json>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}
