//! Lossless reshaping into a `polars` dataframe.

use polars::prelude::{Column as PlColumn, DataFrame, NamedFrom, Series};

use crate::data::ColumnData;
use crate::error::FrameError;
use crate::frame::ColumnarFrame;

impl ColumnarFrame {
    /// Reshape this frame into a `polars` [`DataFrame`].
    ///
    /// Pure and lossless: column order, row order, types and nulls carry
    /// over unchanged.
    ///
    /// # Errors
    ///
    /// [`FrameError::Polars`] when the dataframe rejects the columns.
    pub fn into_dataframe(self) -> Result<DataFrame, FrameError> {
        let columns: Vec<PlColumn> = self
            .into_columns()
            .into_iter()
            .map(|column| {
                let (name, data) = column.into_parts();
                PlColumn::from(series_from(&name, data))
            })
            .collect();
        DataFrame::new(columns).map_err(FrameError::from)
    }
}

fn series_from(name: &str, data: ColumnData) -> Series {
    match data {
        ColumnData::UInt8(v) => Series::new(name.into(), v),
        ColumnData::UInt8Nullable(v) => Series::new(name.into(), v),
        ColumnData::UInt16(v) => Series::new(name.into(), v),
        ColumnData::UInt16Nullable(v) => Series::new(name.into(), v),
        ColumnData::UInt32(v) => Series::new(name.into(), v),
        ColumnData::UInt32Nullable(v) => Series::new(name.into(), v),
        ColumnData::UInt64(v) => Series::new(name.into(), v),
        ColumnData::UInt64Nullable(v) => Series::new(name.into(), v),
        ColumnData::Int8(v) => Series::new(name.into(), v),
        ColumnData::Int8Nullable(v) => Series::new(name.into(), v),
        ColumnData::Int16(v) => Series::new(name.into(), v),
        ColumnData::Int16Nullable(v) => Series::new(name.into(), v),
        ColumnData::Int32(v) => Series::new(name.into(), v),
        ColumnData::Int32Nullable(v) => Series::new(name.into(), v),
        ColumnData::Int64(v) => Series::new(name.into(), v),
        ColumnData::Int64Nullable(v) => Series::new(name.into(), v),
        ColumnData::Float32(v) => Series::new(name.into(), v),
        ColumnData::Float32Nullable(v) => Series::new(name.into(), v),
        ColumnData::Float64(v) => Series::new(name.into(), v),
        ColumnData::Float64Nullable(v) => Series::new(name.into(), v),
        ColumnData::Text(v) => Series::new(name.into(), v),
        ColumnData::TextNullable(v) => Series::new(name.into(), v),
        ColumnData::Date(v) => Series::new(name.into(), v),
        ColumnData::DateNullable(v) => Series::new(name.into(), v),
        ColumnData::DateTime(v) => Series::new(name.into(), v),
        ColumnData::DateTimeNullable(v) => Series::new(name.into(), v),
    }
}
