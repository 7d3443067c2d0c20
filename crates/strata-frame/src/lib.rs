//! Typed columnar frames for analytical query results.
//!
//! A [`ColumnarFrame`] is data laid out as independent per-column sequences
//! of equal length, as opposed to row-major records. Columns keep their
//! construction order and are stored in typed vectors ([`ColumnData`]), one
//! plain and one nullable variant per supported scalar kind.
//!
//! With the `polars` feature enabled, a frame can be reshaped losslessly
//! into a `polars` `DataFrame`.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod data;
#[cfg(feature = "polars")]
mod dataframe;
mod error;
mod frame;

pub use data::{ColumnData, ColumnType, TypeKind, Value};
pub use error::FrameError;
pub use frame::{Column, ColumnarFrame};
